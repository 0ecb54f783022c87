use crate::ui::theme;
use chrono::Datelike;
use egui::{Color32, Pos2, Rect, Rounding, Sense, Shape, Stroke, Ui, Vec2};
use sprint_timeline::model::timeline::{bar_left, BAR_WIDTH_PERCENT};
use sprint_timeline::model::{Placement, DISPLAY_DATE};
use sprint_timeline::{Roster, SprintWindow, Task};

const ROW_HEIGHT: f32 = theme::ROW_HEIGHT;
const ROW_GAP: f32 = theme::ROW_GAP;
const HEADER_HEIGHT: f32 = theme::HEADER_HEIGHT;
const BAR_HEIGHT: f32 = theme::BAR_HEIGHT;

/// Gestures the timeline picked up this frame, applied by the app afterwards.
#[derive(Debug, Clone, Default)]
pub struct ChartInteraction {
    pub select: Option<String>,
    pub begin_drag: Option<String>,
    pub drop_day: Option<i64>,
    pub cancel_drag: bool,
    pub open_picker: Option<String>,
}

/// Render the sprint timeline (central panel).
pub fn show_timeline_chart(
    tasks: &[Task],
    window: SprintWindow,
    roster: &Roster,
    dragging: Option<&str>,
    selected: Option<&str>,
    ui: &mut Ui,
) -> ChartInteraction {
    let mut interaction = ChartInteraction::default();
    let available = ui.available_size();
    let chart_width = available.x.max(theme::TIMELINE_MIN_WIDTH);
    let chart_height =
        HEADER_HEIGHT + ROW_GAP + tasks.len() as f32 * (ROW_HEIGHT + ROW_GAP) + 40.0;

    egui::ScrollArea::both()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            let (response, painter) = ui.allocate_painter(
                Vec2::new(chart_width, chart_height.max(available.y)),
                Sense::hover(),
            );
            let canvas = response.rect;
            let origin = canvas.min;
            let day_count = window.day_count();
            let column_width = chart_width / day_count as f32;

            painter.rect_filled(canvas, 0.0, theme::BG_DARK);

            let pointer = ui.ctx().pointer_latest_pos();
            let hovered_column = pointer
                .filter(|p| canvas.contains(*p))
                .and_then(|p| window.column_at(((p.x - origin.x) / chart_width) as f64));

            // Highlight the drop target while a drag is in flight
            if dragging.is_some() {
                if let Some(column) = hovered_column {
                    let x = origin.x + column as f32 * column_width;
                    painter.rect_filled(
                        Rect::from_min_size(Pos2::new(x, origin.y), Vec2::new(column_width, canvas.height())),
                        0.0,
                        theme::BG_DROP_TARGET,
                    );
                }
            }

            draw_day_header(&painter, origin, window, column_width, canvas.height());

            if tasks.is_empty() {
                painter.text(
                    Pos2::new(canvas.center().x, origin.y + HEADER_HEIGHT + 40.0),
                    egui::Align2::CENTER_CENTER,
                    "No tasks in this sprint",
                    theme::font_header(),
                    theme::TEXT_DIM,
                );
            }

            // Arrows go under the bars
            for arrow in window.arrows(tasks) {
                let Some(row) = tasks.iter().position(|t| t.id == arrow.to) else {
                    continue;
                };
                let y = row_top(origin, row) + ROW_HEIGHT / 2.0;
                let x1 = origin.x + percent_to_x(arrow.connector.start_x, chart_width);
                let x2 = origin.x + percent_to_x(arrow.connector.end_x, chart_width);
                draw_arrow(&painter, Pos2::new(x1, y), Pos2::new(x2, y));
            }

            for (i, task) in tasks.iter().enumerate() {
                let top = row_top(origin, i);
                let position = window.task_position(task);
                let placement = window.placement(task.due_date);

                let bar_width = (chart_width * (BAR_WIDTH_PERCENT / 100.0) as f32).max(theme::BAR_MIN_WIDTH);
                let mut x = origin.x + percent_to_x(bar_left(position), chart_width);
                // Late tasks would be drawn past the edge; pin them to it
                x = x.min(canvas.right() - bar_width);
                let bar_rect = Rect::from_min_size(
                    Pos2::new(x, top + (ROW_HEIGHT - BAR_HEIGHT) / 2.0),
                    Vec2::new(bar_width, BAR_HEIGHT),
                );

                let is_dragged = dragging == Some(task.id.as_str());
                let is_selected = selected == Some(task.id.as_str());
                draw_task_bar(&painter, task, bar_rect, placement, is_dragged, is_selected);

                let bar_response = ui.interact(
                    bar_rect,
                    ui.make_persistent_id(("timeline-bar", &task.id)),
                    Sense::click_and_drag(),
                );
                let link_rect = Rect::from_center_size(
                    Pos2::new(bar_rect.right() - 16.0, bar_rect.top() + 14.0),
                    Vec2::splat(20.0),
                );
                let link_response = ui.interact(
                    link_rect,
                    ui.make_persistent_id(("timeline-link", &task.id)),
                    Sense::click(),
                );
                painter.text(
                    link_rect.center(),
                    egui::Align2::CENTER_CENTER,
                    egui_phosphor::regular::LINK,
                    theme::font_bar(),
                    if link_response.hovered() { theme::ACCENT } else { theme::TEXT_ON_BAR },
                );

                if link_response.clicked() {
                    interaction.open_picker = Some(task.id.clone());
                } else if bar_response.clicked() {
                    interaction.select = Some(task.id.clone());
                }

                if bar_response.drag_started() {
                    interaction.begin_drag = Some(task.id.clone());
                }
                if bar_response.dragged() {
                    ui.ctx().set_cursor_icon(egui::CursorIcon::Grabbing);
                } else if bar_response.hovered() {
                    ui.ctx().set_cursor_icon(egui::CursorIcon::Grab);
                }
                if bar_response.drag_stopped() {
                    match hovered_column {
                        Some(day) => interaction.drop_day = Some(day),
                        None => interaction.cancel_drag = true,
                    }
                }

                if bar_response.hovered() && dragging.is_none() && !link_response.hovered() {
                    egui::show_tooltip_at_pointer(
                        ui.ctx(),
                        ui.layer_id(),
                        egui::Id::new(("timeline-tip", &task.id)),
                        |ui| {
                            ui.strong(&task.title);
                            ui.label(format!("Due: {}", task.due_date.format(DISPLAY_DATE)));
                            ui.label(format!("Assignee: {}", roster.display_name(&task.assignee_id)));
                            if task.has_dependencies() {
                                ui.label(format!("Dependencies: {}", task.dependencies.len()));
                            }
                            match placement {
                                Placement::Before => {
                                    ui.label("Due before this sprint starts");
                                }
                                Placement::After => {
                                    ui.label("Due after this sprint ends");
                                }
                                Placement::Within => {}
                            }
                        },
                    );
                }
            }

            // A drag released without any bar reporting it is abandoned
            let pointer_down = ui.input(|i| i.pointer.any_down());
            if dragging.is_some()
                && !pointer_down
                && interaction.drop_day.is_none()
                && !interaction.cancel_drag
            {
                interaction.cancel_drag = true;
            }
        });

    interaction
}

fn row_top(origin: Pos2, row: usize) -> f32 {
    origin.y + HEADER_HEIGHT + ROW_GAP + row as f32 * (ROW_HEIGHT + ROW_GAP)
}

fn percent_to_x(percent: f64, width: f32) -> f32 {
    (percent / 100.0) as f32 * width
}

fn draw_day_header(
    painter: &egui::Painter,
    origin: Pos2,
    window: SprintWindow,
    column_width: f32,
    height: f32,
) {
    painter.rect_filled(
        Rect::from_min_size(origin, Vec2::new(column_width * window.day_count() as f32, HEADER_HEIGHT)),
        Rounding::same(4.0),
        theme::BG_HEADER,
    );

    for (i, date) in window.days().enumerate() {
        let x = origin.x + i as f32 * column_width;
        painter.line_segment(
            [Pos2::new(x, origin.y), Pos2::new(x, origin.y + height)],
            Stroke::new(0.5, theme::GRID_LINE),
        );
        let is_weekend = date.weekday().num_days_from_monday() >= 5;
        painter.text(
            Pos2::new(x + column_width / 2.0, origin.y + HEADER_HEIGHT / 2.0),
            egui::Align2::CENTER_CENTER,
            date.day().to_string(),
            theme::font_small(),
            if is_weekend { theme::TEXT_DIM } else { theme::TEXT_SECONDARY },
        );
    }

    painter.line_segment(
        [
            Pos2::new(origin.x, origin.y + HEADER_HEIGHT),
            Pos2::new(origin.x + column_width * window.day_count() as f32, origin.y + HEADER_HEIGHT),
        ],
        Stroke::new(1.0, theme::BORDER_SUBTLE),
    );
}

/// Dashed connector with an arrowhead at `to`.
fn draw_arrow(painter: &egui::Painter, from: Pos2, to: Pos2) {
    let stroke = Stroke::new(2.0, theme::ARROW);
    painter.extend(Shape::dashed_line(&[from, to], stroke, 4.0, 4.0));

    let dir = if to.x >= from.x { 1.0 } else { -1.0 };
    let head = vec![
        to,
        Pos2::new(to.x - 8.0 * dir, to.y - 4.0),
        Pos2::new(to.x - 8.0 * dir, to.y + 4.0),
    ];
    painter.add(Shape::convex_polygon(head, theme::ARROW, Stroke::NONE));
}

fn draw_task_bar(
    painter: &egui::Painter,
    task: &Task,
    bar_rect: Rect,
    placement: Placement,
    is_dragged: bool,
    is_selected: bool,
) {
    let rounding = Rounding::same(theme::BAR_ROUNDING);
    let mut fill = theme::status_color(task.status);
    if is_dragged {
        fill = fill.gamma_multiply(0.5);
    }

    painter.rect_filled(bar_rect.translate(Vec2::new(1.0, 2.0)), rounding, Color32::from_black_alpha(35));
    painter.rect_filled(bar_rect, rounding, fill);

    if placement != Placement::Within {
        painter.rect_filled(bar_rect, rounding, theme::BG_OFF_WINDOW);
        painter.rect_stroke(bar_rect, rounding, Stroke::new(1.0, Color32::from_rgb(240, 75, 75)));
    }
    if is_selected {
        painter.rect_stroke(
            bar_rect.expand(1.5),
            Rounding::same(theme::BAR_ROUNDING + 1.5),
            Stroke::new(2.0, theme::BORDER_ACCENT),
        );
    }

    // Title line, clipped so long titles don't run under the link button
    let text_rect = Rect::from_min_max(
        bar_rect.min + Vec2::new(8.0, 0.0),
        Pos2::new(bar_rect.right() - 30.0, bar_rect.bottom()),
    );
    let clipped = painter.with_clip_rect(text_rect);
    let mut title = task.title.clone();
    if task.has_dependencies() {
        title.push(' ');
        title.push_str(egui_phosphor::regular::LINK);
    }
    clipped.text(
        Pos2::new(text_rect.left(), bar_rect.top() + 14.0),
        egui::Align2::LEFT_CENTER,
        title,
        theme::font_bar(),
        theme::TEXT_ON_BAR,
    );

    let priority_pos = Pos2::new(text_rect.left(), bar_rect.bottom() - 13.0);
    let priority = clipped.text(
        priority_pos,
        egui::Align2::LEFT_CENTER,
        task.priority.label(),
        theme::font_small(),
        theme::priority_color(task.priority),
    );
    clipped.text(
        Pos2::new(priority.right() + 10.0, priority_pos.y),
        egui::Align2::LEFT_CENTER,
        format!(
            "{} {}",
            egui_phosphor::regular::CLOCK,
            task.due_date.format(DISPLAY_DATE)
        ),
        theme::font_small(),
        Color32::from_rgb(70, 74, 90),
    );
}
