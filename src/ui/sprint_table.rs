use crate::ui::theme;
use egui::{Color32, RichText, Ui};
use sprint_timeline::model::DISPLAY_DATE;
use sprint_timeline::{SprintBoard, TaskStatus};

/// Actions that the side panel can request.
pub enum SprintTableAction {
    None,
    ShowSprint(String),
    RemoveSprint(String),
    CreateSprint,
    SelectTask(String),
    RemoveTask(String),
    AddTask,
}

/// Render the sprint list and the task list of the shown sprint.
pub fn show_sprint_table(
    board: &SprintBoard,
    shown_sprint: Option<&str>,
    selected_task: Option<&str>,
    ui: &mut Ui,
) -> SprintTableAction {
    let mut action = SprintTableAction::None;

    ui.add_space(2.0);
    ui.horizontal(|ui| {
        ui.label(RichText::new("Sprints").strong().size(15.0).color(theme::TEXT_PRIMARY));
        ui.label(
            RichText::new(format!("({})", board.sprints.len()))
                .size(11.0)
                .color(theme::TEXT_DIM),
        );
    });
    ui.add_space(4.0);

    let btn = egui::Button::new(
        RichText::new(format!("{}  Create Sprint", egui_phosphor::regular::PLUS))
            .color(Color32::WHITE)
            .size(12.0),
    )
    .fill(theme::ACCENT)
    .rounding(egui::Rounding::same(5.0));
    if ui.add_sized([ui.available_width(), 28.0], btn).clicked() {
        action = SprintTableAction::CreateSprint;
    }
    ui.add_space(4.0);

    for sprint in &board.sprints {
        let is_shown = shown_sprint == Some(sprint.id.as_str());
        let frame = egui::Frame::none()
            .fill(if is_shown { theme::BG_SELECTED } else { theme::BG_DARK })
            .rounding(egui::Rounding::same(4.0))
            .inner_margin(egui::Margin::symmetric(6.0, 4.0));

        let frame_resp = frame.show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    ui.add(egui::Label::new(RichText::new(&sprint.name).size(12.0).strong()).truncate());
                    ui.label(
                        RichText::new(format!(
                            "{} → {}  ·  {} tasks",
                            sprint.start_date.format(DISPLAY_DATE),
                            sprint.end_date.format(DISPLAY_DATE),
                            board.task_count(&sprint.id),
                        ))
                        .size(10.0)
                        .color(theme::TEXT_SECONDARY),
                    );
                });
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let del = ui.add(
                        egui::Button::new(
                            RichText::new(egui_phosphor::regular::X).size(10.0).color(theme::TEXT_DIM),
                        )
                        .frame(false),
                    );
                    if del.on_hover_text("Delete sprint (tasks are kept)").clicked() {
                        action = SprintTableAction::RemoveSprint(sprint.id.clone());
                    }
                    ui.label(
                        RichText::new(sprint.status.label())
                            .size(10.0)
                            .color(theme::sprint_status_color(sprint.status)),
                    );
                });
            });
        });

        let row_click = ui.interact(
            frame_resp.response.rect,
            egui::Id::new(("sprint-row", &sprint.id)),
            egui::Sense::click(),
        );
        if row_click.clicked() && matches!(action, SprintTableAction::None) {
            action = SprintTableAction::ShowSprint(sprint.id.clone());
        }
        ui.add_space(2.0);
    }

    ui.add_space(6.0);
    ui.separator();

    let Some(sprint_id) = shown_sprint else {
        return action;
    };
    let tasks = board.tasks_in_sprint(sprint_id);

    ui.horizontal(|ui| {
        ui.label(RichText::new("Tasks").strong().size(15.0).color(theme::TEXT_PRIMARY));
        ui.label(RichText::new(format!("({})", tasks.len())).size(11.0).color(theme::TEXT_DIM));
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button(format!("{}  Add Task", egui_phosphor::regular::PLUS)).clicked() {
                action = SprintTableAction::AddTask;
            }
        });
    });
    ui.add_space(2.0);

    egui::ScrollArea::vertical()
        .id_salt("sprint-task-list")
        .auto_shrink([false, false])
        .show(ui, |ui| {
            for (i, task) in tasks.iter().enumerate() {
                let is_selected = selected_task == Some(task.id.as_str());
                let row_bg = if is_selected {
                    theme::BG_SELECTED
                } else if i % 2 == 0 {
                    theme::BG_PANEL
                } else {
                    theme::BG_DARK
                };
                let frame = egui::Frame::none()
                    .fill(row_bg)
                    .rounding(egui::Rounding::same(4.0))
                    .inner_margin(egui::Margin::symmetric(6.0, 4.0));

                let frame_resp = frame.show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.spacing_mut().item_spacing.x = 6.0;
                        let (dot_rect, _) =
                            ui.allocate_exact_size(egui::vec2(8.0, 8.0), egui::Sense::hover());
                        ui.painter()
                            .circle_filled(dot_rect.center(), 4.0, theme::status_color(task.status));
                        ui.label(RichText::new(&task.id).size(10.0).color(theme::TEXT_DIM));
                        ui.add(egui::Label::new(RichText::new(&task.title).size(12.0)).truncate());

                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            let del = ui.add(
                                egui::Button::new(
                                    RichText::new(egui_phosphor::regular::X).size(10.0).color(theme::TEXT_DIM),
                                )
                                .frame(false),
                            );
                            if del.on_hover_text("Delete task").clicked() {
                                action = SprintTableAction::RemoveTask(task.id.clone());
                            }
                            ui.label(
                                RichText::new(task.due_date.format("%d/%m").to_string())
                                    .size(10.0)
                                    .color(theme::TEXT_SECONDARY),
                            );
                            let status_text = if task.status == TaskStatus::Done {
                                RichText::new(task.status.label()).size(10.0).strikethrough()
                            } else {
                                RichText::new(task.status.label()).size(10.0)
                            };
                            ui.label(status_text.color(theme::TEXT_SECONDARY));
                        });
                    });
                });

                let row_click = ui.interact(
                    frame_resp.response.rect,
                    egui::Id::new(("task-row", &task.id)),
                    egui::Sense::click(),
                );
                if row_click.clicked() && matches!(action, SprintTableAction::None) {
                    action = SprintTableAction::SelectTask(task.id.clone());
                }
                ui.add_space(1.0);
            }
        });

    action
}
