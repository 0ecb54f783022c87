use crate::app::SprintBoardApp;
use crate::ui::theme;
use egui::{Color32, Context, RichText, Window};
use sprint_timeline::graph::{self, EdgeError};
use sprint_timeline::model::DISPLAY_DATE;
use sprint_timeline::{NotificationKind, TaskPriority, TaskStatus};

/// Render the "Create Sprint" dialog.
pub fn show_create_sprint_dialog(app: &mut SprintBoardApp, ctx: &Context) {
    let mut should_close = false;
    let mut should_create = false;
    Window::new(RichText::new("Create Sprint").strong().size(14.0))
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([360.0, 0.0])
        .show(ctx, |ui| {
            ui.add_space(4.0);
            egui::Grid::new("create_sprint_grid")
                .num_columns(2)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    ui.label(RichText::new("Sprint Name").color(theme::TEXT_SECONDARY));
                    ui.add_sized(
                        [220.0, 24.0],
                        egui::TextEdit::singleline(&mut app.sprint_form.name).hint_text("Enter sprint name"),
                    );
                    ui.end_row();

                    ui.label(RichText::new("Start").color(theme::TEXT_SECONDARY));
                    ui.add(egui_extras::DatePickerButton::new(&mut app.sprint_form.start).id_salt("dlg_sprint_start"));
                    ui.end_row();

                    ui.label(RichText::new("End").color(theme::TEXT_SECONDARY));
                    ui.add(egui_extras::DatePickerButton::new(&mut app.sprint_form.end).id_salt("dlg_sprint_end"));
                    ui.end_row();

                    ui.label(RichText::new("Goals").color(theme::TEXT_SECONDARY));
                    ui.add_sized(
                        [220.0, 60.0],
                        egui::TextEdit::multiline(&mut app.sprint_form.goals).hint_text("Sprint goals"),
                    );
                    ui.end_row();
                });

            if app.sprint_form.start > app.sprint_form.end {
                ui.label(
                    RichText::new("End date must not be before start date")
                        .size(11.0)
                        .color(theme::notification_color(NotificationKind::Error)),
                );
            }

            ui.add_space(6.0);
            ui.separator();
            ui.horizontal(|ui| {
                let can_create = !app.sprint_form.name.trim().is_empty()
                    && app.sprint_form.start <= app.sprint_form.end;
                let create_btn = egui::Button::new(RichText::new("Create").color(Color32::WHITE))
                    .fill(theme::ACCENT)
                    .rounding(egui::Rounding::same(4.0));
                if ui.add_enabled(can_create, create_btn).clicked() {
                    should_create = true;
                }
                if ui.add_sized([80.0, 28.0], egui::Button::new("Cancel")).clicked() {
                    should_close = true;
                }
            });
        });

    if should_create {
        app.create_sprint_from_dialog();
    }
    if should_close || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.show_create_sprint = false;
    }
}

/// Render the "Add Task" dialog for the shown sprint.
pub fn show_add_task_dialog(app: &mut SprintBoardApp, ctx: &Context) {
    let mut should_close = false;
    let mut should_create = false;
    Window::new(RichText::new("Add Task").strong().size(14.0))
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([360.0, 0.0])
        .show(ctx, |ui| {
            ui.add_space(4.0);
            egui::Grid::new("add_task_grid")
                .num_columns(2)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    ui.label(RichText::new("Title").color(theme::TEXT_SECONDARY));
                    ui.add_sized(
                        [220.0, 24.0],
                        egui::TextEdit::singleline(&mut app.task_form.title).hint_text("New Task"),
                    );
                    ui.end_row();

                    ui.label(RichText::new("Status").color(theme::TEXT_SECONDARY));
                    egui::ComboBox::from_id_salt("dlg_task_status")
                        .selected_text(app.task_form.status.label())
                        .show_ui(ui, |ui| {
                            for status in TaskStatus::ALL {
                                ui.selectable_value(&mut app.task_form.status, status, status.label());
                            }
                        });
                    ui.end_row();

                    ui.label(RichText::new("Priority").color(theme::TEXT_SECONDARY));
                    egui::ComboBox::from_id_salt("dlg_task_priority")
                        .selected_text(app.task_form.priority.label())
                        .show_ui(ui, |ui| {
                            for priority in TaskPriority::ALL {
                                ui.selectable_value(&mut app.task_form.priority, priority, priority.label());
                            }
                        });
                    ui.end_row();

                    ui.label(RichText::new("Assignee").color(theme::TEXT_SECONDARY));
                    egui::ComboBox::from_id_salt("dlg_task_assignee")
                        .selected_text(app.board.roster.display_name(&app.task_form.assignee_id))
                        .show_ui(ui, |ui| {
                            ui.selectable_value(&mut app.task_form.assignee_id, String::new(), "Unassigned");
                            for employee in app.board.roster.iter() {
                                ui.selectable_value(
                                    &mut app.task_form.assignee_id,
                                    employee.id.clone(),
                                    employee.full_name(),
                                );
                            }
                        });
                    ui.end_row();

                    ui.label(RichText::new("Due").color(theme::TEXT_SECONDARY));
                    ui.add(egui_extras::DatePickerButton::new(&mut app.task_form.due).id_salt("dlg_task_due"));
                    ui.end_row();

                    ui.label(RichText::new("Project").color(theme::TEXT_SECONDARY));
                    ui.add_sized([220.0, 24.0], egui::TextEdit::singleline(&mut app.task_form.project));
                    ui.end_row();
                });

            ui.add_space(6.0);
            ui.separator();
            ui.horizontal(|ui| {
                let create_btn = egui::Button::new(RichText::new("Add").color(Color32::WHITE))
                    .fill(theme::ACCENT)
                    .rounding(egui::Rounding::same(4.0));
                if ui.add_sized([80.0, 28.0], create_btn).clicked() {
                    should_create = true;
                }
                if ui.add_sized([80.0, 28.0], egui::Button::new("Cancel")).clicked() {
                    should_close = true;
                }
            });
        });

    if should_create {
        app.create_task_from_dialog();
    }
    if should_close || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.show_add_task = false;
    }
}

/// Render the "Add Task Dependency" picker for the controller's pending
/// subject. Dismissing the window clears the subject without adding an edge.
pub fn show_dependency_picker(app: &mut SprintBoardApp, ctx: &Context) {
    let Some(subject) = app.controller.pending_dependency().cloned() else {
        return;
    };
    let tasks = app.shown_tasks();
    let candidates = app.controller.candidates(&tasks);

    let mut chosen: Option<String> = None;
    let mut open = true;
    Window::new(RichText::new("Add Task Dependency").strong().size(14.0))
        .open(&mut open)
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([380.0, 0.0])
        .show(ctx, |ui| {
            ui.label(
                RichText::new(format!(
                    "Select which task must be completed before \"{}\" can start:",
                    subject.title
                ))
                .color(theme::TEXT_SECONDARY),
            );
            ui.add_space(6.0);
            if candidates.is_empty() {
                ui.label(RichText::new("No other tasks in this sprint").color(theme::TEXT_DIM));
            }
            egui::ScrollArea::vertical().max_height(320.0).show(ui, |ui| {
                for candidate in &candidates {
                    let frame = egui::Frame::none()
                        .fill(theme::BG_DARK)
                        .stroke(egui::Stroke::new(1.0, theme::BORDER_SUBTLE))
                        .rounding(egui::Rounding::same(6.0))
                        .inner_margin(egui::Margin::same(8.0));
                    let resp = frame.show(ui, |ui| {
                        ui.set_width(ui.available_width());
                        ui.label(RichText::new(&candidate.title).strong().size(12.0));
                        ui.label(
                            RichText::new(format!(
                                "Due: {} • {}",
                                candidate.due_date.format(DISPLAY_DATE),
                                candidate.status.label()
                            ))
                            .size(10.0)
                            .color(theme::TEXT_SECONDARY),
                        );
                        let warning = match graph::validate_edge(&app.board.tasks, &subject.id, &candidate.id) {
                            Err(EdgeError::Duplicate { .. }) => Some("Already a dependency"),
                            Err(EdgeError::Cycle(_)) => Some("Would create a dependency cycle"),
                            _ => None,
                        };
                        if let Some(text) = warning {
                            ui.label(
                                RichText::new(text)
                                    .size(10.0)
                                    .color(theme::notification_color(NotificationKind::Warning)),
                            );
                        }
                    });
                    let click = ui.interact(
                        resp.response.rect,
                        egui::Id::new(("dep-candidate", &candidate.id)),
                        egui::Sense::click(),
                    );
                    if click.hovered() {
                        ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
                    }
                    if click.clicked() {
                        chosen = Some(candidate.id.clone());
                    }
                    ui.add_space(4.0);
                }
            });
        });

    if let Some(depends_on) = chosen {
        app.select_dependency(&depends_on);
    } else if !open || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.controller.dismiss_dependency_picker();
    }
}

/// Render the "About" dialog.
pub fn show_about_dialog(app: &mut SprintBoardApp, ctx: &Context) {
    let mut should_close = false;
    Window::new("About")
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([300.0, 180.0])
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(12.0);
                ui.heading(RichText::new("Sprint Board").strong());
                ui.add_space(2.0);
                ui.label(
                    RichText::new(format!("Version {}", env!("CARGO_PKG_VERSION")))
                        .color(theme::TEXT_SECONDARY),
                );
                ui.add_space(10.0);
                ui.label("Drag bars onto a day to reschedule.");
                ui.label("Use the link button to add dependencies.");
                ui.add_space(14.0);
                if ui.add_sized([100.0, 28.0], egui::Button::new("Close")).clicked() {
                    should_close = true;
                }
            });
        });
    if should_close || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.show_about = false;
    }
}
