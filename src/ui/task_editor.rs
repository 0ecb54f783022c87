use crate::ui::theme;
use egui::{RichText, Ui};
use sprint_timeline::{Roster, Sprint, Task, TaskPriority, TaskStatus};

/// Actions the editor can request.
pub enum EditorAction {
    None,
    Changed,
    RemoveDependency(String),
    AddDependency,
}

/// Render an inline editor for the selected task, including the tasks it
/// depends on.
pub fn show_task_editor(
    task: &mut Task,
    all_tasks: &[Task],
    sprints: &[Sprint],
    roster: &Roster,
    ui: &mut Ui,
) -> EditorAction {
    let mut action = EditorAction::None;

    ui.add_space(6.0);
    ui.label(RichText::new(format!("Edit {}", task.id)).strong().size(13.0).color(theme::TEXT_PRIMARY));
    ui.add_space(4.0);

    egui::Grid::new("task_editor_grid")
        .num_columns(2)
        .spacing([10.0, 6.0])
        .show(ui, |ui| {
            ui.label(RichText::new("Title").color(theme::TEXT_SECONDARY));
            if ui.text_edit_singleline(&mut task.title).changed() {
                action = EditorAction::Changed;
            }
            ui.end_row();

            ui.label(RichText::new("Status").color(theme::TEXT_SECONDARY));
            egui::ComboBox::from_id_salt("editor_status")
                .selected_text(task.status.label())
                .show_ui(ui, |ui| {
                    for status in TaskStatus::ALL {
                        if ui.selectable_value(&mut task.status, status, status.label()).changed() {
                            action = EditorAction::Changed;
                        }
                    }
                });
            ui.end_row();

            ui.label(RichText::new("Priority").color(theme::TEXT_SECONDARY));
            egui::ComboBox::from_id_salt("editor_priority")
                .selected_text(task.priority.label())
                .show_ui(ui, |ui| {
                    for priority in TaskPriority::ALL {
                        if ui.selectable_value(&mut task.priority, priority, priority.label()).changed() {
                            action = EditorAction::Changed;
                        }
                    }
                });
            ui.end_row();

            ui.label(RichText::new("Assignee").color(theme::TEXT_SECONDARY));
            egui::ComboBox::from_id_salt("editor_assignee")
                .selected_text(roster.display_name(&task.assignee_id))
                .show_ui(ui, |ui| {
                    for employee in roster.iter() {
                        if ui
                            .selectable_value(&mut task.assignee_id, employee.id.clone(), employee.full_name())
                            .changed()
                        {
                            action = EditorAction::Changed;
                        }
                    }
                });
            ui.end_row();

            ui.label(RichText::new("Sprint").color(theme::TEXT_SECONDARY));
            let sprint_label = task
                .sprint_id
                .as_deref()
                .and_then(|id| sprints.iter().find(|s| s.id == id))
                .map(|s| s.name.clone())
                .unwrap_or_else(|| "Backlog".to_string());
            egui::ComboBox::from_id_salt("editor_sprint")
                .selected_text(sprint_label)
                .show_ui(ui, |ui| {
                    if ui.selectable_value(&mut task.sprint_id, None, "Backlog").changed() {
                        action = EditorAction::Changed;
                    }
                    for sprint in sprints {
                        if ui
                            .selectable_value(&mut task.sprint_id, Some(sprint.id.clone()), sprint.name.as_str())
                            .changed()
                        {
                            action = EditorAction::Changed;
                        }
                    }
                });
            ui.end_row();

            ui.label(RichText::new("Due").color(theme::TEXT_SECONDARY));
            if ui
                .add(egui_extras::DatePickerButton::new(&mut task.due_date).id_salt("editor_due"))
                .changed()
            {
                action = EditorAction::Changed;
            }
            ui.end_row();

            ui.label(RichText::new("Project").color(theme::TEXT_SECONDARY));
            if ui.text_edit_singleline(&mut task.project).changed() {
                action = EditorAction::Changed;
            }
            ui.end_row();
        });

    ui.add_space(4.0);
    ui.separator();
    ui.horizontal(|ui| {
        ui.label(RichText::new("Depends on").size(10.0).color(theme::TEXT_DIM).strong());
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui
                .small_button(format!("{} Add", egui_phosphor::regular::LINK))
                .clicked()
            {
                action = EditorAction::AddDependency;
            }
        });
    });

    if task.dependencies.is_empty() {
        ui.label(RichText::new("No dependencies yet").size(9.5).color(theme::TEXT_DIM));
    }
    for dep_id in &task.dependencies {
        let label = match all_tasks.iter().find(|t| t.id == *dep_id) {
            Some(dep) => format!("{} {}", egui_phosphor::regular::ARROW_LEFT, dep.title),
            None => format!("{} {} (missing)", egui_phosphor::regular::ARROW_LEFT, dep_id),
        };
        ui.horizontal(|ui| {
            ui.label(RichText::new(label).size(11.0).color(theme::TEXT_SECONDARY));
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let del = ui.add(
                    egui::Button::new(
                        RichText::new(egui_phosphor::regular::X).size(9.0).color(theme::TEXT_DIM),
                    )
                    .frame(false),
                );
                if del.on_hover_text("Remove dependency").clicked() {
                    action = EditorAction::RemoveDependency(dep_id.clone());
                }
            });
        });
    }

    action
}
