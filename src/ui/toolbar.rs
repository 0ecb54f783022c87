use crate::app::SprintBoardApp;
use crate::ui::theme;
use egui::{menu, RichText, Ui};

/// Render the top toolbar / menu bar.
pub fn show_toolbar(app: &mut SprintBoardApp, ui: &mut Ui) {
    menu::bar(ui, |ui| {
        ui.menu_button(RichText::new("  File  ").font(theme::font_menu()), |ui| {
            if ui.button("  New Board").clicked() {
                app.new_board();
                ui.close_menu();
            }
            if ui.button("  Open...").clicked() {
                app.open_board();
                ui.close_menu();
            }
            ui.separator();
            if ui.button("  Save          Ctrl+S").clicked() {
                app.save_board();
                ui.close_menu();
            }
            if ui.button("  Save As...").clicked() {
                app.save_board_as();
                ui.close_menu();
            }
            ui.separator();
            if ui.button("  Open Settings Folder").clicked() {
                app.open_settings_folder();
                ui.close_menu();
            }
        });

        ui.menu_button(RichText::new("  Sprint  ").font(theme::font_menu()), |ui| {
            if ui.button("  Create Sprint...").clicked() {
                app.show_create_sprint = true;
                ui.close_menu();
            }
            let Some(sprint_id) = app.shown_sprint.clone() else {
                return;
            };
            ui.separator();
            ui.label(RichText::new("Status").small().weak());
            let current = app.board.sprint(&sprint_id).map(|s| s.status);
            for status in sprint_timeline::SprintStatus::ALL {
                if ui.radio(current == Some(status), status.label()).clicked() {
                    if let Err(e) = app.board.set_sprint_status(&sprint_id, status) {
                        app.status_message = e.to_string();
                    }
                    ui.close_menu();
                }
            }
        });

        ui.menu_button(RichText::new("  View  ").font(theme::font_menu()), |ui| {
            let mut dark = app.settings.dark_mode;
            if ui.checkbox(&mut dark, "Dark mode").clicked() {
                app.toggle_dark_mode();
                ui.close_menu();
            }
        });

        ui.menu_button(RichText::new("  Help  ").font(theme::font_menu()), |ui| {
            if ui.button("About").clicked() {
                app.show_about = true;
                ui.close_menu();
            }
        });

        // Right-aligned board name
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let modified = if app.file_path.is_some() { "" } else { " (unsaved)" };
            ui.label(
                RichText::new(format!("{}{}", app.board.name, modified))
                    .size(11.0)
                    .weak(),
            );
        });
    });
}
