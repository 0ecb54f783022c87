use chrono::{Duration, NaiveDate};
use std::path::PathBuf;

use sprint_timeline::io::BOARD_EXTENSION;
use sprint_timeline::settings::{self, AppSettings};
use sprint_timeline::{
    NewTask, NotificationLog, SprintBoard, SprintWindow, Task, TaskPriority, TaskStatus,
    TimelineController,
};

use crate::ui;

/// Fields of the "Create Sprint" dialog.
pub struct SprintForm {
    pub name: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub goals: String,
}

impl SprintForm {
    fn starting(today: NaiveDate) -> Self {
        Self {
            name: String::new(),
            start: today,
            end: today + Duration::days(14),
            goals: String::new(),
        }
    }
}

/// Fields of the "Add Task" dialog.
pub struct TaskForm {
    pub title: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub assignee_id: String,
    pub due: NaiveDate,
    pub project: String,
}

impl TaskForm {
    fn due_on(due: NaiveDate) -> Self {
        Self {
            title: String::new(),
            status: TaskStatus::default(),
            priority: TaskPriority::default(),
            assignee_id: String::new(),
            due,
            project: String::new(),
        }
    }
}

/// Main application state.
pub struct SprintBoardApp {
    pub board: SprintBoard,
    pub controller: TimelineController<NotificationLog>,
    pub file_path: Option<PathBuf>,
    pub shown_sprint: Option<String>,
    pub selected_task: Option<String>,

    // Dialog state
    pub show_create_sprint: bool,
    pub show_add_task: bool,
    pub show_about: bool,
    pub sprint_form: SprintForm,
    pub task_form: TaskForm,

    pub status_message: String,

    pub settings: AppSettings,
    settings_path: PathBuf,
}

impl SprintBoardApp {
    pub fn new(cc: &eframe::CreationContext<'_>, settings: AppSettings, settings_path: PathBuf) -> Self {
        // Register Phosphor icon font as a fallback so icons render inline with text
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        let (board, file_path, status_message) = match &settings.last_board {
            Some(path) => match sprint_timeline::io::load_board(path) {
                Ok(board) => (board, Some(path.clone()), format!("Opened {}", path.display())),
                Err(e) => {
                    tracing::warn!(error = %e, "could not reopen last board, using sample");
                    (SprintBoard::sample(), None, format!("Error loading: {}", e))
                }
            },
            None => (SprintBoard::sample(), None, "Ready".to_string()),
        };

        let today = chrono::Local::now().date_naive();
        let mut app = Self {
            board,
            controller: TimelineController::new(SprintWindow::new(today, today), NotificationLog::default()),
            file_path,
            shown_sprint: None,
            selected_task: None,
            show_create_sprint: false,
            show_add_task: false,
            show_about: false,
            sprint_form: SprintForm::starting(today),
            task_form: TaskForm::due_on(today),
            status_message,
            settings,
            settings_path,
        };
        let preferred = app
            .settings
            .active_sprint
            .clone()
            .filter(|id| app.board.sprint(id).is_some());
        let shown = preferred.or_else(|| app.board.current_sprint().map(|s| s.id.clone()));
        app.show_sprint(shown);
        app
    }

    /// Tasks of the shown sprint, in board order.
    pub fn shown_tasks(&self) -> Vec<Task> {
        match &self.shown_sprint {
            Some(id) => self.board.tasks_in_sprint(id),
            None => Vec::new(),
        }
    }

    /// Switch the timeline to another sprint (or none).
    pub fn show_sprint(&mut self, sprint_id: Option<String>) {
        self.shown_sprint = sprint_id;
        self.selected_task = None;
        self.sync_window();
        if self.settings.active_sprint != self.shown_sprint {
            self.settings.active_sprint = self.shown_sprint.clone();
            self.save_settings();
        }
    }

    /// Keep the controller's window in step with the shown sprint's dates,
    /// which the side panel can change at any time.
    fn sync_window(&mut self) {
        let window = self
            .shown_sprint
            .as_deref()
            .and_then(|id| self.board.sprint(id))
            .map(SprintWindow::from);
        if let Some(window) = window {
            self.controller.set_window(window);
        } else {
            self.controller.cancel_drag();
            self.controller.dismiss_dependency_picker();
        }
    }

    fn save_settings(&self) {
        if let Err(e) = self.settings.save(&self.settings_path) {
            tracing::warn!(error = %e, "failed to save settings");
        }
    }

    fn remember_board_path(&mut self) {
        if self.settings.last_board != self.file_path {
            self.settings.last_board = self.file_path.clone();
            self.save_settings();
        }
    }

    pub fn toggle_dark_mode(&mut self) {
        self.settings.dark_mode = !self.settings.dark_mode;
        self.save_settings();
    }

    // --- File operations ---

    pub fn new_board(&mut self) {
        self.board = SprintBoard::default();
        self.file_path = None;
        self.controller.notifier_mut().clear();
        self.show_sprint(None);
        self.remember_board_path();
        self.status_message = "New board created".to_string();
    }

    pub fn open_board(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Sprint Board", &[BOARD_EXTENSION, "json"])
            .pick_file()
        {
            match sprint_timeline::io::load_board(&path) {
                Ok(board) => {
                    self.board = board;
                    self.file_path = Some(path);
                    self.controller.notifier_mut().clear();
                    let current = self.board.current_sprint().map(|s| s.id.clone());
                    self.show_sprint(current);
                    self.remember_board_path();
                    self.status_message = "Board loaded".to_string();
                }
                Err(e) => {
                    self.status_message = format!("Error loading: {}", e);
                }
            }
        }
    }

    pub fn save_board(&mut self) {
        if let Some(path) = self.file_path.clone() {
            self.write_board(path);
        } else {
            self.save_board_as();
        }
    }

    pub fn save_board_as(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Sprint Board", &[BOARD_EXTENSION, "json"])
            .set_file_name(format!("{}.{}", self.board.name, BOARD_EXTENSION))
            .save_file()
        {
            self.file_path = Some(path.clone());
            self.write_board(path);
            self.remember_board_path();
        }
    }

    fn write_board(&mut self, path: PathBuf) {
        self.board.touch();
        match sprint_timeline::io::save_board(&self.board, &path) {
            Ok(()) => self.status_message = "Board saved".to_string(),
            Err(e) => self.status_message = format!("Error saving: {}", e),
        }
    }

    pub fn open_settings_folder(&mut self) {
        let dir = settings::config_dir();
        if let Err(e) = std::fs::create_dir_all(&dir).and_then(|()| open::that(&dir)) {
            self.status_message = format!("Could not open {}: {}", dir.display(), e);
        }
    }

    // --- Board operations ---

    pub fn create_sprint_from_dialog(&mut self) {
        let form = std::mem::replace(&mut self.sprint_form, SprintForm::starting(chrono::Local::now().date_naive()));
        match self.board.create_sprint(form.name.trim(), form.start, form.end, form.goals) {
            Ok(sprint) => {
                let id = sprint.id.clone();
                self.status_message = format!("Created {}", sprint.name);
                self.show_create_sprint = false;
                self.show_sprint(Some(id));
            }
            Err(e) => self.status_message = e.to_string(),
        }
    }

    pub fn create_task_from_dialog(&mut self) {
        let default_due = self.controller.window().end;
        let form = std::mem::replace(&mut self.task_form, TaskForm::due_on(default_due));
        let new = NewTask {
            title: form.title,
            status: form.status,
            priority: form.priority,
            assignee_id: form.assignee_id,
            project: form.project,
            sprint_id: self.shown_sprint.clone(),
            due_date: Some(form.due),
            ..Default::default()
        };
        match self.board.create_task(new) {
            Ok(task) => {
                self.status_message = format!("Added {}", task.title);
                self.selected_task = Some(task.id.clone());
                self.show_add_task = false;
            }
            Err(e) => self.status_message = e.to_string(),
        }
    }

    fn open_add_task(&mut self) {
        self.task_form = TaskForm::due_on(self.controller.window().end);
        self.show_add_task = true;
    }

    fn remove_sprint(&mut self, sprint_id: &str) {
        match self.board.remove_sprint(sprint_id) {
            Ok(sprint) => {
                self.status_message = format!("Deleted {}", sprint.name);
                if self.shown_sprint.as_deref() == Some(sprint_id) {
                    let next = self.board.current_sprint().map(|s| s.id.clone());
                    self.show_sprint(next);
                }
            }
            Err(e) => self.status_message = e.to_string(),
        }
    }

    fn remove_task(&mut self, task_id: &str) {
        match self.board.remove_task(task_id) {
            Ok(task) => {
                if self.selected_task.as_deref() == Some(task_id) {
                    self.selected_task = None;
                }
                if self.controller.is_dragging(task_id) {
                    self.controller.cancel_drag();
                }
                if self.controller.pending_dependency().is_some_and(|p| p.id == task_id) {
                    self.controller.dismiss_dependency_picker();
                }
                self.status_message = format!("Deleted {}", task.title);
            }
            Err(e) => self.status_message = e.to_string(),
        }
    }

    fn open_dependency_picker(&mut self, task_id: &str) {
        let tasks = self.shown_tasks();
        if let Some(task) = tasks.iter().find(|t| t.id == task_id) {
            let candidates = self.controller.open_dependency_picker(task, &tasks);
            tracing::debug!(count = candidates.len(), "dependency candidates");
        }
    }

    /// Commit the picker's choice through the controller, with the board as
    /// host.
    pub fn select_dependency(&mut self, depends_on: &str) {
        let before = self.board.tasks.iter().map(|t| t.dependencies.len()).sum::<usize>();
        if !self.controller.select_dependency(depends_on, &mut self.board) {
            return;
        }
        let after = self.board.tasks.iter().map(|t| t.dependencies.len()).sum::<usize>();
        if after == before {
            self.status_message = "Dependency already present".to_string();
        } else if let Some(cycle) = sprint_timeline::graph::find_cycle(&self.board.tasks) {
            self.status_message = format!("Warning: dependency cycle {}", cycle.join(" → "));
        }
    }

    fn apply_chart_interaction(&mut self, interaction: ui::timeline_chart::ChartInteraction, tasks: &[Task]) {
        if let Some(id) = interaction.select {
            self.selected_task = Some(id);
        }
        if let Some(id) = interaction.begin_drag {
            if let Some(task) = tasks.iter().find(|t| t.id == id) {
                self.controller.begin_drag(task);
            }
        }
        if let Some(day) = interaction.drop_day {
            if let Some(done) = self.controller.drop_on_day(day, &mut self.board) {
                self.selected_task = Some(done.task_id);
            }
        } else if interaction.cancel_drag {
            self.controller.cancel_drag();
        }
        if let Some(id) = interaction.open_picker {
            self.open_dependency_picker(&id);
        }
    }
}

impl eframe::App for SprintBoardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ui::theme::apply_theme(ctx, self.settings.dark_mode);

        // Handle keyboard shortcuts outside closures to avoid borrow issues
        let should_save = ctx.input(|i| i.modifiers.ctrl && i.key_pressed(egui::Key::S));
        if should_save {
            self.save_board();
        }
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.controller.cancel_drag();
        }

        self.sync_window();

        // Top panel: toolbar
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui::toolbar::show_toolbar(self, ui);
        });

        // Bottom panel: status bar, led by the latest notification
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(ui::theme::STATUS_BAR_HEIGHT)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_HEADER)
                    .inner_margin(egui::Margin::symmetric(10.0, 0.0)),
            )
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    if let Some(note) = self.controller.notifier().latest() {
                        let text = if note.title.is_empty() {
                            note.message.clone()
                        } else {
                            format!("{}: {}", note.title, note.message)
                        };
                        ui.label(
                            egui::RichText::new(text)
                                .size(11.0)
                                .color(ui::theme::notification_color(note.kind)),
                        );
                        ui.label(egui::RichText::new(" · ").size(10.5).color(ui::theme::TEXT_DIM));
                    }
                    ui.label(
                        egui::RichText::new(&self.status_message)
                            .size(11.0)
                            .color(ui::theme::TEXT_SECONDARY),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            egui::RichText::new(format!(
                                "Sprints: {}  ·  Tasks: {}",
                                self.board.sprints.len(),
                                self.board.tasks.len()
                            ))
                            .size(10.5)
                            .color(ui::theme::TEXT_DIM),
                        );
                    });
                });
            });

        // Left panel: sprints, tasks and the task editor
        let mut table_action = ui::sprint_table::SprintTableAction::None;
        let mut editor_action = ui::task_editor::EditorAction::None;
        egui::SidePanel::left("sprint_panel")
            .default_width(ui::theme::SIDE_PANEL_WIDTH)
            .min_width(260.0)
            .resizable(true)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_PANEL)
                    .inner_margin(egui::Margin::same(8.0))
                    .stroke(egui::Stroke::new(1.0, ui::theme::BORDER_SUBTLE)),
            )
            .show(ctx, |ui| {
                if let Some(sel_id) = self.selected_task.clone() {
                    let tasks_snapshot = self.board.tasks.clone();
                    let sprints = self.board.sprints.clone();
                    let roster = self.board.roster.clone();
                    if let Some(task) = self.board.tasks.iter_mut().find(|t| t.id == sel_id) {
                        editor_action =
                            ui::task_editor::show_task_editor(task, &tasks_snapshot, &sprints, &roster, ui);
                    }
                    ui.add_space(4.0);
                    ui.separator();
                    ui.add_space(2.0);
                }

                table_action = ui::sprint_table::show_sprint_table(
                    &self.board,
                    self.shown_sprint.as_deref(),
                    self.selected_task.as_deref(),
                    ui,
                );
            });

        match editor_action {
            ui::task_editor::EditorAction::Changed => {
                self.board.touch();
                self.status_message = "Task updated".to_string();
                // A task moved to another sprint leaves the timeline
                let still_shown = self
                    .selected_task
                    .as_deref()
                    .and_then(|id| self.board.task(id))
                    .is_some_and(|t| t.sprint_id == self.shown_sprint);
                if !still_shown {
                    self.selected_task = None;
                }
            }
            ui::task_editor::EditorAction::RemoveDependency(dep_id) => {
                if let Some(sel) = self.selected_task.clone() {
                    match self.board.remove_dependency(&sel, &dep_id) {
                        Ok(()) => self.status_message = "Dependency removed".to_string(),
                        Err(e) => self.status_message = e.to_string(),
                    }
                }
            }
            ui::task_editor::EditorAction::AddDependency => {
                if let Some(sel) = self.selected_task.clone() {
                    self.open_dependency_picker(&sel);
                }
            }
            ui::task_editor::EditorAction::None => {}
        }

        match table_action {
            ui::sprint_table::SprintTableAction::ShowSprint(id) => self.show_sprint(Some(id)),
            ui::sprint_table::SprintTableAction::RemoveSprint(id) => self.remove_sprint(&id),
            ui::sprint_table::SprintTableAction::CreateSprint => self.show_create_sprint = true,
            ui::sprint_table::SprintTableAction::SelectTask(id) => self.selected_task = Some(id),
            ui::sprint_table::SprintTableAction::RemoveTask(id) => self.remove_task(&id),
            ui::sprint_table::SprintTableAction::AddTask => self.open_add_task(),
            ui::sprint_table::SprintTableAction::None => {}
        }

        // Central panel: sprint timeline
        let chart_frame = egui::Frame::default()
            .fill(ui::theme::BG_DARK)
            .inner_margin(egui::Margin::ZERO);
        egui::CentralPanel::default().frame(chart_frame).show(ctx, |ui| {
            if self.shown_sprint.is_none() {
                ui.centered_and_justified(|ui| {
                    ui.label(
                        egui::RichText::new("Create or select a sprint to see its timeline")
                            .color(ui::theme::TEXT_DIM),
                    );
                });
                return;
            }
            let tasks = self.shown_tasks();
            let interaction = ui::timeline_chart::show_timeline_chart(
                &tasks,
                self.controller.window(),
                &self.board.roster,
                self.controller.drag_subject().map(|s| s.id.as_str()),
                self.selected_task.as_deref(),
                ui,
            );
            self.apply_chart_interaction(interaction, &tasks);
        });

        // Dialogs
        if self.show_create_sprint {
            ui::dialogs::show_create_sprint_dialog(self, ctx);
        }
        if self.show_add_task {
            ui::dialogs::show_add_task_dialog(self, ctx);
        }
        if self.controller.pending_dependency().is_some() {
            ui::dialogs::show_dependency_picker(self, ctx);
        }
        if self.show_about {
            ui::dialogs::show_about_dialog(self, ctx);
        }
    }
}
