pub mod dialogs;
pub mod sprint_table;
pub mod task_editor;
pub mod theme;
pub mod timeline_chart;
pub mod toolbar;
