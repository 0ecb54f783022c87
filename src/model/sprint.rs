use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::timeline::SprintWindow;

/// Lifecycle state of a sprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SprintStatus {
    Planning,
    Active,
    Completed,
}

impl SprintStatus {
    pub const ALL: [SprintStatus; 3] = [
        SprintStatus::Planning,
        SprintStatus::Active,
        SprintStatus::Completed,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SprintStatus::Planning => "Planning",
            SprintStatus::Active => "Active",
            SprintStatus::Completed => "Completed",
        }
    }
}

/// A time-boxed window that tasks are scheduled against.
///
/// Tasks point at their sprint through `Task::sprint_id`; the sprint keeps no
/// back-pointer, so the task count is derived by the board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sprint {
    pub id: String,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: SprintStatus,
    #[serde(default)]
    pub goals: String,
}

impl Sprint {
    pub fn window(&self) -> SprintWindow {
        SprintWindow::new(self.start_date, self.end_date)
    }
}

impl From<&Sprint> for SprintWindow {
    fn from(sprint: &Sprint) -> Self {
        sprint.window()
    }
}
