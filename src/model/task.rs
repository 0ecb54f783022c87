use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Workflow state of a task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    #[default]
    #[serde(rename = "To Do")]
    ToDo,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "In Review")]
    InReview,
    #[serde(rename = "Done")]
    Done,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 4] = [
        TaskStatus::ToDo,
        TaskStatus::InProgress,
        TaskStatus::InReview,
        TaskStatus::Done,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TaskStatus::ToDo => "To Do",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::InReview => "In Review",
            TaskStatus::Done => "Done",
        }
    }
}

/// Priority level for a task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
}

impl TaskPriority {
    pub const ALL: [TaskPriority; 3] = [TaskPriority::Low, TaskPriority::Medium, TaskPriority::High];

    pub fn label(self) -> &'static str {
        match self {
            TaskPriority::Low => "Low",
            TaskPriority::Medium => "Medium",
            TaskPriority::High => "High",
        }
    }
}

/// A single task scheduled on a sprint timeline by its due date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub priority: TaskPriority,
    /// Weak reference into the employee roster.
    #[serde(default)]
    pub assignee_id: String,
    pub due_date: NaiveDate,
    #[serde(default)]
    pub project: String,
    /// Ids of tasks that must finish before this one.
    #[serde(default)]
    pub dependencies: Vec<String>,
    /// Weak reference to the owning sprint.
    #[serde(default)]
    pub sprint_id: Option<String>,
}

impl Task {
    /// Create a new task with sensible defaults.
    pub fn new(id: impl Into<String>, title: impl Into<String>, due_date: NaiveDate) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            status: TaskStatus::default(),
            priority: TaskPriority::default(),
            assignee_id: String::new(),
            due_date,
            project: String::new(),
            dependencies: Vec::new(),
            sprint_id: None,
        }
    }

    pub fn depends_on(&self, task_id: &str) -> bool {
        self.dependencies.iter().any(|d| d == task_id)
    }

    pub fn has_dependencies(&self) -> bool {
        !self.dependencies.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_camel_case_fields_and_status_strings() {
        let json = r#"{
            "id": "TASK001",
            "title": "Design login page",
            "status": "In Review",
            "priority": "High",
            "assigneeId": "EMP001",
            "dueDate": "2025-11-20",
            "project": "HRMS",
            "sprintId": "SPR002"
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.status, TaskStatus::InReview);
        assert_eq!(task.priority, TaskPriority::High);
        assert_eq!(task.due_date, NaiveDate::from_ymd_opt(2025, 11, 20).unwrap());
        assert!(task.dependencies.is_empty());
        assert_eq!(task.sprint_id.as_deref(), Some("SPR002"));
    }

    #[test]
    fn status_serializes_with_display_label() {
        for status in TaskStatus::ALL {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.label()));
        }
    }

    #[test]
    fn new_tasks_start_as_medium_priority_to_do() {
        let task = Task::new("TASK001", "Draft", NaiveDate::from_ymd_opt(2025, 11, 20).unwrap());
        assert_eq!(task.status, TaskStatus::ToDo);
        assert_eq!(task.priority, TaskPriority::Medium);
    }
}
