use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{BoardError, Result};
use crate::interaction::TimelineHost;
use crate::model::{Employee, Roster, Sprint, SprintStatus, Task, TaskPriority, TaskStatus, ISO_DATE};

/// Fields for a task about to be created; the board assigns the id.
#[derive(Debug, Clone, Default)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub assignee_id: String,
    pub project: String,
    pub sprint_id: Option<String>,
    pub due_date: Option<NaiveDate>,
}

/// Sprints, tasks and the employee roster, plus metadata.
///
/// This is the host side of the timeline: it owns the data the timeline
/// reads, and applies the changes the timeline emits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SprintBoard {
    pub name: String,
    pub sprints: Vec<Sprint>,
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub roster: Roster,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

impl Default for SprintBoard {
    fn default() -> Self {
        Self {
            name: "Untitled Board".to_string(),
            sprints: Vec::new(),
            tasks: Vec::new(),
            roster: Roster::default(),
            created: Utc::now(),
            modified: Utc::now(),
        }
    }
}

impl SprintBoard {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Touch the modified timestamp.
    pub fn touch(&mut self) {
        self.modified = Utc::now();
    }

    // --- Lookup ---

    pub fn sprint(&self, id: &str) -> Option<&Sprint> {
        self.sprints.iter().find(|s| s.id == id)
    }

    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    fn task_mut(&mut self, id: &str) -> Result<&mut Task> {
        self.tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| BoardError::UnknownTask(id.to_string()))
    }

    /// Tasks belonging to a sprint, in board order.
    pub fn tasks_in_sprint(&self, sprint_id: &str) -> Vec<Task> {
        self.tasks
            .iter()
            .filter(|t| t.sprint_id.as_deref() == Some(sprint_id))
            .cloned()
            .collect()
    }

    pub fn task_count(&self, sprint_id: &str) -> usize {
        self.tasks
            .iter()
            .filter(|t| t.sprint_id.as_deref() == Some(sprint_id))
            .count()
    }

    /// The first active sprint, falling back to the first sprint.
    pub fn current_sprint(&self) -> Option<&Sprint> {
        self.sprints
            .iter()
            .find(|s| s.status == SprintStatus::Active)
            .or_else(|| self.sprints.first())
    }

    // --- Sprint operations ---

    pub fn create_sprint(
        &mut self,
        name: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        goals: impl Into<String>,
    ) -> Result<&Sprint> {
        if start_date > end_date {
            return Err(BoardError::InvalidSprintWindow {
                start: start_date,
                end: end_date,
            });
        }
        let sprint = Sprint {
            id: next_id("SPR", self.sprints.iter().map(|s| s.id.as_str())),
            name: name.into(),
            start_date,
            end_date,
            status: SprintStatus::Planning,
            goals: goals.into(),
        };
        tracing::info!(sprint = %sprint.id, "sprint created");
        self.sprints.push(sprint);
        self.touch();
        Ok(&self.sprints[self.sprints.len() - 1])
    }

    pub fn set_sprint_status(&mut self, sprint_id: &str, status: SprintStatus) -> Result<()> {
        let sprint = self
            .sprints
            .iter_mut()
            .find(|s| s.id == sprint_id)
            .ok_or_else(|| BoardError::UnknownSprint(sprint_id.to_string()))?;
        sprint.status = status;
        self.touch();
        Ok(())
    }

    /// Remove a sprint. Its tasks stay on the board, still pointing at the
    /// removed id.
    pub fn remove_sprint(&mut self, sprint_id: &str) -> Result<Sprint> {
        let index = self
            .sprints
            .iter()
            .position(|s| s.id == sprint_id)
            .ok_or_else(|| BoardError::UnknownSprint(sprint_id.to_string()))?;
        self.touch();
        Ok(self.sprints.remove(index))
    }

    // --- Task operations ---

    pub fn create_task(&mut self, new: NewTask) -> Result<&Task> {
        if let Some(sprint_id) = &new.sprint_id {
            if self.sprint(sprint_id).is_none() {
                return Err(BoardError::UnknownSprint(sprint_id.clone()));
            }
        }
        let due_date = new
            .due_date
            .or_else(|| {
                new.sprint_id
                    .as_deref()
                    .and_then(|id| self.sprint(id))
                    .map(|s| s.end_date)
            })
            .unwrap_or_else(|| Utc::now().date_naive());

        let title = if new.title.trim().is_empty() {
            "New Task".to_string()
        } else {
            new.title
        };
        let task = Task {
            id: next_id("TASK", self.tasks.iter().map(|t| t.id.as_str())),
            title,
            description: new.description,
            status: new.status,
            priority: new.priority,
            assignee_id: new.assignee_id,
            due_date,
            project: new.project,
            dependencies: Vec::new(),
            sprint_id: new.sprint_id,
        };
        tracing::info!(task = %task.id, "task created");
        self.tasks.push(task);
        self.touch();
        Ok(&self.tasks[self.tasks.len() - 1])
    }

    /// Replace a task's editable fields. Dependencies are kept.
    pub fn update_task(&mut self, task_id: &str, edit: NewTask) -> Result<()> {
        let task = self.task_mut(task_id)?;
        task.title = edit.title;
        task.description = edit.description;
        task.status = edit.status;
        task.priority = edit.priority;
        task.assignee_id = edit.assignee_id;
        task.project = edit.project;
        task.sprint_id = edit.sprint_id;
        if let Some(due) = edit.due_date {
            task.due_date = due;
        }
        self.touch();
        Ok(())
    }

    pub fn assign_task(&mut self, task_id: &str, assignee_id: &str) -> Result<()> {
        self.task_mut(task_id)?.assignee_id = assignee_id.to_string();
        self.touch();
        Ok(())
    }

    pub fn set_task_status(&mut self, task_id: &str, status: TaskStatus) -> Result<()> {
        self.task_mut(task_id)?.status = status;
        self.touch();
        Ok(())
    }

    pub fn set_due_date(&mut self, task_id: &str, due_date: NaiveDate) -> Result<()> {
        self.task_mut(task_id)?.due_date = due_date;
        self.touch();
        Ok(())
    }

    /// Record that `task_id` depends on `depends_on`. Existing edges and
    /// self-dependencies are ignored. Returns whether the edge was added.
    pub fn add_dependency(&mut self, task_id: &str, depends_on: &str) -> Result<bool> {
        if task_id == depends_on {
            tracing::warn!(task = task_id, "ignoring self-dependency");
            return Ok(false);
        }
        let task = self.task_mut(task_id)?;
        if task.depends_on(depends_on) {
            return Ok(false);
        }
        task.dependencies.push(depends_on.to_string());
        self.touch();
        Ok(true)
    }

    pub fn remove_dependency(&mut self, task_id: &str, depends_on: &str) -> Result<()> {
        self.task_mut(task_id)?.dependencies.retain(|d| d != depends_on);
        self.touch();
        Ok(())
    }

    /// Remove a task and every dependency edge that points at it.
    pub fn remove_task(&mut self, task_id: &str) -> Result<Task> {
        let index = self
            .tasks
            .iter()
            .position(|t| t.id == task_id)
            .ok_or_else(|| BoardError::UnknownTask(task_id.to_string()))?;
        let removed = self.tasks.remove(index);
        for task in &mut self.tasks {
            task.dependencies.retain(|d| d != task_id);
        }
        self.touch();
        Ok(removed)
    }

    /// Generate a sample board for demonstration.
    pub fn sample() -> Self {
        let mut board = SprintBoard::new("HR Platform");
        board.roster = Roster::new(vec![
            Employee::new("EMP001", "Priya", "Shah"),
            Employee::new("EMP002", "Marcus", "Lee"),
            Employee::new("EMP003", "Sofia", "Romero"),
        ]);

        let sprints = [
            ("Sprint 1 - Core Features", (2025, 11, 1), (2025, 11, 15), SprintStatus::Completed, "Complete authentication and dashboard"),
            ("Sprint 2 - UI Enhancement", (2025, 11, 16), (2025, 11, 30), SprintStatus::Active, "Improve UI/UX across all modules"),
            ("Sprint 3 - Integration", (2025, 12, 1), (2025, 12, 15), SprintStatus::Planning, "Integrate payment gateway and email service"),
        ];
        for (name, start, end, status, goals) in sprints {
            let id = next_id("SPR", board.sprints.iter().map(|s| s.id.as_str()));
            board.sprints.push(Sprint {
                id,
                name: name.to_string(),
                start_date: ymd(start),
                end_date: ymd(end),
                status,
                goals: goals.to_string(),
            });
        }

        let tasks = [
            ("Redesign dashboard cards", TaskStatus::Done, TaskPriority::High, "EMP001", (2025, 11, 18), "Dashboard"),
            ("Leave calendar view", TaskStatus::InProgress, TaskPriority::Medium, "EMP002", (2025, 11, 21), "Leave"),
            ("Payroll table filters", TaskStatus::InReview, TaskPriority::Medium, "EMP003", (2025, 11, 23), "Payroll"),
            ("Attendance heatmap", TaskStatus::ToDo, TaskPriority::Low, "EMP002", (2025, 11, 26), "Attendance"),
            ("Accessibility pass", TaskStatus::ToDo, TaskPriority::High, "EMP001", (2025, 11, 29), "UI"),
        ];
        for (title, status, priority, assignee, due, project) in tasks {
            let id = next_id("TASK", board.tasks.iter().map(|t| t.id.as_str()));
            let mut task = Task::new(id, title, ymd(due));
            task.status = status;
            task.priority = priority;
            task.assignee_id = assignee.to_string();
            task.project = project.to_string();
            task.sprint_id = Some("SPR002".to_string());
            board.tasks.push(task);
        }
        board.tasks[2].dependencies.push("TASK001".to_string());
        board.tasks[4].dependencies.push("TASK002".to_string());
        board.tasks[4].dependencies.push("TASK003".to_string());
        board
    }
}

impl TimelineHost for SprintBoard {
    fn task_due_date_changed(&mut self, task_id: &str, new_due_date: &str) {
        let due = match NaiveDate::parse_from_str(new_due_date, ISO_DATE) {
            Ok(d) => d,
            Err(_) => {
                tracing::warn!(task = task_id, due = new_due_date, "{}", BoardError::InvalidDate(new_due_date.to_string()));
                return;
            }
        };
        if let Err(e) = self.set_due_date(task_id, due) {
            tracing::warn!(error = %e, "due date change ignored");
        }
    }

    fn dependency_added(&mut self, task_id: &str, depends_on: &str) {
        if let Err(e) = self.add_dependency(task_id, depends_on) {
            tracing::warn!(error = %e, "dependency ignored");
        }
    }

    fn resolve_employee(&self, assignee_id: &str) -> Option<&Employee> {
        self.roster.resolve(assignee_id)
    }
}

/// Display id one past the highest numeric suffix in use, e.g. `SPR004`
/// when `SPR003` is the highest. Gaps left by removals are not refilled.
fn next_id<'a>(prefix: &str, existing: impl IntoIterator<Item = &'a str>) -> String {
    let highest = existing
        .into_iter()
        .filter_map(|id| id.strip_prefix(prefix))
        .filter_map(|n| n.parse::<u64>().ok())
        .max()
        .unwrap_or(0);
    format!("{}{:03}", prefix, highest.saturating_add(1))
}

fn ymd((y, m, d): (i32, u32, u32)) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn sample_board_is_consistent() {
        let board = SprintBoard::sample();
        assert_eq!(board.sprints.len(), 3);
        assert_eq!(board.task_count("SPR002"), 5);
        assert_eq!(board.task_count("SPR001"), 0);
        assert_eq!(board.current_sprint().map(|s| s.id.as_str()), Some("SPR002"));
        assert!(crate::graph::dangling_references(&board.tasks).is_empty());
        assert!(crate::graph::find_cycle(&board.tasks).is_none());
    }

    #[test]
    fn sprint_ids_follow_count() {
        let mut board = SprintBoard::sample();
        let sprint = board
            .create_sprint("Sprint 4", date(2025, 12, 16), date(2025, 12, 31), "Polish")
            .unwrap();
        assert_eq!(sprint.id, "SPR004");
        assert_eq!(sprint.status, SprintStatus::Planning);
    }

    #[test]
    fn reversed_sprint_window_is_rejected() {
        let mut board = SprintBoard::default();
        let err = board
            .create_sprint("Backwards", date(2025, 12, 2), date(2025, 12, 1), "")
            .unwrap_err();
        assert!(matches!(err, BoardError::InvalidSprintWindow { .. }));
        assert!(board.sprints.is_empty());
    }

    #[test]
    fn new_task_defaults_to_sprint_end() {
        let mut board = SprintBoard::sample();
        let task = board
            .create_task(NewTask {
                title: "Export audit".into(),
                sprint_id: Some("SPR003".into()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(task.id, "TASK006");
        assert_eq!(task.due_date, date(2025, 12, 15));
    }

    #[test]
    fn task_in_unknown_sprint_is_rejected() {
        let mut board = SprintBoard::sample();
        let err = board
            .create_task(NewTask {
                sprint_id: Some("SPR999".into()),
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(err, BoardError::UnknownSprint(_)));
    }

    #[test]
    fn host_applies_due_date_change() {
        let mut board = SprintBoard::sample();
        board.task_due_date_changed("TASK004", "2025-11-19");
        assert_eq!(board.task("TASK004").unwrap().due_date, date(2025, 11, 19));

        board.task_due_date_changed("TASK004", "19/11/2025");
        board.task_due_date_changed("TASK404", "2025-11-20");
        assert_eq!(board.task("TASK004").unwrap().due_date, date(2025, 11, 19));
    }

    #[test]
    fn host_deduplicates_dependencies() {
        let mut board = SprintBoard::sample();
        board.dependency_added("TASK004", "TASK001");
        board.dependency_added("TASK004", "TASK001");
        board.dependency_added("TASK004", "TASK004");
        assert_eq!(board.task("TASK004").unwrap().dependencies, ["TASK001"]);
    }

    #[test]
    fn removing_task_strips_incoming_edges() {
        let mut board = SprintBoard::sample();
        board.remove_task("TASK002").unwrap();
        assert_eq!(board.task("TASK005").unwrap().dependencies, ["TASK003"]);
    }

    #[test]
    fn task_ids_are_not_reused_after_removal() {
        let mut board = SprintBoard::sample();
        board.remove_task("TASK001").unwrap();
        let id = board
            .create_task(NewTask {
                title: "Onboarding checklist".into(),
                sprint_id: Some("SPR002".into()),
                ..Default::default()
            })
            .unwrap()
            .id
            .clone();
        assert_eq!(id, "TASK006");
        assert_eq!(board.tasks.iter().filter(|t| t.id == "TASK005").count(), 1);

        let mut seen = std::collections::HashSet::new();
        assert!(board.tasks.iter().all(|t| seen.insert(t.id.as_str())));
    }

    #[test]
    fn sprint_ids_are_not_reused_after_removal() {
        let mut board = SprintBoard::sample();
        board.remove_sprint("SPR001").unwrap();
        let sprint = board
            .create_sprint("Sprint 4", date(2025, 12, 16), date(2025, 12, 31), "")
            .unwrap();
        assert_eq!(sprint.id, "SPR004");
        assert_eq!(board.sprints.iter().filter(|s| s.id == "SPR003").count(), 1);
    }

    #[test]
    fn ids_skip_foreign_suffixes() {
        assert_eq!(next_id("TASK", ["TASK009", "TASKX", "SPR120"]), "TASK010");
        assert_eq!(next_id("SPR", std::iter::empty()), "SPR001");
    }

    #[test]
    fn removing_sprint_keeps_tasks() {
        let mut board = SprintBoard::sample();
        board.remove_sprint("SPR002").unwrap();
        assert_eq!(board.tasks.len(), 5);
        assert_eq!(board.task_count("SPR002"), 5);
        assert!(board.sprint("SPR002").is_none());
    }
}
