//! Drag-to-reschedule and dependency-picker gesture handling.
//!
//! The controller owns only transient gesture state. Committed changes are
//! handed to a [`TimelineHost`], which persists them and supplies the
//! updated task list on the next frame.

use chrono::NaiveDate;

use crate::model::{Employee, SprintWindow, Task, DISPLAY_DATE, ISO_DATE};
use crate::notify::{Notification, Notifier};

/// The application side of the timeline.
pub trait TimelineHost {
    /// A dragged task was dropped on a day. `new_due_date` is `YYYY-MM-DD`.
    fn task_due_date_changed(&mut self, task_id: &str, new_due_date: &str);

    /// `task_id` should now depend on `depends_on`.
    fn dependency_added(&mut self, task_id: &str, depends_on: &str);

    fn resolve_employee(&self, _assignee_id: &str) -> Option<&Employee> {
        None
    }
}

/// What the controller remembers about a gesture's subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRef {
    pub id: String,
    pub title: String,
    pub assignee_id: String,
}

impl From<&Task> for TaskRef {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id.clone(),
            title: task.title.clone(),
            assignee_id: task.assignee_id.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(TaskRef),
}

/// A committed drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reschedule {
    pub task_id: String,
    pub new_due_date: NaiveDate,
}

pub struct TimelineController<N> {
    window: SprintWindow,
    drag: DragState,
    pending_dependency: Option<TaskRef>,
    notifier: N,
}

impl<N: Notifier> TimelineController<N> {
    pub fn new(window: SprintWindow, notifier: N) -> Self {
        Self {
            window,
            drag: DragState::Idle,
            pending_dependency: None,
            notifier,
        }
    }

    pub fn window(&self) -> SprintWindow {
        self.window
    }

    /// Point the controller at another sprint. Any gesture in flight is
    /// abandoned, since its day offsets belonged to the old window.
    pub fn set_window(&mut self, window: SprintWindow) {
        if window != self.window {
            self.cancel_drag();
            self.dismiss_dependency_picker();
            self.window = window;
        }
    }

    pub fn drag_state(&self) -> &DragState {
        &self.drag
    }

    pub fn drag_subject(&self) -> Option<&TaskRef> {
        match &self.drag {
            DragState::Dragging(subject) => Some(subject),
            DragState::Idle => None,
        }
    }

    pub fn is_dragging(&self, task_id: &str) -> bool {
        self.drag_subject().is_some_and(|s| s.id == task_id)
    }

    /// Start dragging `task`. A second call replaces the subject; there is
    /// only one drag slot.
    pub fn begin_drag(&mut self, task: &Task) {
        tracing::debug!(task = %task.id, "drag started");
        self.drag = DragState::Dragging(TaskRef::from(task));
    }

    pub fn cancel_drag(&mut self) {
        if let DragState::Dragging(subject) = std::mem::take(&mut self.drag) {
            tracing::debug!(task = %subject.id, "drag cancelled");
        }
    }

    /// Drop the dragged task on the day `day_offset` days after the sprint
    /// start. Without an active drag this does nothing.
    pub fn drop_on_day<H>(&mut self, day_offset: i64, host: &mut H) -> Option<Reschedule>
    where
        H: TimelineHost + ?Sized,
    {
        let DragState::Dragging(subject) = std::mem::take(&mut self.drag) else {
            return None;
        };
        let Some(new_due_date) = self.window.date_for_offset(day_offset) else {
            tracing::warn!(task = %subject.id, day_offset, "drop outside representable dates ignored");
            return None;
        };
        let iso = new_due_date.format(ISO_DATE).to_string();
        let assignee = host
            .resolve_employee(&subject.assignee_id)
            .map(Employee::full_name);

        tracing::info!(task = %subject.id, due = %iso, "task rescheduled");
        host.task_due_date_changed(&subject.id, &iso);

        self.notifier.notify(Notification::info(
            "Task Rescheduled",
            format!(
                "Task \"{}\" has been rescheduled to {}",
                subject.title,
                new_due_date.format(DISPLAY_DATE)
            ),
        ));
        if let Some(name) = assignee {
            self.notifier.notify(Notification::success(format!(
                "Task rescheduled and {} has been notified",
                name
            )));
        }

        Some(Reschedule {
            task_id: subject.id,
            new_due_date,
        })
    }

    pub fn pending_dependency(&self) -> Option<&TaskRef> {
        self.pending_dependency.as_ref()
    }

    /// Ask which task `task` should depend on. Returns the candidates, which
    /// never include `task` itself.
    pub fn open_dependency_picker<'a>(&mut self, task: &Task, tasks: &'a [Task]) -> Vec<&'a Task> {
        tracing::debug!(task = %task.id, "dependency picker opened");
        self.pending_dependency = Some(TaskRef::from(task));
        self.candidates(tasks)
    }

    /// Candidate dependencies for the pending subject, empty if none.
    pub fn candidates<'a>(&self, tasks: &'a [Task]) -> Vec<&'a Task> {
        match &self.pending_dependency {
            Some(subject) => tasks.iter().filter(|t| t.id != subject.id).collect(),
            None => Vec::new(),
        }
    }

    /// Emit the edge "pending subject depends on `depends_on`" and close the
    /// picker. Duplicates and cycles are not checked here; see
    /// [`crate::graph::validate_edge`]. Returns whether an edge was emitted.
    pub fn select_dependency<H>(&mut self, depends_on: &str, host: &mut H) -> bool
    where
        H: TimelineHost + ?Sized,
    {
        let Some(subject) = self.pending_dependency.take() else {
            return false;
        };
        tracing::info!(task = %subject.id, depends_on, "dependency added");
        host.dependency_added(&subject.id, depends_on);
        self.notifier
            .notify(Notification::success("Task dependency added"));
        true
    }

    pub fn dismiss_dependency_picker(&mut self) {
        if let Some(subject) = self.pending_dependency.take() {
            tracing::debug!(task = %subject.id, "dependency picker dismissed");
        }
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Roster;
    use crate::notify::NotificationKind;

    #[derive(Default)]
    struct Recorder {
        roster: Roster,
        due_changes: Vec<(String, String)>,
        edges: Vec<(String, String)>,
    }

    impl TimelineHost for Recorder {
        fn task_due_date_changed(&mut self, task_id: &str, new_due_date: &str) {
            self.due_changes.push((task_id.into(), new_due_date.into()));
        }

        fn dependency_added(&mut self, task_id: &str, depends_on: &str) {
            self.edges.push((task_id.into(), depends_on.into()));
        }

        fn resolve_employee(&self, assignee_id: &str) -> Option<&Employee> {
            self.roster.resolve(assignee_id)
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn controller() -> TimelineController<Vec<Notification>> {
        TimelineController::new(
            SprintWindow::new(date(2025, 11, 16), date(2025, 11, 30)),
            Vec::new(),
        )
    }

    fn tasks() -> Vec<Task> {
        let mut a = Task::new("TASK001", "Design login page", date(2025, 11, 18));
        a.assignee_id = "EMP001".into();
        let b = Task::new("TASK002", "Wire up API", date(2025, 11, 24));
        let c = Task::new("TASK003", "Review", date(2025, 11, 28));
        vec![a, b, c]
    }

    #[test]
    fn drop_emits_once_with_iso_date() {
        let mut ctl = controller();
        let mut host = Recorder::default();
        let tasks = tasks();

        ctl.begin_drag(&tasks[1]);
        let result = ctl.drop_on_day(7, &mut host);

        assert_eq!(host.due_changes, [("TASK002".to_string(), "2025-11-23".to_string())]);
        assert_eq!(result.map(|r| r.new_due_date), Some(date(2025, 11, 23)));
        assert_eq!(*ctl.drag_state(), DragState::Idle);
    }

    #[test]
    fn drop_without_drag_is_a_no_op() {
        let mut ctl = controller();
        let mut host = Recorder::default();
        assert!(ctl.drop_on_day(3, &mut host).is_none());
        assert!(host.due_changes.is_empty());
        assert!(ctl.notifier().is_empty());
        assert_eq!(*ctl.drag_state(), DragState::Idle);
    }

    #[test]
    fn resolved_assignee_gets_acknowledgement() {
        let mut ctl = controller();
        let mut host = Recorder {
            roster: Roster::new(vec![Employee::new("EMP001", "Priya", "Shah")]),
            ..Default::default()
        };
        let tasks = tasks();

        ctl.begin_drag(&tasks[0]);
        ctl.drop_on_day(0, &mut host);

        let sent = ctl.notifier();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].kind, NotificationKind::Info);
        assert_eq!(sent[0].title, "Task Rescheduled");
        assert_eq!(
            sent[0].message,
            "Task \"Design login page\" has been rescheduled to 16/11/2025"
        );
        assert_eq!(sent[1].message, "Task rescheduled and Priya Shah has been notified");
    }

    #[test]
    fn unresolved_assignee_gets_only_the_broadcast() {
        let mut ctl = controller();
        let mut host = Recorder::default();
        let tasks = tasks();
        ctl.begin_drag(&tasks[0]);
        ctl.drop_on_day(1, &mut host);
        assert_eq!(ctl.notifier().len(), 1);
    }

    #[test]
    fn cancelled_drag_emits_nothing() {
        let mut ctl = controller();
        let mut host = Recorder::default();
        let tasks = tasks();
        ctl.begin_drag(&tasks[0]);
        assert!(ctl.is_dragging("TASK001"));
        ctl.cancel_drag();
        assert!(ctl.drop_on_day(2, &mut host).is_none());
        assert!(host.due_changes.is_empty());
    }

    #[test]
    fn second_begin_drag_replaces_subject() {
        let mut ctl = controller();
        let mut host = Recorder::default();
        let tasks = tasks();
        ctl.begin_drag(&tasks[0]);
        ctl.begin_drag(&tasks[2]);
        ctl.drop_on_day(1, &mut host);
        assert_eq!(host.due_changes.len(), 1);
        assert_eq!(host.due_changes[0].0, "TASK003");
    }

    #[test]
    fn unrepresentable_offset_returns_to_idle() {
        let mut ctl = controller();
        let mut host = Recorder::default();
        let tasks = tasks();
        ctl.begin_drag(&tasks[0]);
        assert!(ctl.drop_on_day(i64::MAX, &mut host).is_none());
        assert!(host.due_changes.is_empty());
        assert_eq!(*ctl.drag_state(), DragState::Idle);
    }

    #[test]
    fn picker_excludes_subject() {
        let mut ctl = controller();
        let tasks = tasks();
        let candidates = ctl.open_dependency_picker(&tasks[1], &tasks);
        let ids: Vec<_> = candidates.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["TASK001", "TASK003"]);
        assert_eq!(ctl.pending_dependency().map(|s| s.id.as_str()), Some("TASK002"));
    }

    #[test]
    fn select_dependency_emits_and_clears_even_for_repeats() {
        let mut ctl = controller();
        let mut host = Recorder::default();
        let tasks = tasks();

        for _ in 0..2 {
            ctl.open_dependency_picker(&tasks[2], &tasks);
            assert!(ctl.select_dependency("TASK001", &mut host));
            assert!(ctl.pending_dependency().is_none());
        }
        assert_eq!(
            host.edges,
            [
                ("TASK003".to_string(), "TASK001".to_string()),
                ("TASK003".to_string(), "TASK001".to_string()),
            ]
        );
        assert!(ctl.notifier().iter().all(|n| n.message == "Task dependency added"));
    }

    #[test]
    fn select_without_picker_does_nothing() {
        let mut ctl = controller();
        let mut host = Recorder::default();
        assert!(!ctl.select_dependency("TASK001", &mut host));
        assert!(host.edges.is_empty());
        assert!(ctl.candidates(&tasks()).is_empty());
    }

    #[test]
    fn dismissed_picker_emits_nothing() {
        let mut ctl = controller();
        let mut host = Recorder::default();
        let tasks = tasks();
        ctl.open_dependency_picker(&tasks[0], &tasks);
        ctl.dismiss_dependency_picker();
        assert!(!ctl.select_dependency("TASK002", &mut host));
        assert!(host.edges.is_empty());
    }

    #[test]
    fn switching_sprints_abandons_gestures() {
        let mut ctl = controller();
        let tasks = tasks();
        ctl.begin_drag(&tasks[0]);
        ctl.open_dependency_picker(&tasks[1], &tasks);
        ctl.set_window(SprintWindow::new(date(2025, 12, 1), date(2025, 12, 15)));
        assert!(ctl.drag_subject().is_none());
        assert!(ctl.pending_dependency().is_none());
    }
}
