use chrono::NaiveDate;
use sprint_timeline::graph;
use sprint_timeline::{
    Notification, NotificationKind, NotificationLog, SprintBoard, SprintWindow, TimelineController,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn active_window(board: &SprintBoard) -> SprintWindow {
    board.sprint("SPR002").unwrap().window()
}

#[test]
fn sample_sprint_lays_out_bars_and_connectors() {
    let board = SprintBoard::sample();
    let window = active_window(&board);
    assert_eq!(window.total_days(), 14);
    assert_eq!(window.day_count(), 15);

    let tasks = board.tasks_in_sprint("SPR002");
    let payroll = tasks.iter().find(|t| t.id == "TASK003").unwrap();
    assert!((window.task_position(payroll) - 50.0).abs() < 1e-9);

    let arrows = window.arrows(&tasks);
    assert_eq!(arrows.len(), 3);
    let first = arrows
        .iter()
        .find(|a| a.from == "TASK001" && a.to == "TASK003")
        .unwrap();
    assert!((first.connector.start_x - 15.0).abs() < 1e-9);
    assert!((first.connector.end_x - 35.0).abs() < 1e-9);
}

#[test]
fn drag_and_drop_reschedules_through_the_board() {
    let mut board = SprintBoard::sample();
    let mut controller = TimelineController::new(active_window(&board), Vec::<Notification>::new());

    let heatmap = board.task("TASK004").unwrap().clone();
    controller.begin_drag(&heatmap);
    let done = controller.drop_on_day(7, &mut board).unwrap();

    assert_eq!(done.new_due_date, date(2025, 11, 23));
    assert_eq!(board.task("TASK004").unwrap().due_date, date(2025, 11, 23));
    assert!(controller.drag_subject().is_none());

    let notes = controller.notifier();
    assert_eq!(notes.len(), 2);
    assert_eq!(notes[0].title, "Task Rescheduled");
    assert_eq!(
        notes[0].message,
        "Task \"Attendance heatmap\" has been rescheduled to 23/11/2025"
    );
    assert_eq!(notes[1].kind, NotificationKind::Success);
    assert_eq!(notes[1].message, "Task rescheduled and Marcus Lee has been notified");
}

#[test]
fn drop_for_unassigned_task_skips_acknowledgement() {
    let mut board = SprintBoard::sample();
    board.tasks[3].assignee_id = "EMP999".to_string();
    let mut controller = TimelineController::new(active_window(&board), NotificationLog::default());

    let task = board.tasks[3].clone();
    controller.begin_drag(&task);
    controller.drop_on_day(0, &mut board);

    assert_eq!(board.tasks[3].due_date, date(2025, 11, 16));
    assert_eq!(controller.notifier().len(), 1);
    assert_eq!(controller.notifier().latest().unwrap().kind, NotificationKind::Info);
}

#[test]
fn drop_without_drag_leaves_board_untouched() {
    let mut board = SprintBoard::sample();
    let before = board.tasks.clone();
    let mut controller = TimelineController::new(active_window(&board), NotificationLog::default());

    assert!(controller.drop_on_day(3, &mut board).is_none());
    assert_eq!(board.tasks, before);
    assert!(controller.notifier().is_empty());
}

#[test]
fn picker_adds_dependency_on_the_board() {
    let mut board = SprintBoard::sample();
    let mut controller = TimelineController::new(active_window(&board), NotificationLog::default());
    let tasks = board.tasks_in_sprint("SPR002");

    let heatmap = tasks.iter().find(|t| t.id == "TASK004").unwrap();
    let candidates = controller.open_dependency_picker(heatmap, &tasks);
    assert_eq!(candidates.len(), 4);
    assert!(candidates.iter().all(|t| t.id != "TASK004"));

    assert!(controller.select_dependency("TASK002", &mut board));
    assert!(controller.pending_dependency().is_none());
    assert_eq!(board.task("TASK004").unwrap().dependencies, vec!["TASK002"]);
    assert_eq!(
        controller.notifier().latest().unwrap().message,
        "Task dependency added"
    );
}

#[test]
fn repeated_selection_is_emitted_but_stored_once() {
    let mut board = SprintBoard::sample();
    let mut controller = TimelineController::new(active_window(&board), NotificationLog::default());
    let tasks = board.tasks_in_sprint("SPR002");
    let payroll = tasks.iter().find(|t| t.id == "TASK003").unwrap();

    controller.open_dependency_picker(payroll, &tasks);
    assert!(controller.select_dependency("TASK001", &mut board));

    assert_eq!(board.task("TASK003").unwrap().dependencies, vec!["TASK001"]);
    assert_eq!(controller.notifier().len(), 1);
}

#[test]
fn cycle_check_flags_reverse_edge_in_sample() {
    let board = SprintBoard::sample();
    // TASK005 depends on TASK003, which depends on TASK001
    assert!(graph::would_create_cycle(&board.tasks, "TASK001", "TASK005"));
    assert!(!graph::would_create_cycle(&board.tasks, "TASK004", "TASK005"));
    assert!(graph::find_cycle(&board.tasks).is_none());

    let order = graph::topological_order(&board.tasks).unwrap();
    let pos = |id: &str| order.iter().position(|t| t == id).unwrap();
    assert!(pos("TASK001") < pos("TASK003"));
    assert!(pos("TASK003") < pos("TASK005"));
    assert!(pos("TASK002") < pos("TASK005"));
}

#[test]
fn switching_sprints_abandons_gestures() {
    let board = SprintBoard::sample();
    let mut controller = TimelineController::new(active_window(&board), NotificationLog::default());
    let task = board.task("TASK001").unwrap();

    controller.begin_drag(task);
    controller.open_dependency_picker(task, &board.tasks);
    controller.set_window(board.sprint("SPR003").unwrap().window());

    assert!(controller.drag_subject().is_none());
    assert!(controller.pending_dependency().is_none());
}
