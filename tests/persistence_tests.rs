use sprint_timeline::io::{load_board, save_board};
use sprint_timeline::settings::AppSettings;
use sprint_timeline::{BoardError, SprintBoard};

#[test]
fn board_survives_save_and_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sample.board.json");
    let board = SprintBoard::sample();

    save_board(&board, &path).unwrap();
    let loaded = load_board(&path).unwrap();

    assert_eq!(loaded.name, board.name);
    assert_eq!(loaded.sprints, board.sprints);
    assert_eq!(loaded.tasks, board.tasks);
    assert_eq!(loaded.roster.len(), 3);
}

#[test]
fn saved_board_uses_display_labels() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("labels.board.json");
    save_board(&SprintBoard::sample(), &path).unwrap();

    let json = std::fs::read_to_string(&path).unwrap();
    assert!(json.contains("\"status\": \"In Progress\""));
    assert!(json.contains("\"dueDate\": \"2025-11-23\""));
    assert!(json.contains("\"sprintId\": \"SPR002\""));
}

#[test]
fn malformed_file_is_a_json_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.board.json");
    std::fs::write(&path, "{ not json").unwrap();

    assert!(matches!(load_board(&path), Err(BoardError::Json(_))));
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.board.json");

    match load_board(&path) {
        Err(BoardError::Io { path: p, .. }) => assert_eq!(p, path),
        other => panic!("expected io error, got {other:?}"),
    }
}

#[test]
fn settings_persist_last_board() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("settings.json");
    let settings = AppSettings {
        last_board: Some(dir.path().join("work.board.json")),
        active_sprint: Some("SPR002".into()),
        ..Default::default()
    };

    settings.save(&path).unwrap();
    assert_eq!(AppSettings::load(&path), settings);
}
