use std::path::Path;

use crate::board::SprintBoard;
use crate::error::{BoardError, Result};

/// Save a board to a JSON file.
pub fn save_board(board: &SprintBoard, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(board)?;
    std::fs::write(path, json).map_err(|source| BoardError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), tasks = board.tasks.len(), "board saved");
    Ok(())
}

/// Load a board from a JSON file.
pub fn load_board(path: &Path) -> Result<SprintBoard> {
    let json = std::fs::read_to_string(path).map_err(|source| BoardError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let board: SprintBoard = serde_json::from_str(&json)?;
    let dangling = crate::graph::dangling_references(&board.tasks);
    if !dangling.is_empty() {
        tracing::warn!(count = dangling.len(), "board has dependencies on missing tasks");
    }
    tracing::info!(path = %path.display(), tasks = board.tasks.len(), "board loaded");
    Ok(board)
}
