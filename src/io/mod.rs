mod file;

pub use file::{load_board, save_board};

/// File extension used for saved boards.
pub const BOARD_EXTENSION: &str = "board.json";
