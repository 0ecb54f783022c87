use std::path::PathBuf;

use chrono::NaiveDate;

/// Errors raised by the board and its persistence layer.
#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    #[error("sprint window is reversed: {start} is after {end}")]
    InvalidSprintWindow { start: NaiveDate, end: NaiveDate },

    #[error("unknown sprint '{0}'")]
    UnknownSprint(String),

    #[error("unknown task '{0}'")]
    UnknownTask(String),

    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed board file: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BoardError>;
