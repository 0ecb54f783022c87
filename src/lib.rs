//! Sprint timeline core: date-to-position layout, drag/dependency gesture
//! handling, and the board that owns sprints and tasks.

pub mod board;
pub mod error;
pub mod graph;
pub mod interaction;
pub mod io;
pub mod model;
pub mod notify;
pub mod settings;

pub use board::{NewTask, SprintBoard};
pub use error::{BoardError, Result};
pub use interaction::{DragState, Reschedule, TimelineController, TimelineHost};
pub use model::{Employee, Roster, Sprint, SprintStatus, SprintWindow, Task, TaskPriority, TaskStatus};
pub use notify::{Notification, NotificationKind, NotificationLog, Notifier};
