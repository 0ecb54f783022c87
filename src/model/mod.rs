pub mod employee;
pub mod sprint;
pub mod task;
pub mod timeline;

pub use employee::{Employee, Roster};
pub use sprint::{Sprint, SprintStatus};
pub use task::{Task, TaskPriority, TaskStatus};
pub use timeline::{Connector, DependencyArrow, Placement, SprintWindow};

/// Date format used for due dates on the wire and in callbacks.
pub const ISO_DATE: &str = "%Y-%m-%d";

/// Date format used in human-facing labels.
pub const DISPLAY_DATE: &str = "%d/%m/%Y";
