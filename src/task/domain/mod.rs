//! Domain model for tasks.
//!
//! The task domain models validated task content, the status lifecycle, and
//! the same-company assignment invariant while keeping persistence and
//! authorization outside of the domain boundary.

mod error;
mod ids;
mod status;
mod task;
mod text;

pub use error::{ParseTaskStatusError, ParseTaskVisibilityError, TaskDomainError};
pub use ids::TaskId;
pub use status::{TaskStatus, TaskVisibility};
pub use task::{PersistedTaskData, Task, TaskDescription};
pub use text::{TaskDetail, TaskTitle};
