//! Application services for task reads and mutations.

mod query;
mod requests;
mod service;

pub use query::TaskQueryConfig;
pub use requests::{CreateTaskRequest, UpdateTaskRequest};
pub use service::{TaskService, TaskServiceError, TaskServiceResult};
