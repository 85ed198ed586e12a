//! Repository port for task persistence and visibility-filtered listing.

use crate::access::{AssignedTaskFilter, CompanyTaskFilter};
use crate::task::domain::{Task, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
///
/// List operations receive the visibility filter already decided by the
/// access layer; implementations only have to evaluate it. Results are
/// ordered by ascending task identifier.
///
/// The creator, updater and assignee of a returned task are `User` values.
/// Adapters sharing storage with the identity context (such as the
/// `PostgreSQL` adapter) resolve them on every read, so they reflect later
/// renames and role changes. Self-contained adapters (such as the in-memory
/// one) return the snapshots taken when the task was last written. User
/// identifiers and company membership never change, so the visibility
/// rules give the same answer either way.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Reserves the identifier for a task about to be stored.
    async fn allocate_id(&self) -> TaskRepositoryResult<TaskId>;

    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the task ID already
    /// exists.
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Persists changes to an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn update(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Finds a task by identifier, without any visibility check.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Returns the tasks assigned to a user that pass `filter`.
    async fn list_assigned(&self, filter: &AssignedTaskFilter) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns the tasks of a company that pass `filter`.
    async fn list_for_company(&self, filter: &CompanyTaskFilter)
    -> TaskRepositoryResult<Vec<Task>>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
