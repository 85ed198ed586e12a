//! In-memory repository for task tests and embedding.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use crate::access::{AssignedTaskFilter, CompanyTaskFilter};
use crate::task::{
    domain::{Task, TaskId},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
///
/// Tasks are kept in identifier order so list results need no sorting. User
/// snapshots are stored alongside each task as they were at write time and
/// are not refreshed when the identity context changes.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: BTreeMap<TaskId, Task>,
    last_id: u64,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn select(&self, predicate: impl Fn(&Task) -> bool) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state
            .tasks
            .values()
            .filter(|task| predicate(task))
            .cloned()
            .collect())
    }
}

fn poisoned(err: impl ToString) -> TaskRepositoryError {
    TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn allocate_id(&self) -> TaskRepositoryResult<TaskId> {
        let mut state = self.state.write().map_err(poisoned)?;
        let next = state.last_id.saturating_add(1);
        let id = TaskId::new(next).map_err(TaskRepositoryError::persistence)?;
        state.last_id = next;
        Ok(id)
    }

    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        if state.tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }
        state.last_id = state.last_id.max(task.id().value());
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        let stored = state
            .tasks
            .get_mut(&task.id())
            .ok_or(TaskRepositoryError::NotFound(task.id()))?;
        *stored = task.clone();
        Ok(())
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn list_assigned(&self, filter: &AssignedTaskFilter) -> TaskRepositoryResult<Vec<Task>> {
        self.select(|task| filter.matches(task))
    }

    async fn list_for_company(
        &self,
        filter: &CompanyTaskFilter,
    ) -> TaskRepositoryResult<Vec<Task>> {
        self.select(|task| filter.matches(task))
    }
}
