//! Task service gated by the access engine.
//!
//! Every operation receives the authenticated [`Auth`] and the company the
//! request is scoped to. Predicates are checked before any write, and task
//! visibility is checked after the fetch.

use super::{CreateTaskRequest, TaskQueryConfig, UpdateTaskRequest};
use crate::access::{
    AccessDenied, Action, AssignedTaskFilter, CompanyTaskFilter, VisibilityDenial, authorize,
    check_task_in_company, check_task_visible,
};
use crate::company::domain::CompanyId;
use crate::error::{Classify, ErrorKind};
use crate::identity::{
    domain::{Auth, User, UserId},
    ports::{IdentityRepositoryError, UserRepository},
};
use crate::task::{
    domain::{
        Task, TaskDescription, TaskDetail, TaskDomainError, TaskId, TaskStatus, TaskTitle,
        TaskVisibility,
    },
    ports::{TaskRepository, TaskRepositoryError},
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// Service-level errors for task operations.
#[derive(Debug, Error)]
pub enum TaskServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Task repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// User lookup failed.
    #[error(transparent)]
    Identity(#[from] IdentityRepositoryError),
    /// The actor lacks the required permission.
    #[error(transparent)]
    Forbidden(#[from] AccessDenied),
    /// The task exists but is withheld from the actor.
    #[error("task {task_id} is not accessible: {reason}")]
    TaskAccessDenied {
        /// Requested task.
        task_id: TaskId,
        /// Why the task is withheld.
        reason: VisibilityDenial,
    },
    /// The task does not exist.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),
    /// A referenced user does not exist.
    #[error("user not found: {0}")]
    UserNotFound(UserId),
    /// A list query yielded no qualifying tasks.
    #[error("no matching tasks")]
    NoTasks,
}

impl Classify for TaskServiceError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(_) => ErrorKind::BadRequest,
            Self::Forbidden(_) | Self::TaskAccessDenied { .. } => ErrorKind::Forbidden,
            Self::Repository(TaskRepositoryError::NotFound(_))
            | Self::TaskNotFound(_)
            | Self::UserNotFound(_)
            | Self::NoTasks => ErrorKind::NotFound,
            Self::Repository(_) | Self::Identity(_) => ErrorKind::InternalServerError,
        }
    }
}

/// Result type for task service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;

/// Task orchestration service.
#[derive(Clone)]
pub struct TaskService<T, U, C>
where
    T: TaskRepository,
    U: UserRepository,
    C: Clock + Send + Sync,
{
    tasks: Arc<T>,
    users: Arc<U>,
    clock: Arc<C>,
    config: TaskQueryConfig,
}

impl<T, U, C> TaskService<T, U, C>
where
    T: TaskRepository,
    U: UserRepository,
    C: Clock + Send + Sync,
{
    /// Creates a task service with default query behaviour.
    #[must_use]
    pub fn new(tasks: Arc<T>, users: Arc<U>, clock: Arc<C>) -> Self {
        Self {
            tasks,
            users,
            clock,
            config: TaskQueryConfig::default(),
        }
    }

    /// Replaces the query behaviour.
    #[must_use]
    pub const fn with_config(mut self, config: TaskQueryConfig) -> Self {
        self.config = config;
        self
    }

    /// Fetches one task on behalf of `auth`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Forbidden`] when `auth` may not view
    /// `company_id`, [`TaskServiceError::TaskNotFound`] when the task does
    /// not exist, and [`TaskServiceError::TaskAccessDenied`] when the task is
    /// withheld from `auth`.
    pub async fn find(
        &self,
        auth: &Auth,
        company_id: CompanyId,
        task_id: TaskId,
    ) -> TaskServiceResult<Task> {
        authorize(auth, Action::ViewCompany(company_id))?;
        let task = self.fetch(task_id).await?;
        check_task_visible(auth, &task).map_err(|reason| deny(auth, task_id, reason))?;
        Ok(task)
    }

    /// Lists the tasks assigned to `assignee` that `auth` may see.
    ///
    /// Only tasks created in `company_id` are listed.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Forbidden`] when `auth` may not view
    /// `company_id`, and [`TaskServiceError::NoTasks`] when nothing
    /// qualifies and empty results are reported as not found.
    pub async fn list_by_assigned_user(
        &self,
        auth: &Auth,
        company_id: CompanyId,
        assignee: UserId,
    ) -> TaskServiceResult<Vec<Task>> {
        authorize(auth, Action::ViewCompany(company_id))?;
        let filter = AssignedTaskFilter::for_requester(auth.id(), assignee, company_id);
        let tasks = self.tasks.list_assigned(&filter).await?;
        self.non_empty(tasks)
    }

    /// Lists the tasks of `company_id` that `auth` may see.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Forbidden`] when `auth` may not view
    /// `company_id`, and [`TaskServiceError::NoTasks`] when nothing
    /// qualifies and empty results are reported as not found.
    pub async fn list_by_company(
        &self,
        auth: &Auth,
        company_id: CompanyId,
    ) -> TaskServiceResult<Vec<Task>> {
        authorize(auth, Action::ViewCompany(company_id))?;
        let filter = CompanyTaskFilter::new(company_id, auth.id());
        let tasks = self.tasks.list_for_company(&filter).await?;
        self.non_empty(tasks)
    }

    /// Creates a task authored by `auth`. The task always starts as
    /// [`TaskStatus::New`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Forbidden`] when `auth` may not edit
    /// tasks of `company_id`, [`TaskServiceError::UserNotFound`] when the
    /// assignee does not exist, and [`TaskServiceError::Domain`] when
    /// validation fails.
    pub async fn create(
        &self,
        auth: &Auth,
        company_id: CompanyId,
        request: CreateTaskRequest,
    ) -> TaskServiceResult<TaskId> {
        authorize(auth, Action::EditTasks(company_id))?;
        if let Some(requested) = request.requested_status.filter(|status| *status != TaskStatus::New) {
            debug!(actor = %auth.id(), %requested, "ignoring requested status on task creation");
        }

        let description = self
            .describe(
                request.title,
                request.detail,
                request.visibility,
                request.assignee,
                request.due_date,
            )
            .await?;
        let task_id = self.tasks.allocate_id().await?;
        let task = Task::new(task_id, description, auth.to_user(), &*self.clock)?;
        self.tasks.store(&task).await?;

        debug!(actor = %auth.id(), company = %company_id, task = %task_id, "task created");
        Ok(task_id)
    }

    /// Replaces every caller-controlled field of a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Forbidden`] when `auth` may not edit
    /// tasks of `company_id`, [`TaskServiceError::TaskAccessDenied`] when the
    /// task belongs to another company, [`TaskServiceError::TaskNotFound`]
    /// or [`TaskServiceError::UserNotFound`] for missing entities, and
    /// [`TaskServiceError::Domain`] when validation fails.
    pub async fn update(
        &self,
        auth: &Auth,
        company_id: CompanyId,
        task_id: TaskId,
        request: UpdateTaskRequest,
    ) -> TaskServiceResult<()> {
        authorize(auth, Action::EditTasks(company_id))?;
        let mut task = self.fetch_for_edit(auth, company_id, task_id).await?;

        let description = self
            .describe(
                request.title,
                request.detail,
                request.visibility,
                request.assignee,
                request.due_date,
            )
            .await?;
        task.update(description, request.status, auth.to_user(), &*self.clock)?;
        self.tasks.update(&task).await?;

        debug!(actor = %auth.id(), company = %company_id, task = %task_id, "task updated");
        Ok(())
    }

    /// Sets the status of a task. Any status may follow any other.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Forbidden`] when `auth` may not edit
    /// tasks of `company_id`, [`TaskServiceError::TaskAccessDenied`] when the
    /// task belongs to another company, and
    /// [`TaskServiceError::TaskNotFound`] when it does not exist.
    pub async fn update_status(
        &self,
        auth: &Auth,
        company_id: CompanyId,
        task_id: TaskId,
        status: TaskStatus,
    ) -> TaskServiceResult<()> {
        authorize(auth, Action::EditTasks(company_id))?;
        let mut task = self.fetch_for_edit(auth, company_id, task_id).await?;
        task.change_status(status, auth.to_user(), &*self.clock);
        self.tasks.update(&task).await?;

        debug!(actor = %auth.id(), task = %task_id, %status, "task status changed");
        Ok(())
    }

    async fn fetch(&self, task_id: TaskId) -> TaskServiceResult<Task> {
        self.tasks
            .find_by_id(task_id)
            .await?
            .ok_or(TaskServiceError::TaskNotFound(task_id))
    }

    async fn fetch_for_edit(
        &self,
        auth: &Auth,
        company_id: CompanyId,
        task_id: TaskId,
    ) -> TaskServiceResult<Task> {
        let task = self.fetch(task_id).await?;
        check_task_in_company(&task, company_id).map_err(|reason| deny(auth, task_id, reason))?;
        Ok(task)
    }

    async fn describe(
        &self,
        title: String,
        detail: Option<String>,
        visibility: TaskVisibility,
        assignee: Option<UserId>,
        due_date: Option<DateTime<Utc>>,
    ) -> TaskServiceResult<TaskDescription> {
        let valid_title = TaskTitle::new(title)?;
        let valid_detail = detail.map(TaskDetail::new).transpose()?;
        let mut person_in_charge = None;
        if let Some(user_id) = assignee {
            person_in_charge = Some(self.user(user_id).await?);
        }
        Ok(TaskDescription {
            title: valid_title,
            detail: valid_detail,
            visibility,
            assignee: person_in_charge,
            due_date,
        })
    }

    async fn user(&self, user_id: UserId) -> TaskServiceResult<User> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or(TaskServiceError::UserNotFound(user_id))
    }

    fn non_empty(&self, tasks: Vec<Task>) -> TaskServiceResult<Vec<Task>> {
        if tasks.is_empty() && self.config.empty_result_is_not_found {
            return Err(TaskServiceError::NoTasks);
        }
        Ok(tasks)
    }
}

fn deny(auth: &Auth, task_id: TaskId, reason: VisibilityDenial) -> TaskServiceError {
    warn!(actor = %auth.id(), task = %task_id, %reason, "task access denied");
    TaskServiceError::TaskAccessDenied { task_id, reason }
}
