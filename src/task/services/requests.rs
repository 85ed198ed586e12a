//! Request payloads accepted by [`super::TaskService`].

use crate::identity::domain::UserId;
use crate::task::domain::{TaskStatus, TaskVisibility};
use chrono::{DateTime, Utc};

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    pub(super) title: String,
    pub(super) detail: Option<String>,
    pub(super) visibility: TaskVisibility,
    pub(super) assignee: Option<UserId>,
    pub(super) due_date: Option<DateTime<Utc>>,
    pub(super) requested_status: Option<TaskStatus>,
}

impl CreateTaskRequest {
    /// Creates a request with required task fields.
    #[must_use]
    pub fn new(title: impl Into<String>, visibility: TaskVisibility) -> Self {
        Self {
            title: title.into(),
            detail: None,
            visibility,
            assignee: None,
            due_date: None,
            requested_status: None,
        }
    }

    /// Sets the task detail.
    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Sets the person-in-charge.
    #[must_use]
    pub const fn with_assignee(mut self, assignee: UserId) -> Self {
        self.assignee = Some(assignee);
        self
    }

    /// Sets the deadline.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Records a caller-supplied status.
    ///
    /// New tasks always start as [`TaskStatus::New`]; the value is only
    /// logged.
    #[must_use]
    pub const fn with_requested_status(mut self, status: TaskStatus) -> Self {
        self.requested_status = Some(status);
        self
    }
}

/// Request payload for replacing every caller-controlled task field.
///
/// Optional fields left unset are cleared on the stored task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    pub(super) title: String,
    pub(super) detail: Option<String>,
    pub(super) visibility: TaskVisibility,
    pub(super) status: TaskStatus,
    pub(super) assignee: Option<UserId>,
    pub(super) due_date: Option<DateTime<Utc>>,
}

impl UpdateTaskRequest {
    /// Creates a request with required task fields.
    #[must_use]
    pub fn new(title: impl Into<String>, visibility: TaskVisibility, status: TaskStatus) -> Self {
        Self {
            title: title.into(),
            detail: None,
            visibility,
            status,
            assignee: None,
            due_date: None,
        }
    }

    /// Sets the task detail.
    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Sets the person-in-charge.
    #[must_use]
    pub const fn with_assignee(mut self, assignee: UserId) -> Self {
        self.assignee = Some(assignee);
        self
    }

    /// Sets the deadline.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }
}
