//! Task aggregate root.

use super::{TaskDetail, TaskDomainError, TaskId, TaskStatus, TaskTitle, TaskVisibility};
use crate::identity::domain::{User, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Caller-controlled task content shared by creation and full update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDescription {
    /// Validated title.
    pub title: TaskTitle,
    /// Optional validated detail.
    pub detail: Option<TaskDetail>,
    /// Audience of the task.
    pub visibility: TaskVisibility,
    /// Person-in-charge, if any.
    pub assignee: Option<User>,
    /// Optional deadline.
    pub due_date: Option<DateTime<Utc>>,
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: TaskTitle,
    detail: Option<TaskDetail>,
    status: TaskStatus,
    visibility: TaskVisibility,
    assignee: Option<User>,
    due_date: Option<DateTime<Utc>>,
    creator: User,
    updater: User,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted detail.
    pub detail: Option<TaskDetail>,
    /// Persisted status.
    pub status: TaskStatus,
    /// Persisted visibility.
    pub visibility: TaskVisibility,
    /// Persisted assignee with its company membership.
    pub assignee: Option<User>,
    /// Persisted deadline.
    pub due_date: Option<DateTime<Utc>>,
    /// Persisted creator.
    pub creator: User,
    /// Persisted last writer.
    pub updater: User,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new task in the `NEW` status with `creator` as updater.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::CrossCompanyAssignment`] when the assignee
    /// belongs to another company than the creator.
    pub fn new(
        id: TaskId,
        description: TaskDescription,
        creator: User,
        clock: &impl Clock,
    ) -> Result<Self, TaskDomainError> {
        ensure_same_company(description.assignee.as_ref(), &[&creator])?;

        let timestamp = clock.utc();
        let TaskDescription {
            title,
            detail,
            visibility,
            assignee,
            due_date,
        } = description;

        Ok(Self {
            id,
            title,
            detail,
            status: TaskStatus::New,
            visibility,
            assignee,
            due_date,
            updater: creator.clone(),
            creator,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            detail: data.detail,
            status: data.status,
            visibility: data.visibility,
            assignee: data.assignee,
            due_date: data.due_date,
            creator: data.creator,
            updater: data.updater,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the detail, if any.
    #[must_use]
    pub const fn detail(&self) -> Option<&TaskDetail> {
        self.detail.as_ref()
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the visibility.
    #[must_use]
    pub const fn visibility(&self) -> TaskVisibility {
        self.visibility
    }

    /// Returns the person-in-charge, if any.
    #[must_use]
    pub const fn assignee(&self) -> Option<&User> {
        self.assignee.as_ref()
    }

    /// Returns the identifier of the person-in-charge, if any.
    #[must_use]
    pub fn assignee_id(&self) -> Option<UserId> {
        self.assignee.as_ref().map(User::id)
    }

    /// Returns the deadline, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<DateTime<Utc>> {
        self.due_date
    }

    /// Returns the creator.
    #[must_use]
    pub const fn creator(&self) -> &User {
        &self.creator
    }

    /// Returns the last writer.
    #[must_use]
    pub const fn updater(&self) -> &User {
        &self.updater
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Replaces every caller-controlled field and the status.
    ///
    /// The creator is kept; `updater` becomes the last writer.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::CrossCompanyAssignment`] when the assignee
    /// belongs to another company than the creator or the updater. The task
    /// is left unchanged in that case.
    pub fn update(
        &mut self,
        description: TaskDescription,
        status: TaskStatus,
        updater: User,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        ensure_same_company(description.assignee.as_ref(), &[&self.creator, &updater])?;

        self.title = description.title;
        self.detail = description.detail;
        self.visibility = description.visibility;
        self.assignee = description.assignee;
        self.due_date = description.due_date;
        self.status = status;
        self.record_writer(updater, clock);
        Ok(())
    }

    /// Sets the status. Any status may follow any other.
    pub fn change_status(&mut self, status: TaskStatus, updater: User, clock: &impl Clock) {
        self.status = status;
        self.record_writer(updater, clock);
    }

    fn record_writer(&mut self, updater: User, clock: &impl Clock) {
        self.updater = updater;
        self.updated_at = clock.utc();
    }
}

/// Checks that `assignee` shares the company of every task participant.
fn ensure_same_company(
    assignee: Option<&User>,
    participants: &[&User],
) -> Result<(), TaskDomainError> {
    let Some(person_in_charge) = assignee else {
        return Ok(());
    };
    let mismatch = participants
        .iter()
        .find(|participant| participant.company_id() != person_in_charge.company_id());
    mismatch.map_or(Ok(()), |participant| {
        Err(TaskDomainError::CrossCompanyAssignment {
            assignee: person_in_charge.id(),
            assignee_company: person_in_charge.company_id(),
            expected_company: participant.company_id(),
        })
    })
}
