//! Task visibility rules.
//!
//! Single-task reads are checked with [`check_task_visible`]. List queries
//! are described by filter values that in-memory adapters evaluate with
//! `matches` and SQL adapters translate into `WHERE` clauses.

use super::Principal;
use crate::company::domain::CompanyId;
use crate::identity::domain::UserId;
use crate::task::domain::{Task, TaskVisibility};
use thiserror::Error;

/// Reason a task is withheld from an actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum VisibilityDenial {
    /// The task was created in another company.
    #[error("task belongs to another company")]
    OtherCompany,
    /// The task is visible to its creator only.
    #[error("task is private to its creator")]
    PrivateToCreator,
}

/// Decides whether `viewer` may read `task`.
///
/// Superusers see every task. Anyone else sees tasks created in their own
/// company, except `ME` tasks created by someone else. The declared
/// visibility never exposes a task across companies.
///
/// # Errors
///
/// Returns the [`VisibilityDenial`] explaining the refusal.
pub fn check_task_visible<P: Principal + ?Sized>(
    viewer: &P,
    task: &Task,
) -> Result<(), VisibilityDenial> {
    if viewer.is_super_user() {
        return Ok(());
    }
    if task.creator().company_id() != viewer.company_id() {
        return Err(VisibilityDenial::OtherCompany);
    }
    if task.visibility() == TaskVisibility::Me && task.creator().id() != viewer.user_id() {
        return Err(VisibilityDenial::PrivateToCreator);
    }
    Ok(())
}

/// Checks that `task` was created in `company_id`.
///
/// Used to scope edits: a task is only ever modified through the company
/// its creator belongs to.
///
/// # Errors
///
/// Returns [`VisibilityDenial::OtherCompany`] otherwise.
pub fn check_task_in_company(task: &Task, company_id: CompanyId) -> Result<(), VisibilityDenial> {
    if task.creator().company_id() == company_id {
        Ok(())
    } else {
        Err(VisibilityDenial::OtherCompany)
    }
}

/// Tasks assigned to one user within one company, as seen by a requester.
///
/// Only tasks created in the company qualify, whoever the assignee is. When
/// the requester is not the assignee only `COMPANY` tasks qualify.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssignedTaskFilter {
    company_id: CompanyId,
    assignee: UserId,
    include_private: bool,
}

impl AssignedTaskFilter {
    /// Builds the filter for `requester` listing the tasks of `assignee`
    /// created in `company_id`.
    #[must_use]
    pub fn for_requester(requester: UserId, assignee: UserId, company_id: CompanyId) -> Self {
        Self {
            company_id,
            assignee,
            include_private: requester == assignee,
        }
    }

    /// Returns the company the listing is scoped to.
    #[must_use]
    pub const fn company_id(&self) -> CompanyId {
        self.company_id
    }

    /// Returns the assignee whose tasks are listed.
    #[must_use]
    pub const fn assignee(&self) -> UserId {
        self.assignee
    }

    /// Returns `true` when `ME` tasks are included.
    #[must_use]
    pub const fn includes_private(&self) -> bool {
        self.include_private
    }

    /// Returns `true` when `task` belongs in the result set.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        task.creator().company_id() == self.company_id
            && task.assignee_id() == Some(self.assignee)
            && (self.include_private || task.visibility() == TaskVisibility::Company)
    }
}

/// Tasks of one company, as seen by a requester.
///
/// A task qualifies when its creator belongs to the company and it is either
/// assigned to the requester or has `COMPANY` visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompanyTaskFilter {
    company_id: CompanyId,
    requester: UserId,
}

impl CompanyTaskFilter {
    /// Builds the filter for `requester` listing the tasks of `company_id`.
    #[must_use]
    pub const fn new(company_id: CompanyId, requester: UserId) -> Self {
        Self {
            company_id,
            requester,
        }
    }

    /// Returns the company whose tasks are listed.
    #[must_use]
    pub const fn company_id(&self) -> CompanyId {
        self.company_id
    }

    /// Returns the requesting user.
    #[must_use]
    pub const fn requester(&self) -> UserId {
        self.requester
    }

    /// Returns `true` when `task` belongs in the result set.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        task.creator().company_id() == self.company_id
            && (task.assignee_id() == Some(self.requester)
                || task.visibility() == TaskVisibility::Company)
    }
}
