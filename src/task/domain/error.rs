//! Error types for task domain validation and parsing.

use crate::company::domain::CompanyId;
use crate::identity::domain::UserId;
use thiserror::Error;

/// Errors returned while constructing or mutating task domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task identifier is zero.
    #[error("invalid task identifier {0}, expected a positive integer")]
    InvalidTaskId(u64),

    /// The title is outside the 1 to 50 character range.
    #[error("task title must be 1 to 50 characters, got {0}")]
    InvalidTitleLength(usize),

    /// The detail exceeds 200 characters.
    #[error("task detail must be at most 200 characters, got {0}")]
    DetailTooLong(usize),

    /// The assignee belongs to a different company than a task participant.
    #[error(
        "task cannot be assigned to user {assignee} of company {assignee_company}, expected company {expected_company}"
    )]
    CrossCompanyAssignment {
        /// The rejected assignee.
        assignee: UserId,
        /// Company of the rejected assignee.
        assignee_company: CompanyId,
        /// Company of the creator or updater.
        expected_company: CompanyId,
    },
}

/// Error returned while parsing task status strings.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing task visibility strings.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task visibility: {0}")]
pub struct ParseTaskVisibilityError(pub String);
