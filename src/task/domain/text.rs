//! Validated task text fields.

use super::TaskDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

const MIN_TITLE_LENGTH: usize = 1;
const MAX_TITLE_LENGTH: usize = 50;
const MAX_DETAIL_LENGTH: usize = 200;

/// Task title of 1 to 50 Unicode code points.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskTitle(String);

impl TaskTitle {
    /// Creates a validated title.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidTitleLength`] when the title is
    /// empty or longer than 50 code points.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = value.into();
        let length = raw.chars().count();
        if !(MIN_TITLE_LENGTH..=MAX_TITLE_LENGTH).contains(&length) {
            return Err(TaskDomainError::InvalidTitleLength(length));
        }
        Ok(Self(raw))
    }

    /// Returns the title as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Free-form task detail of at most 200 Unicode code points.
///
/// An empty detail is valid.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskDetail(String);

impl TaskDetail {
    /// Creates a validated detail.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::DetailTooLong`] when the detail is longer
    /// than 200 code points.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = value.into();
        let length = raw.chars().count();
        if length > MAX_DETAIL_LENGTH {
            return Err(TaskDomainError::DetailTooLong(length));
        }
        Ok(Self(raw))
    }

    /// Returns the detail as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
