//! Task status and visibility enumerations.

use super::{ParseTaskStatusError, ParseTaskVisibilityError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task lifecycle status.
///
/// The order `NEW`, `PROCESSING`, `DONE` is a working convention; any status
/// may be set from any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    /// Task has been created and not started.
    New,
    /// Task is being worked on.
    Processing,
    /// Task is finished.
    Done,
}

impl TaskStatus {
    /// Parses the canonical storage representation exactly.
    ///
    /// Unlike [`TryFrom<&str>`], surrounding whitespace and other letter
    /// cases are rejected.
    ///
    /// # Errors
    ///
    /// Returns [`ParseTaskStatusError`] for anything but a canonical status.
    pub fn from_storage(value: &str) -> Result<Self, ParseTaskStatusError> {
        match value {
            "NEW" => Ok(Self::New),
            "PROCESSING" => Ok(Self::Processing),
            "DONE" => Ok(Self::Done),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "NEW",
            Self::Processing => "PROCESSING",
            Self::Done => "DONE",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::from_storage(value.trim().to_ascii_uppercase().as_str())
            .map_err(|_| ParseTaskStatusError(value.to_owned()))
    }
}

/// Audience allowed to see a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskVisibility {
    /// Only the creator.
    Me,
    /// Every member of the creator's company.
    Company,
}

impl TaskVisibility {
    /// Parses the canonical storage representation exactly.
    ///
    /// Unlike [`TryFrom<&str>`], surrounding whitespace and other letter
    /// cases are rejected.
    ///
    /// # Errors
    ///
    /// Returns [`ParseTaskVisibilityError`] for anything but a canonical visibility.
    pub fn from_storage(value: &str) -> Result<Self, ParseTaskVisibilityError> {
        match value {
            "ME" => Ok(Self::Me),
            "COMPANY" => Ok(Self::Company),
            _ => Err(ParseTaskVisibilityError(value.to_owned())),
        }
    }

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Me => "ME",
            Self::Company => "COMPANY",
        }
    }
}

impl fmt::Display for TaskVisibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskVisibility {
    type Error = ParseTaskVisibilityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::from_storage(value.trim().to_ascii_uppercase().as_str())
            .map_err(|_| ParseTaskVisibilityError(value.to_owned()))
    }
}
