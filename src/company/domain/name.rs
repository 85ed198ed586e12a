//! Validated company name type.

use super::CompanyDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Minimum company name length in Unicode code points.
const MIN_NAME_LENGTH: usize = 1;

/// Maximum company name length in Unicode code points.
const MAX_NAME_LENGTH: usize = 20;

/// Company display name of 1 to 20 Unicode code points.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompanyName(String);

impl CompanyName {
    /// Creates a validated company name.
    ///
    /// Length is counted in code points, so multi-byte names such as
    /// `管理会社` count four characters.
    ///
    /// # Errors
    ///
    /// Returns [`CompanyDomainError::InvalidNameLength`] when the name is
    /// empty or longer than 20 characters.
    pub fn new(value: impl Into<String>) -> Result<Self, CompanyDomainError> {
        let raw = value.into();
        let length = raw.chars().count();
        if !(MIN_NAME_LENGTH..=MAX_NAME_LENGTH).contains(&length) {
            return Err(CompanyDomainError::InvalidNameLength(length));
        }
        Ok(Self(raw))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for CompanyName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for CompanyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
