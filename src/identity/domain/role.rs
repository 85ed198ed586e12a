//! Role and user-type enumerations.

use super::{ParseUserRoleError, ParseUserTypeError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Editing capability of a user within their own company.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    /// May create and modify tasks.
    Editor,
    /// May only read.
    Viewer,
}

impl UserRole {
    /// Parses the canonical storage representation exactly.
    ///
    /// Unlike [`TryFrom<&str>`], surrounding whitespace and other letter
    /// cases are rejected.
    ///
    /// # Errors
    ///
    /// Returns [`ParseUserRoleError`] for anything but a canonical role.
    pub fn from_storage(value: &str) -> Result<Self, ParseUserRoleError> {
        match value {
            "EDITOR" => Ok(Self::Editor),
            "VIEWER" => Ok(Self::Viewer),
            _ => Err(ParseUserRoleError(value.to_owned())),
        }
    }

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Editor => "EDITOR",
            Self::Viewer => "VIEWER",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for UserRole {
    type Error = ParseUserRoleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::from_storage(value.trim().to_ascii_uppercase().as_str())
            .map_err(|_| ParseUserRoleError(value.to_owned()))
    }
}

/// Administrative standing of a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserType {
    /// May administer users of their company.
    Admin,
    /// Ordinary member.
    Normal,
}

impl UserType {
    /// Parses the canonical storage representation exactly.
    ///
    /// Unlike [`TryFrom<&str>`], surrounding whitespace and other letter
    /// cases are rejected.
    ///
    /// # Errors
    ///
    /// Returns [`ParseUserTypeError`] for anything but a canonical user type.
    pub fn from_storage(value: &str) -> Result<Self, ParseUserTypeError> {
        match value {
            "ADMIN" => Ok(Self::Admin),
            "NORMAL" => Ok(Self::Normal),
            _ => Err(ParseUserTypeError(value.to_owned())),
        }
    }

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Normal => "NORMAL",
        }
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for UserType {
    type Error = ParseUserTypeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::from_storage(value.trim().to_ascii_uppercase().as_str())
            .map_err(|_| ParseUserTypeError(value.to_owned()))
    }
}
