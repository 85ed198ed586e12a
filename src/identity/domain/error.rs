//! Error types for identity domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing identity domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityDomainError {
    /// The user identifier is zero.
    #[error("invalid user identifier {0}, expected a positive integer")]
    InvalidUserId(u64),

    /// The user name is outside the 1 to 20 character range.
    #[error("user name must be 1 to 20 characters, got {0}")]
    InvalidNameLength(usize),

    /// The supplied password is empty.
    #[error("user password must be at least 1 character")]
    EmptyPassword,

    /// A stored credential hash is not a SHA-256 hex digest.
    #[error("malformed credential hash")]
    MalformedPasswordHash,
}

/// Error returned while parsing a user role.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown user role: {0}")]
pub struct ParseUserRoleError(pub String);

/// Error returned while parsing a user type.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown user type: {0}")]
pub struct ParseUserTypeError(pub String);
