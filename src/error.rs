//! Failure taxonomy shared by every service in the crate.
//!
//! Each bounded context keeps its own `thiserror` enums. The transport
//! boundary only needs to know which [`ErrorKind`] a failure belongs to, so
//! every service error implements [`Classify`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse failure category surfaced to the transport boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The caller supplied invalid input.
    BadRequest,
    /// The caller identity is missing or unknown.
    Unauthorized,
    /// The caller is authenticated but not permitted to act.
    Forbidden,
    /// The requested entity, or any qualifying row, does not exist.
    NotFound,
    /// Storage or invariant failure not attributable to the caller.
    InternalServerError,
}

impl ErrorKind {
    /// Returns the fixed HTTP status signal for this kind.
    #[must_use]
    pub const fn status_code(self) -> u16 {
        match self {
            Self::BadRequest => 400,
            Self::Unauthorized => 401,
            Self::Forbidden => 403,
            Self::NotFound => 404,
            Self::InternalServerError => 500,
        }
    }

    /// Returns the canonical label for this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BadRequest => "bad request",
            Self::Unauthorized => "unauthorized",
            Self::Forbidden => "forbidden",
            Self::NotFound => "not found",
            Self::InternalServerError => "internal server error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maps an error value onto the shared [`ErrorKind`] taxonomy.
pub trait Classify {
    /// Returns the failure category of this error.
    fn kind(&self) -> ErrorKind;

    /// Returns the status signal the transport boundary should emit.
    fn status_code(&self) -> u16 {
        self.kind().status_code()
    }
}
