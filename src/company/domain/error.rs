//! Error types for company domain validation.

use thiserror::Error;

/// Errors returned while constructing company domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CompanyDomainError {
    /// The company identifier is zero.
    #[error("invalid company identifier {0}, expected a positive integer")]
    InvalidCompanyId(u64),

    /// The company name is outside the 1 to 20 character range.
    #[error("company name must be 1 to 20 characters, got {0}")]
    InvalidNameLength(usize),
}
