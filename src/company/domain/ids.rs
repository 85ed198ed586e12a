//! Identifier type for companies.

use super::CompanyDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Positive identifier of a company.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompanyId(u64);

impl CompanyId {
    /// Identifier of the admin company whose members act as superusers.
    pub const ADMIN: Self = Self(1);

    /// Creates a validated company identifier.
    ///
    /// # Errors
    ///
    /// Returns [`CompanyDomainError::InvalidCompanyId`] when the value is
    /// zero.
    pub const fn new(value: u64) -> Result<Self, CompanyDomainError> {
        if value == 0 {
            return Err(CompanyDomainError::InvalidCompanyId(value));
        }
        Ok(Self(value))
    }

    /// Returns the underlying numeric value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Returns `true` when this is the admin company.
    #[must_use]
    pub const fn is_admin_company(self) -> bool {
        self.0 == Self::ADMIN.0
    }
}

impl fmt::Display for CompanyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
