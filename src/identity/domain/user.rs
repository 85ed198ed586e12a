//! Read-projection of a user identity.

use super::{UserId, UserName, UserRole, UserType};
use crate::company::domain::CompanyId;
use serde::{Deserialize, Serialize};

/// A user as seen by other aggregates: no credential material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    name: UserName,
    role: UserRole,
    user_type: UserType,
    company_id: CompanyId,
}

impl User {
    /// Creates a user projection.
    #[must_use]
    pub const fn new(
        id: UserId,
        name: UserName,
        role: UserRole,
        user_type: UserType,
        company_id: CompanyId,
    ) -> Self {
        Self {
            id,
            name,
            role,
            user_type,
            company_id,
        }
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the user name.
    #[must_use]
    pub const fn name(&self) -> &UserName {
        &self.name
    }

    /// Returns the user role.
    #[must_use]
    pub const fn role(&self) -> UserRole {
        self.role
    }

    /// Returns the user type.
    #[must_use]
    pub const fn user_type(&self) -> UserType {
        self.user_type
    }

    /// Returns the identifier of the company the user belongs to.
    #[must_use]
    pub const fn company_id(&self) -> CompanyId {
        self.company_id
    }
}
