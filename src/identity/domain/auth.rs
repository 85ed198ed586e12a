//! Credentialed user aggregate root.

use super::{PasswordHash, User, UserId, UserName, UserRole, UserType};
use crate::company::domain::CompanyId;

/// Mutable profile fields shared by user creation and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthProfile {
    /// Display name.
    pub name: UserName,
    /// Editing capability.
    pub role: UserRole,
    /// Administrative standing.
    pub user_type: UserType,
}

/// Authenticated principal: a user together with its credential hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Auth {
    id: UserId,
    name: UserName,
    password_hash: PasswordHash,
    role: UserRole,
    user_type: UserType,
    company_id: CompanyId,
}

/// Parameter object for reconstructing a persisted credentialed user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedAuthData {
    /// Persisted user identifier.
    pub id: UserId,
    /// Persisted display name.
    pub name: UserName,
    /// Persisted credential hash.
    pub password_hash: PasswordHash,
    /// Persisted role.
    pub role: UserRole,
    /// Persisted user type.
    pub user_type: UserType,
    /// Persisted company membership.
    pub company_id: CompanyId,
}

impl Auth {
    /// Creates a credentialed user in `company_id`.
    #[must_use]
    pub fn new(
        id: UserId,
        profile: AuthProfile,
        password_hash: PasswordHash,
        company_id: CompanyId,
    ) -> Self {
        let AuthProfile {
            name,
            role,
            user_type,
        } = profile;
        Self {
            id,
            name,
            password_hash,
            role,
            user_type,
            company_id,
        }
    }

    /// Reconstructs a credentialed user from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedAuthData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            password_hash: data.password_hash,
            role: data.role,
            user_type: data.user_type,
            company_id: data.company_id,
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

    /// Returns the stored credential hash.
    #[must_use]
    pub const fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
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

    /// Returns `true` when `password` matches the stored hash.
    #[must_use]
    pub fn verify_password(&self, password: &str) -> bool {
        self.password_hash.matches(password)
    }

    /// Replaces name, role, and user type. Company and credential are kept.
    pub fn update_profile(&mut self, profile: AuthProfile) {
        self.name = profile.name;
        self.role = profile.role;
        self.user_type = profile.user_type;
    }

    /// Returns the read-projection of this identity.
    #[must_use]
    pub fn to_user(&self) -> User {
        User::new(
            self.id,
            self.name.clone(),
            self.role,
            self.user_type,
            self.company_id,
        )
    }
}
