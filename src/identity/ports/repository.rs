//! Repository ports for credentialed users and their read-projections.

use crate::identity::domain::{Auth, User, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for identity repository operations.
pub type IdentityRepositoryResult<T> = Result<T, IdentityRepositoryError>;

/// Persistence contract for credentialed users.
#[async_trait]
pub trait AuthRepository: Send + Sync {
    /// Reserves the identifier for a user about to be stored.
    async fn allocate_id(&self) -> IdentityRepositoryResult<UserId>;

    /// Stores a new credentialed user.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityRepositoryError::DuplicateUser`] when the identifier
    /// is already taken.
    async fn store(&self, auth: &Auth) -> IdentityRepositoryResult<()>;

    /// Persists profile changes to an existing user.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityRepositoryError::NotFound`] when the user does not
    /// exist.
    async fn update(&self, auth: &Auth) -> IdentityRepositoryResult<()>;

    /// Finds a credentialed user by identifier.
    ///
    /// Returns `None` when the user does not exist.
    async fn find_by_id(&self, id: UserId) -> IdentityRepositoryResult<Option<Auth>>;
}

/// Read-only persistence contract for user projections.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Finds a user projection by identifier.
    ///
    /// Returns `None` when the user does not exist.
    async fn find_by_id(&self, id: UserId) -> IdentityRepositoryResult<Option<User>>;
}

/// Errors returned by identity repository implementations.
#[derive(Debug, Clone, Error)]
pub enum IdentityRepositoryError {
    /// A user with the same identifier already exists.
    #[error("duplicate user identifier: {0}")]
    DuplicateUser(UserId),

    /// The user was not found.
    #[error("user not found: {0}")]
    NotFound(UserId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl IdentityRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
