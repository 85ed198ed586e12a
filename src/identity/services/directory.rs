//! Company-scoped user lookup.

use crate::access::{AccessDenied, Action, authorize};
use crate::company::domain::CompanyId;
use crate::error::{Classify, ErrorKind};
use crate::identity::{
    domain::{Auth, User, UserId},
    ports::{IdentityRepositoryError, UserRepository},
};
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for user lookup.
#[derive(Debug, Error)]
pub enum UserServiceError {
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] IdentityRepositoryError),
    /// The actor lacks the required permission.
    #[error(transparent)]
    Forbidden(#[from] AccessDenied),
    /// The user does not exist within the requested company.
    #[error("user not found: {0}")]
    UserNotFound(UserId),
}

impl Classify for UserServiceError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::Forbidden(_) => ErrorKind::Forbidden,
            Self::Repository(IdentityRepositoryError::NotFound(_)) | Self::UserNotFound(_) => {
                ErrorKind::NotFound
            }
            Self::Repository(_) => ErrorKind::InternalServerError,
        }
    }
}

/// Result type for user lookup operations.
pub type UserServiceResult<T> = Result<T, UserServiceError>;

/// User lookup service.
#[derive(Clone)]
pub struct UserService<U>
where
    U: UserRepository,
{
    users: Arc<U>,
}

impl<U> UserService<U>
where
    U: UserRepository,
{
    /// Creates a new user lookup service.
    #[must_use]
    pub const fn new(users: Arc<U>) -> Self {
        Self { users }
    }

    /// Fetches a member of `company_id`.
    ///
    /// Users of other companies are reported as missing rather than
    /// forbidden.
    ///
    /// # Errors
    ///
    /// Returns [`UserServiceError::Forbidden`] when `auth` may not view
    /// `company_id` and [`UserServiceError::UserNotFound`] when no such
    /// member exists.
    pub async fn get(
        &self,
        auth: &Auth,
        company_id: CompanyId,
        user_id: UserId,
    ) -> UserServiceResult<User> {
        authorize(auth, Action::ViewCompany(company_id))?;
        self.users
            .find_by_id(user_id)
            .await?
            .filter(|user| user.company_id() == company_id)
            .ok_or(UserServiceError::UserNotFound(user_id))
    }
}
