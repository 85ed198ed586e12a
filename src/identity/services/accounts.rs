//! Credentialed user administration.

use crate::access::{AccessDenied, Action, authorize};
use crate::company::{
    domain::CompanyId,
    ports::{CompanyRepository, CompanyRepositoryError},
};
use crate::error::{Classify, ErrorKind};
use crate::identity::{
    domain::{
        Auth, AuthProfile, IdentityDomainError, PasswordHash, UserId, UserName, UserRole, UserType,
    },
    ports::{AuthRepository, IdentityRepositoryError},
};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Request payload for creating a user.
#[derive(Clone, PartialEq, Eq)]
pub struct CreateUserRequest {
    name: String,
    password: String,
    role: UserRole,
    user_type: UserType,
}

impl CreateUserRequest {
    /// Creates a request with every required user field.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        password: impl Into<String>,
        role: UserRole,
        user_type: UserType,
    ) -> Self {
        Self {
            name: name.into(),
            password: password.into(),
            role,
            user_type,
        }
    }
}

impl std::fmt::Debug for CreateUserRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreateUserRequest")
            .field("name", &self.name)
            .field("password", &"<redacted>")
            .field("role", &self.role)
            .field("user_type", &self.user_type)
            .finish()
    }
}

/// Request payload for replacing a user's profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateUserRequest {
    name: String,
    role: UserRole,
    user_type: UserType,
}

impl UpdateUserRequest {
    /// Creates a request with every profile field.
    #[must_use]
    pub fn new(name: impl Into<String>, role: UserRole, user_type: UserType) -> Self {
        Self {
            name: name.into(),
            role,
            user_type,
        }
    }

    fn into_profile(self) -> Result<AuthProfile, IdentityDomainError> {
        Ok(AuthProfile {
            name: UserName::new(self.name)?,
            role: self.role,
            user_type: self.user_type,
        })
    }
}

/// Service-level errors for user administration.
#[derive(Debug, Error)]
pub enum AuthServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] IdentityDomainError),
    /// Identity repository operation failed.
    #[error(transparent)]
    Repository(#[from] IdentityRepositoryError),
    /// Company lookup failed.
    #[error(transparent)]
    Company(#[from] CompanyRepositoryError),
    /// The actor lacks the required permission.
    #[error(transparent)]
    Forbidden(#[from] AccessDenied),
    /// The target user is not a member of the company the request names.
    #[error("user {user_id} is not a member of company {company_id}")]
    OutsideCompany {
        /// Target user.
        user_id: UserId,
        /// Company named by the request.
        company_id: CompanyId,
    },
    /// The company does not exist.
    #[error("company not found: {0}")]
    CompanyNotFound(CompanyId),
    /// The user does not exist.
    #[error("user not found: {0}")]
    UserNotFound(UserId),
}

impl Classify for AuthServiceError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(_) => ErrorKind::BadRequest,
            Self::Forbidden(_) | Self::OutsideCompany { .. } => ErrorKind::Forbidden,
            Self::Repository(IdentityRepositoryError::NotFound(_))
            | Self::CompanyNotFound(_)
            | Self::UserNotFound(_) => ErrorKind::NotFound,
            Self::Repository(_) | Self::Company(_) => ErrorKind::InternalServerError,
        }
    }
}

/// Result type for user administration operations.
pub type AuthServiceResult<T> = Result<T, AuthServiceError>;

/// User administration service.
#[derive(Clone)]
pub struct AuthService<A, P>
where
    A: AuthRepository,
    P: CompanyRepository,
{
    accounts: Arc<A>,
    companies: Arc<P>,
}

impl<A, P> AuthService<A, P>
where
    A: AuthRepository,
    P: CompanyRepository,
{
    /// Creates a new user administration service.
    #[must_use]
    pub const fn new(accounts: Arc<A>, companies: Arc<P>) -> Self {
        Self {
            accounts,
            companies,
        }
    }

    /// Creates a user in `company_id`.
    ///
    /// # Errors
    ///
    /// Returns [`AuthServiceError::Forbidden`] when `auth` may not
    /// administer users of `company_id`, [`AuthServiceError::CompanyNotFound`]
    /// when the company does not exist, and [`AuthServiceError::Domain`] when
    /// the name or password is invalid.
    pub async fn create(
        &self,
        auth: &Auth,
        company_id: CompanyId,
        request: CreateUserRequest,
    ) -> AuthServiceResult<UserId> {
        authorize(auth, Action::AdministerUsers(company_id))?;
        if self.companies.find_by_id(company_id).await?.is_none() {
            return Err(AuthServiceError::CompanyNotFound(company_id));
        }

        let CreateUserRequest {
            name,
            password,
            role,
            user_type,
        } = request;
        let profile = AuthProfile {
            name: UserName::new(name)?,
            role,
            user_type,
        };
        let password_hash = PasswordHash::from_password(&password)?;
        let user_id = self.accounts.allocate_id().await?;
        let account = Auth::new(user_id, profile, password_hash, company_id);
        self.accounts.store(&account).await?;

        debug!(actor = %auth.id(), company = %company_id, user = %user_id, "user created");
        Ok(user_id)
    }

    /// Replaces the profile of a member of `company_id`.
    ///
    /// # Errors
    ///
    /// Returns [`AuthServiceError::Forbidden`] when `auth` may not
    /// administer users of `company_id`, [`AuthServiceError::UserNotFound`]
    /// when the user does not exist, [`AuthServiceError::OutsideCompany`]
    /// when the user belongs to another company, and
    /// [`AuthServiceError::Domain`] when the name is invalid.
    pub async fn update(
        &self,
        auth: &Auth,
        company_id: CompanyId,
        user_id: UserId,
        request: UpdateUserRequest,
    ) -> AuthServiceResult<()> {
        authorize(auth, Action::AdministerUsers(company_id))?;
        let profile = request.into_profile()?;
        let mut account = self.get(user_id).await?;
        if account.company_id() != company_id {
            return Err(AuthServiceError::OutsideCompany {
                user_id,
                company_id,
            });
        }
        account.update_profile(profile);
        self.accounts.update(&account).await?;

        debug!(actor = %auth.id(), company = %company_id, user = %user_id, "user updated");
        Ok(())
    }

    /// Fetches a credentialed user without any permission check.
    ///
    /// Intended for the session layer resolving its own principal.
    ///
    /// # Errors
    ///
    /// Returns [`AuthServiceError::UserNotFound`] when the user does not
    /// exist.
    pub async fn get(&self, user_id: UserId) -> AuthServiceResult<Auth> {
        self.accounts
            .find_by_id(user_id)
            .await?
            .ok_or(AuthServiceError::UserNotFound(user_id))
    }
}
