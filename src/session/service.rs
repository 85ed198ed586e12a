//! Credential verification and principal resolution.

use super::{SessionClaims, SessionConfig, TokenIssueError, TokenIssuer};
use crate::company::domain::CompanyId;
use crate::error::{Classify, ErrorKind};
use crate::identity::{
    domain::{Auth, UserId},
    ports::{AuthRepository, IdentityRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// Successful sign-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOutcome {
    /// Bearer token minted for the session.
    pub token: String,
    /// Signed-in user.
    pub user_id: UserId,
    /// Company of the signed-in user.
    pub company_id: CompanyId,
}

/// Session failures.
#[derive(Debug, Error)]
pub enum SessionError {
    /// No user has the given identifier.
    #[error("user not found: {0}")]
    UnknownUser(UserId),
    /// The password does not match the stored credential.
    #[error("invalid credentials for user {0}")]
    InvalidCredentials(UserId),
    /// No caller identity was supplied, or it names no user.
    #[error("caller is not authenticated")]
    Unauthenticated,
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] IdentityRepositoryError),
    /// Token signing failed.
    #[error(transparent)]
    Issuer(#[from] TokenIssueError),
    /// The token expiry cannot be represented.
    #[error("token expiry overflows the supported time range")]
    ExpiryOutOfRange,
}

impl Classify for SessionError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::UnknownUser(_) => ErrorKind::NotFound,
            Self::InvalidCredentials(_) => ErrorKind::BadRequest,
            Self::Unauthenticated => ErrorKind::Unauthorized,
            Self::Repository(_) | Self::Issuer(_) | Self::ExpiryOutOfRange => {
                ErrorKind::InternalServerError
            }
        }
    }
}

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Sign-in service.
#[derive(Clone)]
pub struct SessionService<R, I, C>
where
    R: AuthRepository,
    I: TokenIssuer,
    C: Clock + Send + Sync,
{
    accounts: Arc<R>,
    issuer: Arc<I>,
    clock: Arc<C>,
    config: SessionConfig,
}

impl<R, I, C> SessionService<R, I, C>
where
    R: AuthRepository,
    I: TokenIssuer,
    C: Clock + Send + Sync,
{
    /// Creates a new session service.
    #[must_use]
    pub const fn new(
        accounts: Arc<R>,
        issuer: Arc<I>,
        clock: Arc<C>,
        config: SessionConfig,
    ) -> Self {
        Self {
            accounts,
            issuer,
            clock,
            config,
        }
    }

    /// Verifies `password` for `user_id` and mints a session token.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::UnknownUser`] when no such user exists,
    /// [`SessionError::InvalidCredentials`] on a password mismatch, and
    /// [`SessionError::Issuer`] or [`SessionError::ExpiryOutOfRange`] when
    /// no token can be minted.
    pub async fn login(&self, user_id: UserId, password: &str) -> SessionResult<LoginOutcome> {
        let account = self
            .accounts
            .find_by_id(user_id)
            .await?
            .ok_or(SessionError::UnknownUser(user_id))?;
        if !account.verify_password(password) {
            warn!(user = %user_id, "password mismatch");
            return Err(SessionError::InvalidCredentials(user_id));
        }

        let expires_at = self
            .clock
            .utc()
            .checked_add_signed(self.config.token_ttl())
            .ok_or(SessionError::ExpiryOutOfRange)?;
        let claims = SessionClaims {
            user_id,
            company_id: account.company_id(),
            expires_at,
        };
        let token = self.issuer.issue(&claims)?;

        debug!(user = %user_id, company = %claims.company_id, "session issued");
        Ok(LoginOutcome {
            token,
            user_id,
            company_id: claims.company_id,
        })
    }

    /// Resolves the caller identity into its credentialed user.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Unauthenticated`] when `user_id` is absent or
    /// names no user.
    pub async fn authenticate(&self, user_id: Option<UserId>) -> SessionResult<Auth> {
        let Some(caller) = user_id else {
            return Err(SessionError::Unauthenticated);
        };
        self.accounts
            .find_by_id(caller)
            .await?
            .ok_or(SessionError::Unauthenticated)
    }
}
