//! Outbound port for minting session tokens.

use crate::company::domain::CompanyId;
use crate::identity::domain::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Claims carried by a session token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Signed-in user.
    pub user_id: UserId,
    /// Company of the signed-in user.
    pub company_id: CompanyId,
    /// Instant after which the token must be rejected.
    pub expires_at: DateTime<Utc>,
}

/// Token issuance failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("token issuance failed: {0}")]
pub struct TokenIssueError(pub String);

/// Signs [`SessionClaims`] into an opaque bearer token.
///
/// Implementations are constructed with a
/// [`SessionConfig`](super::SessionConfig) and hold its signing key.
#[cfg_attr(test, mockall::automock)]
pub trait TokenIssuer: Send + Sync {
    /// Mints a token for `claims`.
    ///
    /// # Errors
    ///
    /// Returns [`TokenIssueError`] when signing fails.
    fn issue(&self, claims: &SessionClaims) -> Result<String, TokenIssueError>;
}
