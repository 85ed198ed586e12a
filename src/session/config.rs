//! Session configuration.

use chrono::TimeDelta;
use serde::Deserialize;
use std::fmt;
use thiserror::Error;

const DEFAULT_TOKEN_TTL_SECS: u64 = 24 * 60 * 60;

/// Errors raised while building a [`SessionConfig`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionConfigError {
    /// The signing key was empty.
    #[error("signing key must not be empty")]
    EmptySigningKey,
    /// The token lifetime was zero or too large to represent.
    #[error("token lifetime of {0} seconds is out of range")]
    InvalidTokenTtl(u64),
}

/// Secret used by token issuers to sign session tokens.
///
/// The key is never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct SigningKey(String);

impl SigningKey {
    /// Wraps a non-empty secret.
    ///
    /// # Errors
    ///
    /// Returns [`SessionConfigError::EmptySigningKey`] for an empty value.
    pub fn new(value: impl Into<String>) -> Result<Self, SessionConfigError> {
        let secret = value.into();
        if secret.is_empty() {
            return Err(SessionConfigError::EmptySigningKey);
        }
        Ok(Self(secret))
    }

    /// Returns the raw key bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningKey(<redacted>)")
    }
}

/// Validated session settings, built explicitly at startup.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawSessionConfig")]
pub struct SessionConfig {
    signing_key: SigningKey,
    token_ttl: TimeDelta,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSessionConfig {
    signing_key: String,
    #[serde(default = "default_token_ttl_secs")]
    token_ttl_secs: u64,
}

const fn default_token_ttl_secs() -> u64 {
    DEFAULT_TOKEN_TTL_SECS
}

impl TryFrom<RawSessionConfig> for SessionConfig {
    type Error = SessionConfigError;

    fn try_from(raw: RawSessionConfig) -> Result<Self, Self::Error> {
        Self::new(SigningKey::new(raw.signing_key)?, raw.token_ttl_secs)
    }
}

impl SessionConfig {
    /// Builds a configuration with a token lifetime in seconds.
    ///
    /// # Errors
    ///
    /// Returns [`SessionConfigError::InvalidTokenTtl`] when the lifetime is
    /// zero or cannot be represented.
    pub fn new(signing_key: SigningKey, token_ttl_secs: u64) -> Result<Self, SessionConfigError> {
        let token_ttl = i64::try_from(token_ttl_secs)
            .ok()
            .filter(|secs| *secs > 0)
            .and_then(TimeDelta::try_seconds)
            .ok_or(SessionConfigError::InvalidTokenTtl(token_ttl_secs))?;
        Ok(Self {
            signing_key,
            token_ttl,
        })
    }

    /// Builds a configuration with the default one-day token lifetime.
    #[must_use]
    pub fn with_default_ttl(signing_key: SigningKey) -> Self {
        Self {
            signing_key,
            token_ttl: TimeDelta::days(1),
        }
    }

    /// Returns the signing key.
    #[must_use]
    pub const fn signing_key(&self) -> &SigningKey {
        &self.signing_key
    }

    /// Returns how long issued tokens stay valid.
    #[must_use]
    pub const fn token_ttl(&self) -> TimeDelta {
        self.token_ttl
    }
}
