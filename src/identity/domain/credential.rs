//! Credential hashing.
//!
//! Passwords are stored as the lower-case hex SHA-256 digest of the
//! plaintext, one round, no salt. This is the format existing credential
//! rows use; moving to a salted, iterated KDF needs a migration of those
//! rows and is tracked separately.

use super::IdentityDomainError;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Length of a hex-encoded SHA-256 digest.
const HEX_DIGEST_LENGTH: usize = 64;

/// Stored credential hash of a user password.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Hashes a plaintext password.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError::EmptyPassword`] when the password is
    /// empty.
    pub fn from_password(password: &str) -> Result<Self, IdentityDomainError> {
        if password.is_empty() {
            return Err(IdentityDomainError::EmptyPassword);
        }
        Ok(Self(digest_hex(password)))
    }

    /// Wraps a hash read back from storage.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError::MalformedPasswordHash`] unless the
    /// value is a 64 character lower-case hex string.
    pub fn from_persisted(value: impl Into<String>) -> Result<Self, IdentityDomainError> {
        let raw = value.into();
        let is_hex_digest = raw.len() == HEX_DIGEST_LENGTH
            && raw
                .chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c));
        if !is_hex_digest {
            return Err(IdentityDomainError::MalformedPasswordHash);
        }
        Ok(Self(raw))
    }

    /// Returns `true` when `password` hashes to this value.
    #[must_use]
    pub fn matches(&self, password: &str) -> bool {
        digest_hex(password) == self.0
    }

    /// Returns the hex digest.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(..)")
    }
}

fn digest_hex(password: &str) -> String {
    format!("{:x}", Sha256::digest(password.as_bytes()))
}
