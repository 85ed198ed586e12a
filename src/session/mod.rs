//! Sign-in and principal resolution.
//!
//! [`SessionService::login`] verifies a credential and asks a
//! [`TokenIssuer`] to mint a bearer token. [`SessionService::authenticate`]
//! resolves the identity a transport layer extracted from such a token into
//! the [`crate::identity::domain::Auth`] every other service expects.
//! Token signing itself is an outbound port so the crate carries no key
//! material beyond the [`SessionConfig`] handed to concrete issuers.

mod config;
mod issuer;
mod service;

pub use config::{SessionConfig, SessionConfigError, SigningKey};
pub use issuer::{SessionClaims, TokenIssueError, TokenIssuer};
pub use service::{LoginOutcome, SessionError, SessionResult, SessionService};

#[cfg(test)]
pub use issuer::MockTokenIssuer;
