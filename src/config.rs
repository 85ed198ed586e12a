//! Startup configuration.
//!
//! Configuration is parsed once and handed to the services that need it;
//! nothing is read from process-global state.

use crate::session::SessionConfig;
use crate::task::services::TaskQueryConfig;
use serde::Deserialize;
use thiserror::Error;

/// Errors raised while loading [`EngineConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The document is not valid JSON or violates a field constraint.
    #[error("invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Settings for every configurable service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    /// Session signing and token lifetime.
    pub session: SessionConfig,
    /// Task list behaviour.
    #[serde(default)]
    pub tasks: TaskQueryConfig,
}

impl EngineConfig {
    /// Parses a JSON configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON, unknown fields, an
    /// empty signing key, or an out-of-range token lifetime.
    pub fn from_json_str(document: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(document)?)
    }
}
