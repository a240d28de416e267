//! Errors raised while building a session.

use crate::config::ConfigError;
use thiserror::Error;

/// Errors that can occur when building a session or loading its config.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Invalid configuration: {}", describe(.violations))]
    InvalidConfig { violations: Vec<ConfigError> },

    #[error("Configuration is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

fn describe(violations: &[ConfigError]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
