//! Error types for the snapshot change-detection engine.
//!
//! Every variant is a contract violation or a setup failure. Early
//! termination requested by a visitor is reported through
//! [`crate::types::Flow`] and never through this type.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChangeError {
    #[error("Output property '{property}' must be a single location snapshot, found {roots} roots")]
    NotSingleLocation { property: String, roots: usize },

    #[error("Invalid snapshot at {path:?}: {reason}")]
    InvalidSnapshot { path: PathBuf, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ChangeError {
    pub(crate) fn invalid_snapshot(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        ChangeError::InvalidSnapshot {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

impl From<config::ConfigError> for ChangeError {
    fn from(err: config::ConfigError) -> Self {
        ChangeError::Config(err.to_string())
    }
}
