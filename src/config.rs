//! Configuration System
//!
//! Layered configuration for embedding the engine: built-in defaults, an
//! optional TOML file, then `SNAPDIFF__*` environment variables
//! (for example `SNAPDIFF__FINGERPRINT__DETECT_MOVES=false`).

use crate::error::ChangeError;
use crate::fingerprint::FingerprintOptions;
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

mod merge;
mod sources;

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapdiffConfig {
    /// Fingerprinting and comparison settings
    #[serde(default)]
    pub fingerprint: FingerprintOptions,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SnapdiffConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), ChangeError> {
        self.logging
            .validate()
            .map_err(|e| ChangeError::Config(format!("logging: {}", e)))
    }
}

/// Loads [`SnapdiffConfig`] from its layered sources
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration, reading `file` when given
    ///
    /// A file that is given but missing is an error.
    pub fn load(file: Option<&Path>) -> Result<SnapdiffConfig, ChangeError> {
        let mut builder = merge::builder_with_defaults()?;
        if let Some(file) = file {
            builder = sources::add_file(builder, file);
        }
        builder = sources::add_environment(builder);

        let config: SnapdiffConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults and environment only
    pub fn load_default() -> Result<SnapdiffConfig, ChangeError> {
        Self::load(None)
    }
}
