//! Merge rules: built-in defaults every layer starts from.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError};

/// Create a Config builder with defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("fingerprint.normalization", "relative_path")?
        .set_default("fingerprint.directory_sensitivity", "ignore_directories")?
        .set_default("fingerprint.detect_moves", true)?
        .set_default("logging.level", "info")?
        .set_default("logging.format", "text")?
        .set_default("logging.output", "stderr")?
        .set_default("logging.color", true)
}
