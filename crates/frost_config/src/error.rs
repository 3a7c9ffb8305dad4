//! Error types for configuration loading and validation.

use std::path::PathBuf;

/// Errors that can occur when loading or validating a `frost.toml`.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("cannot read {}: {source}", path.display())]
    Read {
        /// The file that was read.
        path: PathBuf,
        /// The underlying I/O failure.
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("malformed configuration: {0}")]
    Parse(String),

    /// A setting has an unusable value.
    #[error("invalid setting `{key}`: {reason}")]
    Invalid {
        /// Dotted key of the setting, e.g. `legality.tile_capacity`.
        key: &'static str,
        /// What is wrong with it.
        reason: String,
    },
}
