//! Parsing and validation of `frost.toml` checker configuration.
//!
//! The configuration selects the fabric to check against and overrides the
//! fabric's legality limits (local-input budget and tile capacity).

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_file, load_config_from_str, CONFIG_FILE_NAME};
pub use types::*;
