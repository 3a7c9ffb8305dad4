//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::{FabricSource, FrostConfig, MAX_LOCAL_INPUT_BUDGET, MAX_TILE_CAPACITY};
use std::path::Path;

/// File name looked up by [`load_config`].
pub const CONFIG_FILE_NAME: &str = "frost.toml";

/// Loads and validates `<dir>/frost.toml`.
pub fn load_config(dir: &Path) -> Result<FrostConfig, ConfigError> {
    load_config_file(&dir.join(CONFIG_FILE_NAME))
}

/// Loads and validates a configuration file at an explicit path.
pub fn load_config_file(path: &Path) -> Result<FrostConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    load_config_from_str(&content)
}

/// Parses and validates a configuration from a string.
pub fn load_config_from_str(content: &str) -> Result<FrostConfig, ConfigError> {
    let config: FrostConfig =
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

fn invalid(key: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        key,
        reason: reason.into(),
    }
}

fn check_range(key: &'static str, value: usize, max: usize) -> Result<(), ConfigError> {
    if (1..=max).contains(&value) {
        Ok(())
    } else {
        Err(invalid(key, format!("must be between 1 and {max}, got {value}")))
    }
}

fn validate_config(config: &FrostConfig) -> Result<(), ConfigError> {
    check_range(
        "legality.local_input_budget",
        config.legality.local_input_budget,
        MAX_LOCAL_INPUT_BUDGET,
    )?;
    check_range(
        "legality.tile_capacity",
        config.legality.tile_capacity,
        MAX_TILE_CAPACITY,
    )?;
    match &config.fabric {
        Some(FabricSource::File { path }) if path.is_empty() => {
            Err(invalid("fabric.path", "must not be empty"))
        }
        // Outer ring is IO, so a grid needs at least one interior tile.
        Some(FabricSource::Grid { grid }) if grid.columns < 3 || grid.rows < 3 => Err(invalid(
            "fabric.grid",
            format!("must be at least 3x3, got {}x{}", grid.columns, grid.rows),
        )),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DEFAULT_LOCAL_INPUT_BUDGET, DEFAULT_TILE_CAPACITY};

    #[test]
    fn empty_config_uses_defaults() {
        let config = load_config_from_str("").unwrap();
        assert_eq!(
            config.legality.local_input_budget,
            DEFAULT_LOCAL_INPUT_BUDGET
        );
        assert_eq!(config.legality.tile_capacity, DEFAULT_TILE_CAPACITY);
        assert!(config.fabric.is_none());
        assert!(config.report.warn_unchecked_io_clocks);
    }

    #[test]
    fn parse_full_config() {
        let toml = r#"
[legality]
local_input_budget = 24
tile_capacity = 4

[fabric]
path = "hx1k.json"

[report]
warn_unchecked_io_clocks = false
"#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.legality.local_input_budget, 24);
        assert_eq!(config.legality.tile_capacity, 4);
        assert_eq!(
            config.fabric,
            Some(FabricSource::File {
                path: "hx1k.json".into()
            })
        );
        assert!(!config.report.warn_unchecked_io_clocks);
    }

    #[test]
    fn parse_grid_fabric() {
        let toml = r#"
[fabric.grid]
columns = 6
rows = 5
unbonded_sites = ["X0/Y1/io1"]
"#;
        let config = load_config_from_str(toml).unwrap();
        match config.fabric {
            Some(FabricSource::Grid { grid }) => {
                assert_eq!((grid.columns, grid.rows), (6, 5));
                assert_eq!(grid.unbonded_sites, vec!["X0/Y1/io1"]);
            }
            other => panic!("expected grid fabric, got {other:?}"),
        }
    }

    #[test]
    fn partial_legality_section_keeps_other_default() {
        let config = load_config_from_str("[legality]\ntile_capacity = 2\n").unwrap();
        assert_eq!(config.legality.tile_capacity, 2);
        assert_eq!(
            config.legality.local_input_budget,
            DEFAULT_LOCAL_INPUT_BUDGET
        );
    }

    #[test]
    fn zero_budget_rejected() {
        let err = load_config_from_str("[legality]\nlocal_input_budget = 0\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                key: "legality.local_input_budget",
                ..
            }
        ));
    }

    #[test]
    fn oversized_limits_rejected() {
        let err = load_config_from_str("[legality]\nlocal_input_budget = 9223372036854775807\n")
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                key: "legality.local_input_budget",
                ..
            }
        ));
        let err = load_config_from_str("[legality]\ntile_capacity = 65\n").unwrap_err();
        assert!(err.to_string().contains("between 1 and 64, got 65"));
    }

    #[test]
    fn limits_at_maximum_accepted() {
        let config =
            load_config_from_str("[legality]\nlocal_input_budget = 1024\ntile_capacity = 64\n")
                .unwrap();
        assert_eq!(config.legality.local_input_budget, MAX_LOCAL_INPUT_BUDGET);
        assert_eq!(config.legality.tile_capacity, MAX_TILE_CAPACITY);
    }

    #[test]
    fn tiny_grid_rejected() {
        let err = load_config_from_str("[fabric.grid]\ncolumns = 2\nrows = 8\n").unwrap_err();
        assert!(err.to_string().contains("at least 3x3"));
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        let err = load_config_from_str("[legality\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn load_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[legality]\nlocal_input_budget = 16\n",
        )
        .unwrap();
        let config = load_config(dir.path()).unwrap();
        assert_eq!(config.legality.local_input_budget, 16);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Read { ref path, .. } if path.ends_with(CONFIG_FILE_NAME)));
    }
}
