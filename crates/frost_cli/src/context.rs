//! Configuration and fabric resolution shared by the subcommands.

use std::path::{Path, PathBuf};

use frost_arch::Fabric;
use frost_config::{FabricSource, FrostConfig, CONFIG_FILE_NAME};

use crate::GlobalArgs;

/// Loads `frost.toml` and returns it with the directory relative paths in
/// it are resolved against.
///
/// `--config` may name the file or its directory. Without it, the current
/// directory is used, and a missing `frost.toml` there means defaults.
pub fn load_settings(global: &GlobalArgs) -> Result<(FrostConfig, PathBuf), Box<dyn std::error::Error>> {
    match global.config {
        Some(ref config_path) => {
            let path = PathBuf::from(config_path);
            if path.is_file() {
                let base = path
                    .parent()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| PathBuf::from("."));
                Ok((frost_config::load_config_file(&path)?, base))
            } else {
                Ok((frost_config::load_config(&path)?, path))
            }
        }
        None => {
            let cwd = std::env::current_dir()?;
            if cwd.join(CONFIG_FILE_NAME).is_file() {
                Ok((frost_config::load_config(&cwd)?, cwd))
            } else {
                Ok((FrostConfig::default(), cwd))
            }
        }
    }
}

/// Builds the fabric from `--fabric` if given, else from the configuration.
pub fn load_fabric(
    override_path: Option<&str>,
    config: &FrostConfig,
    base_dir: &Path,
) -> Result<Fabric, Box<dyn std::error::Error>> {
    if let Some(path) = override_path {
        return Ok(Fabric::load(Path::new(path))?);
    }
    match config.fabric {
        Some(ref source) => Ok(Fabric::from_source(source, base_dir)?),
        None => Err(format!(
            "no fabric given; pass --fabric or set [fabric] in {CONFIG_FILE_NAME}"
        )
        .into()),
    }
}

/// Describes a fabric source for verbose output.
pub fn describe_source(override_path: Option<&str>, config: &FrostConfig) -> String {
    match (override_path, &config.fabric) {
        (Some(path), _) => path.to_string(),
        (None, Some(FabricSource::File { path })) => path.clone(),
        (None, Some(FabricSource::Grid { grid })) => {
            format!("generated {}x{} grid", grid.columns, grid.rows)
        }
        (None, None) => "none".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn global(config: Option<String>) -> GlobalArgs {
        GlobalArgs {
            quiet: true,
            verbose: false,
            color: false,
            config,
        }
    }

    #[test]
    fn config_file_sets_base_dir() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "[legality]\nlocal_input_budget = 16\n").unwrap();
        let (config, base) =
            load_settings(&global(Some(path.to_str().unwrap().to_string()))).unwrap();
        assert_eq!(config.legality.local_input_budget, 16);
        assert_eq!(base, tmp.path());
    }

    #[test]
    fn grid_fabric_from_config() {
        let config = frost_config::load_config_from_str(
            "[fabric.grid]\ncolumns = 4\nrows = 4\n",
        )
        .unwrap();
        let fabric = load_fabric(None, &config, Path::new(".")).unwrap();
        assert_eq!(frost_arch::Architecture::device_name(&fabric), "ice40-4x4");
        assert_eq!(describe_source(None, &config), "generated 4x4 grid");
    }

    #[test]
    fn missing_fabric_is_an_error() {
        let err = load_fabric(None, &FrostConfig::default(), Path::new(".")).unwrap_err();
        assert!(err.to_string().contains("--fabric"));
    }
}
