//! Configuration loading

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::{ConfigError, HeraldError, Result};

use super::defaults::config_file_names;
use super::types::Config;
use super::validation::validate_config;

/// Load configuration from a file
pub fn load_config(path: &Path) -> Result<Config> {
    let is_toml = path.extension().is_some_and(|e| e == "toml");
    info!(
        path = %path.display(),
        format = if is_toml { "TOML" } else { "YAML" },
        "loading config"
    );

    let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;

    let config: Config = if is_toml {
        toml::from_str(&content).map_err(ConfigError::TomlError)?
    } else {
        serde_yaml::from_str(&content).map_err(ConfigError::YamlError)?
    };

    validate_config(&config)?;
    debug!(path = %path.display(), "config loaded and validated");
    Ok(config)
}

/// Find configuration file in directory or parent directories.
///
/// Each level is checked for `<dir>/<name>` and then `<dir>/.github/<name>`;
/// the first match wins.
pub fn find_config(start_dir: &Path) -> Option<PathBuf> {
    debug!(start_dir = %start_dir.display(), "searching for config file");
    let mut current = start_dir.to_path_buf();

    loop {
        let found = config_file_names().into_iter().find_map(|name| {
            [current.join(name), current.join(".github").join(name)]
                .into_iter()
                .find(|candidate| candidate.exists())
        });

        if let Some(path) = found {
            info!(path = %path.display(), "found config file");
            return Some(path);
        }

        if !current.pop() {
            break;
        }
    }

    debug!("no config file found");
    None
}

/// Load configuration from directory (searching parent directories)
pub fn load_config_from_dir(dir: &Path) -> Result<(Config, PathBuf)> {
    let config_path = find_config(dir).ok_or_else(|| ConfigError::NotFound(dir.to_path_buf()))?;

    let config = load_config(&config_path)?;
    Ok((config, config_path))
}

/// Load configuration or use defaults
pub fn load_config_or_default(dir: &Path) -> (Config, Option<PathBuf>) {
    match load_config_from_dir(dir) {
        Ok((config, path)) => (config, Some(path)),
        Err(HeraldError::Config(ConfigError::NotFound(_))) => {
            debug!(dir = %dir.display(), "no config found, using defaults");
            (Config::default(), None)
        }
        Err(e) => {
            warn!(dir = %dir.display(), error = %e, "ignoring unusable config, using defaults");
            (Config::default(), None)
        }
    }
}
