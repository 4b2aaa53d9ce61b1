pub mod types;

use crate::error::{ConfigError, Result};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = ".kubedoc.toml";

/// Get the global config file path (~/.kubedoc.toml)
pub fn global_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(CONFIG_FILE_NAME))
}

/// Get the local config file path (project/.kubedoc.toml)
pub fn local_config_path(project_path: &Path) -> PathBuf {
    project_path.join(CONFIG_FILE_NAME)
}

/// Load configuration from file or use defaults.
/// Checks local config first, then global config. A config file that
/// exists but does not parse is an error.
pub fn load_config(project_path: Option<&Path>) -> Result<types::Config> {
    let local = project_path.map(local_config_path);
    let candidates = local.into_iter().chain(global_config_path());

    for path in candidates {
        if path.is_file() {
            log::debug!("loading config from {}", path.display());
            return read_config(&path);
        }
    }

    Ok(types::Config::default())
}

/// Parse a config file.
pub fn read_config(path: &Path) -> Result<types::Config> {
    let content = fs::read_to_string(path)?;
    let config = toml::from_str(&content).map_err(|e| ConfigError::ParsingFailed {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    Ok(config)
}
