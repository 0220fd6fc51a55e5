//! Configuration file discovery and loading.

use crate::config::schema::RinstallConfig;
use crate::error::{InstallError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// File name looked up in the working root.
pub const CONFIG_FILE_NAME: &str = "rinstall.yml";

/// Find the config file for a working root, if one exists.
pub fn discover(root: &Path) -> Option<PathBuf> {
    let path = root.join(CONFIG_FILE_NAME);
    if path.is_file() {
        Some(path)
    } else {
        None
    }
}

/// Load a single config file and parse it into [`RinstallConfig`].
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<RinstallConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            InstallError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            InstallError::Io(e)
        }
    })?;

    parse_config(&content, path)
}

/// Parse YAML content into [`RinstallConfig`].
///
/// An empty document is accepted and yields the defaults.
pub fn parse_config(content: &str, source_path: &Path) -> Result<RinstallConfig> {
    if content.trim().is_empty() {
        return Ok(RinstallConfig::default());
    }

    serde_yaml::from_str(content).map_err(|e| InstallError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load the effective configuration.
///
/// An explicit path must exist. Without one, `rinstall.yml` in `root` is used
/// when present, otherwise the built-in defaults.
pub fn load_config(explicit: Option<&Path>, root: &Path) -> Result<RinstallConfig> {
    let config = match explicit {
        Some(path) => load_config_file(path)?,
        None => match discover(root) {
            Some(path) => load_config_file(&path)?,
            None => {
                tracing::debug!("No {} in {}, using defaults", CONFIG_FILE_NAME, root.display());
                RinstallConfig::default()
            }
        },
    };

    super::validate(&config)?;
    Ok(config)
}
