//! Configuration file discovery and loading

use super::fat2fsh_config::Fat2FshConfig;
use crate::error::Fat2FshError;
use crate::result::Result;
use std::path::{Path, PathBuf};

/// Config file names in discovery priority order
pub const CONFIG_FILE_NAMES: &[&str] = &[
    ".fat2fshrc.json",
    ".fat2fshrc.toml",
    "fat2fsh.yaml",
    "fat2fsh.yml",
    "fat2fsh.json",
];

/// Configuration loader for discovering and loading config files
pub struct ConfigLoader;

impl ConfigLoader {
    /// Auto-discover a config file by traversing upward from start_path
    ///
    /// Tries every name in [`CONFIG_FILE_NAMES`] in each directory before
    /// moving to the parent, until a config is found or the root is reached.
    pub fn auto_discover(start_path: &Path) -> Result<Option<PathBuf>> {
        let mut current = start_path
            .canonicalize()
            .map_err(|e| Fat2FshError::config_error(format!("Invalid path: {e}")))?;

        loop {
            for filename in CONFIG_FILE_NAMES {
                let config_path = current.join(filename);
                if config_path.is_file() {
                    tracing::debug!("Found config: {}", config_path.display());
                    return Ok(Some(config_path));
                }
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => break,
            }
        }

        Ok(None)
    }

    /// Load config from an explicit path or auto-discover one
    ///
    /// An explicit path must exist. When discovery finds nothing the
    /// defaults are used.
    pub fn load(custom_path: Option<&Path>, start_dir: Option<&Path>) -> Result<Fat2FshConfig> {
        let config_path = match custom_path {
            Some(path) => {
                if !path.exists() {
                    return Err(Fat2FshError::config_error(format!(
                        "Config file not found: {}",
                        path.display()
                    )));
                }
                Some(path.to_path_buf())
            }
            None => Self::auto_discover(start_dir.unwrap_or_else(|| Path::new(".")))?,
        };

        match config_path {
            Some(path) => {
                tracing::debug!("Loading config from {}", path.display());
                Fat2FshConfig::load(&path)
            }
            None => {
                tracing::debug!("No config file found, using defaults");
                Ok(Fat2FshConfig::default())
            }
        }
    }
}
