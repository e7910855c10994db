//! Configuration loading: defaults, user config file, workspace file, and
//! `REEL_*` environment overlays, in ascending precedence.

use std::path::Path;

use config::{Config, Environment, File};

use super::ReelConfig;
use crate::error::ViewerError;

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a viewing session rooted at `workspace_root`.
    ///
    /// Sources, later wins: `~/.config/reel/config.toml`, then
    /// `<workspace_root>/.reel.toml`, then `REEL_*` environment variables
    /// with `__` separating nested keys. Missing files are fine.
    pub fn load(workspace_root: &Path) -> Result<ReelConfig, ViewerError> {
        let mut builder = Config::builder();

        if let Some(project_dirs) = directories::ProjectDirs::from("", "reel", "reel") {
            let user_config = project_dirs.config_dir().join("config.toml");
            builder = builder.add_source(File::from(user_config).required(false));
        }
        builder = builder
            .add_source(File::from(workspace_root.join(".reel.toml")).required(false))
            .add_source(
                Environment::with_prefix("REEL")
                    .separator("__")
                    .try_parsing(true),
            );

        let config = builder
            .build()
            .map_err(|e| ViewerError::ConfigError(format!("Failed to load configuration: {}", e)))?;
        config
            .try_deserialize()
            .map_err(|e| ViewerError::ConfigError(format!("Invalid configuration: {}", e)))
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: &Path) -> Result<ReelConfig, ViewerError> {
        let config = Config::builder()
            .add_source(File::from(path.to_path_buf()))
            .build()
            .map_err(|e| {
                ViewerError::ConfigError(format!("Failed to load {}: {}", path.display(), e))
            })?;
        config
            .try_deserialize()
            .map_err(|e| ViewerError::ConfigError(format!("Invalid configuration: {}", e)))
    }

    /// Create default configuration.
    pub fn default() -> ReelConfig {
        ReelConfig::default()
    }
}
