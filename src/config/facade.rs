//! ConfigLoader facade: merges sources in precedence order.

use super::sources;
use super::DirectoryConfig;
use config::{Config, ConfigError, File};
use std::path::Path;

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from standard sources.
    /// Precedence: defaults (lowest) -> global file -> environment (highest).
    pub fn load() -> Result<DirectoryConfig, ConfigError> {
        let builder = Config::builder();
        let builder = sources::add_global_file(builder)?;
        let builder = sources::add_environment(builder)?;

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Load configuration from a specific file with environment overlay.
    pub fn load_from_file(path: &Path) -> Result<DirectoryConfig, ConfigError> {
        let builder = Config::builder().add_source(File::from(path.to_path_buf()));
        let builder = sources::add_environment(builder)?;

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Create default configuration.
    pub fn default() -> DirectoryConfig {
        DirectoryConfig::default()
    }
}
