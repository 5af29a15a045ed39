//! Configuration sources: global file and COMMONHOLD_* environment overlay.

use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, Environment, File};
use std::path::PathBuf;

/// Global config file path (~/.config/commonhold/config.toml), if a home
/// directory can be determined.
pub fn global_config_path() -> Option<PathBuf> {
    directories::BaseDirs::new()
        .map(|dirs| dirs.config_dir().join("commonhold").join("config.toml"))
}

/// Add the optional global config file to the builder.
pub fn add_global_file(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Ok(match global_config_path() {
        Some(path) => {
            builder.add_source(File::from(path).required(false))
        }
        None => builder,
    })
}

/// Add the environment overlay to the builder.
/// Uses the COMMONHOLD prefix and __ as separator for nested keys.
pub fn add_environment(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Ok(builder.add_source(
        Environment::with_prefix("COMMONHOLD")
            .separator("__")
            .try_parsing(true),
    ))
}
