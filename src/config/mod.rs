//! Configuration
//!
//! Layered configuration for a directory node: serde defaults, an optional
//! global file, an optional explicit file, and a `COMMONHOLD`-prefixed
//! environment overlay, merged in that order.

mod facade;
mod sources;

pub use facade::ConfigLoader;

use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level configuration for one directory node.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DirectoryConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub admission: AdmissionConfig,
}

/// Record store persistence settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StorageConfig {
    /// Directory for the durable record log. None means memory only.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

/// Admission oracle settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AdmissionConfig {
    /// Path to an admission policy TOML document. None means the open
    /// oracle (every assignment admitted).
    #[serde(default)]
    pub policy_file: Option<PathBuf>,
}
