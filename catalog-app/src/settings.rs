use std::path::Path;

use catalog_core::{CatalogConfig, ConfigError, LogConfig, ServerConfig};

/// Startup configuration of the `locallibrary` binary.
#[derive(Debug, Clone)]
pub struct Settings {
    pub profile: String,
    pub server: ServerConfig,
    pub log: LogConfig,
}

impl Settings {
    /// Load `application*.yaml` from `dir`. Missing files fall back to
    /// defaults; unreadable files and invalid sections are errors.
    pub fn load(dir: &Path, profile: &str) -> Result<Self, ConfigError> {
        let config = CatalogConfig::load_from(dir, profile)?;
        Ok(Self {
            profile: config.profile().to_string(),
            server: config.section()?,
            log: config.section()?,
        })
    }
}
