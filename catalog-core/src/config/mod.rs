mod loader;
pub mod typed;
pub mod value;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub use typed::{ConfigProperties, LogConfig, ServerConfig};
pub use value::{ConfigValue, FromConfigValue};

/// Error type for configuration operations.
#[derive(Debug)]
pub enum ConfigError {
    /// The requested key was not found in the configuration.
    NotFound(String),
    /// The value could not be converted to the requested type.
    TypeMismatch { key: String, expected: &'static str },
    /// An I/O or YAML parsing error occurred while loading config files.
    Load(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NotFound(key) => write!(f, "Config key not found: {key}"),
            ConfigError::TypeMismatch { key, expected } => {
                write!(f, "Config type mismatch for '{key}': expected {expected}")
            }
            ConfigError::Load(msg) => write!(f, "Config load error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Application configuration loaded from YAML files, `.env` files, and environment variables.
///
/// Resolution order (lowest to highest priority):
/// 1. `application.yaml`
/// 2. `application-{profile}.yaml`
/// 3. `.env` then `.env.{profile}` (loaded into the process environment, never overwriting)
/// 4. Environment variables (`SERVER_PORT` overrides `server.port`)
///
/// The profile comes from `CATALOG_PROFILE`, falling back to the argument.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    values: HashMap<String, ConfigValue>,
    profile: String,
}

impl CatalogConfig {
    /// Load configuration from the current working directory.
    pub fn load(profile: &str) -> Result<Self, ConfigError> {
        Self::load_from(Path::new("."), profile)
    }

    /// Load configuration with YAML files looked up in `dir`.
    pub fn load_from(dir: &Path, profile: &str) -> Result<Self, ConfigError> {
        let active_profile =
            std::env::var("CATALOG_PROFILE").unwrap_or_else(|_| profile.to_string());

        let mut values = HashMap::new();
        loader::load_yaml_file(&dir.join("application.yaml"), &mut values)?;
        let profile_file: PathBuf = dir.join(format!("application-{active_profile}.yaml"));
        loader::load_yaml_file(&profile_file, &mut values)?;

        let _ = dotenvy::from_path(dir.join(".env"));
        let _ = dotenvy::from_path(dir.join(format!(".env.{active_profile}")));

        for (env_key, env_val) in std::env::vars() {
            values.insert(
                loader::env_key_to_config_key(&env_key),
                ConfigValue::String(env_val),
            );
        }

        tracing::debug!(profile = %active_profile, keys = values.len(), "configuration loaded");
        Ok(CatalogConfig {
            values,
            profile: active_profile,
        })
    }

    /// Create a config from a YAML string (useful for testing).
    pub fn from_yaml_str(yaml: &str, profile: &str) -> Result<Self, ConfigError> {
        let mut values = HashMap::new();
        loader::load_yaml_str(yaml, &mut values)?;
        Ok(CatalogConfig {
            values,
            profile: profile.to_string(),
        })
    }

    /// Create an empty config (useful for testing).
    pub fn empty() -> Self {
        CatalogConfig {
            values: HashMap::new(),
            profile: "test".to_string(),
        }
    }

    pub fn set(&mut self, key: &str, value: ConfigValue) {
        self.values.insert(key.to_string(), value);
    }

    /// Get a typed value for the given dot-separated key.
    pub fn get<V: FromConfigValue>(&self, key: &str) -> Result<V, ConfigError> {
        let value = self
            .values
            .get(key)
            .ok_or_else(|| ConfigError::NotFound(key.to_string()))?;
        V::from_config_value(value, key)
    }

    /// Like [`get`](Self::get), but a missing key is `Ok(None)` while a
    /// badly typed value is still an error.
    pub fn get_optional<V: FromConfigValue>(&self, key: &str) -> Result<Option<V>, ConfigError> {
        match self.values.get(key) {
            Some(value) => V::from_config_value(value, key).map(Some),
            None => Ok(None),
        }
    }

    /// Get a typed value, returning a default if the key is missing or invalid.
    pub fn get_or<V: FromConfigValue>(&self, key: &str, default: V) -> V {
        self.get(key).unwrap_or(default)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn profile(&self) -> &str {
        &self.profile
    }

    /// Read a typed section.
    pub fn section<C: ConfigProperties>(&self) -> Result<C, ConfigError> {
        C::from_config(self)
    }
}
