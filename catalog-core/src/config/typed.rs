use super::{CatalogConfig, ConfigError};

/// A strongly-typed configuration section read from a [`CatalogConfig`].
///
/// ```ignore
/// let server = ServerConfig::from_config(&config)?;
/// println!("{}", server.bind_address());
/// ```
pub trait ConfigProperties: Sized {
    /// Key prefix shared by every property of the section, e.g. `"server"`.
    fn prefix() -> &'static str;

    fn from_config(config: &CatalogConfig) -> Result<Self, ConfigError>;
}

/// HTTP listener settings (`server.*`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl ConfigProperties for ServerConfig {
    fn prefix() -> &'static str {
        "server"
    }

    fn from_config(config: &CatalogConfig) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            host: config.get_optional("server.host")?.unwrap_or(defaults.host),
            port: config.get_optional("server.port")?.unwrap_or(defaults.port),
        })
    }
}

/// Logging settings (`log.*`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "info,tower_http=debug".to_string(),
        }
    }
}

impl ConfigProperties for LogConfig {
    fn prefix() -> &'static str {
        "log"
    }

    fn from_config(config: &CatalogConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            filter: config
                .get_optional("log.filter")?
                .unwrap_or_else(|| Self::default().filter),
        })
    }
}
