//! Configuration types.

use crate::error::ConfigError;

/// Service configuration, read from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// TCP port to listen on.
    pub port: u16,
    /// Prefix under which the API routes are mounted.
    pub api_prefix: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            api_prefix: "/api/v1".to_string(),
        }
    }
}

impl Config {
    /// Build from `PORT` and `API_PREFIX`, falling back to defaults
    /// for unset variables. A set-but-unparsable `PORT` is an error
    /// rather than a silent fallback.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(port) = std::env::var("PORT") {
            config.port = port.parse().map_err(|_| ConfigError::InvalidValue {
                key: "PORT".to_string(),
                message: format!("not a valid port number: {port}"),
            })?;
        }
        if let Ok(prefix) = std::env::var("API_PREFIX") {
            config.api_prefix = prefix.trim_end_matches('/').to_string();
        }

        Ok(config)
    }
}
