use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use thiserror::Error;

pub const DATABASE_URL_ENV: &str = "DATABASE_URL";
/// Older deployments name the connection string this way.
pub const POSTGRES_URL_ENV: &str = "POSTGRES_URL";
pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";
pub const BACKEND_PORT_ENV: &str = "BACKEND_PORT";

const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);
const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required environment variable {0}")]
    Missing(&'static str),
    #[error("Invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// Process configuration for the scoring API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub database_url: String,
    pub host: IpAddr,
    pub port: u16,
}

impl ServerConfig {
    /// Reads configuration from the process environment, loading `.env` first
    /// when one is present.
    pub fn from_env() -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(path) => tracing::debug!("Loaded environment from {}", path.display()),
            Err(err) if err.not_found() => {}
            Err(err) => tracing::warn!("Failed to load .env file: {}", err),
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let database_url = non_empty(DATABASE_URL_ENV)
            .or_else(|| non_empty(POSTGRES_URL_ENV))
            .ok_or(ConfigError::Missing(DATABASE_URL_ENV))?;

        let host = match non_empty(HOST_ENV) {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                key: HOST_ENV,
                value: raw,
            })?,
            None => DEFAULT_HOST,
        };

        let port = match non_empty(PORT_ENV)
            .map(|value| (PORT_ENV, value))
            .or_else(|| non_empty(BACKEND_PORT_ENV).map(|value| (BACKEND_PORT_ENV, value)))
        {
            Some((key, raw)) => raw
                .parse::<u16>()
                .map_err(|_| ConfigError::Invalid { key, value: raw })?,
            None => {
                tracing::info!("No PORT environment variable set, using {}", DEFAULT_PORT);
                DEFAULT_PORT
            }
        };

        Ok(Self {
            database_url,
            host,
            port,
        })
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
