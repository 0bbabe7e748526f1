//! Runtime settings loaded via OrthoConfig.
//!
//! Values come from `BLOODBANK_*` environment variables, a config file, or
//! command-line flags. Unset values fall back to the defaults below.

use std::net::{IpAddr, SocketAddr};

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_TOKEN_TTL_HOURS: i64 = 720;

/// Errors raised while interpreting loaded settings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid host address {host:?}")]
    InvalidHost { host: String },
    #[error("token ttl must be a positive number of hours, got {hours}")]
    InvalidTokenTtl { hours: i64 },
}

/// Server, storage, and token settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "BLOODBANK")]
pub struct AppSettings {
    /// Interface to bind.
    pub host: Option<String>,
    /// Port to bind.
    pub port: Option<u16>,
    /// PostgreSQL connection string. In-memory storage is used when unset.
    pub database_url: Option<String>,
    /// Secret used to sign bearer tokens.
    pub token_secret: Option<String>,
    /// Token lifetime in hours.
    pub token_ttl_hours: Option<i64>,
    /// Create empty stock records for every blood type on startup.
    pub seed_inventory: Option<bool>,
}

impl AppSettings {
    /// Resolve the socket address from `host` and `port`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let host = self.host.as_deref().unwrap_or(DEFAULT_HOST);
        let ip: IpAddr = host.parse().map_err(|_| SettingsError::InvalidHost {
            host: host.to_owned(),
        })?;
        Ok(SocketAddr::new(ip, self.port.unwrap_or(DEFAULT_PORT)))
    }

    /// Token lifetime; 30 days unless overridden.
    pub fn token_ttl(&self) -> Result<chrono::Duration, SettingsError> {
        let hours = self.token_ttl_hours.unwrap_or(DEFAULT_TOKEN_TTL_HOURS);
        if hours <= 0 {
            return Err(SettingsError::InvalidTokenTtl { hours });
        }
        chrono::Duration::try_hours(hours).ok_or(SettingsError::InvalidTokenTtl { hours })
    }

    pub fn database_url(&self) -> Option<&str> {
        self.database_url.as_deref().filter(|url| !url.trim().is_empty())
    }

    pub fn token_secret(&self) -> Option<&str> {
        self.token_secret.as_deref().filter(|secret| !secret.is_empty())
    }

    /// Whether stock records are seeded on startup; on unless disabled.
    pub fn seed_inventory(&self) -> bool {
        self.seed_inventory.unwrap_or(true)
    }
}
