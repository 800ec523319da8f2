//! Server configuration from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::crowd::CROWD_REFRESH_INTERVAL;

const DEFAULT_STATIONS_PATH: &str = "datasets/station.json";
const DEFAULT_RIDERSHIP_PATH: &str = "datasets/ridership-headline.json";
const DEFAULT_BIND_ADDR: ([u8; 4], u16) = ([127, 0, 0, 1], 3000);

/// Errors in environment configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Runtime settings for the server binary.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// Station snapshot (`STATIONS_PATH`)
    pub stations_path: PathBuf,
    /// Daily ridership rows (`RIDERSHIP_PATH`); fallback figures if unreadable
    pub ridership_path: PathBuf,
    /// Listen address (`BIND_ADDR`)
    pub bind_addr: SocketAddr,
    /// Nominatim base URL override (`NOMINATIM_URL`)
    pub nominatim_url: Option<String>,
    /// Crowd refresh period (`CROWD_REFRESH_SECS`)
    pub crowd_refresh: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            stations_path: PathBuf::from(DEFAULT_STATIONS_PATH),
            ridership_path: PathBuf::from(DEFAULT_RIDERSHIP_PATH),
            bind_addr: SocketAddr::from(DEFAULT_BIND_ADDR),
            nominatim_url: None,
            crowd_refresh: CROWD_REFRESH_INTERVAL,
        }
    }
}

impl ServerConfig {
    /// Read settings from process environment variables, falling back to
    /// defaults for any that are unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read settings through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(path) = get("STATIONS_PATH") {
            config.stations_path = PathBuf::from(path);
        }
        if let Some(path) = get("RIDERSHIP_PATH") {
            config.ridership_path = PathBuf::from(path);
        }
        if let Some(addr) = get("BIND_ADDR") {
            config.bind_addr = addr.trim().parse().map_err(|_| ConfigError::Invalid {
                name: "BIND_ADDR",
                value: addr.clone(),
            })?;
        }
        config.nominatim_url = get("NOMINATIM_URL");
        if let Some(secs) = get("CROWD_REFRESH_SECS") {
            let parsed: u64 = secs.trim().parse().map_err(|_| ConfigError::Invalid {
                name: "CROWD_REFRESH_SECS",
                value: secs.clone(),
            })?;
            if parsed == 0 {
                return Err(ConfigError::Invalid {
                    name: "CROWD_REFRESH_SECS",
                    value: secs,
                });
            }
            config.crowd_refresh = Duration::from_secs(parsed);
        }

        Ok(config)
    }
}
