use std::env;
use std::fmt;
use std::path::PathBuf;

use crate::permit::DEFAULT_REQUIRED_ZONE;

/// Top-level configuration for the verification core.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub required_zone: String,
    pub store: StoreConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let required_zone = env::var("BOARDING_REQUIRED_ZONE")
            .unwrap_or_else(|_| DEFAULT_REQUIRED_ZONE.to_string());
        if required_zone.trim().is_empty() {
            return Err(ConfigError::EmptyRequiredZone);
        }

        let database_path = env::var("BOARDING_DB_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("boarding_history.db"));

        let log_level = env::var("BOARDING_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            required_zone,
            store: StoreConfig { database_path },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

/// Settings for the durable decision store.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub database_path: PathBuf,
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    EmptyRequiredZone,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyRequiredZone => {
                write!(f, "BOARDING_REQUIRED_ZONE must not be empty")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
