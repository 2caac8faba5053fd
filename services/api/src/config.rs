//! services/api/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use std::net::SocketAddr;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing the environment variable {0}")]
    MissingVar(String),
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Connection settings for the managed backend.
#[derive(Clone, Debug)]
pub struct AppwriteConfig {
    pub endpoint: String,
    pub project_id: String,
    pub api_key: String,
    pub database_id: String,
    pub collection_id: String,
}

/// Credentials and addresses for the pinning service.
#[derive(Clone, Debug)]
pub struct PinataConfig {
    pub jwt: String,
    pub gateway: String,
    pub upload_url: String,
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub log_level: Level,
    pub public_url: String,
    pub cors_origin: String,
    pub chrome_window_width: u32,
    pub appwrite: AppwriteConfig,
    pub pinata: PinataConfig,
}

fn required(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingVar(name.to_string()))
}

fn optional(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        // --- Server Settings ---
        let bind_address_str = optional("BIND_ADDRESS", "0.0.0.0:3000");
        let bind_address = bind_address_str.parse::<SocketAddr>().map_err(|e| {
            ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string())
        })?;

        let log_level_str = optional("RUST_LOG", "INFO");
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        let public_url = optional("PUBLIC_URL", "http://localhost:5173")
            .trim_end_matches('/')
            .to_string();
        let cors_origin = optional("CORS_ORIGIN", "http://localhost:5173");

        let width_str = optional("CHROME_WINDOW_WIDTH", "1200");
        let chrome_window_width = width_str.parse::<u32>().map_err(|e| {
            ConfigError::InvalidValue("CHROME_WINDOW_WIDTH".to_string(), e.to_string())
        })?;

        // --- Managed Backend ---
        let appwrite = AppwriteConfig {
            endpoint: required("APPWRITE_ENDPOINT")?.trim_end_matches('/').to_string(),
            project_id: required("APPWRITE_PROJECT_ID")?,
            api_key: required("APPWRITE_API_KEY")?,
            database_id: required("APPWRITE_DATABASE_ID")?,
            collection_id: required("APPWRITE_COLLECTION_ID")?,
        };

        // --- Pinning Service ---
        let pinata = PinataConfig {
            jwt: required("PINATA_JWT")?,
            gateway: required("PINATA_GATEWAY")?,
            upload_url: optional("PINATA_UPLOAD_URL", "https://uploads.pinata.cloud")
                .trim_end_matches('/')
                .to_string(),
        };

        Ok(Self {
            bind_address,
            log_level,
            public_url,
            cors_origin,
            chrome_window_width,
            appwrite,
            pinata,
        })
    }
}
