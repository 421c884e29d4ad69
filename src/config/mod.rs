use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading error: {message}")]
    LoadError { message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

/// Crate configuration, loaded from `SHOPCART_*` environment variables.
///
/// Every field has a default, so an empty environment yields a working
/// configuration pointed at a local catalog.
#[derive(Debug, Clone)]
pub struct Config {
    pub catalog: CatalogConfig,
    pub storage: StorageConfig,
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    /// Base URL of the product/stock API (`/products/{id}`, `/stock/{id}`).
    #[serde(default = "default_catalog_base_url")]
    pub catalog_base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the persisted cart blob.
    #[serde(default = "default_storage_dir")]
    pub storage_dir: String,
    /// Key the cart is stored under (file stem of the blob).
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ObservabilityConfig {
    #[serde(default = "default_service_name")]
    pub service_name: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_enable_json_logging")]
    pub enable_json_logging: bool,
}

impl Config {
    pub fn from_environment() -> Result<Self, ConfigError> {
        info!("Loading configuration from environment");

        let config = Config {
            catalog: CatalogConfig::from_env()?,
            storage: StorageConfig::from_env()?,
            observability: ObservabilityConfig::from_env()?,
        };

        config.validate()?;

        debug!("Configuration: {:?}", config);
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let base_url = self.catalog.catalog_base_url.trim();
        if base_url.is_empty() {
            return Err(ConfigError::ValidationError {
                message: "Catalog base URL cannot be empty".to_string(),
            });
        }
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ConfigError::ValidationError {
                message: format!("Catalog base URL must be http(s): {}", base_url),
            });
        }

        if self.storage.storage_dir.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                message: "Storage directory cannot be empty".to_string(),
            });
        }

        let key = &self.storage.storage_key;
        if key.is_empty() || key.contains(['/', '\\']) {
            return Err(ConfigError::ValidationError {
                message: format!("Storage key must be a plain file stem: {:?}", key),
            });
        }

        if self.observability.service_name.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                message: "Service name cannot be empty".to_string(),
            });
        }

        Ok(())
    }
}

fn section_from_env<T: serde::de::DeserializeOwned>(section: &str) -> Result<T, ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::Environment::with_prefix("SHOPCART"))
        .build()
        .map_err(|e| ConfigError::LoadError {
            message: format!("Failed to load {} config: {}", section, e),
        })?;

    settings
        .try_deserialize()
        .map_err(|e| ConfigError::LoadError {
            message: format!("Failed to deserialize {} config: {}", section, e),
        })
}

impl CatalogConfig {
    fn from_env() -> Result<Self, ConfigError> {
        section_from_env("catalog")
    }
}

impl StorageConfig {
    fn from_env() -> Result<Self, ConfigError> {
        section_from_env("storage")
    }
}

impl ObservabilityConfig {
    fn from_env() -> Result<Self, ConfigError> {
        section_from_env("observability")
    }
}

// Default value functions
pub(crate) fn default_catalog_base_url() -> String {
    "http://localhost:3333".to_string()
}

pub(crate) fn default_storage_dir() -> String {
    ".shopcart".to_string()
}

pub(crate) fn default_storage_key() -> String {
    "cart".to_string()
}

pub(crate) fn default_service_name() -> String {
    "shopcart".to_string()
}

pub(crate) fn default_log_level() -> String {
    "info".to_string()
}

pub(crate) fn default_enable_json_logging() -> bool {
    false
}
