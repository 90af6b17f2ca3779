use super::types::SiteConfig;
use crate::error::ServiceError;
use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use std::path::{Path, PathBuf};

/// Service for configuration management
pub struct ConfigService {
    config_path: PathBuf,
}

impl ConfigService {
    /// Create a new config service
    pub fn new(project_root: &Path) -> Self {
        let config_path = project_root.join(".storefront").join("config.toml");
        Self { config_path }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Initialize configuration with defaults
    pub fn init(&self) -> Result<SiteConfig> {
        let config = SiteConfig::default();
        self.save(&config)?;
        Ok(config)
    }

    /// Load configuration from file, with env var overrides (STOREFRONT_ prefix, __ separator)
    pub fn load(&self) -> Result<SiteConfig> {
        let mut figment = Figment::from(Serialized::defaults(SiteConfig::default()));

        if self.config_path.exists() {
            figment = figment.merge(Toml::file(&self.config_path));
        }

        figment = figment.merge(Env::prefixed("STOREFRONT_").split("__"));

        let config: SiteConfig = figment.extract().context("Failed to load configuration")?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, config: &SiteConfig) -> Result<()> {
        let content = toml::to_string_pretty(config).context("Failed to serialize config")?;

        if let Some(parent) = self.config_path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        std::fs::write(&self.config_path, content).context("Failed to write config file")?;
        Ok(())
    }

    /// Get a configuration value by dotted key
    pub fn get(&self, key: &str) -> Result<String, ServiceError> {
        let config = self.load()?;
        let value = match key {
            "contact_email" => config.contact_email,
            "search.debounce_ms" => config.search.debounce_ms.to_string(),
            "submission.enquiry_delay_ms" => config.submission.enquiry_delay_ms.to_string(),
            "submission.contact_delay_ms" => config.submission.contact_delay_ms.to_string(),
            "submission.transport_delay_ms" => config.submission.transport_delay_ms.to_string(),
            "notifications.auto_dismiss_ms" => config.notifications.auto_dismiss_ms.to_string(),
            "notifications.enquiry_modal_ms" => config.notifications.enquiry_modal_ms.to_string(),
            "notifications.contact_modal_ms" => config.notifications.contact_modal_ms.to_string(),
            "offline.cache_name" => config.offline.cache_name,
            _ => return Err(ServiceError::NotFound(format!("config key '{}'", key))),
        };
        Ok(value)
    }

    /// Set a configuration value by dotted key
    pub fn set(&self, key: &str, value: String) -> Result<(), ServiceError> {
        let mut config = self.load()?;
        let millis = |v: &str| -> Result<u64, ServiceError> {
            v.parse().map_err(|_| {
                ServiceError::Config(format!("{} expects milliseconds, got '{}'", key, v))
            })
        };
        match key {
            "contact_email" => config.contact_email = value,
            "search.debounce_ms" => config.search.debounce_ms = millis(&value)?,
            "submission.enquiry_delay_ms" => config.submission.enquiry_delay_ms = millis(&value)?,
            "submission.contact_delay_ms" => config.submission.contact_delay_ms = millis(&value)?,
            "submission.transport_delay_ms" => {
                config.submission.transport_delay_ms = millis(&value)?
            }
            "notifications.auto_dismiss_ms" => {
                config.notifications.auto_dismiss_ms = millis(&value)?
            }
            "notifications.enquiry_modal_ms" => {
                config.notifications.enquiry_modal_ms = millis(&value)?
            }
            "notifications.contact_modal_ms" => {
                config.notifications.contact_modal_ms = millis(&value)?
            }
            "offline.cache_name" => config.offline.cache_name = value,
            _ => return Err(ServiceError::NotFound(format!("config key '{}'", key))),
        }
        self.save(&config)?;
        Ok(())
    }

    /// Check if configuration exists
    pub fn exists(&self) -> bool {
        self.config_path.exists()
    }
}
