//! Configuration types for the ranking service.
//!
//! These structures are deserialized from the service YAML file. Every section
//! is optional and falls back to its defaults. Scoring rules are not part of
//! the configuration.

use serde::Deserialize;

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address the API listens on.
    pub bind_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is not set.
    pub log_level: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Upload pipeline settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    /// Number of shifts per insert batch.
    pub batch_size: usize,
    /// Clear stored shifts before inserting a new upload.
    pub replace: bool,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            batch_size: 500,
            replace: false,
        }
    }
}

/// Shift store settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Fixed page size for ranking reads.
    pub page_size: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self { page_size: 1000 }
    }
}

/// The complete service configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Logging settings.
    pub telemetry: TelemetryConfig,
    /// Upload pipeline settings.
    pub upload: UploadConfig,
    /// Shift store settings.
    pub store: StoreConfig,
}

impl ServiceConfig {
    /// Returns a description of the first invalid setting, if any.
    pub fn validate(&self) -> Result<(), String> {
        if self.upload.batch_size == 0 {
            return Err("upload.batch_size must be greater than zero".to_string());
        }
        if self.store.page_size == 0 {
            return Err("store.page_size must be greater than zero".to_string());
        }
        if self.server.bind_address.trim().is_empty() {
            return Err("server.bind_address must not be empty".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServiceConfig::default();
        assert_eq!(config.server.bind_address, "0.0.0.0:8080");
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.upload.batch_size, 500);
        assert!(!config.upload.replace);
        assert_eq!(config.store.page_size, 1000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config: ServiceConfig = serde_yaml::from_str("upload:\n  batch_size: 50\n").unwrap();
        assert_eq!(config.upload.batch_size, 50);
        assert!(!config.upload.replace);
        assert_eq!(config.store.page_size, 1000);
    }

    #[test]
    fn test_zero_batch_size_is_invalid() {
        let mut config = ServiceConfig::default();
        config.upload.batch_size = 0;
        assert!(config.validate().unwrap_err().contains("batch_size"));
    }

    #[test]
    fn test_zero_page_size_is_invalid() {
        let mut config = ServiceConfig::default();
        config.store.page_size = 0;
        assert!(config.validate().unwrap_err().contains("page_size"));
    }
}
