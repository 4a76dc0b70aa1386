//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the service
//! configuration from a YAML file.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{ServiceConfig, StoreConfig, TelemetryConfig, UploadConfig};

/// Loads and provides access to the service configuration.
///
/// # File Layout
///
/// ```text
/// server:
///   bind_address: "0.0.0.0:8080"
/// telemetry:
///   log_level: info
/// upload:
///   batch_size: 500
///   replace: false
/// store:
///   page_size: 1000
/// ```
///
/// # Example
///
/// ```no_run
/// use delivery_ranking::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/service.yaml")?;
/// println!("Listening on {}", loader.config().server.bind_address);
/// # Ok::<(), delivery_ranking::error::EngineError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: ServiceConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified YAML file.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - The file is missing (`ConfigNotFound`)
    /// - The file contains invalid YAML or an invalid setting (`ConfigParseError`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let config: ServiceConfig =
            serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
                path: path_str.clone(),
                message: e.to_string(),
            })?;

        config
            .validate()
            .map_err(|message| EngineError::ConfigParseError {
                path: path_str,
                message,
            })?;

        Ok(Self { config })
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: ServiceConfig) -> Self {
        Self { config }
    }

    /// Returns the underlying service configuration.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Returns the upload pipeline settings.
    pub fn upload(&self) -> &UploadConfig {
        &self.config.upload
    }

    /// Returns the shift store settings.
    pub fn store(&self) -> &StoreConfig {
        &self.config.store
    }

    /// Returns the logging settings.
    pub fn telemetry(&self) -> &TelemetryConfig {
        &self.config.telemetry
    }

    /// Overrides the bind address, e.g. from the command line.
    pub fn with_bind_address(mut self, bind_address: impl Into<String>) -> Self {
        self.config.server.bind_address = bind_address.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_full_config() {
        let file = write_config(
            r#"
server:
  bind_address: "127.0.0.1:9000"
telemetry:
  log_level: debug
upload:
  batch_size: 250
  replace: true
store:
  page_size: 200
"#,
        );

        let loader = ConfigLoader::load(file.path()).unwrap();
        assert_eq!(loader.config().server.bind_address, "127.0.0.1:9000");
        assert_eq!(loader.telemetry().log_level, "debug");
        assert_eq!(loader.upload().batch_size, 250);
        assert!(loader.upload().replace);
        assert_eq!(loader.store().page_size, 200);
    }

    #[test]
    fn test_load_empty_sections_uses_defaults() {
        let file = write_config("telemetry:\n  log_level: warn\n");

        let loader = ConfigLoader::load(file.path()).unwrap();
        assert_eq!(loader.telemetry().log_level, "warn");
        assert_eq!(loader.upload().batch_size, 500);
        assert_eq!(loader.store().page_size, 1000);
    }

    #[test]
    fn test_missing_file_is_config_not_found() {
        let result = ConfigLoader::load("/definitely/not/here.yaml");
        assert!(matches!(result, Err(EngineError::ConfigNotFound { .. })));
    }

    #[test]
    fn test_invalid_yaml_is_parse_error() {
        let file = write_config("upload: [this is: not valid");

        let result = ConfigLoader::load(file.path());
        assert!(matches!(result, Err(EngineError::ConfigParseError { .. })));
    }

    #[test]
    fn test_wrong_type_is_parse_error() {
        let file = write_config("upload:\n  batch_size: lots\n");

        let result = ConfigLoader::load(file.path());
        assert!(matches!(result, Err(EngineError::ConfigParseError { .. })));
    }

    #[test]
    fn test_zero_batch_size_is_rejected() {
        let file = write_config("upload:\n  batch_size: 0\n");

        match ConfigLoader::load(file.path()) {
            Err(EngineError::ConfigParseError { message, .. }) => {
                assert!(message.contains("batch_size"));
            }
            other => panic!("expected ConfigParseError, got {:?}", other),
        }
    }

    #[test]
    fn test_bind_address_override() {
        let loader = ConfigLoader::default().with_bind_address("127.0.0.1:3000");
        assert_eq!(loader.config().server.bind_address, "127.0.0.1:3000");
    }
}
