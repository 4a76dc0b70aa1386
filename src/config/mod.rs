//! Configuration loading for the ranking service.
//!
//! The service reads a single YAML file covering the HTTP server, logging, the
//! upload pipeline and the shift store. Scoring rules are fixed in code and are
//! not configurable.
//!
//! # Example
//!
//! ```no_run
//! use delivery_ranking::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/service.yaml").unwrap();
//! println!("Upload batch size: {}", config.upload().batch_size);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{ServerConfig, ServiceConfig, StoreConfig, TelemetryConfig, UploadConfig};
