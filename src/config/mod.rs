//! Configuration module for plist-diff.
//!
//! This module provides a unified configuration system with:
//! - Type-safe configuration structures
//! - Validation for all configuration values
//! - YAML config file loading and discovery
//! - Command-line overrides
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use plist_diff::config::AppConfig;
//!
//! let config = AppConfig::builder()
//!     .include_timestamps(true)
//!     .ignore_key("NSWindow Frame main")
//!     .build();
//! let differ = config.file_set_differ();
//!
//! // Load from file
//! use plist_diff::config::file::load_or_default;
//! let (config, loaded_from) = load_or_default(None);
//! ```
//!
//! # Configuration File
//!
//! Place a `.plist-diff.yaml` file in the current directory or
//! `~/.config/plist-diff/`:
//!
//! ```yaml
//! compare:
//!   ignore_timestamps: false
//!   ignore_keys: [LastUsed]
//! watch:
//!   interval: 5s
//! ```

pub mod file;
mod types;
mod validation;

pub use types::{
    AccessConfig, AppConfig, AppConfigBuilder, BehaviorConfig, CompareConfig,
    DEFAULT_WATCH_INTERVAL, LiveMode, OutputConfig, WatchSettings,
};
pub use validation::{ConfigError, Validatable};

pub use file::{
    ConfigFileError, ConfigOverrides, default_config_path, discover_config_file, generate_example_config,
    load_config_file, load_or_default,
};

/// Generate a JSON Schema for the `AppConfig` configuration format.
///
/// This schema documents all configuration options that can be set in
/// `.plist-diff.yaml` config files. It can be used by editors for
/// validation and autocompletion.
pub fn generate_json_schema() -> Result<String, serde_json::Error> {
    let schema = schemars::schema_for!(AppConfig);
    serde_json::to_string_pretty(&schema)
}
