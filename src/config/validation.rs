//! Configuration validation for plist-diff.
//!
//! Provides validation traits and implementations for all configuration types.

use super::types::{AppConfig, CompareConfig, WatchSettings};
use crate::watch::parse_duration;

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.compare.validate());
        errors.extend(self.watch.validate());
        errors
    }
}

impl Validatable for CompareConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        for (i, key) in self.ignore_keys.iter().enumerate() {
            if key.is_empty() {
                errors.push(ConfigError {
                    field: format!("compare.ignore_keys[{i}]"),
                    message: "Ignored key must not be empty".to_string(),
                });
            }
        }
        errors
    }
}

impl Validatable for WatchSettings {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        match parse_duration(&self.interval) {
            Ok(d) if d.is_zero() => errors.push(ConfigError {
                field: "watch.interval".to_string(),
                message: "Interval must be greater than zero".to_string(),
            }),
            Ok(_) => {}
            Err(e) => errors.push(ConfigError {
                field: "watch.interval".to_string(),
                message: e.to_string(),
            }),
        }
        if self.max_ticks == Some(0) {
            errors.push(ConfigError {
                field: "watch.max_ticks".to_string(),
                message: "Tick limit must be at least 1".to_string(),
            });
        }
        errors
    }
}
