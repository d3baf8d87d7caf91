//! Configuration file loading and discovery.
//!
//! Supports loading configuration from YAML files with automatic discovery.

use super::types::{AppConfig, LiveMode};
use crate::reports::ReportFormat;
use std::path::{Path, PathBuf};

// ============================================================================
// Configuration File Discovery
// ============================================================================

/// Standard config file names to search for.
const CONFIG_FILE_NAMES: &[&str] = &[
    ".plist-diff.yaml",
    ".plist-diff.yml",
    "plist-diff.yaml",
    "plist-diff.yml",
];

/// Discover a config file by searching standard locations.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Current directory
/// 3. User config directory (~/.config/plist-diff/)
/// 4. Home directory
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path
        && path.exists()
    {
        return Some(path.to_path_buf());
    }

    if let Ok(cwd) = std::env::current_dir()
        && let Some(path) = find_config_in_dir(&cwd)
    {
        return Some(path);
    }

    if let Some(config_dir) = dirs::config_dir()
        && let Some(path) = find_config_in_dir(&config_dir.join("plist-diff"))
    {
        return Some(path);
    }

    if let Some(home) = dirs::home_dir()
        && let Some(path) = find_config_in_dir(&home)
    {
        return Some(path);
    }

    None
}

/// Find a config file in a specific directory.
fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

/// Default location for `config init`.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("plist-diff").join("plist-diff.yaml"))
}

// ============================================================================
// Configuration File Loading
// ============================================================================

/// Error type for config file operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_yaml_ng::Error),
}

/// Load an `AppConfig` from a YAML file.
pub fn load_config_file(path: &Path) -> Result<AppConfig, ConfigFileError> {
    if !path.exists() {
        return Err(ConfigFileError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    let config: AppConfig = serde_yaml_ng::from_str(&content)?;
    Ok(config)
}

/// Load config from discovered file, or return default.
#[must_use]
pub fn load_or_default(explicit_path: Option<&Path>) -> (AppConfig, Option<PathBuf>) {
    discover_config_file(explicit_path).map_or_else(
        || (AppConfig::default(), None),
        |path| match load_config_file(&path) {
            Ok(config) => (config, Some(path)),
            Err(e) => {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                (AppConfig::default(), None)
            }
        },
    )
}

// ============================================================================
// Command-line Overrides
// ============================================================================

/// Settings given explicitly on the command line.
///
/// `None` leaves the file (or default) value alone; `Some` always wins, even
/// when it equals the default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub include_timestamps: Option<bool>,
    /// Added to the configured keys
    pub ignore_keys: Vec<String>,
    pub permission_errors: Option<bool>,
    pub interval: Option<String>,
    pub max_ticks: Option<u64>,
    pub format: Option<ReportFormat>,
    pub live: Option<LiveMode>,
    pub fail_on_change: Option<bool>,
    pub quiet: Option<bool>,
}

impl AppConfig {
    /// Layer command-line overrides over this configuration.
    pub fn apply(&mut self, overrides: &ConfigOverrides) {
        if let Some(include) = overrides.include_timestamps {
            self.compare.ignore_timestamps = !include;
        }
        for key in &overrides.ignore_keys {
            if !self.compare.ignore_keys.contains(key) {
                self.compare.ignore_keys.push(key.clone());
            }
        }
        if let Some(fatal) = overrides.permission_errors {
            self.access.ignore_permission_errors = !fatal;
        }
        if let Some(interval) = &overrides.interval {
            self.watch.interval.clone_from(interval);
        }
        if overrides.max_ticks.is_some() {
            self.watch.max_ticks = overrides.max_ticks;
        }
        if let Some(format) = overrides.format {
            self.output.format = format;
        }
        if let Some(live) = overrides.live {
            self.output.live = live;
        }
        if let Some(fail) = overrides.fail_on_change {
            self.behavior.fail_on_change = fail;
        }
        if let Some(quiet) = overrides.quiet {
            self.behavior.quiet = quiet;
        }
    }

    /// Load from file and apply CLI overrides.
    #[must_use]
    pub fn from_file_with_overrides(
        config_path: Option<&Path>,
        overrides: &ConfigOverrides,
    ) -> (Self, Option<PathBuf>) {
        let (mut config, loaded_from) = load_or_default(config_path);
        config.apply(overrides);
        (config, loaded_from)
    }
}

// ============================================================================
// Example Config Generation
// ============================================================================

/// Generate a commented example config with all options.
#[must_use]
pub fn generate_example_config() -> String {
    r"# plist-diff configuration file
#
# Place it at:
#   - .plist-diff.yaml in the current directory
#   - ~/.config/plist-diff/plist-diff.yaml for global config
#
# CLI arguments always override file settings.

compare:
  # Ignore timestamp values anywhere in a plist
  ignore_timestamps: true
  # Map keys to ignore at any depth
  ignore_keys: []
  #   - NSWindow Frame main

access:
  # Treat unreadable files as empty and skip unreadable directories
  ignore_permission_errors: true

watch:
  # Time between ticks: 500ms, 2s, 1m, ...
  interval: 2s
  # Stop after this many ticks
  # max_ticks: 10

output:
  # Format: text, json
  format: text
  # Redraw watch reports in place: auto, always, never
  live: auto

behavior:
  # Exit with code 1 if a one-shot diff finds differences
  fail_on_change: false
  quiet: false
"
    .to_string()
}

// ============================================================================
// Tests
// ============================================================================
