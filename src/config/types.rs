//! Configuration types for plist-diff operations.

use crate::diff::{CompareOptions, Comparator, FileSetDiffer};
use crate::reports::ReportFormat;
use crate::watch::{WatchError, parse_duration};
use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::time::Duration;

// ============================================================================
// Unified Application Configuration
// ============================================================================

/// Unified application configuration that can be loaded from CLI args or config files.
///
/// CLI arguments are layered over file settings with [`AppConfig::apply`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// What counts as a difference
    pub compare: CompareConfig,
    /// How unreadable files and directories are handled
    pub access: AccessConfig,
    /// Watch mode settings
    pub watch: WatchSettings,
    /// Output configuration
    pub output: OutputConfig,
    /// Behavior flags
    pub behavior: BehaviorConfig,
}

impl AppConfig {
    /// Create a new `AppConfig` with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an `AppConfig` builder.
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Comparator options described by this configuration.
    pub fn compare_options(&self) -> CompareOptions {
        let mut options = CompareOptions::new();
        if self.compare.ignore_timestamps {
            options = options.ignore_timestamps();
        }
        for key in &self.compare.ignore_keys {
            options = options.ignore_key(key.clone());
        }
        options
    }

    /// File-set differ described by this configuration.
    #[must_use]
    pub fn file_set_differ(&self) -> FileSetDiffer {
        FileSetDiffer::new(Comparator::new(self.compare_options()))
            .ignore_permission_errors(self.access.ignore_permission_errors)
    }

    /// Parsed watch interval.
    pub fn watch_interval(&self) -> Result<Duration, WatchError> {
        parse_duration(&self.watch.interval)
    }
}

// ============================================================================
// Builder for AppConfig
// ============================================================================

/// Builder for constructing `AppConfig` with fluent API.
#[derive(Debug, Default)]
#[must_use]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    /// Compare timestamps instead of ignoring them.
    pub const fn include_timestamps(mut self, include: bool) -> Self {
        self.config.compare.ignore_timestamps = !include;
        self
    }

    /// Ignore map entries with this key.
    pub fn ignore_key(mut self, key: impl Into<String>) -> Self {
        self.config.compare.ignore_keys.push(key.into());
        self
    }

    /// Fail on unreadable files instead of treating them as empty.
    pub const fn permission_errors(mut self, fatal: bool) -> Self {
        self.config.access.ignore_permission_errors = !fatal;
        self
    }

    /// Set the watch interval, e.g. `500ms` or `2s`.
    pub fn interval(mut self, interval: impl Into<String>) -> Self {
        self.config.watch.interval = interval.into();
        self
    }

    /// Stop watching after this many ticks.
    pub const fn max_ticks(mut self, ticks: Option<u64>) -> Self {
        self.config.watch.max_ticks = ticks;
        self
    }

    /// Set the output format.
    pub const fn output_format(mut self, format: ReportFormat) -> Self {
        self.config.output.format = format;
        self
    }

    /// Set live redraw behavior.
    pub const fn live(mut self, live: LiveMode) -> Self {
        self.config.output.live = live;
        self
    }

    /// Enable fail-on-change mode.
    pub const fn fail_on_change(mut self, fail: bool) -> Self {
        self.config.behavior.fail_on_change = fail;
        self
    }

    /// Enable quiet mode.
    pub const fn quiet(mut self, quiet: bool) -> Self {
        self.config.behavior.quiet = quiet;
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> AppConfig {
        self.config
    }
}

// ============================================================================
// Sections
// ============================================================================

/// Comparison configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct CompareConfig {
    /// Ignore timestamp values anywhere in the tree
    pub ignore_timestamps: bool,
    /// Map keys to ignore at any depth
    pub ignore_keys: Vec<String>,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            ignore_timestamps: true,
            ignore_keys: Vec::new(),
        }
    }
}

/// File access configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AccessConfig {
    /// Treat files that cannot be read for lack of permission as empty, and
    /// skip directories that cannot be listed
    pub ignore_permission_errors: bool,
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            ignore_permission_errors: true,
        }
    }
}

/// Watch mode configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct WatchSettings {
    /// Time between ticks (`ms`, `s`, `m`, `h` or `d` suffix)
    pub interval: String,
    /// Stop after this many ticks (unset runs until interrupted)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_ticks: Option<u64>,
}

impl Default for WatchSettings {
    fn default() -> Self {
        Self {
            interval: DEFAULT_WATCH_INTERVAL.to_string(),
            max_ticks: None,
        }
    }
}

/// Default for [`WatchSettings::interval`].
pub const DEFAULT_WATCH_INTERVAL: &str = "2s";

/// Output-related configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format
    pub format: ReportFormat,
    /// Redraw watch reports in place
    pub live: LiveMode,
}

/// When watch mode redraws its report in place
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum LiveMode {
    /// Redraw when stdout is a terminal
    #[default]
    Auto,
    /// Always redraw
    Always,
    /// Append every report
    Never,
}

impl LiveMode {
    /// Resolve against whether stdout is a terminal.
    #[must_use]
    pub const fn enabled(self, is_terminal: bool) -> bool {
        match self {
            Self::Auto => is_terminal,
            Self::Always => true,
            Self::Never => false,
        }
    }
}

/// Behavior flags
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Exit with code 1 if a one-shot diff finds differences
    pub fail_on_change: bool,
    /// Suppress non-essential output
    pub quiet: bool,
}
