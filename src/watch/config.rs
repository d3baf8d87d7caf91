//! Watch configuration and duration parsing.

use super::WatchError;
use crate::diff::FileSetDiffer;
use crate::reports::ReportFormat;
use std::path::PathBuf;
use std::time::Duration;

/// Tick interval used when none is configured.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(2);

/// Longest accepted tick interval.
pub const MAX_INTERVAL: Duration = Duration::from_secs(7 * 86_400);

/// Configuration for the watch command.
#[derive(Debug, Clone)]
pub struct WatchConfig {
    /// Directory tree (or single file) to watch
    pub root: PathBuf,
    /// Time between ticks
    pub interval: Duration,
    /// Stop after this many ticks; `None` runs until interrupted
    pub max_ticks: Option<u64>,
    /// Differ used on every tick. Its permission setting also governs the
    /// baseline capture and directory walks.
    pub differ: FileSetDiffer,
    /// Report format written to the sink
    pub format: ReportFormat,
}

impl WatchConfig {
    pub fn new(root: impl Into<PathBuf>, differ: FileSetDiffer) -> Self {
        Self {
            root: root.into(),
            interval: DEFAULT_INTERVAL,
            max_ticks: None,
            differ,
            format: ReportFormat::Text,
        }
    }

    #[must_use]
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    #[must_use]
    pub fn with_max_ticks(mut self, max_ticks: Option<u64>) -> Self {
        self.max_ticks = max_ticks;
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: ReportFormat) -> Self {
        self.format = format;
        self
    }

    pub fn validate(&self) -> Result<(), WatchError> {
        if self.interval.is_zero() {
            return Err(WatchError::ZeroInterval);
        }
        if self.interval > MAX_INTERVAL {
            return Err(WatchError::IntervalTooLong(self.interval));
        }
        Ok(())
    }
}

/// Parse a human-readable duration string into a [`Duration`].
///
/// Supported suffixes: `ms` (milliseconds), `s` (seconds), `m` (minutes),
/// `h` (hours), `d` (days). Intervals above [`MAX_INTERVAL`] are rejected.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(parse_duration("2s").unwrap(), Duration::from_secs(2));
/// assert_eq!(parse_duration("500ms").unwrap(), Duration::from_millis(500));
/// ```
pub fn parse_duration(s: &str) -> Result<Duration, WatchError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(WatchError::InvalidInterval(s.to_string()));
    }

    let (num_str, unit) = if let Some(stripped) = s.strip_suffix("ms") {
        (stripped, "ms")
    } else if s.ends_with(['s', 'm', 'h', 'd']) {
        s.split_at(s.len() - 1)
    } else {
        return Err(WatchError::InvalidInterval(s.to_string()));
    };

    let value: u64 = num_str
        .parse()
        .map_err(|_| WatchError::InvalidInterval(s.to_string()))?;

    let secs = |mult: u64| {
        value
            .checked_mul(mult)
            .map(Duration::from_secs)
            .ok_or_else(|| WatchError::InvalidInterval(s.to_string()))
    };
    let duration = match unit {
        "ms" => Ok(Duration::from_millis(value)),
        "s" => secs(1),
        "m" => secs(60),
        "h" => secs(3600),
        "d" => secs(86400),
        _ => Err(WatchError::InvalidInterval(s.to_string())),
    }?;
    if duration > MAX_INTERVAL {
        return Err(WatchError::IntervalTooLong(duration));
    }
    Ok(duration)
}
