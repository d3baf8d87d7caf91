//! Watch session state.

use std::fmt;
use std::time::{Duration, Instant};

/// Lifecycle of a watch session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchPhase {
    /// Nothing captured yet
    Idle,
    /// Baseline captured, no tick run yet
    Snapshotted,
    /// At least one tick has run
    Polling,
    /// Stopped by shutdown, tick limit or a fatal error
    Terminated,
}

impl fmt::Display for WatchPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Snapshotted => "snapshotted",
            Self::Polling => "polling",
            Self::Terminated => "terminated",
        };
        f.write_str(name)
    }
}

/// Mutable bookkeeping for an active session.
#[derive(Debug)]
pub(crate) struct WatchState {
    pub phase: WatchPhase,
    pub started_at: Instant,
    /// Ticks completed
    pub ticks: u64,
    /// Ticks dropped because the previous one overran
    pub skipped_ticks: u64,
    /// Files differing from the baseline at the last tick
    pub last_changed_files: usize,
}

impl WatchState {
    pub(crate) fn new() -> Self {
        Self {
            phase: WatchPhase::Idle,
            started_at: Instant::now(),
            ticks: 0,
            skipped_ticks: 0,
            last_changed_files: 0,
        }
    }

    pub(crate) fn record_tick(&mut self, changed_files: usize) {
        self.ticks += 1;
        self.last_changed_files = changed_files;
        self.phase = WatchPhase::Polling;
    }

    pub(crate) fn summary(&self) -> WatchSummary {
        WatchSummary {
            ticks: self.ticks,
            skipped_ticks: self.skipped_ticks,
            changed_files: self.last_changed_files,
            uptime: self.started_at.elapsed(),
        }
    }
}

/// Totals reported when a session ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatchSummary {
    pub ticks: u64,
    pub skipped_ticks: u64,
    /// Files differing from the baseline at the last tick
    pub changed_files: usize,
    pub uptime: Duration,
}
