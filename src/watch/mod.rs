//! Snapshot-and-poll watch mode.
//!
//! Captures a baseline [`Snapshot`](crate::tree::Snapshot) of a tree, then
//! re-diffs the live tree against it on a fixed interval, writing one report
//! per tick through an [`OutputSink`].

pub(crate) mod config;
pub(crate) mod loop_impl;
pub(crate) mod sink;
pub(crate) mod state;

pub use config::{DEFAULT_INTERVAL, MAX_INTERVAL, WatchConfig, parse_duration};
pub use loop_impl::{Watcher, run_watch_loop};
pub use sink::{LiveSink, OutputSink, PlainSink};
pub use state::{WatchPhase, WatchSummary};

/// Errors specific to the watch subsystem.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum WatchError {
    #[error("invalid interval '{0}': expected format like 500ms, 2s, 5m")]
    InvalidInterval(String),

    #[error("watch interval must be greater than zero")]
    ZeroInterval,

    #[error("watch interval {0:?} is longer than {max:?}", max = MAX_INTERVAL)]
    IntervalTooLong(std::time::Duration),

    #[error("watcher is already {0}")]
    InvalidPhase(WatchPhase),
}
