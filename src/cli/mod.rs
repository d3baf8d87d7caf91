//! CLI command handlers.
//!
//! This module provides testable command handlers that are invoked by main.rs.

mod diff;
mod watch;

pub use diff::run_diff;
pub use watch::run_watch;

/// Process exit codes.
pub mod exit_codes {
    /// Trees are equal, or differences were found without `--fail-on-change`
    pub const SUCCESS: i32 = 0;
    /// Differences were found and `--fail-on-change` was given
    pub const CHANGES_DETECTED: i32 = 1;
}
