//! Main watch loop orchestrator.
//!
//! Captures the baseline, then diffs the live tree against it once per tick
//! and hands each rendered report to the sink.

use super::config::WatchConfig;
use super::sink::OutputSink;
use super::state::{WatchPhase, WatchState, WatchSummary};
use super::WatchError;
use crate::diff::FileSetDiff;
use crate::error::{ErrorContext, PlistDiffError, Result};
use crate::reports::render_report;
use crate::tree::{Snapshot, open_tree};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Longest uninterrupted sleep; bounds how late a stop request is noticed.
const STOP_POLL: Duration = Duration::from_millis(100);

/// Drives one watch session through its phases.
#[derive(Debug)]
pub struct Watcher {
    config: WatchConfig,
    state: WatchState,
    baseline: Option<Snapshot>,
}

impl Watcher {
    pub fn new(config: WatchConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            state: WatchState::new(),
            baseline: None,
        })
    }

    #[must_use]
    pub const fn phase(&self) -> WatchPhase {
        self.state.phase
    }

    #[must_use]
    pub const fn config(&self) -> &WatchConfig {
        &self.config
    }

    #[must_use]
    pub const fn baseline(&self) -> Option<&Snapshot> {
        self.baseline.as_ref()
    }

    fn ignore_permission_errors(&self) -> bool {
        self.config.differ.ignores_permission_errors()
    }

    /// Capture the baseline. Only valid while idle.
    pub fn snapshot(&mut self) -> Result<()> {
        if self.state.phase != WatchPhase::Idle {
            return Err(WatchError::InvalidPhase(self.state.phase).into());
        }
        let root = self.config.root.clone();
        let tree = open_tree(&root, self.ignore_permission_errors())
            .map_err(|e| self.fail(e))?;
        let snapshot = Snapshot::capture(&*tree, self.ignore_permission_errors())
            .with_context(|| format!("capturing baseline of {}", root.display()))
            .map_err(|e| self.fail(e))?;
        tracing::info!(
            "watching {} ({} plist files)",
            root.display(),
            snapshot.len()
        );
        self.baseline = Some(snapshot);
        self.state.phase = WatchPhase::Snapshotted;
        Ok(())
    }

    /// Diff the live tree against the baseline once.
    pub fn tick(&mut self) -> Result<FileSetDiff> {
        let baseline = match (&self.baseline, self.state.phase) {
            (Some(baseline), WatchPhase::Snapshotted | WatchPhase::Polling) => baseline,
            (_, phase) => return Err(WatchError::InvalidPhase(phase).into()),
        };
        let result = open_tree(&self.config.root, self.ignore_permission_errors())
            .and_then(|live| self.config.differ.diff(baseline, &*live));
        match result {
            Ok(diff) => {
                self.state.record_tick(diff.files.len());
                tracing::debug!(
                    "tick {}: {} files differ",
                    self.state.ticks,
                    diff.files.len()
                );
                Ok(diff)
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Stop the session and return its totals.
    pub fn terminate(&mut self) -> WatchSummary {
        self.state.phase = WatchPhase::Terminated;
        self.state.summary()
    }

    fn fail<E>(&mut self, err: E) -> E {
        self.state.phase = WatchPhase::Terminated;
        err
    }

    fn limit_reached(&self) -> bool {
        self.config.max_ticks.is_some_and(|max| self.state.ticks >= max)
    }
}

/// Run a watch session until `stop` is set, the tick limit is reached, or a
/// tick fails. A sink that cannot be written to also ends the session.
///
/// Ticks run on a fixed schedule. A tick that overruns its slot delays the
/// next one; the slots it missed are skipped, never run back to back.
pub fn run_watch_loop(
    config: WatchConfig,
    sink: &mut dyn OutputSink,
    stop: &AtomicBool,
) -> Result<WatchSummary> {
    let interval = config.interval;
    let format = config.format;
    let mut watcher = Watcher::new(config)?;
    watcher.snapshot()?;

    let mut next_tick = advance(Instant::now(), interval)?;
    while !watcher.limit_reached() {
        if !sleep_until(next_tick, stop) {
            tracing::info!("shutting down");
            break;
        }

        let diff = watcher.tick()?;
        let report = render_report(&diff, format).map_err(|e| watcher.fail(e))?;
        sink.emit(&report)
            .map_err(|e| watcher.fail(PlistDiffError::io("watch output", e)))?;

        next_tick = advance(next_tick, interval).map_err(|e| watcher.fail(e))?;
        let now = Instant::now();
        while next_tick <= now {
            next_tick = advance(next_tick, interval).map_err(|e| watcher.fail(e))?;
            watcher.state.skipped_ticks += 1;
        }
    }

    let summary = watcher.terminate();
    tracing::info!(
        "watch stopped after {} ticks ({} skipped), {} files differ from baseline",
        summary.ticks,
        summary.skipped_ticks,
        summary.changed_files
    );
    Ok(summary)
}

/// Next tick deadline, or an error when it is beyond what `Instant` holds.
fn advance(from: Instant, interval: Duration) -> Result<Instant> {
    from.checked_add(interval)
        .ok_or_else(|| WatchError::IntervalTooLong(interval).into())
}

/// Sleep until `deadline` in short slices. Returns `false` if `stop` was set.
fn sleep_until(deadline: Instant, stop: &AtomicBool) -> bool {
    loop {
        if stop.load(Ordering::Relaxed) {
            return false;
        }
        let now = Instant::now();
        if now >= deadline {
            return true;
        }
        std::thread::sleep((deadline - now).min(STOP_POLL));
    }
}
