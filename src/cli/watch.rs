//! CLI handler for watch mode.

use crate::config::AppConfig;
use crate::watch::{LiveSink, OutputSink, PlainSink, WatchConfig, WatchSummary, run_watch_loop};
use anyhow::Result;
use std::io::IsTerminal;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Watch `root` until Ctrl-C or the configured tick limit.
pub fn run_watch(config: &AppConfig, root: &Path) -> Result<WatchSummary> {
    let watch_config = WatchConfig::new(root, config.file_set_differ())
        .with_interval(config.watch_interval()?)
        .with_max_ticks(config.watch.max_ticks)
        .with_format(config.output.format);

    // Graceful shutdown flag
    let stop = Arc::new(AtomicBool::new(false));
    {
        let stop_flag = Arc::clone(&stop);
        if let Err(e) = ctrlc::set_handler(move || {
            stop_flag.store(true, Ordering::Relaxed);
        }) {
            tracing::warn!("cannot install Ctrl-C handler: {e}");
        }
    }

    let stdout = std::io::stdout();
    let mut sink: Box<dyn OutputSink> = if config.output.live.enabled(stdout.is_terminal()) {
        Box::new(LiveSink::new(stdout))
    } else {
        Box::new(PlainSink::new(stdout))
    };

    Ok(run_watch_loop(watch_config, &mut *sink, &stop)?)
}
