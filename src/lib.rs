//! **Structural diffs of property-list file trees.**
//!
//! `plist-diff` decodes every `.plist` file in a directory tree (binary or
//! XML encoded) into a generic value model and compares trees structurally,
//! reporting each difference as a path-addressed pair of old and new values.
//! It can compare two trees once, or watch a single tree and report how it
//! has drifted from a baseline snapshot every few seconds. That makes it
//! handy for finding out which preference key a settings toggle writes.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: the generic [`Value`] tree and [`decode`](model::decode).
//! - **[`diff`]**: the structural [`Comparator`], path rendering, and the
//!   [`FileSetDiffer`] that pairs up files of two trees.
//! - **[`tree`]**: the [`FileTree`] abstraction over directories, single
//!   files and in-memory snapshots.
//! - **[`watch`]**: the snapshot-and-poll driver.
//! - **[`reports`]**: text and JSON renderings of a diff.
//! - **[`config`]**: YAML configuration, validation and CLI merging.
//!
//! ## Comparing two trees
//!
//! ```no_run
//! use plist_diff::{AppConfig, tree::open_tree};
//! use std::path::Path;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::default();
//!     let old = open_tree(Path::new("prefs-before"), true)?;
//!     let new = open_tree(Path::new("prefs-after"), true)?;
//!
//!     let result = config.file_set_differ().diff(&*old, &*new)?;
//!     if !result.equal {
//!         println!("{result}");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Comparing two values
//!
//! ```
//! use plist_diff::{CompareOptions, Comparator, Value};
//!
//! let old = Value::map([("tilesize", Value::from(48))]);
//! let new = Value::map([("tilesize", Value::from(64))]);
//!
//! let diffs = Comparator::new(CompareOptions::new()).compare(&old, &new);
//! assert_eq!(diffs.len(), 1);
//! assert_eq!(diffs[0].path, ".tilesize");
//! ```

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    // Variable names like `old`/`new` are clear in context
    clippy::similar_names
)]

pub mod cli;
pub mod config;
pub mod diff;
pub mod error;
pub mod model;
pub mod reports;
pub mod tree;
pub mod watch;

// Re-export main types for convenience
pub use config::{AppConfig, AppConfigBuilder, ConfigError, Validatable};
pub use diff::{
    CompareOptions, Comparator, Difference, Exclusion, FileDiff, FileDiffSet, FileSetDiff,
    FileSetDiffer,
};
pub use error::{ErrorContext, PlistDiffError, Result};
pub use model::{DecodeError, Scalar, Value, ValueKind, decode};
pub use reports::{ReportFormat, ReportGenerator};
pub use tree::{DirTree, FileTree, SingleFileTree, Snapshot, open_tree};
pub use watch::{WatchConfig, WatchError, Watcher, run_watch_loop};
