//! Structural diff of decoded property lists and of whole file trees.
//!
//! # Architecture
//!
//! - [`Comparator`] walks two [`Value`](crate::model::Value) trees in lock
//!   step and returns a [`Difference`] for every divergent node, located by a
//!   rendered [`Path`].
//! - [`FileSetDiffer`] pairs up the `.plist` files of two
//!   [`FileTree`](crate::tree::FileTree)s, decodes both sides and runs the
//!   comparator on each pair.
//!
//! # Example
//!
//! ```ignore
//! use plist_diff::diff::{CompareOptions, Comparator, FileSetDiffer};
//! use plist_diff::tree::open_tree;
//!
//! let comparator = Comparator::new(CompareOptions::new().ignore_timestamps());
//! let differ = FileSetDiffer::new(comparator).ignore_permission_errors(true);
//! let result = differ.diff(&*open_tree(a, true)?, &*open_tree(b, true)?)?;
//! if !result.equal {
//!     println!("{result}");
//! }
//! ```

mod compare;
mod fileset;
pub mod path;
mod result;

pub use compare::{CompareOptions, Comparator, Exclusion, compare};
pub use fileset::{FileSetDiffer, PLIST_SUFFIX, is_plist};
pub use path::{Path, PathStep, render};
pub use result::{Difference, FileDiff, FileDiffSet, FileSetDiff};
