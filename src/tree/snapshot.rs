//! In-memory baseline copy of a tree.

use super::{FileTree, ReadError, read_lenient};
use crate::diff::is_plist;
use crate::error::Result;
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, BTreeSet};

/// Raw bytes of every `.plist` file of a tree at one instant, plus the
/// tree's directory layout.
///
/// Files that were missing or unreadable (with permission errors ignored)
/// at capture time are recorded as empty. Directories are kept even when
/// they hold no plist files.
#[derive(Debug, Clone)]
pub struct Snapshot {
    files: BTreeMap<String, Vec<u8>>,
    dirs: BTreeSet<String>,
    taken_at: DateTime<Utc>,
}

impl Snapshot {
    /// Copy every `.plist` file of `tree`.
    pub fn capture(tree: &dyn FileTree, ignore_permission_errors: bool) -> Result<Self> {
        let mut files = BTreeMap::new();
        for name in tree.list_files().into_iter().filter(|n| is_plist(n)) {
            let bytes = read_lenient(tree, &name, ignore_permission_errors)?;
            files.insert(name, bytes);
        }
        let dirs: BTreeSet<String> = tree.list_dirs().into_iter().collect();
        tracing::debug!(
            "captured {} plist files in {} directories",
            files.len(),
            dirs.len()
        );
        Ok(Self {
            files,
            dirs,
            taken_at: Utc::now(),
        })
    }

    /// Build a snapshot directly from `(path, bytes)` pairs.
    pub fn from_files<P: Into<String>>(files: impl IntoIterator<Item = (P, Vec<u8>)>) -> Self {
        Self {
            files: files.into_iter().map(|(p, b)| (p.into(), b)).collect(),
            dirs: BTreeSet::new(),
            taken_at: Utc::now(),
        }
    }

    /// Directories that existed below the root at capture time.
    pub fn directories(&self) -> impl Iterator<Item = &str> {
        self.dirs.iter().map(String::as_str)
    }

    #[must_use]
    pub const fn taken_at(&self) -> DateTime<Utc> {
        self.taken_at
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl FileTree for Snapshot {
    fn list_files(&self) -> Vec<String> {
        self.files.keys().cloned().collect()
    }

    fn read_file(&self, path: &str) -> std::result::Result<Vec<u8>, ReadError> {
        self.files.get(path).cloned().ok_or(ReadError::NotFound)
    }

    fn list_dirs(&self) -> Vec<String> {
        self.dirs.iter().cloned().collect()
    }
}
