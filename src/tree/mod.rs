//! File-collection access.
//!
//! A [`FileTree`] is a read-only set of named files: a directory on disk, a
//! single regular file, or an in-memory [`Snapshot`]. Paths are relative and
//! `/`-separated.

mod dir;
mod snapshot;

pub use dir::{DirTree, SINGLE_FILE_NAME, SingleFileTree};
pub use snapshot::Snapshot;

use crate::error::{PlistDiffError, Result};
use std::io;
use std::path::Path;

/// Failure reading one file from a tree.
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    #[error("file not found")]
    NotFound,
    #[error("permission denied")]
    PermissionDenied,
    #[error(transparent)]
    Other(io::Error),
}

impl From<io::Error> for ReadError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => Self::NotFound,
            io::ErrorKind::PermissionDenied => Self::PermissionDenied,
            _ => Self::Other(err),
        }
    }
}

/// A read-only collection of files.
pub trait FileTree {
    /// Relative paths of every regular file in the tree.
    fn list_files(&self) -> Vec<String>;

    /// Raw contents of one file.
    fn read_file(&self, path: &str) -> std::result::Result<Vec<u8>, ReadError>;

    /// Relative paths of every directory below the root. Directories never
    /// take part in a diff; trees without structure report none.
    fn list_dirs(&self) -> Vec<String> {
        Vec::new()
    }
}

impl<T: FileTree + ?Sized> FileTree for Box<T> {
    fn list_files(&self) -> Vec<String> {
        (**self).list_files()
    }

    fn list_dirs(&self) -> Vec<String> {
        (**self).list_dirs()
    }

    fn read_file(&self, path: &str) -> std::result::Result<Vec<u8>, ReadError> {
        (**self).read_file(path)
    }
}

/// Read a file, treating a missing file (and, when asked, an unreadable one)
/// as empty.
pub(crate) fn read_lenient(
    tree: &dyn FileTree,
    path: &str,
    ignore_permission_errors: bool,
) -> Result<Vec<u8>> {
    match tree.read_file(path) {
        Ok(bytes) => Ok(bytes),
        Err(ReadError::NotFound) => Ok(Vec::new()),
        Err(ReadError::PermissionDenied) if ignore_permission_errors => {
            tracing::debug!("ignoring unreadable file {path}");
            Ok(Vec::new())
        }
        Err(ReadError::PermissionDenied) => Err(PlistDiffError::permission(path)),
        Err(ReadError::Other(source)) => Err(PlistDiffError::io(path, source)),
    }
}

/// Open the tree rooted at `path`.
///
/// Directories become a [`DirTree`] and regular files a [`SingleFileTree`].
/// With `skip_unreadable_dirs`, subdirectories that cannot be listed are
/// skipped instead of failing the walk.
pub fn open_tree(path: &Path, skip_unreadable_dirs: bool) -> Result<Box<dyn FileTree>> {
    let meta = std::fs::metadata(path).map_err(|e| PlistDiffError::tree_access(path, e))?;
    if meta.is_dir() {
        Ok(Box::new(DirTree::open(path, skip_unreadable_dirs)?))
    } else if meta.is_file() {
        Ok(Box::new(SingleFileTree::new(path)))
    } else {
        Err(PlistDiffError::tree_access(
            path,
            io::Error::new(
                io::ErrorKind::InvalidInput,
                "neither a directory nor a regular file",
            ),
        ))
    }
}
