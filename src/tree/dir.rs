//! Trees backed by the filesystem.

use super::{FileTree, ReadError};
use crate::error::{PlistDiffError, Result};
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Name under which a [`SingleFileTree`] exposes its file.
pub const SINGLE_FILE_NAME: &str = "single-file.plist";

/// A directory on disk, listed once when opened.
#[derive(Debug, Clone)]
pub struct DirTree {
    root: PathBuf,
    files: Vec<String>,
    dirs: Vec<String>,
}

impl DirTree {
    /// Walk `root` and record every regular file below it. Symlinks are not
    /// followed.
    pub fn open(root: &Path, skip_unreadable_dirs: bool) -> Result<Self> {
        let mut files = Vec::new();
        let mut dirs = Vec::new();
        for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    handle_walk_error(root, err, skip_unreadable_dirs)?;
                    continue;
                }
            };
            if entry.depth() == 0 {
                continue;
            }
            let Ok(rel) = entry.path().strip_prefix(root) else {
                continue;
            };
            let file_type = entry.file_type();
            if file_type.is_dir() {
                dirs.push(relative_name(rel));
            } else if file_type.is_file() {
                files.push(relative_name(rel));
            }
        }
        tracing::debug!("listed {} files under {}", files.len(), root.display());
        Ok(Self {
            root: root.to_path_buf(),
            files,
            dirs,
        })
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl FileTree for DirTree {
    fn list_files(&self) -> Vec<String> {
        self.files.clone()
    }

    fn list_dirs(&self) -> Vec<String> {
        self.dirs.clone()
    }

    fn read_file(&self, path: &str) -> std::result::Result<Vec<u8>, ReadError> {
        Ok(std::fs::read(self.root.join(path))?)
    }
}

fn handle_walk_error(root: &Path, err: walkdir::Error, skip_unreadable_dirs: bool) -> Result<()> {
    let depth = err.depth();
    let path = err.path().map(Path::to_path_buf);
    let source = err
        .into_io_error()
        .unwrap_or_else(|| io::Error::other("filesystem loop"));

    if depth == 0 {
        return Err(PlistDiffError::tree_access(root, source));
    }
    let rel = path
        .as_deref()
        .and_then(|p| p.strip_prefix(root).ok())
        .map_or_else(|| root.display().to_string(), relative_name);

    if source.kind() == io::ErrorKind::PermissionDenied {
        if skip_unreadable_dirs {
            tracing::warn!("skipping unreadable directory {rel}");
            return Ok(());
        }
        return Err(PlistDiffError::permission(rel));
    }
    Err(PlistDiffError::io(rel, source))
}

fn relative_name(rel: &Path) -> String {
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// A single regular file, exposed as [`SINGLE_FILE_NAME`] so it can be
/// compared against another single file regardless of the real names.
#[derive(Debug, Clone)]
pub struct SingleFileTree {
    path: PathBuf,
}

impl SingleFileTree {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl FileTree for SingleFileTree {
    fn list_files(&self) -> Vec<String> {
        vec![SINGLE_FILE_NAME.to_string()]
    }

    fn read_file(&self, path: &str) -> std::result::Result<Vec<u8>, ReadError> {
        if path != SINGLE_FILE_NAME {
            return Err(ReadError::NotFound);
        }
        Ok(std::fs::read(&self.path)?)
    }
}
