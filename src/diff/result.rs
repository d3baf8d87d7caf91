//! Diff result types and their text rendering.

use crate::model::{Value, ValueKind};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// One located divergence between two values.
///
/// `None` on a side means the node does not exist there.
#[derive(Debug, Clone, PartialEq)]
pub struct Difference {
    pub path: String,
    pub old: Option<Value>,
    pub new: Option<Value>,
}

impl Difference {
    #[must_use]
    pub fn old_kind(&self) -> ValueKind {
        self.old.as_ref().map_or(ValueKind::Absent, Value::kind)
    }

    #[must_use]
    pub fn new_kind(&self) -> ValueKind {
        self.new.as_ref().map_or(ValueKind::Absent, Value::kind)
    }
}

/// Renders as up to two tab-indented lines: `-` for the old side and `+` for
/// the new side, each followed by the node's kind.
impl fmt::Display for Difference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut lines = Vec::with_capacity(2);
        if let Some(old) = &self.old {
            lines.push(format!("\t-{}: {old} ({})", self.path, old.kind()));
        }
        if let Some(new) = &self.new {
            lines.push(format!("\t+{}: {new} ({})", self.path, new.kind()));
        }
        f.write_str(&lines.join("\n"))
    }
}

impl Serialize for Difference {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Difference", 5)?;
        s.serialize_field("path", &self.path)?;
        s.serialize_field("old", &self.old.as_ref().map(ToString::to_string))?;
        s.serialize_field("new", &self.new.as_ref().map(ToString::to_string))?;
        s.serialize_field("old_kind", self.old_kind().name())?;
        s.serialize_field("new_kind", self.new_kind().name())?;
        s.end()
    }
}

/// Differences found in a single file, in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FileDiff(pub Vec<Difference>);

impl FileDiff {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Difference> {
        self.0.iter()
    }
}

impl From<Vec<Difference>> for FileDiff {
    fn from(diffs: Vec<Difference>) -> Self {
        Self(diffs)
    }
}

/// Difference blocks separated by blank lines, without a trailing newline.
impl fmt::Display for FileDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let blocks: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        f.write_str(blocks.join("\n\n").trim_end_matches('\n'))
    }
}

/// Per-file diffs keyed by relative path. Only files that differ appear.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FileDiffSet(pub BTreeMap<String, FileDiff>);

impl FileDiffSet {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn get(&self, path: &str) -> Option<&FileDiff> {
        self.0.get(path)
    }

    pub fn insert(&mut self, path: impl Into<String>, diff: FileDiff) {
        self.0.insert(path.into(), diff);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FileDiff)> {
        self.0.iter()
    }

    /// Total number of differences across all files.
    #[must_use]
    pub fn difference_count(&self) -> usize {
        self.0.values().map(FileDiff::len).sum()
    }
}

/// Each file as `path:` followed by its block and a blank line, ordered by
/// path.
impl fmt::Display for FileDiffSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (path, diff) in &self.0 {
            write!(f, "{path}:\n{diff}\n\n")?;
        }
        Ok(())
    }
}

/// Result of diffing two file trees.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileSetDiff {
    pub equal: bool,
    pub files: FileDiffSet,
}

impl FileSetDiff {
    #[must_use]
    pub fn new(files: FileDiffSet) -> Self {
        Self {
            equal: files.is_empty(),
            files,
        }
    }
}

impl Default for FileSetDiff {
    fn default() -> Self {
        Self::new(FileDiffSet::default())
    }
}

impl fmt::Display for FileSetDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.files.fmt(f)
    }
}
