//! Diffing two file trees file by file.

use super::compare::Comparator;
use super::result::{FileDiff, FileDiffSet, FileSetDiff};
use crate::error::Result;
use crate::model::{Value, decode};
use crate::tree::{FileTree, read_lenient};
use std::collections::BTreeSet;

/// Only names ending in this suffix take part in a diff.
pub const PLIST_SUFFIX: &str = ".plist";

#[must_use]
pub fn is_plist(name: &str) -> bool {
    name.ends_with(PLIST_SUFFIX)
}

/// Diffs every `.plist` file of two trees.
///
/// Files present in only one tree are compared against an empty file, which
/// decodes to [`Value::Absent`]. Files that fail to decode are treated the
/// same way, so a malformed file shows up as wholly added or removed.
#[derive(Debug, Clone, Default)]
pub struct FileSetDiffer {
    comparator: Comparator,
    ignore_permission_errors: bool,
}

impl FileSetDiffer {
    pub const fn new(comparator: Comparator) -> Self {
        Self {
            comparator,
            ignore_permission_errors: false,
        }
    }

    /// Treat unreadable files as empty instead of failing.
    #[must_use]
    pub const fn ignore_permission_errors(mut self, ignore: bool) -> Self {
        self.ignore_permission_errors = ignore;
        self
    }

    #[must_use]
    pub const fn ignores_permission_errors(&self) -> bool {
        self.ignore_permission_errors
    }

    #[must_use]
    pub const fn comparator(&self) -> &Comparator {
        &self.comparator
    }

    /// Diff `old` against `new`.
    ///
    /// The first fatal read error aborts the whole diff.
    pub fn diff(&self, old: &dyn FileTree, new: &dyn FileTree) -> Result<FileSetDiff> {
        let old_files: Vec<String> = old.list_files().into_iter().filter(|n| is_plist(n)).collect();
        let seen: BTreeSet<&str> = old_files.iter().map(String::as_str).collect();
        let new_only: Vec<String> = new
            .list_files()
            .into_iter()
            .filter(|n| is_plist(n) && !seen.contains(n.as_str()))
            .collect();

        let mut files = FileDiffSet::default();
        for name in old_files.iter().chain(&new_only) {
            if let Some(diff) = self.diff_file(old, new, name)? {
                files.insert(name.clone(), diff);
            }
        }
        tracing::debug!(
            "compared {} files, {} differ",
            old_files.len() + new_only.len(),
            files.len()
        );
        Ok(FileSetDiff::new(files))
    }

    /// Diff one file present in either tree. `None` means no differences.
    pub fn diff_file(
        &self,
        old: &dyn FileTree,
        new: &dyn FileTree,
        name: &str,
    ) -> Result<Option<FileDiff>> {
        let new_bytes = read_lenient(new, name, self.ignore_permission_errors)?;
        let old_bytes = read_lenient(old, name, self.ignore_permission_errors)?;
        if old_bytes == new_bytes {
            tracing::debug!("{name}: identical bytes");
            return Ok(None);
        }

        let old_value = decode_or_absent(name, &old_bytes);
        let new_value = decode_or_absent(name, &new_bytes);
        let diffs = self.comparator.compare(&old_value, &new_value);
        Ok((!diffs.is_empty()).then(|| FileDiff::from(diffs)))
    }
}

fn decode_or_absent(name: &str, bytes: &[u8]) -> Value {
    decode(bytes).unwrap_or_else(|err| {
        tracing::debug!("{name}: {err}");
        Value::Absent
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::CompareOptions;
    use crate::model::encode_binary;
    use crate::tree::{ReadError, Snapshot};

    fn bytes(v: &Value) -> Vec<u8> {
        encode_binary(v).unwrap()
    }

    fn differ() -> FileSetDiffer {
        FileSetDiffer::new(Comparator::new(CompareOptions::new().ignore_timestamps()))
            .ignore_permission_errors(true)
    }

    #[test]
    fn test_identical_trees_are_equal() {
        let v = bytes(&Value::map([("a", Value::from(1))]));
        let old = Snapshot::from_files([("x.plist", v.clone())]);
        let new = Snapshot::from_files([("x.plist", v)]);
        let result = differ().diff(&old, &new).unwrap();
        assert!(result.equal);
        assert!(result.files.is_empty());
    }

    #[test]
    fn test_changed_file_reported() {
        let old = Snapshot::from_files([("x.plist", bytes(&Value::map([("k", Value::from(1))])))]);
        let new = Snapshot::from_files([("x.plist", bytes(&Value::map([("k", Value::from(2))])))]);
        let result = differ().diff(&old, &new).unwrap();
        assert!(!result.equal);
        assert_eq!(
            result.files.get("x.plist").unwrap().to_string(),
            "\t-.k: 1 (integer)\n\t+.k: 2 (integer)"
        );
    }

    #[test]
    fn test_non_plist_names_ignored() {
        let old = Snapshot::from_files([("notes.txt", b"a".to_vec())]);
        let new = Snapshot::from_files([("notes.txt", b"b".to_vec())]);
        assert!(differ().diff(&old, &new).unwrap().equal);
    }

    #[test]
    fn test_added_file_reported_per_leaf() {
        let old = Snapshot::from_files(Vec::<(String, Vec<u8>)>::new());
        let new = Snapshot::from_files([(
            "new.plist",
            bytes(&Value::map([("a", Value::from(1)), ("b", Value::from("x"))])),
        )]);
        let result = differ().diff(&old, &new).unwrap();
        assert_eq!(
            result.files.get("new.plist").unwrap().to_string(),
            "\t+.a: 1 (integer)\n\n\t+.b: x (string)"
        );
    }

    #[test]
    fn test_malformed_file_treated_as_absent() {
        let old = Snapshot::from_files([("x.plist", b"not a plist".to_vec())]);
        let new = Snapshot::from_files([("x.plist", b"also not a plist".to_vec())]);
        assert!(differ().diff(&old, &new).unwrap().equal);
    }

    struct Locked;

    impl FileTree for Locked {
        fn list_files(&self) -> Vec<String> {
            vec!["secret.plist".to_string()]
        }

        fn read_file(&self, _path: &str) -> std::result::Result<Vec<u8>, ReadError> {
            Err(ReadError::PermissionDenied)
        }
    }

    #[test]
    fn test_permission_errors() {
        let empty = Snapshot::from_files(Vec::<(String, Vec<u8>)>::new());
        assert!(differ().diff(&Locked, &empty).unwrap().equal);

        let strict = FileSetDiffer::new(Comparator::default());
        let err = strict.diff(&Locked, &empty).unwrap_err();
        assert!(err.is_permission());
    }

    #[test]
    fn test_is_plist() {
        assert!(is_plist("com.apple.dock.plist"));
        assert!(is_plist("ByHost/x.plist"));
        assert!(!is_plist("x.plist.bak"));
        assert!(!is_plist("plist"));
    }
}
