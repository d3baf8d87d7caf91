//! One-shot comparison of two trees.

use super::exit_codes;
use crate::config::AppConfig;
use crate::diff::FileSetDiff;
use crate::reports::{ReportFormat, create_reporter};
use crate::tree::open_tree;
use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

/// Compare `old` against `new` and write the report to `out`, returning the
/// desired exit code.
///
/// Equal trees produce no text output. JSON output is always written so that
/// consumers can rely on a document being present.
///
/// The caller is responsible for calling `std::process::exit()` with the
/// returned code when it is non-zero.
pub fn run_diff(config: &AppConfig, old: &Path, new: &Path, out: &mut dyn Write) -> Result<i32> {
    let skip_unreadable = config.access.ignore_permission_errors;
    let old_tree = open_tree(old, skip_unreadable)?;
    let new_tree = open_tree(new, skip_unreadable)?;

    let result = config
        .file_set_differ()
        .diff(&*old_tree, &*new_tree)
        .with_context(|| format!("comparing {} with {}", old.display(), new.display()))?;

    if !config.behavior.quiet {
        tracing::info!(
            "{} files differ ({} differences)",
            result.files.len(),
            result.files.difference_count()
        );
    }

    if !result.equal || config.output.format == ReportFormat::Json {
        create_reporter(config.output.format).write_report(&result, out)?;
    }

    Ok(determine_exit_code(config, &result))
}

/// Determine the appropriate exit code based on diff results and config flags.
const fn determine_exit_code(config: &AppConfig, result: &FileSetDiff) -> i32 {
    if config.behavior.fail_on_change && !result.equal {
        return exit_codes::CHANGES_DETECTED;
    }
    exit_codes::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Value, encode_binary};
    use std::fs;

    fn write(path: &Path, value: &Value) {
        fs::write(path, encode_binary(value).unwrap()).unwrap();
    }

    #[test]
    fn test_equal_trees_print_nothing() {
        let a = tempfile::tempdir().unwrap();
        let b = tempfile::tempdir().unwrap();
        let v = Value::map([("k", Value::from(1))]);
        write(&a.path().join("x.plist"), &v);
        write(&b.path().join("x.plist"), &v);

        let mut out = Vec::new();
        let code = run_diff(&AppConfig::default(), a.path(), b.path(), &mut out).unwrap();
        assert_eq!(code, exit_codes::SUCCESS);
        assert!(out.is_empty());
    }

    #[test]
    fn test_fail_on_change() {
        let a = tempfile::tempdir().unwrap();
        let b = tempfile::tempdir().unwrap();
        write(&a.path().join("x.plist"), &Value::map([("k", Value::from(1))]));
        write(&b.path().join("x.plist"), &Value::map([("k", Value::from(2))]));

        let mut out = Vec::new();
        let code = run_diff(&AppConfig::default(), a.path(), b.path(), &mut out).unwrap();
        assert_eq!(code, exit_codes::SUCCESS);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "x.plist:\n\t-.k: 1 (integer)\n\t+.k: 2 (integer)\n\n\n"
        );

        let strict = AppConfig::builder().fail_on_change(true).build();
        let code = run_diff(&strict, a.path(), b.path(), &mut Vec::new()).unwrap();
        assert_eq!(code, exit_codes::CHANGES_DETECTED);
    }

    #[test]
    fn test_json_always_written() {
        let a = tempfile::tempdir().unwrap();
        let config = AppConfig::builder()
            .output_format(ReportFormat::Json)
            .build();
        let mut out = Vec::new();
        run_diff(&config, a.path(), a.path(), &mut out).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["equal"], true);
    }

    #[test]
    fn test_missing_tree_is_error() {
        let a = tempfile::tempdir().unwrap();
        let missing = a.path().join("missing");
        let err = run_diff(&AppConfig::default(), a.path(), &missing, &mut Vec::new()).unwrap_err();
        assert!(err.to_string().contains("missing"));
    }
}
