//! Property-based tests for the value model and comparator.
//!
//! Ensures comparison invariants hold across random value trees and that
//! decoding arbitrary bytes never panics.

use chrono::{TimeZone, Utc};
use plist_diff::{CompareOptions, Comparator, Value, decode};
use proptest::prelude::*;
use std::collections::HashSet;

fn date(secs: i64) -> Value {
    Value::from(
        Utc.timestamp_opt(secs, 0)
            .single()
            .expect("timestamp in range"),
    )
}

fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<i64>().prop_map(Value::from),
        any::<bool>().prop_map(Value::from),
        (-1.0e9f64..1.0e9).prop_map(Value::from),
        "[a-zA-Z0-9 ._-]{0,12}".prop_map(Value::from),
        (0i64..2_000_000_000).prop_map(date),
        prop::collection::vec(any::<u8>(), 0..8).prop_map(Value::from),
    ]
}

/// Keys deliberately include characters that force quoted rendering.
fn value() -> impl Strategy<Value = Value> {
    scalar().prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(|items| Value::sequence(items)),
            prop::collection::vec(("[a-z.\\[\\]\" ]{1,4}", inner), 0..6)
                .prop_map(|entries| Value::map(entries)),
        ]
    })
}

/// Move every timestamp in `value` by `offset` seconds.
fn shift_dates(value: &Value, offset: i64) -> Value {
    match value {
        Value::Map(entries) => Value::map(
            entries
                .iter()
                .map(|(k, v)| (k.clone(), shift_dates(v, offset))),
        ),
        Value::Sequence(items) => Value::sequence(items.iter().map(|v| shift_dates(v, offset))),
        Value::Scalar(plist_diff::Scalar::Date(d)) => {
            Value::from(*d + chrono::Duration::seconds(offset))
        }
        other => other.clone(),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn self_compare_is_empty(v in value()) {
        let diffs = Comparator::default().compare(&v, &v.clone());
        prop_assert!(diffs.is_empty(), "unexpected differences: {:?}", diffs);
    }

    #[test]
    fn timestamp_only_changes_vanish(v in value(), offset in 1i64..100_000) {
        let shifted = shift_dates(&v, offset);
        let comparator = Comparator::new(CompareOptions::new().ignore_timestamps());
        let diffs = comparator.compare(&v, &shifted);
        prop_assert!(diffs.is_empty(), "unexpected differences: {:?}", diffs);
    }

    #[test]
    fn differences_never_have_two_absent_sides(old in value(), new in value()) {
        for d in Comparator::default().compare(&old, &new) {
            prop_assert!(d.old.is_some() || d.new.is_some());
        }
    }

    #[test]
    fn rendered_paths_are_distinct(v in value()) {
        // Against nothing, every leaf of `v` is reported once.
        let diffs = Comparator::default().compare(&Value::Absent, &v);
        let mut seen = HashSet::new();
        for d in &diffs {
            prop_assert!(seen.insert(d.path.clone()), "duplicate path {:?}", d.path);
        }
    }

    #[test]
    fn added_key_reports_one_difference(
        entries in prop::collection::vec(("[a-z]{1,4}", value()), 0..6),
        added in scalar(),
    ) {
        let old = Value::map(entries.clone());
        let mut new_entries = entries;
        new_entries.push(("zz_added".to_string(), added.clone()));
        let new = Value::map(new_entries);

        let diffs = Comparator::default().compare(&old, &new);
        prop_assert_eq!(diffs.len(), 1);
        prop_assert_eq!(diffs[0].path.as_str(), ".zz_added");
        prop_assert!(diffs[0].old.is_none());
        prop_assert_eq!(diffs[0].new.as_ref(), Some(&added));
    }

    #[test]
    fn mismatched_root_kinds_report_once(i in any::<i64>(), s in "[a-z]{0,8}") {
        let diffs = Comparator::default().compare(&Value::from(i), &Value::from(s.as_str()));
        prop_assert_eq!(diffs.len(), 1);
        prop_assert_eq!(diffs[0].path.as_str(), "");
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    #[test]
    fn decode_arbitrary_bytes_doesnt_panic(bytes in prop::collection::vec(any::<u8>(), 0..512)) {
        if let Ok(v) = decode(&bytes) {
            prop_assert!(Comparator::default().compare(&v, &v).is_empty());
        }
    }

    #[test]
    fn decode_bplist_prefix_doesnt_panic(tail in prop::collection::vec(any::<u8>(), 0..256)) {
        let mut bytes = b"bplist00".to_vec();
        bytes.extend(tail);
        let _ = decode(&bytes);
    }
}
