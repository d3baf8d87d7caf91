//! Lock-step structural comparison of two [`Value`] trees.

use super::path::{Path, PathStep};
use super::result::Difference;
use crate::model::{Value, ValueKind};

static ABSENT: Value = Value::Absent;

/// A rule that makes the comparator skip nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Exclusion {
    /// Skip nodes whose present sides all have this kind.
    Kind(ValueKind),
    /// Skip map entries with this exact key, at any depth.
    Key(String),
}

/// Comparison options.
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct CompareOptions {
    exclusions: Vec<Exclusion>,
}

impl CompareOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn exclude(mut self, exclusion: Exclusion) -> Self {
        if !self.exclusions.contains(&exclusion) {
            self.exclusions.push(exclusion);
        }
        self
    }

    /// Treat every timestamp as equal to every other timestamp, and ignore
    /// timestamps that exist on one side only.
    pub fn ignore_timestamps(self) -> Self {
        self.exclude(Exclusion::Kind(ValueKind::Date))
    }

    pub fn ignore_key(self, key: impl Into<String>) -> Self {
        self.exclude(Exclusion::Key(key.into()))
    }

    #[must_use]
    pub fn exclusions(&self) -> &[Exclusion] {
        &self.exclusions
    }

    fn skips_node(&self, old: &Value, new: &Value) -> bool {
        let (old_kind, new_kind) = (old.kind(), new.kind());
        self.exclusions.iter().any(|e| match e {
            Exclusion::Kind(kind) => {
                let old_matches = old_kind == *kind || old_kind == ValueKind::Absent;
                let new_matches = new_kind == *kind || new_kind == ValueKind::Absent;
                old_matches && new_matches && !(old.is_absent() && new.is_absent())
            }
            Exclusion::Key(_) => false,
        })
    }

    fn skips_key(&self, key: &str) -> bool {
        self.exclusions
            .iter()
            .any(|e| matches!(e, Exclusion::Key(k) if k == key))
    }
}

/// Structural comparator.
///
/// Walks both trees depth-first and reports every located difference in
/// discovery order. Map keys are visited in old's decode order, followed by
/// keys that only exist in new.
#[derive(Debug, Clone, Default)]
pub struct Comparator {
    options: CompareOptions,
}

impl Comparator {
    pub const fn new(options: CompareOptions) -> Self {
        Self { options }
    }

    #[must_use]
    pub const fn options(&self) -> &CompareOptions {
        &self.options
    }

    /// Compare two values.
    ///
    /// When exactly one root is absent and the other is a non-empty container
    /// (a file that exists on one side only), every leaf of the populated side
    /// is reported on its own. If that reports nothing, the whole value is
    /// reported once at the root.
    #[must_use]
    pub fn compare(&self, old: &Value, new: &Value) -> Vec<Difference> {
        let mut walk = Walk::new(&self.options);
        match (old, new) {
            (Value::Absent, populated) if populated.is_container() => {
                walk.expand(populated, Side::New);
            }
            (populated, Value::Absent) if populated.is_container() => {
                walk.expand(populated, Side::Old);
            }
            _ => {
                walk.visit(old, new);
                return walk.out;
            }
        }
        if walk.out.is_empty() && !self.options.skips_node(old, new) {
            walk.report(old, new);
        }
        walk.out
    }
}

/// Compare two values with the given options.
#[must_use]
pub fn compare(old: &Value, new: &Value, options: &CompareOptions) -> Vec<Difference> {
    Comparator::new(options.clone()).compare(old, new)
}

#[derive(Clone, Copy)]
enum Side {
    Old,
    New,
}

/// Traversal state threaded through the recursion.
struct Walk<'a> {
    options: &'a CompareOptions,
    path: Path,
    out: Vec<Difference>,
}

impl<'a> Walk<'a> {
    const fn new(options: &'a CompareOptions) -> Self {
        Self {
            options,
            path: Path::new(),
            out: Vec::new(),
        }
    }

    fn visit(&mut self, old: &Value, new: &Value) {
        if self.options.skips_node(old, new) {
            return;
        }
        match (old, new) {
            (Value::Absent, Value::Absent) => {}
            (Value::Map(a), Value::Map(b)) => {
                for (key, va) in a {
                    if self.options.skips_key(key) {
                        continue;
                    }
                    let vb = b.get(key).unwrap_or(&ABSENT);
                    self.descend(PathStep::MapKey(key.clone()), va, vb);
                }
                for (key, vb) in b {
                    if a.contains_key(key) || self.options.skips_key(key) {
                        continue;
                    }
                    self.descend(PathStep::MapKey(key.clone()), &ABSENT, vb);
                }
            }
            (Value::Sequence(a), Value::Sequence(b)) => {
                for idx in 0..a.len().max(b.len()) {
                    let va = a.get(idx).unwrap_or(&ABSENT);
                    let vb = b.get(idx).unwrap_or(&ABSENT);
                    self.descend(PathStep::SequenceIndex(idx), va, vb);
                }
            }
            (Value::Scalar(a), Value::Scalar(b)) if a.kind() == b.kind() => {
                if !a.same_as(b) {
                    self.report(old, new);
                }
            }
            _ => self.report(old, new),
        }
    }

    /// Visit every leaf of a value that exists on one side only. Empty
    /// containers count as leaves.
    fn expand(&mut self, value: &Value, side: Side) {
        match value {
            Value::Map(entries) if !entries.is_empty() => {
                for (key, v) in entries {
                    if self.options.skips_key(key) {
                        continue;
                    }
                    self.with_step(PathStep::MapKey(key.clone()), v.kind(), |w| {
                        w.expand(v, side);
                    });
                }
            }
            Value::Sequence(items) if !items.is_empty() => {
                for (idx, v) in items.iter().enumerate() {
                    self.with_step(PathStep::SequenceIndex(idx), v.kind(), |w| {
                        w.expand(v, side);
                    });
                }
            }
            leaf => match side {
                Side::Old => self.visit(leaf, &ABSENT),
                Side::New => self.visit(&ABSENT, leaf),
            },
        }
    }

    fn descend(&mut self, step: PathStep, old: &Value, new: &Value) {
        let kind = match (old, new) {
            (Value::Absent, v) | (v, Value::Absent) => v.kind(),
            (a, b) if a.kind() == b.kind() => a.kind(),
            _ => ValueKind::Absent,
        };
        self.with_step(step, kind, |w| w.visit(old, new));
    }

    fn with_step(&mut self, step: PathStep, kind: ValueKind, f: impl FnOnce(&mut Self)) {
        self.path.push(step);
        let narrowed = kind != ValueKind::Absent;
        if narrowed {
            self.path.push(PathStep::TypeNarrowing(kind));
        }
        f(self);
        if narrowed {
            self.path.pop();
        }
        self.path.pop();
    }

    fn report(&mut self, old: &Value, new: &Value) {
        self.out.push(Difference {
            path: self.path.render(),
            old: (!old.is_absent()).then(|| old.clone()),
            new: (!new.is_absent()).then(|| new.clone()),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Scalar;
    use chrono::{TimeZone, Utc};

    fn date(day: u32) -> Value {
        Value::from(Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap())
    }

    fn plain() -> Comparator {
        Comparator::default()
    }

    fn paths(diffs: &[Difference]) -> Vec<&str> {
        diffs.iter().map(|d| d.path.as_str()).collect()
    }

    #[test]
    fn test_identical_values_have_no_differences() {
        let v = Value::map([
            ("a", Value::from(1)),
            ("b", Value::sequence([Value::from("x"), Value::map::<&str>([])])),
            ("c", Value::sequence([])),
        ]);
        assert!(plain().compare(&v, &v.clone()).is_empty());
        assert!(plain().compare(&Value::Absent, &Value::Absent).is_empty());
    }

    #[test]
    fn test_changed_scalar_in_map() {
        let old = Value::map([("x", Value::from(1))]);
        let new = Value::map([("x", Value::from(2))]);
        let diffs = plain().compare(&old, &new);
        assert_eq!(diffs.len(), 1);
        assert_eq!(diffs[0].path, ".x");
        assert_eq!(diffs[0].old, Some(Value::from(1)));
        assert_eq!(diffs[0].new, Some(Value::from(2)));
    }

    #[test]
    fn test_root_kind_mismatch_is_one_difference() {
        let diffs = plain().compare(&Value::from(1), &Value::from("1"));
        assert_eq!(diffs.len(), 1);
        assert_eq!(diffs[0].path, "");
        assert_eq!(diffs[0].old, Some(Value::from(1)));
        assert_eq!(diffs[0].new, Some(Value::from("1")));
    }

    #[test]
    fn test_kind_mismatch_does_not_recurse() {
        let old = Value::map([("k", Value::map([("a", Value::from(1)), ("b", Value::from(2))]))]);
        let new = Value::map([("k", Value::sequence([Value::from(1)]))]);
        let diffs = plain().compare(&old, &new);
        assert_eq!(paths(&diffs), vec![".k"]);
    }

    #[test]
    fn test_added_and_removed_keys() {
        let old = Value::map([("keep", Value::from(true)), ("gone", Value::from(1))]);
        let new = Value::map([
            ("keep", Value::from(true)),
            ("fresh", Value::map([("deep", Value::from(1))])),
        ]);
        let diffs = plain().compare(&old, &new);
        assert_eq!(paths(&diffs), vec![".gone", ".fresh"]);
        assert_eq!(diffs[0].old, Some(Value::from(1)));
        assert_eq!(diffs[0].new, None);
        assert_eq!(diffs[1].old, None);
        assert_eq!(diffs[1].new, Some(Value::map([("deep", Value::from(1))])));
    }

    #[test]
    fn test_keys_visited_in_decode_order() {
        let old = Value::map([("z", Value::from(1)), ("a", Value::from(1))]);
        let new = Value::map([("a", Value::from(2)), ("z", Value::from(2)), ("m", Value::from(0))]);
        let diffs = plain().compare(&old, &new);
        assert_eq!(paths(&diffs), vec![".z", ".a", ".m"]);
    }

    #[test]
    fn test_sequence_compares_by_index() {
        let old = Value::sequence([Value::from(1), Value::from(2)]);
        let new = Value::sequence([Value::from(1), Value::from(3), Value::from(4), Value::from(5)]);
        let diffs = plain().compare(&old, &new);
        assert_eq!(paths(&diffs), vec!["[1]", "[2]", "[3]"]);
        assert_eq!(diffs[1].old, None);
        assert_eq!(diffs[2].new, Some(Value::from(5)));
    }

    #[test]
    fn test_nested_paths() {
        let old = Value::map([(
            "persistent-apps",
            Value::sequence([Value::map([("tile-data", Value::map([("label", Value::from("Mail"))]))])]),
        )]);
        let new = Value::map([(
            "persistent-apps",
            Value::sequence([Value::map([("tile-data", Value::map([("label", Value::from("Notes"))]))])]),
        )]);
        let diffs = plain().compare(&old, &new);
        assert_eq!(paths(&diffs), vec![".persistent-apps[0].tile-data.label"]);
    }

    #[test]
    fn test_numeric_comparison_is_exact() {
        let diffs = plain().compare(&Value::from(0.1 + 0.2), &Value::from(0.3));
        assert_eq!(diffs.len(), 1);
        let diffs = plain().compare(
            &Value::from(1),
            &Value::Scalar(Scalar::Unsigned(1)),
        );
        assert_eq!(diffs.len(), 1, "integer and unsigned are different kinds");
    }

    #[test]
    fn test_ignore_timestamps_at_any_depth() {
        let options = CompareOptions::new().ignore_timestamps();
        let cmp = Comparator::new(options);
        let old = Value::map([
            ("when", date(1)),
            ("list", Value::sequence([date(1), Value::map([("at", date(2))])])),
        ]);
        let new = Value::map([
            ("when", date(5)),
            ("list", Value::sequence([date(3), Value::map([("at", date(9))]), date(4)])),
            ("added", date(7)),
        ]);
        assert!(cmp.compare(&old, &new).is_empty());
        assert_eq!(plain().compare(&old, &new).len(), 5);
    }

    #[test]
    fn test_ignored_kind_still_reports_kind_change() {
        let cmp = Comparator::new(CompareOptions::new().ignore_timestamps());
        let old = Value::map([("when", date(1))]);
        let new = Value::map([("when", Value::from(1))]);
        assert_eq!(paths(&cmp.compare(&old, &new)), vec![".when"]);
    }

    #[test]
    fn test_ignore_key_anywhere() {
        let cmp = Comparator::new(CompareOptions::new().ignore_key("NSWindow Frame"));
        let old = Value::map([
            ("NSWindow Frame", Value::from("0 0 100 100")),
            ("nested", Value::map([("NSWindow Frame", Value::from("1"))])),
            ("real", Value::from(1)),
        ]);
        let new = Value::map([
            ("NSWindow Frame", Value::from("5 5 200 200")),
            ("nested", Value::map::<&str>([])),
            ("real", Value::from(2)),
        ]);
        assert_eq!(paths(&cmp.compare(&old, &new)), vec![".real"]);
    }

    #[test]
    fn test_one_sided_root_expands_to_leaves() {
        let new = Value::map([
            ("y", Value::from(true)),
            ("list", Value::sequence([Value::from(1), Value::sequence([])])),
        ]);
        let diffs = plain().compare(&Value::Absent, &new);
        assert_eq!(paths(&diffs), vec![".y", ".list[0]", ".list[1]"]);
        assert!(diffs.iter().all(|d| d.old.is_none() && d.new.is_some()));
        assert_eq!(diffs[2].new, Some(Value::sequence([])));

        let removed = plain().compare(&new, &Value::Absent);
        assert_eq!(paths(&removed), vec![".y", ".list[0]", ".list[1]"]);
        assert!(removed.iter().all(|d| d.old.is_some() && d.new.is_none()));
    }

    #[test]
    fn test_one_sided_empty_root_reports_whole_value() {
        let diffs = plain().compare(&Value::map::<&str>([]), &Value::Absent);
        assert_eq!(diffs.len(), 1);
        assert_eq!(diffs[0].path, "");
        assert_eq!(diffs[0].old, Some(Value::map::<&str>([])));
    }

    #[test]
    fn test_one_sided_root_with_only_ignored_leaves_still_reported() {
        let cmp = Comparator::new(CompareOptions::new().ignore_timestamps());
        let new = Value::map([("when", date(1))]);
        let diffs = cmp.compare(&Value::Absent, &new);
        assert_eq!(paths(&diffs), vec![""]);
        assert_eq!(diffs[0].new, Some(new));
    }

    #[test]
    fn test_one_sided_scalar_root() {
        let diffs = plain().compare(&Value::from(3), &Value::Absent);
        assert_eq!(diffs.len(), 1);
        assert_eq!(diffs[0].path, "");
        assert_eq!(diffs[0].new, None);
    }

    #[test]
    fn test_options_deduplicate() {
        let options = CompareOptions::new().ignore_timestamps().ignore_timestamps();
        assert_eq!(options.exclusions().len(), 1);
    }

    #[test]
    fn test_free_function_matches_comparator() {
        let options = CompareOptions::new();
        let old = Value::map([("x", Value::from(1))]);
        let new = Value::map([("x", Value::from(2))]);
        assert_eq!(compare(&old, &new, &options), plain().compare(&old, &new));
    }
}
