#![no_main]
use libfuzzer_sys::fuzz_target;
use plist_diff::{Comparator, Value, decode};

/// Fuzz the property-list decoder.
///
/// Arbitrary bytes must either fail to decode or produce a value that
/// compares equal to itself and renders without panicking.
fuzz_target!(|data: &[u8]| {
    if let Ok(value) = decode(data) {
        let diffs = Comparator::default().compare(&value, &value);
        assert!(diffs.is_empty(), "self comparison found {diffs:?}");
        let _ = value.to_string();
        let _ = Comparator::default().compare(&Value::Absent, &value);
    }
});
