//! JSON report generator.

use super::{ReportError, ReportFormat, ReportGenerator};
use crate::diff::FileSetDiff;

/// JSON report generator
pub struct JsonReporter {
    /// Pretty print output
    pretty: bool,
}

impl JsonReporter {
    #[must_use]
    pub const fn new() -> Self {
        Self { pretty: true }
    }

    /// Set pretty printing
    #[must_use]
    pub const fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for JsonReporter {
    fn generate(&self, result: &FileSetDiff) -> Result<String, ReportError> {
        let json = if self.pretty {
            serde_json::to_string_pretty(result)
        } else {
            serde_json::to_string(result)
        };
        json.map_err(|e| ReportError::SerializationError(e.to_string()))
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Json
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::{Difference, FileDiff, FileDiffSet};
    use crate::model::Value;

    #[test]
    fn test_compact_json() {
        let mut files = FileDiffSet::default();
        files.insert(
            "com.apple.dock.plist",
            FileDiff(vec![Difference {
                path: ".tilesize".to_string(),
                old: Some(Value::from(48)),
                new: None,
            }]),
        );
        let out = JsonReporter::new()
            .pretty(false)
            .generate(&FileSetDiff::new(files))
            .unwrap();
        insta::assert_snapshot!(out, @r#"{"equal":false,"files":{"com.apple.dock.plist":[{"path":".tilesize","old":"48","new":null,"old_kind":"integer","new_kind":"absent"}]}}"#);
    }

    #[test]
    fn test_equal_json() {
        let out = JsonReporter::new()
            .pretty(false)
            .generate(&FileSetDiff::new(FileDiffSet::default()))
            .unwrap();
        assert_eq!(out, r#"{"equal":true,"files":{}}"#);
    }
}
