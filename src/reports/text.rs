//! Plain text report generator.

use super::{ReportError, ReportFormat, ReportGenerator};
use crate::diff::FileSetDiff;

/// Renders each differing file as `path:` followed by its difference block.
#[derive(Debug, Default)]
pub struct TextReporter;

impl TextReporter {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ReportGenerator for TextReporter {
    fn generate(&self, result: &FileSetDiff) -> Result<String, ReportError> {
        Ok(result.files.to_string())
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Text
    }
}
