//! Report generation for diff results.
//!
//! - Text: the classic `-`/`+` line format, one block per differing file
//! - JSON: structured data for programmatic integration

mod json;
mod text;
mod types;

pub use json::JsonReporter;
pub use text::TextReporter;
pub use types::ReportFormat;

use crate::diff::FileSetDiff;
use std::io::Write;
use thiserror::Error;

/// Errors that can occur during report generation
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Render a file-set diff
    fn generate(&self, result: &FileSetDiff) -> Result<String, ReportError>;

    /// Write the report followed by a newline
    fn write_report(&self, result: &FileSetDiff, writer: &mut dyn Write) -> Result<(), ReportError> {
        let report = self.generate(result)?;
        writeln!(writer, "{report}")?;
        Ok(())
    }

    /// Get the format this generator produces
    fn format(&self) -> ReportFormat;
}

/// Create a report generator for the given format
#[must_use]
pub fn create_reporter(format: ReportFormat) -> Box<dyn ReportGenerator> {
    match format {
        ReportFormat::Text => Box::new(TextReporter::new()),
        ReportFormat::Json => Box::new(JsonReporter::new()),
    }
}

/// Render `result` in `format`.
pub fn render_report(result: &FileSetDiff, format: ReportFormat) -> Result<String, ReportError> {
    create_reporter(format).generate(result)
}
