use std::path::PathBuf;

use aba_core::{LengthMismatch, RecordType, ValidationError};
use serde::Serialize;

/// Result of `aba generate`.
#[derive(Debug)]
pub enum GenerateResult {
    /// Content was produced.
    Written {
        /// `None` when written to stdout.
        output: Option<PathBuf>,
        lines: usize,
    },
    /// Field values broke their rules; nothing was written.
    Invalid(Vec<ValidationError>),
    /// Some records did not render to the fixed width; nothing was written.
    Overflow(Vec<LengthMismatch>),
}

impl GenerateResult {
    pub fn has_errors(&self) -> bool {
        !matches!(self, Self::Written { .. })
    }
}

/// One decoded record, as shown by `aba inspect`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordView {
    /// 1-based line number.
    pub line: usize,
    pub record_type: RecordType,
    pub attributes: Vec<AttributeView>,
}

#[derive(Debug, Serialize)]
pub struct AttributeView {
    pub name: &'static str,
    pub value: String,
}

/// A rule failure located in a file.
#[derive(Debug)]
pub struct LineIssue {
    /// 1-based line number.
    pub line: usize,
    pub record_type: RecordType,
    pub error: ValidationError,
}
