//! Error types for ABA generation and parsing.
//!
//! Failures fall into four kinds that never overlap:
//! - [`AbaError::InvalidArgument`]: misuse of the API (empty transaction list,
//!   wrong record variant, unknown attribute name)
//! - [`AbaError::ValidationFailed`]: one or more field values break a rule;
//!   carries every failure across every record
//! - [`AbaError::LengthMismatches`]: a rendered line is not exactly
//!   [`LINE_WIDTH`](crate::LINE_WIDTH) characters
//! - [`AbaError::Decode`]: raw file content could not be decoded

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::record::RecordType;
use crate::rules::RuleId;

/// A single failed rule check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    /// Attribute (field) name, e.g. `bsbNumber`.
    pub attribute: String,
    /// The raw value that failed.
    pub value: String,
    /// Identifier of the failed rule.
    pub rule: RuleId,
}

impl ValidationError {
    /// Create a new validation error.
    pub fn new(attribute: impl Into<String>, value: impl Into<String>, rule: RuleId) -> Self {
        Self {
            attribute: attribute.into(),
            value: value.into(),
            rule,
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} = {:?} fails rule '{}'",
            self.attribute, self.value, self.rule
        )
    }
}

/// A rendered record whose line is not the fixed width.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LengthMismatch {
    /// Zero-based position of the record in the file.
    pub index: usize,
    /// Variant of the offending record.
    pub record_type: RecordType,
    /// Required line width.
    pub expected: usize,
    /// Width actually rendered.
    pub actual: usize,
}

impl fmt::Display for LengthMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "record {} ({}) rendered {} characters, expected {}",
            self.index, self.record_type, self.actual, self.expected
        )
    }
}

/// Errors raised by the generator and parser.
#[derive(Debug, Error)]
pub enum AbaError {
    /// Structural misuse of the API.
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    /// Field values failed validation (may contain many).
    #[error("{} validation error(s)", .0.len())]
    ValidationFailed(Vec<ValidationError>),

    /// Rendered lines that are not exactly the fixed width.
    #[error("{} record(s) do not render to the fixed line width", .0.len())]
    LengthMismatches(Vec<LengthMismatch>),

    /// Raw content could not be decoded.
    #[error("decode error at line {line}: {message}")]
    Decode { line: usize, message: String },
}

/// Result type alias for ABA operations.
pub type Result<T> = std::result::Result<T, AbaError>;

impl AbaError {
    /// Create an InvalidArgument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a Decode error for a 1-based line number.
    pub fn decode(line: usize, message: impl Into<String>) -> Self {
        Self::Decode {
            line,
            message: message.into(),
        }
    }

    /// Validation failures carried by this error, if any.
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            Self::ValidationFailed(errors) => errors,
            _ => &[],
        }
    }

    /// Length mismatches carried by this error, if any.
    pub fn length_mismatches(&self) -> &[LengthMismatch] {
        match self {
            Self::LengthMismatches(mismatches) => mismatches,
            _ => &[],
        }
    }
}

impl From<Vec<ValidationError>> for AbaError {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self::ValidationFailed(errors)
    }
}
