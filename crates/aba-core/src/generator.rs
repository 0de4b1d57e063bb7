//! ABA file generator.
//!
//! Composes one descriptive record, one or more transactions and an optional
//! file total record into file content. Output is produced only when every
//! record is valid and renders to exactly [`LINE_WIDTH`] characters.
//!
//! # Passes
//!
//! 1. Validation: every rule on every record. All failures, in file order,
//!    become one [`AbaError::ValidationFailed`].
//! 2. Structure: every rendered line is measured. Any line that is not
//!    [`LINE_WIDTH`] long becomes [`AbaError::LengthMismatches`].
//!
//! The validation pass always runs first, so an invalid value is reported
//! even when it also overflows its field.

use tracing::{debug, debug_span, warn};

use crate::error::{AbaError, LengthMismatch, Result, ValidationError};
use crate::field::LINE_WIDTH;
use crate::layouts::{DescriptiveRecord, FileTotalRecord, Transaction};
use crate::record::{AbaRecord, RecordType};

/// Separator written between lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    /// `\n`
    #[default]
    Lf,
    /// `\r\n`
    CrLf,
}

impl LineEnding {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
        }
    }
}

/// Output options for [`Generator`].
#[derive(Debug, Clone, Default)]
pub struct GeneratorOptions {
    /// Separator between lines.
    pub line_ending: LineEnding,
    /// Also terminate the last line.
    pub trailing_line_ending: bool,
}

impl GeneratorOptions {
    /// Set the line ending.
    #[must_use]
    pub fn with_line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = line_ending;
        self
    }

    /// Enable or disable a line ending after the last line.
    #[must_use]
    pub fn with_trailing_line_ending(mut self, enable: bool) -> Self {
        self.trailing_line_ending = enable;
        self
    }
}

/// Builds the content of one ABA file.
#[derive(Debug, Clone)]
pub struct Generator {
    descriptive: DescriptiveRecord,
    transactions: Vec<Transaction>,
    file_total: Option<FileTotalRecord>,
    options: GeneratorOptions,
}

impl Generator {
    /// Create a generator.
    ///
    /// # Errors
    ///
    /// Returns [`AbaError::InvalidArgument`] when `transactions` is empty.
    pub fn new(
        descriptive: DescriptiveRecord,
        transactions: Vec<Transaction>,
        file_total: Option<FileTotalRecord>,
    ) -> Result<Self> {
        if transactions.is_empty() {
            return Err(AbaError::invalid_argument(
                "at least one transaction is required",
            ));
        }

        Ok(Self {
            descriptive,
            transactions,
            file_total,
            options: GeneratorOptions::default(),
        })
    }

    /// Create a generator from records whose variants are checked at runtime.
    ///
    /// The sequence must be one descriptive record, then one or more
    /// transactions, then at most one file total record.
    ///
    /// # Errors
    ///
    /// Returns [`AbaError::InvalidArgument`] for any record out of place.
    pub fn from_records(records: Vec<AbaRecord>) -> Result<Self> {
        let mut records = records.into_iter().enumerate();

        let descriptive = match records.next() {
            Some((_, AbaRecord::Descriptive(record))) => record,
            Some((_, other)) => {
                return Err(AbaError::invalid_argument(format!(
                    "record 0 must be a descriptive record, got a {} record",
                    other.record_type()
                )));
            }
            None => return Err(AbaError::invalid_argument("no records given")),
        };

        let mut transactions = Vec::new();
        let mut file_total = None;
        for (idx, record) in records {
            match record {
                AbaRecord::Transaction(transaction) if file_total.is_none() => {
                    transactions.push(transaction);
                }
                AbaRecord::FileTotal(total) if file_total.is_none() => {
                    file_total = Some(total);
                }
                other => {
                    return Err(AbaError::invalid_argument(format!(
                        "record {idx}: unexpected {} record",
                        other.record_type()
                    )));
                }
            }
        }

        Self::new(descriptive, transactions, file_total)
    }

    /// Set output options.
    #[must_use]
    pub fn with_options(mut self, options: GeneratorOptions) -> Self {
        self.options = options;
        self
    }

    pub fn descriptive(&self) -> &DescriptiveRecord {
        &self.descriptive
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn file_total(&self) -> Option<&FileTotalRecord> {
        self.file_total.as_ref()
    }

    /// Validate, render and join every record.
    ///
    /// # Errors
    ///
    /// [`AbaError::ValidationFailed`] with every failed rule, or
    /// [`AbaError::LengthMismatches`] with every line of the wrong width.
    pub fn contents(&self) -> Result<String> {
        let lines = self.lines()?;
        let separator = self.options.line_ending.as_str();
        let mut contents = lines.join(separator);
        if self.options.trailing_line_ending {
            contents.push_str(separator);
        }
        Ok(contents)
    }

    /// Validate and render every record, one line each, in file order.
    pub fn lines(&self) -> Result<Vec<String>> {
        let span = debug_span!("generate", transactions = self.transactions.len());
        let _guard = span.enter();

        let errors = self.validate();
        if !errors.is_empty() {
            warn!(errors = errors.len(), "validation pass failed");
            return Err(AbaError::ValidationFailed(errors));
        }
        debug!("validation pass succeeded");

        let rendered = self.render();
        let mismatches: Vec<LengthMismatch> = rendered
            .iter()
            .enumerate()
            .filter_map(|(index, (record_type, line))| {
                let actual = line.chars().count();
                (actual != LINE_WIDTH).then_some(LengthMismatch {
                    index,
                    record_type: *record_type,
                    expected: LINE_WIDTH,
                    actual,
                })
            })
            .collect();
        if !mismatches.is_empty() {
            warn!(records = mismatches.len(), "structural pass failed");
            return Err(AbaError::LengthMismatches(mismatches));
        }
        debug!(lines = rendered.len(), "structural pass succeeded");

        Ok(rendered.into_iter().map(|(_, line)| line).collect())
    }

    /// Every rule failure across all records, in file order.
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = self.descriptive.validate();
        for transaction in &self.transactions {
            errors.extend(transaction.validate());
        }
        if let Some(total) = &self.file_total {
            errors.extend(total.validate());
        }
        errors
    }

    fn render(&self) -> Vec<(RecordType, String)> {
        let mut lines = Vec::with_capacity(self.transactions.len() + 2);
        lines.push((RecordType::Descriptive, self.descriptive.to_line()));
        lines.extend(
            self.transactions
                .iter()
                .map(|transaction| (RecordType::Transaction, transaction.to_line())),
        );
        if let Some(total) = &self.file_total {
            lines.push((RecordType::FileTotal, total.to_line()));
        }
        lines
    }
}
