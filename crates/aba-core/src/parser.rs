//! ABA file parser.
//!
//! The inverse of the [`Generator`]: splits raw content into lines, selects
//! the layout from the record-type marker in column 1 and reads every field
//! back out of its columns, stripping the field's padding.
//!
//! Decoding does not validate field values. Call `validate()` on the decoded
//! records when that is wanted.

use tracing::debug;

use crate::error::{AbaError, Result, ValidationError};
use crate::field::LINE_WIDTH;
use crate::generator::Generator;
use crate::layouts::{
    DescriptiveLayout, DescriptiveRecord, FileTotalLayout, FileTotalRecord, Transaction,
    TransactionLayout,
};
use crate::record::{AbaRecord, Layout, Record, RecordType};

/// Holds raw ABA content until it is decoded.
#[derive(Debug, Clone)]
pub struct Parser {
    contents: String,
}

impl Parser {
    /// Store `contents`. Nothing is decoded yet.
    pub fn new(contents: impl Into<String>) -> Self {
        Self {
            contents: contents.into(),
        }
    }

    /// Raw content as given.
    pub fn contents(&self) -> &str {
        &self.contents
    }

    /// Decode every line into a record of the matching variant.
    ///
    /// Accepts `\n` and `\r\n` line endings and a final line ending.
    ///
    /// # Errors
    ///
    /// [`AbaError::Decode`] for a line that is not [`LINE_WIDTH`] characters
    /// or that starts with an unknown record-type marker.
    pub fn records(&self) -> Result<Vec<AbaRecord>> {
        let records = self
            .contents
            .lines()
            .enumerate()
            .map(|(idx, line)| decode_line(idx + 1, line))
            .collect::<Result<Vec<_>>>()?;
        debug!(records = records.len(), "decoded ABA content");
        Ok(records)
    }

    /// Decode and check the file structure.
    ///
    /// The file must hold one descriptive record first, then one or more
    /// transactions, then at most one file total record.
    pub fn parse_file(&self) -> Result<AbaFile> {
        let records = self.records()?;
        let line_count = records.len();

        let mut descriptive = None;
        let mut transactions = Vec::new();
        let mut file_total = None;

        for (idx, record) in records.into_iter().enumerate() {
            let line = idx + 1;
            match record {
                AbaRecord::Descriptive(record) if idx == 0 => descriptive = Some(record),
                AbaRecord::Transaction(record) if idx > 0 && file_total.is_none() => {
                    transactions.push(record);
                }
                AbaRecord::FileTotal(record) if idx > 0 && file_total.is_none() => {
                    file_total = Some(record);
                }
                other => {
                    return Err(AbaError::decode(
                        line,
                        format!("unexpected {} record", other.record_type()),
                    ));
                }
            }
        }

        let descriptive =
            descriptive.ok_or_else(|| AbaError::decode(1, "missing descriptive record"))?;
        if transactions.is_empty() {
            return Err(AbaError::decode(
                line_count + 1,
                "file has no transaction records",
            ));
        }

        Ok(AbaFile {
            descriptive,
            transactions,
            file_total,
        })
    }
}

/// A decoded file, split by record variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbaFile {
    pub descriptive: DescriptiveRecord,
    pub transactions: Vec<Transaction>,
    pub file_total: Option<FileTotalRecord>,
}

impl AbaFile {
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

    /// Hand the records to a generator, e.g. to re-emit them.
    pub fn into_generator(self) -> Result<Generator> {
        Generator::new(self.descriptive, self.transactions, self.file_total)
    }

    /// Records in file order, as their dynamic form.
    pub fn into_records(self) -> Vec<AbaRecord> {
        let mut records = Vec::with_capacity(self.transactions.len() + 2);
        records.push(self.descriptive.into());
        records.extend(self.transactions.into_iter().map(AbaRecord::from));
        records.extend(self.file_total.map(AbaRecord::from));
        records
    }
}

/// Decode one line; `line_no` is 1-based and only used in errors.
fn decode_line(line_no: usize, line: &str) -> Result<AbaRecord> {
    let chars: Vec<char> = line.chars().collect();
    if chars.len() != LINE_WIDTH {
        return Err(AbaError::decode(
            line_no,
            format!(
                "line is {} characters, expected {LINE_WIDTH}",
                chars.len()
            ),
        ));
    }

    let marker = chars[0];
    let record_type = RecordType::from_marker(marker).ok_or_else(|| {
        AbaError::decode(line_no, format!("unknown record type marker '{marker}'"))
    })?;

    Ok(match record_type {
        RecordType::Descriptive => decode_fields::<DescriptiveLayout>(&chars).into(),
        RecordType::Transaction => decode_fields::<TransactionLayout>(&chars).into(),
        RecordType::FileTotal => decode_fields::<FileTotalLayout>(&chars).into(),
    })
}

/// Read every field of layout `L` out of a full-width line.
fn decode_fields<L: Layout>(chars: &[char]) -> Record<L> {
    let mut record = Record::<L>::new();
    for field in L::table().fields() {
        let start = field.start - 1;
        let raw: String = chars[start..start + field.width].iter().collect();
        record.set_known(field.name, field.strip(&raw).to_string());
    }
    record
}
