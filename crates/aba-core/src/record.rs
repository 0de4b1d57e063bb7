//! Record model.
//!
//! A [`Record`] is a set of attribute values over the static [`FieldTable`]
//! of its variant. The variant is a type parameter drawn from a closed set of
//! [`Layout`] markers, so a transaction can never be passed where a
//! descriptive record is expected. [`AbaRecord`] is the dynamic form used when
//! the variant is only known at runtime (parsing, untyped input).
//!
//! Setting a value never validates it. Validation and rendering are separate,
//! explicit steps so that every problem in a file can be collected in one go.

use std::fmt;
use std::marker::PhantomData;

use serde::Serialize;

use crate::error::{AbaError, Result, ValidationError};
use crate::field::{FieldDef, FieldTable};
use crate::layouts::{DescriptiveLayout, FileTotalLayout, TransactionLayout};

/// Record-type discriminant stored in column 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordType {
    /// Header, marker `0`.
    Descriptive,
    /// Detail, marker `1`.
    Transaction,
    /// Trailer, marker `7`.
    FileTotal,
}

impl RecordType {
    /// Character written in column 1.
    pub const fn marker(self) -> char {
        match self {
            Self::Descriptive => '0',
            Self::Transaction => '1',
            Self::FileTotal => '7',
        }
    }

    /// Variant for a column 1 marker.
    pub const fn from_marker(marker: char) -> Option<Self> {
        match marker {
            '0' => Some(Self::Descriptive),
            '1' => Some(Self::Transaction),
            '7' => Some(Self::FileTotal),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Descriptive => "descriptive",
            Self::Transaction => "transaction",
            Self::FileTotal => "file total",
        }
    }

    /// Field layout of this variant.
    pub fn table(self) -> &'static FieldTable {
        match self {
            Self::Descriptive => DescriptiveLayout::table(),
            Self::Transaction => TransactionLayout::table(),
            Self::FileTotal => FileTotalLayout::table(),
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub(crate) mod sealed {
    pub trait Sealed {}
}

/// Marker for one of the three standard record layouts.
///
/// Sealed: the set of layouts is fixed by the ABA standard.
pub trait Layout:
    sealed::Sealed + fmt::Debug + Clone + Copy + PartialEq + Eq + Default + 'static
{
    const RECORD_TYPE: RecordType;

    /// Registered field table for this layout.
    fn table() -> &'static FieldTable;

    /// Wrap a typed record into the dynamic form.
    fn into_any(record: Record<Self>) -> AbaRecord;

    /// Unwrap the dynamic form, handing it back on a variant mismatch.
    fn from_any(record: AbaRecord) -> std::result::Result<Record<Self>, AbaRecord>;
}

/// A record of layout `L` with per-instance attribute values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record<L: Layout> {
    /// One slot per field, `None` meaning "use the default".
    values: Vec<Option<String>>,
    layout: PhantomData<L>,
}

impl<L: Layout> Default for Record<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: Layout> Record<L> {
    /// Create a record with every field at its default.
    pub fn new() -> Self {
        Self {
            values: vec![None; L::table().len()],
            layout: PhantomData,
        }
    }

    pub fn record_type(&self) -> RecordType {
        L::RECORD_TYPE
    }

    /// Field definitions in column order.
    pub fn fields(&self) -> &'static [FieldDef] {
        L::table().fields()
    }

    /// Store a raw value. No validation happens here.
    ///
    /// # Errors
    ///
    /// Returns [`AbaError::InvalidArgument`] if the layout has no such field
    /// or the field is fixed, like the record-type marker.
    pub fn set_attribute(&mut self, name: &str, value: impl Into<String>) -> Result<&mut Self> {
        let idx = Self::slot(name)?;
        if self.fields()[idx].fixed {
            return Err(AbaError::invalid_argument(format!(
                "attribute '{name}' of a {} record is fixed",
                L::RECORD_TYPE
            )));
        }
        self.values[idx] = Some(value.into());
        Ok(self)
    }

    /// Builder form of [`set_attribute`](Self::set_attribute).
    pub fn with_attribute(mut self, name: &str, value: impl Into<String>) -> Result<Self> {
        self.set_attribute(name, value)?;
        Ok(self)
    }

    /// Blank a field out. Unlike an unset field, the default is not used.
    pub fn clear_attribute(&mut self, name: &str) -> Result<&mut Self> {
        self.set_attribute(name, String::new())
    }

    /// Reset a field back to its default.
    pub fn reset_attribute(&mut self, name: &str) -> Result<&mut Self> {
        let idx = Self::slot(name)?;
        self.values[idx] = None;
        Ok(self)
    }

    /// Current value of `name`, falling back to the field default.
    ///
    /// Returns `None` for names the layout does not define.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        L::table()
            .position(name)
            .map(|idx| self.value_at(idx))
    }

    /// `(name, value)` pairs in column order, defaults applied.
    pub fn attributes(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        self.fields()
            .iter()
            .enumerate()
            .map(|(idx, field)| (field.name, self.value_at(idx)))
    }

    /// Run every rule of every field and return all failures.
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        for (idx, field) in self.fields().iter().enumerate() {
            field.validate_into(self.value_at(idx), &mut errors);
        }
        errors
    }

    /// Render the record as one line.
    ///
    /// Each value is padded to its field width. Over-long values are kept
    /// whole, so the line comes out longer than
    /// [`LINE_WIDTH`](crate::LINE_WIDTH) rather than silently losing data;
    /// the generator reports that as a length mismatch.
    pub fn to_line(&self) -> String {
        let mut line = String::with_capacity(crate::LINE_WIDTH);
        for (idx, field) in self.fields().iter().enumerate() {
            line.push_str(&field.pad(self.value_at(idx)));
        }
        line
    }

    /// Set a field named by one of the layout's own constants.
    pub(crate) fn set_known(&mut self, name: &'static str, value: String) -> &mut Self {
        if let Some(idx) = L::table().position(name) {
            self.values[idx] = Some(value);
        }
        self
    }

    fn value_at(&self, idx: usize) -> &str {
        self.values[idx]
            .as_deref()
            .unwrap_or(self.fields()[idx].default)
    }

    fn slot(name: &str) -> Result<usize> {
        L::table().position(name).ok_or_else(|| {
            AbaError::invalid_argument(format!(
                "{} record has no attribute '{name}'",
                L::RECORD_TYPE
            ))
        })
    }
}

/// A record whose variant is known only at runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbaRecord {
    Descriptive(Record<DescriptiveLayout>),
    Transaction(Record<TransactionLayout>),
    FileTotal(Record<FileTotalLayout>),
}

impl AbaRecord {
    /// Blank record of the given variant.
    pub fn new(record_type: RecordType) -> Self {
        match record_type {
            RecordType::Descriptive => Self::Descriptive(Record::new()),
            RecordType::Transaction => Self::Transaction(Record::new()),
            RecordType::FileTotal => Self::FileTotal(Record::new()),
        }
    }

    pub fn record_type(&self) -> RecordType {
        match self {
            Self::Descriptive(_) => RecordType::Descriptive,
            Self::Transaction(_) => RecordType::Transaction,
            Self::FileTotal(_) => RecordType::FileTotal,
        }
    }

    pub fn set_attribute(&mut self, name: &str, value: impl Into<String>) -> Result<&mut Self> {
        match self {
            Self::Descriptive(record) => {
                record.set_attribute(name, value)?;
            }
            Self::Transaction(record) => {
                record.set_attribute(name, value)?;
            }
            Self::FileTotal(record) => {
                record.set_attribute(name, value)?;
            }
        }
        Ok(self)
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        match self {
            Self::Descriptive(record) => record.attribute(name),
            Self::Transaction(record) => record.attribute(name),
            Self::FileTotal(record) => record.attribute(name),
        }
    }

    /// `(name, value)` pairs in column order.
    pub fn attributes(&self) -> Vec<(&'static str, &str)> {
        match self {
            Self::Descriptive(record) => record.attributes().collect(),
            Self::Transaction(record) => record.attributes().collect(),
            Self::FileTotal(record) => record.attributes().collect(),
        }
    }

    pub fn validate(&self) -> Vec<ValidationError> {
        match self {
            Self::Descriptive(record) => record.validate(),
            Self::Transaction(record) => record.validate(),
            Self::FileTotal(record) => record.validate(),
        }
    }

    pub fn to_line(&self) -> String {
        match self {
            Self::Descriptive(record) => record.to_line(),
            Self::Transaction(record) => record.to_line(),
            Self::FileTotal(record) => record.to_line(),
        }
    }
}

impl<L: Layout> From<Record<L>> for AbaRecord {
    fn from(record: Record<L>) -> Self {
        L::into_any(record)
    }
}

impl<L: Layout> TryFrom<AbaRecord> for Record<L> {
    type Error = AbaError;

    fn try_from(record: AbaRecord) -> Result<Self> {
        L::from_any(record).map_err(|other| {
            AbaError::invalid_argument(format!(
                "expected a {} record, got a {} record",
                L::RECORD_TYPE,
                other.record_type()
            ))
        })
    }
}
