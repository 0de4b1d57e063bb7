//! JSON batch description consumed by `aba generate`.
//!
//! ```json
//! {
//!   "descriptive": { "userFinancialInstitution": "CBA", ... },
//!   "transactions": [ { "bsbNumber": "083-163", "amount": 12555, ... } ],
//!   "fileTotal": null,
//!   "computeFileTotal": true
//! }
//! ```
//!
//! Attribute values may be JSON strings or non-negative integers. Names are
//! the record attribute names; an unknown name is rejected.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use aba_core::{
    AbaError, DescriptiveRecord, FileTotalRecord, Generator, GeneratorOptions, Layout, Record,
    Transaction,
};
use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

/// A single attribute value.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Text(String),
    Number(u64),
}

impl AttributeValue {
    fn into_string(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Number(number) => number.to_string(),
        }
    }
}

/// Attribute name to value.
pub type Attributes = BTreeMap<String, AttributeValue>;

/// Parsed batch file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Batch {
    pub descriptive: Attributes,
    #[serde(default)]
    pub transactions: Vec<Attributes>,
    #[serde(default)]
    pub file_total: Option<Attributes>,
    /// Derive the file total record from the transactions.
    #[serde(default)]
    pub compute_file_total: bool,
}

impl Batch {
    /// Parse a batch from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("parse batch JSON")
    }

    /// Read and parse a batch file.
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("read batch file {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("load batch {}", path.display()))
    }

    /// Build the records and hand them to a generator.
    ///
    /// # Errors
    ///
    /// [`AbaError::InvalidArgument`] for unknown attribute names, an empty
    /// transaction list, or a file total that is both given and computed.
    pub fn into_generator(self, options: GeneratorOptions) -> aba_core::Result<Generator> {
        if self.compute_file_total && self.file_total.is_some() {
            return Err(AbaError::invalid_argument(
                "fileTotal and computeFileTotal are mutually exclusive",
            ));
        }

        let descriptive: DescriptiveRecord = build_record(self.descriptive)?;
        let transactions = self
            .transactions
            .into_iter()
            .map(build_record)
            .collect::<aba_core::Result<Vec<Transaction>>>()?;

        let file_total = if self.compute_file_total {
            Some(FileTotalRecord::summarize(&transactions)?)
        } else {
            self.file_total.map(build_record).transpose()?
        };

        debug!(
            transactions = transactions.len(),
            file_total = file_total.is_some(),
            "built batch records"
        );
        Ok(Generator::new(descriptive, transactions, file_total)?.with_options(options))
    }
}

fn build_record<L: Layout>(attributes: Attributes) -> aba_core::Result<Record<L>> {
    let mut record = Record::<L>::new();
    for (name, value) in attributes {
        record.set_attribute(&name, value.into_string())?;
    }
    Ok(record)
}
