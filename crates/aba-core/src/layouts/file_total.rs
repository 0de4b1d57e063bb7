//! File total (trailer) record, type `7`.
//!
//! | Columns | Width | Field                        | Kind |
//! |---------|-------|------------------------------|------|
//! | 1       | 1     | recordType                   | A    |
//! | 2-8     | 7     | bsbFormatFiller              | A    |
//! | 9-20    | 12    | blank1                       | A    |
//! | 21-30   | 10    | fileUserNetTotalAmount       | N    |
//! | 31-40   | 10    | fileUserCreditTotalAmount    | N    |
//! | 41-50   | 10    | fileUserDebitTotalAmount     | N    |
//! | 51-74   | 24    | blank2                       | A    |
//! | 75-80   | 6     | fileUserCountOfRecordsType1  | N    |
//! | 81-120  | 40    | blank3                       | A    |

use std::sync::LazyLock;

use tracing::debug;

use crate::error::{AbaError, Result};
use crate::field::{FieldDef, FieldKind, FieldTable};
use crate::record::{AbaRecord, Layout, Record, RecordType, sealed};
use crate::rules::Rule;

use super::transaction::{Transaction, TransactionKind};

pub const RECORD_TYPE: &str = "recordType";
pub const BSB_FORMAT_FILLER: &str = "bsbFormatFiller";
pub const NET_TOTAL_AMOUNT: &str = "fileUserNetTotalAmount";
pub const CREDIT_TOTAL_AMOUNT: &str = "fileUserCreditTotalAmount";
pub const DEBIT_TOTAL_AMOUNT: &str = "fileUserDebitTotalAmount";
pub const COUNT_OF_RECORDS_TYPE_1: &str = "fileUserCountOfRecordsType1";

static FIELDS: [FieldDef; 9] = [
    FieldDef::marker(RECORD_TYPE, "7"),
    FieldDef::blank(BSB_FORMAT_FILLER, 2, 7)
        .with_default("999-999")
        .with_rules(&[Rule::Bsb]),
    FieldDef::blank("blank1", 9, 12),
    FieldDef::new(NET_TOTAL_AMOUNT, 21, 10, FieldKind::Numeric)
        .with_rules(&[Rule::Required, Rule::Numeric]),
    FieldDef::new(CREDIT_TOTAL_AMOUNT, 31, 10, FieldKind::Numeric)
        .with_rules(&[Rule::Required, Rule::Numeric]),
    FieldDef::new(DEBIT_TOTAL_AMOUNT, 41, 10, FieldKind::Numeric)
        .with_rules(&[Rule::Required, Rule::Numeric]),
    FieldDef::blank("blank2", 51, 24),
    FieldDef::new(COUNT_OF_RECORDS_TYPE_1, 75, 6, FieldKind::Numeric)
        .with_rules(&[Rule::Required, Rule::Numeric]),
    FieldDef::blank("blank3", 81, 40),
];

static TABLE: LazyLock<FieldTable> =
    LazyLock::new(|| FieldTable::new(&FIELDS).expect("file total layout must span 120 columns"));

/// Layout marker for the file total record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FileTotalLayout;

impl sealed::Sealed for FileTotalLayout {}

impl Layout for FileTotalLayout {
    const RECORD_TYPE: RecordType = RecordType::FileTotal;

    fn table() -> &'static FieldTable {
        &TABLE
    }

    fn into_any(record: Record<Self>) -> AbaRecord {
        AbaRecord::FileTotal(record)
    }

    fn from_any(record: AbaRecord) -> std::result::Result<Record<Self>, AbaRecord> {
        match record {
            AbaRecord::FileTotal(record) => Ok(record),
            other => Err(other),
        }
    }
}

/// Trailer line summarising the transactions in a file.
pub type FileTotalRecord = Record<FileTotalLayout>;

impl Record<FileTotalLayout> {
    /// Build a trailer whose totals match `transactions`.
    ///
    /// Credit and debit totals are summed by transaction code; the net total
    /// is their absolute difference.
    ///
    /// # Errors
    ///
    /// Returns [`AbaError::InvalidArgument`] when a transaction has an
    /// unrecognised code or a non-numeric amount, or when a total overflows.
    pub fn summarize(transactions: &[Transaction]) -> Result<Self> {
        let mut credit = 0u64;
        let mut debit = 0u64;

        for (idx, transaction) in transactions.iter().enumerate() {
            let kind = transaction.kind().ok_or_else(|| {
                AbaError::invalid_argument(format!(
                    "transaction {idx} has no recognised transaction code"
                ))
            })?;
            let cents = transaction.amount_cents().ok_or_else(|| {
                AbaError::invalid_argument(format!("transaction {idx} has a non-numeric amount"))
            })?;
            let total = match kind {
                TransactionKind::Credit => &mut credit,
                TransactionKind::Debit => &mut debit,
            };
            *total = total
                .checked_add(cents)
                .ok_or_else(|| AbaError::invalid_argument("file total overflows"))?;
        }

        debug!(
            transactions = transactions.len(),
            credit, debit, "summarized file totals"
        );

        let mut record = Self::new();
        record
            .set_known(NET_TOTAL_AMOUNT, credit.abs_diff(debit).to_string())
            .set_known(CREDIT_TOTAL_AMOUNT, credit.to_string())
            .set_known(DEBIT_TOTAL_AMOUNT, debit.to_string())
            .set_known(COUNT_OF_RECORDS_TYPE_1, transactions.len().to_string());
        Ok(record)
    }
}
