//! Transaction (detail) record, type `1`.
//!
//! | Columns | Width | Field                   | Kind |
//! |---------|-------|-------------------------|------|
//! | 1       | 1     | recordType              | A    |
//! | 2-8     | 7     | bsbNumber               | A    |
//! | 9-17    | 9     | accountNumber           | A    |
//! | 18      | 1     | indicator               | A    |
//! | 19-20   | 2     | transactionCode         | N    |
//! | 21-30   | 10    | amount                  | N    |
//! | 31-62   | 32    | accountName             | A    |
//! | 63-80   | 18    | lodgementReference      | A    |
//! | 81-87   | 7     | traceRecord             | A    |
//! | 88-96   | 9     | traceAccountNumber      | A    |
//! | 97-112  | 16    | nameOfRemitter          | A    |
//! | 113-120 | 8     | amountOfWithholdingTax  | N    |

use std::fmt;
use std::sync::LazyLock;

use serde::Serialize;

use crate::field::{FieldDef, FieldKind, FieldTable};
use crate::record::{AbaRecord, Layout, Record, RecordType, sealed};
use crate::rules::Rule;

pub const RECORD_TYPE: &str = "recordType";
pub const BSB_NUMBER: &str = "bsbNumber";
pub const ACCOUNT_NUMBER: &str = "accountNumber";
pub const INDICATOR: &str = "indicator";
pub const TRANSACTION_CODE: &str = "transactionCode";
pub const AMOUNT: &str = "amount";
pub const ACCOUNT_NAME: &str = "accountName";
pub const LODGEMENT_REFERENCE: &str = "lodgementReference";
pub const TRACE_RECORD: &str = "traceRecord";
pub const TRACE_ACCOUNT_NUMBER: &str = "traceAccountNumber";
pub const NAME_OF_REMITTER: &str = "nameOfRemitter";
pub const AMOUNT_OF_WITHHOLDING_TAX: &str = "amountOfWithholdingTax";

/// Debit code.
pub const DEBIT_CODE: &str = "13";

/// Codes accepted in `transactionCode`: one debit, eight credit kinds.
pub const TRANSACTION_CODES: &[&str] = &["13", "50", "51", "52", "53", "54", "55", "56", "57"];

/// Withholding indicators. A blank indicator is also valid.
pub const INDICATORS: &[&str] = &["N", "W", "X", "Y"];

static FIELDS: [FieldDef; 12] = [
    FieldDef::marker(RECORD_TYPE, "1"),
    FieldDef::blank(BSB_NUMBER, 2, 7).with_rules(&[Rule::Required, Rule::Bsb]),
    FieldDef::blank(ACCOUNT_NUMBER, 9, 9).with_rules(&[Rule::Required, Rule::AccountNumber]),
    FieldDef::blank(INDICATOR, 18, 1).with_rules(&[Rule::OneOf(INDICATORS)]),
    FieldDef::new(TRANSACTION_CODE, 19, 2, FieldKind::Numeric).with_rules(&[
        Rule::Required,
        Rule::Numeric,
        Rule::OneOf(TRANSACTION_CODES),
    ]),
    FieldDef::new(AMOUNT, 21, 10, FieldKind::Numeric).with_rules(&[Rule::Required, Rule::Numeric]),
    FieldDef::blank(ACCOUNT_NAME, 31, 32).with_rules(&[Rule::Required]),
    FieldDef::blank(LODGEMENT_REFERENCE, 63, 18).with_rules(&[Rule::Required]),
    FieldDef::blank(TRACE_RECORD, 81, 7).with_rules(&[Rule::Required, Rule::Bsb]),
    FieldDef::blank(TRACE_ACCOUNT_NUMBER, 88, 9)
        .with_rules(&[Rule::Required, Rule::AccountNumber]),
    FieldDef::blank(NAME_OF_REMITTER, 97, 16).with_rules(&[Rule::Required]),
    FieldDef::new(AMOUNT_OF_WITHHOLDING_TAX, 113, 8, FieldKind::Numeric)
        .with_rules(&[Rule::Numeric]),
];

static TABLE: LazyLock<FieldTable> =
    LazyLock::new(|| FieldTable::new(&FIELDS).expect("transaction layout must span 120 columns"));

/// Layout marker for the transaction record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TransactionLayout;

impl sealed::Sealed for TransactionLayout {}

impl Layout for TransactionLayout {
    const RECORD_TYPE: RecordType = RecordType::Transaction;

    fn table() -> &'static FieldTable {
        &TABLE
    }

    fn into_any(record: Record<Self>) -> AbaRecord {
        AbaRecord::Transaction(record)
    }

    fn from_any(record: AbaRecord) -> Result<Record<Self>, AbaRecord> {
        match record {
            AbaRecord::Transaction(record) => Ok(record),
            other => Err(other),
        }
    }
}

/// One credit or debit instruction.
pub type Transaction = Record<TransactionLayout>;

/// Direction of money movement implied by the transaction code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Debit,
    Credit,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Debit => write!(f, "debit"),
            Self::Credit => write!(f, "credit"),
        }
    }
}

impl Record<TransactionLayout> {
    /// Set `amount` from a whole number of cents.
    pub fn set_amount_cents(&mut self, cents: u64) -> &mut Self {
        self.set_known(AMOUNT, cents.to_string())
    }

    /// `amount` in cents. A blank amount reads as zero.
    pub fn amount_cents(&self) -> Option<u64> {
        parse_cents(self.attribute(AMOUNT)?)
    }

    /// `amountOfWithholdingTax` in cents. A blank amount reads as zero.
    pub fn withholding_tax_cents(&self) -> Option<u64> {
        parse_cents(self.attribute(AMOUNT_OF_WITHHOLDING_TAX)?)
    }

    /// Debit or credit, from a recognised `transactionCode`.
    pub fn kind(&self) -> Option<TransactionKind> {
        let code = self.attribute(TRANSACTION_CODE)?;
        if code == DEBIT_CODE {
            Some(TransactionKind::Debit)
        } else if TRANSACTION_CODES.contains(&code) {
            Some(TransactionKind::Credit)
        } else {
            None
        }
    }
}

fn parse_cents(value: &str) -> Option<u64> {
    let digits = value.trim_start_matches('0');
    if digits.is_empty() {
        return Some(0);
    }
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::rules::RuleId;

    fn valid() -> Transaction {
        Transaction::new()
            .with_attribute(BSB_NUMBER, "083-163")
            .and_then(|r| r.with_attribute(ACCOUNT_NUMBER, "12345678"))
            .and_then(|r| r.with_attribute(TRANSACTION_CODE, "53"))
            .and_then(|r| r.with_attribute(AMOUNT, "12555"))
            .and_then(|r| r.with_attribute(ACCOUNT_NAME, "JOHN SMITH"))
            .and_then(|r| r.with_attribute(LODGEMENT_REFERENCE, "PAY 0816"))
            .and_then(|r| r.with_attribute(TRACE_RECORD, "062-111"))
            .and_then(|r| r.with_attribute(TRACE_ACCOUNT_NUMBER, "111111111"))
            .and_then(|r| r.with_attribute(NAME_OF_REMITTER, "ACME PAYROLL"))
            .expect("known attributes")
    }

    #[test]
    fn test_valid_transaction() {
        assert!(valid().validate().is_empty());
        assert_eq!(valid().kind(), Some(TransactionKind::Credit));
        assert_eq!(valid().amount_cents(), Some(12555));
    }

    #[test]
    fn test_line_positions() {
        let line = valid().to_line();
        assert_eq!(line.len(), 120);
        assert_eq!(&line[0..1], "1");
        assert_eq!(&line[1..8], "083-163");
        assert_eq!(&line[8..17], "12345678 ");
        assert_eq!(&line[17..18], " ");
        assert_eq!(&line[18..20], "53");
        assert_eq!(&line[20..30], "0000012555");
        assert_eq!(&line[80..87], "062-111");
        assert_eq!(&line[112..120], "00000000");
    }

    #[test]
    fn test_bsb_rule_on_both_bsb_fields() {
        let mut record = valid();
        record
            .set_attribute(BSB_NUMBER, "1112333")
            .unwrap()
            .set_attribute(TRACE_RECORD, "062111")
            .unwrap();
        assert_eq!(
            record.validate(),
            vec![
                ValidationError::new(BSB_NUMBER, "1112333", RuleId::Bsb),
                ValidationError::new(TRACE_RECORD, "062111", RuleId::Bsb),
            ]
        );
    }

    #[test]
    fn test_unknown_transaction_code() {
        let record = valid().with_attribute(TRANSACTION_CODE, "99").unwrap();
        assert_eq!(
            record.validate(),
            vec![ValidationError::new(TRANSACTION_CODE, "99", RuleId::OneOf)]
        );
        assert_eq!(record.kind(), None);
    }

    #[test]
    fn test_indicator_values() {
        let record = valid().with_attribute(INDICATOR, "N").unwrap();
        assert!(record.validate().is_empty());
        let record = valid().with_attribute(INDICATOR, "Q").unwrap();
        assert_eq!(record.validate()[0].rule, RuleId::OneOf);
    }

    #[test]
    fn test_debit_kind() {
        let record = valid().with_attribute(TRANSACTION_CODE, DEBIT_CODE).unwrap();
        assert_eq!(record.kind(), Some(TransactionKind::Debit));
    }

    #[test]
    fn test_amount_cents_setter() {
        let mut record = valid();
        record.set_amount_cents(100);
        assert_eq!(record.attribute(AMOUNT), Some("100"));
        assert_eq!(&record.to_line()[20..30], "0000000100");
        assert_eq!(record.withholding_tax_cents(), Some(0));
    }

    #[test]
    fn test_parse_cents() {
        assert_eq!(parse_cents(""), Some(0));
        assert_eq!(parse_cents("0000012555"), Some(12555));
        assert_eq!(parse_cents("12x"), None);
    }
}
