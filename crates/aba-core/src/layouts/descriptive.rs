//! Descriptive (header) record, type `0`.
//!
//! | Columns | Width | Field                      | Kind |
//! |---------|-------|----------------------------|------|
//! | 1       | 1     | recordType                 | A    |
//! | 2-18    | 17    | blank1                     | A    |
//! | 19-20   | 2     | reelSequenceNumber         | N    |
//! | 21-23   | 3     | userFinancialInstitution   | A    |
//! | 24-30   | 7     | blank2                     | A    |
//! | 31-56   | 26    | nameOfUserSupplyingFile    | A    |
//! | 57-62   | 6     | numberOfUserSupplyingFile  | N    |
//! | 63-74   | 12    | descriptionOfEntries       | A    |
//! | 75-80   | 6     | dateToBeProcessed          | D    |
//! | 81-120  | 40    | blank3                     | A    |

use std::sync::LazyLock;

use chrono::NaiveDate;

use crate::field::{FieldDef, FieldKind, FieldTable};
use crate::record::{AbaRecord, Layout, Record, RecordType, sealed};
use crate::rules::Rule;

pub const RECORD_TYPE: &str = "recordType";
pub const REEL_SEQUENCE_NUMBER: &str = "reelSequenceNumber";
pub const USER_FINANCIAL_INSTITUTION: &str = "userFinancialInstitution";
pub const NAME_OF_USER_SUPPLYING_FILE: &str = "nameOfUserSupplyingFile";
pub const NUMBER_OF_USER_SUPPLYING_FILE: &str = "numberOfUserSupplyingFile";
pub const DESCRIPTION_OF_ENTRIES: &str = "descriptionOfEntries";
pub const DATE_TO_BE_PROCESSED: &str = "dateToBeProcessed";

const DATE_FORMAT: &str = "%d%m%y";

static FIELDS: [FieldDef; 10] = [
    FieldDef::marker(RECORD_TYPE, "0"),
    FieldDef::blank("blank1", 2, 17),
    FieldDef::new(REEL_SEQUENCE_NUMBER, 19, 2, FieldKind::Numeric)
        .with_default("01")
        .with_rules(&[Rule::Numeric]),
    FieldDef::blank(USER_FINANCIAL_INSTITUTION, 21, 3).with_rules(&[Rule::Required]),
    FieldDef::blank("blank2", 24, 7),
    FieldDef::blank(NAME_OF_USER_SUPPLYING_FILE, 31, 26).with_rules(&[Rule::Required]),
    FieldDef::new(NUMBER_OF_USER_SUPPLYING_FILE, 57, 6, FieldKind::Numeric)
        .with_rules(&[Rule::Required, Rule::Numeric]),
    FieldDef::blank(DESCRIPTION_OF_ENTRIES, 63, 12).with_rules(&[Rule::Required]),
    FieldDef::new(DATE_TO_BE_PROCESSED, 75, 6, FieldKind::Date)
        .with_rules(&[Rule::Required, Rule::Date]),
    FieldDef::blank("blank3", 81, 40),
];

static TABLE: LazyLock<FieldTable> =
    LazyLock::new(|| FieldTable::new(&FIELDS).expect("descriptive layout must span 120 columns"));

/// Layout marker for the descriptive record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DescriptiveLayout;

impl sealed::Sealed for DescriptiveLayout {}

impl Layout for DescriptiveLayout {
    const RECORD_TYPE: RecordType = RecordType::Descriptive;

    fn table() -> &'static FieldTable {
        &TABLE
    }

    fn into_any(record: Record<Self>) -> AbaRecord {
        AbaRecord::Descriptive(record)
    }

    fn from_any(record: AbaRecord) -> Result<Record<Self>, AbaRecord> {
        match record {
            AbaRecord::Descriptive(record) => Ok(record),
            other => Err(other),
        }
    }
}

/// Header line identifying the submitter and processing date.
pub type DescriptiveRecord = Record<DescriptiveLayout>;

impl Record<DescriptiveLayout> {
    /// Set `dateToBeProcessed` from a calendar date.
    pub fn set_date_to_be_processed(&mut self, date: NaiveDate) -> &mut Self {
        self.set_known(DATE_TO_BE_PROCESSED, date.format(DATE_FORMAT).to_string())
    }

    /// `dateToBeProcessed` as a calendar date, if it holds one.
    pub fn date_to_be_processed(&self) -> Option<NaiveDate> {
        let value = self.attribute(DATE_TO_BE_PROCESSED)?;
        NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::rules::RuleId;

    fn valid() -> DescriptiveRecord {
        let mut record = DescriptiveRecord::new();
        record
            .set_attribute(USER_FINANCIAL_INSTITUTION, "CBA")
            .and_then(|r| r.set_attribute(NAME_OF_USER_SUPPLYING_FILE, "ACME PAYROLL"))
            .and_then(|r| r.set_attribute(NUMBER_OF_USER_SUPPLYING_FILE, "492627"))
            .and_then(|r| r.set_attribute(DESCRIPTION_OF_ENTRIES, "PAYROLL"))
            .and_then(|r| r.set_attribute(DATE_TO_BE_PROCESSED, "100816"))
            .expect("known attributes");
        record
    }

    #[test]
    fn test_layout_registers() {
        assert_eq!(DescriptiveLayout::table().len(), 10);
    }

    #[test]
    fn test_valid_record_has_no_errors() {
        assert!(valid().validate().is_empty());
    }

    #[test]
    fn test_line_positions() {
        let line = valid().to_line();
        assert_eq!(line.len(), 120);
        assert_eq!(&line[0..1], "0");
        assert_eq!(&line[18..20], "01");
        assert_eq!(&line[20..23], "CBA");
        assert_eq!(&line[30..56], "ACME PAYROLL              ");
        assert_eq!(&line[56..62], "492627");
        assert_eq!(&line[62..74], "PAYROLL     ");
        assert_eq!(&line[74..80], "100816");
        assert!(line[80..].chars().all(|c| c == ' '));
    }

    #[test]
    fn test_user_number_is_zero_filled() {
        let mut record = valid();
        record
            .set_attribute(NUMBER_OF_USER_SUPPLYING_FILE, "1234")
            .unwrap();
        assert_eq!(&record.to_line()[56..62], "001234");
    }

    #[test]
    fn test_two_invalid_fields_both_reported_in_order() {
        let mut record = valid();
        record
            .set_attribute(NUMBER_OF_USER_SUPPLYING_FILE, "49262x")
            .unwrap()
            .set_attribute(DATE_TO_BE_PROCESSED, "10081Q")
            .unwrap();
        assert_eq!(
            record.validate(),
            vec![
                ValidationError::new(NUMBER_OF_USER_SUPPLYING_FILE, "49262x", RuleId::Numeric),
                ValidationError::new(DATE_TO_BE_PROCESSED, "10081Q", RuleId::Date),
            ]
        );
    }

    #[test]
    fn test_default_record_reports_missing_required_fields() {
        let errors = DescriptiveRecord::new().validate();
        let attributes: Vec<&str> = errors.iter().map(|e| e.attribute.as_str()).collect();
        assert_eq!(
            attributes,
            vec![
                USER_FINANCIAL_INSTITUTION,
                NAME_OF_USER_SUPPLYING_FILE,
                NUMBER_OF_USER_SUPPLYING_FILE,
                DESCRIPTION_OF_ENTRIES,
                DATE_TO_BE_PROCESSED,
            ]
        );
        assert!(errors.iter().all(|e| e.rule == RuleId::Required));
    }

    #[test]
    fn test_typed_date_setter() {
        let mut record = DescriptiveRecord::new();
        let date = NaiveDate::from_ymd_opt(2016, 8, 10).expect("date");
        record.set_date_to_be_processed(date);
        assert_eq!(record.attribute(DATE_TO_BE_PROCESSED), Some("100816"));
        assert_eq!(record.date_to_be_processed(), Some(date));
    }
}
