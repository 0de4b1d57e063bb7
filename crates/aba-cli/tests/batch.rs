//! Batch JSON loading and generation.

use std::fs;
use std::path::PathBuf;

use aba_cli::batch::Batch;
use aba_core::{AbaError, GeneratorOptions, LineEnding, Parser};

const BATCH: &str = r#"{
  "descriptive": {
    "userFinancialInstitution": "CBA",
    "nameOfUserSupplyingFile": "ACME PAYROLL",
    "numberOfUserSupplyingFile": "301500",
    "descriptionOfEntries": "PAYROLL",
    "dateToBeProcessed": "100816"
  },
  "transactions": [
    {
      "bsbNumber": "083-163",
      "accountNumber": "12345678",
      "transactionCode": "53",
      "amount": 12555,
      "accountName": "JOHN SMITH",
      "lodgementReference": "PAY 0816",
      "traceRecord": "062-111",
      "traceAccountNumber": "111111111",
      "nameOfRemitter": "ACME PAYROLL"
    },
    {
      "bsbNumber": "083-163",
      "accountNumber": "87654321",
      "transactionCode": "13",
      "amount": "2555",
      "accountName": "JANE SMITH",
      "lodgementReference": "REFUND",
      "traceRecord": "062-111",
      "traceAccountNumber": "111111111",
      "nameOfRemitter": "ACME PAYROLL"
    }
  ],
  "computeFileTotal": true
}"#;

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("aba-cli-{}-{name}", std::process::id()))
}

#[test]
fn computed_file_total_is_appended() {
    let contents = Batch::from_json(BATCH)
        .unwrap()
        .into_generator(GeneratorOptions::default())
        .unwrap()
        .contents()
        .unwrap();

    let file = Parser::new(contents).parse_file().unwrap();
    assert_eq!(file.transactions.len(), 2);
    let total = file.file_total.expect("computed file total");
    assert_eq!(total.attribute("fileUserCreditTotalAmount"), Some("12555"));
    assert_eq!(total.attribute("fileUserDebitTotalAmount"), Some("2555"));
    assert_eq!(total.attribute("fileUserNetTotalAmount"), Some("10000"));
    assert_eq!(total.attribute("fileUserCountOfRecordsType1"), Some("2"));
}

#[test]
fn load_reads_from_disk() {
    let path = temp_path("batch.json");
    fs::write(&path, BATCH).unwrap();
    let batch = Batch::load(&path);
    fs::remove_file(&path).unwrap();

    let batch = batch.unwrap();
    assert_eq!(batch.transactions.len(), 2);
    assert!(batch.compute_file_total);
}

#[test]
fn load_reports_missing_file() {
    let err = Batch::load(&temp_path("missing.json")).unwrap_err();
    assert!(format!("{err:#}").starts_with("read batch file"));
}

#[test]
fn options_reach_the_generator() {
    let contents = Batch::from_json(BATCH)
        .unwrap()
        .into_generator(
            GeneratorOptions::default()
                .with_line_ending(LineEnding::CrLf)
                .with_trailing_line_ending(true),
        )
        .unwrap()
        .contents()
        .unwrap();
    assert_eq!(contents.matches("\r\n").count(), 4);
    assert!(contents.ends_with("\r\n"));
}

#[test]
fn unknown_attribute_is_invalid_argument() {
    let json = r#"{
      "descriptive": {"userBank": "CBA"},
      "transactions": [{}]
    }"#;
    let err = Batch::from_json(json)
        .unwrap()
        .into_generator(GeneratorOptions::default())
        .unwrap_err();
    assert!(matches!(err, AbaError::InvalidArgument { .. }));
}

#[test]
fn empty_transactions_are_invalid_argument() {
    let err = Batch::from_json(r#"{"descriptive": {}}"#)
        .unwrap()
        .into_generator(GeneratorOptions::default())
        .unwrap_err();
    assert!(matches!(err, AbaError::InvalidArgument { .. }));
}

#[test]
fn given_and_computed_total_conflict() {
    let json = r#"{
      "descriptive": {},
      "transactions": [{}],
      "fileTotal": {},
      "computeFileTotal": true
    }"#;
    let err = Batch::from_json(json)
        .unwrap()
        .into_generator(GeneratorOptions::default())
        .unwrap_err();
    assert!(matches!(err, AbaError::InvalidArgument { .. }));
}

#[test]
fn validation_errors_list_attribute_value_and_rule() {
    let json = BATCH
        .replacen("\"083-163\"", "\"083163\"", 1)
        .replace("\"100816\"", "\"311316\"");
    let err = Batch::from_json(&json)
        .unwrap()
        .into_generator(GeneratorOptions::default())
        .unwrap()
        .contents()
        .unwrap_err();

    insta::assert_json_snapshot!(err.validation_errors(), @r#"
    [
      {
        "attribute": "dateToBeProcessed",
        "value": "311316",
        "rule": "date"
      },
      {
        "attribute": "bsbNumber",
        "value": "083163",
        "rule": "bsb"
      }
    ]
    "#);
}
