//! Shared record fixtures for integration tests.

#![allow(dead_code)]

use aba_core::layouts::{descriptive, file_total, transaction};
use aba_core::{DescriptiveRecord, FileTotalRecord, Transaction};

pub fn descriptive_record() -> DescriptiveRecord {
    DescriptiveRecord::new()
        .with_attribute(descriptive::USER_FINANCIAL_INSTITUTION, "UBS")
        .and_then(|r| r.with_attribute(descriptive::NAME_OF_USER_SUPPLYING_FILE, "ACME PAYMENTS"))
        .and_then(|r| r.with_attribute(descriptive::NUMBER_OF_USER_SUPPLYING_FILE, "492627"))
        .and_then(|r| r.with_attribute(descriptive::DESCRIPTION_OF_ENTRIES, "PAYROLL"))
        .and_then(|r| r.with_attribute(descriptive::DATE_TO_BE_PROCESSED, "100817"))
        .expect("known attributes")
}

pub fn transaction_record() -> Transaction {
    Transaction::new()
        .with_attribute(transaction::BSB_NUMBER, "111-222")
        .and_then(|r| r.with_attribute(transaction::ACCOUNT_NUMBER, "999999999"))
        .and_then(|r| r.with_attribute(transaction::INDICATOR, "N"))
        .and_then(|r| r.with_attribute(transaction::TRANSACTION_CODE, "50"))
        .and_then(|r| r.with_attribute(transaction::AMOUNT, "0000012555"))
        .and_then(|r| r.with_attribute(transaction::ACCOUNT_NAME, "JOHN DOE"))
        .and_then(|r| r.with_attribute(transaction::LODGEMENT_REFERENCE, "PAYMENT 0817"))
        .and_then(|r| r.with_attribute(transaction::TRACE_RECORD, "111-222"))
        .and_then(|r| r.with_attribute(transaction::TRACE_ACCOUNT_NUMBER, "888888888"))
        .and_then(|r| r.with_attribute(transaction::NAME_OF_REMITTER, "ACME PAYMENTS"))
        .and_then(|r| r.with_attribute(transaction::AMOUNT_OF_WITHHOLDING_TAX, "0"))
        .expect("known attributes")
}

pub fn file_total_record() -> FileTotalRecord {
    FileTotalRecord::new()
        .with_attribute(file_total::NET_TOTAL_AMOUNT, "25110")
        .and_then(|r| r.with_attribute(file_total::CREDIT_TOTAL_AMOUNT, "25110"))
        .and_then(|r| r.with_attribute(file_total::DEBIT_TOTAL_AMOUNT, "0"))
        .and_then(|r| r.with_attribute(file_total::COUNT_OF_RECORDS_TYPE_1, "2"))
        .expect("known attributes")
}
