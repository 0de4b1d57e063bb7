//! ABA (Cemtex) bank batch file generator and parser.
//!
//! An ABA file is a fixed-width text file of 120-character lines used to
//! submit bulk direct credit and debit instructions:
//!
//! - one descriptive record (type `0`)
//! - one or more transaction records (type `1`)
//! - an optional file total record (type `7`)
//!
//! # Features
//!
//! - Static, validated field layouts for the three record variants
//! - Deferred validation that collects every failing field across a file
//! - Overflowing values reported as length mismatches, never truncated
//! - Parser sharing the same layouts, so decode then render is byte-exact
//!
//! # Example
//!
//! ```
//! use aba_core::layouts::{descriptive, transaction};
//! use aba_core::{DescriptiveRecord, FileTotalRecord, Generator, Transaction};
//!
//! let header = DescriptiveRecord::new()
//!     .with_attribute(descriptive::USER_FINANCIAL_INSTITUTION, "CBA")?
//!     .with_attribute(descriptive::NAME_OF_USER_SUPPLYING_FILE, "ACME PAYROLL")?
//!     .with_attribute(descriptive::NUMBER_OF_USER_SUPPLYING_FILE, "301500")?
//!     .with_attribute(descriptive::DESCRIPTION_OF_ENTRIES, "PAYROLL")?
//!     .with_attribute(descriptive::DATE_TO_BE_PROCESSED, "100816")?;
//!
//! let payment = Transaction::new()
//!     .with_attribute(transaction::BSB_NUMBER, "083-163")?
//!     .with_attribute(transaction::ACCOUNT_NUMBER, "12345678")?
//!     .with_attribute(transaction::TRANSACTION_CODE, "53")?
//!     .with_attribute(transaction::AMOUNT, "12555")?
//!     .with_attribute(transaction::ACCOUNT_NAME, "JOHN SMITH")?
//!     .with_attribute(transaction::LODGEMENT_REFERENCE, "PAY 0816")?
//!     .with_attribute(transaction::TRACE_RECORD, "062-111")?
//!     .with_attribute(transaction::TRACE_ACCOUNT_NUMBER, "111111111")?
//!     .with_attribute(transaction::NAME_OF_REMITTER, "ACME PAYROLL")?;
//!
//! let total = FileTotalRecord::summarize(std::slice::from_ref(&payment))?;
//! let contents = Generator::new(header, vec![payment], Some(total))?.contents()?;
//!
//! assert_eq!(contents.lines().count(), 3);
//! assert!(contents.lines().all(|line| line.len() == 120));
//! # Ok::<(), aba_core::AbaError>(())
//! ```

mod error;
pub mod field;
mod generator;
pub mod layouts;
mod parser;
mod record;
pub mod rules;

pub use error::{AbaError, LengthMismatch, Result, ValidationError};
pub use field::{FieldDef, FieldKind, FieldTable, LINE_WIDTH, LayoutError, PadSide};
pub use generator::{Generator, GeneratorOptions, LineEnding};
pub use layouts::{
    DescriptiveLayout, DescriptiveRecord, FileTotalLayout, FileTotalRecord, Transaction,
    TransactionKind, TransactionLayout,
};
pub use parser::{AbaFile, Parser};
pub use record::{AbaRecord, Layout, Record, RecordType};
pub use rules::{Rule, RuleId};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
