//! The three record layouts defined by the ABA standard.
//!
//! Each layout is an immutable [`FieldTable`](crate::FieldTable) registered
//! once per process and shared by every record of that kind.

pub mod descriptive;
pub mod file_total;
pub mod transaction;

pub use descriptive::{DescriptiveLayout, DescriptiveRecord};
pub use file_total::{FileTotalLayout, FileTotalRecord};
pub use transaction::{Transaction, TransactionKind, TransactionLayout};
