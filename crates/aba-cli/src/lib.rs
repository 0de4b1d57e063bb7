//! Library parts of the `aba` command-line tool.

pub mod batch;
pub mod logging;
