//! Service layer for RMAnalyzer
//!
//! Parsing of transaction exports and the end-to-end summary pipeline.

pub mod import;
pub mod pipeline;

pub use import::{TransactionParser, EXPECTED_HEADER};
pub use pipeline::generate_summary;
