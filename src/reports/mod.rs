//! Reports module for RMAnalyzer
//!
//! Aggregates attributed transactions into the per-person, per-category
//! totals that the summary email is built from.

pub mod summary;

pub use summary::{Balance, PersonSummary, StatementPeriod, Summary};
