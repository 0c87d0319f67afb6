//! RMAnalyzer - household spending summaries from transaction exports
//!
//! This library turns a monthly transaction export and a household
//! configuration into a summary email: every transaction is attributed to
//! the member owning its account, included spending is totaled by category,
//! and for a two-person household the balance one owes the other is stated.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Household configuration validation and path management
//! - `error`: Custom error types
//! - `models`: Core data models (money, transactions, categories, people)
//! - `services`: CSV import and the end-to-end pipeline
//! - `reports`: Aggregation into per-person totals and the balance
//! - `display`: Rendering of the summary email
//! - `cli`: Command handlers for the `rmanalyzer` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use rmanalyzer::generate_summary;
//!
//! let report = generate_summary(&config_bytes, &csv_bytes)?;
//! println!("{}\n\n{}", report.subject, report.body);
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod reports;
pub mod services;

pub use display::Report;
pub use error::{AnalyzerError, AnalyzerResult, ConfigError};
pub use services::generate_summary;
