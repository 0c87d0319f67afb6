//! Display formatting for RMAnalyzer
//!
//! Renders summaries into the subject and bodies of the summary email.

pub mod report;

pub use report::{balance_sentence, format_subject, Report};
