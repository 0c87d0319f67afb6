//! Configuration module for RMAnalyzer
//!
//! This module provides configuration management including:
//! - Validation of the household configuration document
//! - XDG-compliant resolution of the default configuration path

pub mod household;
pub mod paths;

pub use household::{HouseholdConfig, PersonConfig};
pub use paths::AnalyzerPaths;
