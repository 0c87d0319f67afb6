//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod config;
pub mod summary;

use std::path::PathBuf;

use crate::config::AnalyzerPaths;
use crate::error::AnalyzerResult;

pub use config::{handle_check_config_command, handle_paths_command};
pub use summary::{handle_summarize_command, OutputFormat, SummarizeArgs};

/// Pick the configuration file: an explicit path wins over the default location
pub fn resolve_config_path(explicit: Option<PathBuf>) -> AnalyzerResult<PathBuf> {
    match explicit {
        Some(path) => Ok(path),
        None => Ok(AnalyzerPaths::new()?.config_file()),
    }
}
