//! Path management for RMAnalyzer
//!
//! Resolves where the household configuration lives when no path is given.
//!
//! ## Path Resolution Order
//!
//! 1. `RMANALYZER_CONFIG_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/rmanalyzer` or `~/.config/rmanalyzer`
//! 3. Windows: `%APPDATA%\rmanalyzer`

use std::path::{Path, PathBuf};

use crate::error::AnalyzerError;

/// Manages all paths used by RMAnalyzer
#[derive(Debug, Clone)]
pub struct AnalyzerPaths {
    base_dir: PathBuf,
}

impl AnalyzerPaths {
    /// Create a new AnalyzerPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, AnalyzerError> {
        let base_dir = if let Ok(custom) = std::env::var("RMANALYZER_CONFIG_DIR") {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create AnalyzerPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Get the path to the household configuration file
    pub fn config_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Check if a configuration file exists at the default location
    pub fn has_config(&self) -> bool {
        self.config_file().exists()
    }
}

/// Resolve the default configuration directory based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, AnalyzerError> {
    let config_base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg),
        _ => {
            let home = std::env::var("HOME").map_err(|_| {
                AnalyzerError::Io("Could not determine HOME directory".into())
            })?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join("rmanalyzer"))
}

/// Resolve the default configuration directory based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, AnalyzerError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| AnalyzerError::Io("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("rmanalyzer"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = AnalyzerPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.config_file(), temp_dir.path().join("config.json"));
        assert!(!paths.has_config());

        std::fs::write(paths.config_file(), "{}").unwrap();
        assert!(paths.has_config());
    }
}
