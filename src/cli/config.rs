//! CLI commands for inspecting the household configuration

use std::path::Path;

use crate::config::{AnalyzerPaths, HouseholdConfig};
use crate::error::AnalyzerResult;

/// Validate a configuration file and describe the household
pub fn handle_check_config_command(config_path: &Path) -> AnalyzerResult<()> {
    let config = HouseholdConfig::load(config_path)?;
    print!("{}", format_household(&config));
    Ok(())
}

/// Print where the default configuration is looked up
pub fn handle_paths_command(paths: &AnalyzerPaths) {
    println!("RMAnalyzer Configuration");
    println!("========================");
    println!("Config directory: {}", paths.base_dir().display());
    println!(
        "Config file:      {}{}",
        paths.config_file().display(),
        if paths.has_config() { "" } else { " (missing)" }
    );
}

/// Describe a validated household
pub fn format_household(config: &HouseholdConfig) -> String {
    let mut output = format!("Owner: {}\n", config.owner);
    output.push_str(&format!("People: {}\n", config.people.len()));

    for person in &config.people {
        let accounts: Vec<String> = person.accounts.iter().map(|a| a.to_string()).collect();
        output.push_str(&format!(
            "  {} <{}>: accounts {}\n",
            person.name,
            person.email,
            accounts.join(", ")
        ));
    }

    if config.people.len() != 2 {
        output.push_str("Balance: not computed (requires exactly two people)\n");
    }

    output
}
