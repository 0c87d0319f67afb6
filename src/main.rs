use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use rmanalyzer::cli::{
    handle_check_config_command, handle_paths_command, handle_summarize_command,
    resolve_config_path, SummarizeArgs,
};
use rmanalyzer::config::AnalyzerPaths;

#[derive(Parser)]
#[command(
    name = "rmanalyzer",
    author = "Rocco Davino",
    version,
    about = "Household spending summaries from transaction exports",
    long_about = "RMAnalyzer reads a monthly transaction export and a household \
                  configuration, totals each member's shared spending by category, \
                  and renders the summary email, including who owes whom when the \
                  household is a pair."
)]
struct Cli {
    /// Household configuration file (JSON)
    #[arg(short, long, global = true, env = "RMANALYZER_CONFIG")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the summary for a transaction export
    #[command(alias = "run")]
    Summarize(SummarizeArgs),

    /// Validate the household configuration
    CheckConfig,

    /// Show where the default configuration is looked up
    Paths,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Summarize(args) => {
            let config_path = resolve_config_path(cli.config)?;
            tracing::debug!("Using configuration {}", config_path.display());
            handle_summarize_command(&config_path, args).with_context(|| {
                format!("Could not summarize with configuration {}", config_path.display())
            })?;
        }
        Commands::CheckConfig => {
            let config_path = resolve_config_path(cli.config)?;
            handle_check_config_command(&config_path)
                .with_context(|| format!("Invalid configuration {}", config_path.display()))?;
        }
        Commands::Paths => {
            let paths = AnalyzerPaths::new()?;
            handle_paths_command(&paths);
        }
    }

    Ok(())
}
