//! CLI command for generating a summary
//!
//! Reads a transaction export and the household configuration from disk,
//! runs the pipeline and writes the rendered report. Delivery is left to
//! whatever consumes the output.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::{Args, ValueEnum};

use crate::display::Report;
use crate::error::{AnalyzerError, AnalyzerResult};
use crate::services::generate_summary;

/// Output format for a rendered report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Mail headers followed by the plain-text body
    #[default]
    Text,
    /// The HTML body only
    Html,
    /// The full report as JSON, for a mail transport to consume
    Json,
}

/// Arguments for `rmanalyzer summarize`
#[derive(Args, Debug)]
pub struct SummarizeArgs {
    /// Path to the transaction export (CSV)
    pub transactions: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Write the report to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Handle the summarize command
pub fn handle_summarize_command(config_path: &Path, args: SummarizeArgs) -> AnalyzerResult<()> {
    let config_bytes = read_input(config_path, "configuration")?;
    let csv_bytes = read_input(&args.transactions, "transaction")?;

    let report = generate_summary(&config_bytes, &csv_bytes)?;
    let rendered = format_report(&report, args.format)?;

    match args.output {
        Some(path) => {
            let file = File::create(&path).map_err(|e| {
                AnalyzerError::Io(format!("Failed to create file {}: {}", path.display(), e))
            })?;
            let mut writer = BufWriter::new(file);
            writer.write_all(rendered.as_bytes())?;
            writer.flush()?;
            eprintln!("Report written to: {}", path.display());
        }
        None => print!("{}", rendered),
    }

    Ok(())
}

/// Format a report for output
pub fn format_report(report: &Report, format: OutputFormat) -> AnalyzerResult<String> {
    match format {
        OutputFormat::Text => Ok(format!(
            "From: {}\nTo: {}\nSubject: {}\n\n{}",
            report.sender,
            report.recipients.join(", "),
            report.subject,
            report.body
        )),
        OutputFormat::Html => Ok(format!("{}\n", report.html)),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(report)
                .map_err(|e| AnalyzerError::Io(format!("Failed to serialize report: {}", e)))?;
            json.push('\n');
            Ok(json)
        }
    }
}

fn read_input(path: &Path, what: &str) -> AnalyzerResult<Vec<u8>> {
    std::fs::read(path).map_err(|e| {
        AnalyzerError::Io(format!(
            "Failed to read {} file {}: {}",
            what,
            path.display(),
            e
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> Report {
        Report {
            sender: "owner@x.com".into(),
            recipients: vec!["owner@x.com".into(), "a@x.com".into()],
            subject: "Transactions Summary: no transactions".into(),
            body: "body\n".into(),
            html: "<p>html</p>".into(),
        }
    }

    #[test]
    fn test_text_format() {
        let text = format_report(&report(), OutputFormat::Text).unwrap();
        assert_eq!(
            text,
            "From: owner@x.com\nTo: owner@x.com, a@x.com\nSubject: Transactions Summary: no transactions\n\nbody\n"
        );
    }

    #[test]
    fn test_json_format() {
        let json = format_report(&report(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["sender"], "owner@x.com");
        assert_eq!(value["recipients"][1], "a@x.com");
        assert_eq!(value["html"], "<p>html</p>");
    }

    #[test]
    fn test_html_format() {
        assert_eq!(
            format_report(&report(), OutputFormat::Html).unwrap(),
            "<p>html</p>\n"
        );
    }
}
