//! End-to-end summary pipeline
//!
//! Configuration bytes and export bytes in, rendered report out. Each stage
//! fails the whole run; nothing is aggregated or rendered after an error.

use crate::config::HouseholdConfig;
use crate::display::Report;
use crate::error::AnalyzerResult;
use crate::models::Group;
use crate::reports::Summary;
use crate::services::TransactionParser;

/// Generate the summary report for one statement
///
/// The configuration is validated before the export is parsed, so a bad
/// configuration is reported even when the export is also broken.
pub fn generate_summary(config_bytes: &[u8], csv_bytes: &[u8]) -> AnalyzerResult<Report> {
    let config = HouseholdConfig::from_json(config_bytes)?;
    let transactions = TransactionParser::new().parse(csv_bytes)?;

    let mut group = Group::from_config(&config);
    let unattributed = group.attribute(transactions.iter().cloned());

    let summary = Summary::generate(&group, &transactions, &unattributed);
    Ok(Report::render(&summary, &group))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AnalyzerError, ConfigError};

    const CONFIG: &str = r#"{
        "Owner": "a@x.com",
        "People": [
            {"Name": "A", "Email": "a@x.com", "Accounts": [1]},
            {"Name": "B", "Email": "b@x.com", "Accounts": [2]}
        ]
    }"#;

    const HEADER: &str = "Date,Original Date,Account Type,Account Name,Account Number,Institution Name,Name,Custom Name,Amount,Description,Category,Note,Ignored From,Tax Deductible";

    fn row(account: u64, amount: &str, ignored: &str) -> String {
        format!(
            "2024-03-01,2024-03-01,Credit Card,Card,{},Bank,Payee,,{},Payee,Dining & Drinks,,{},",
            account, amount, ignored
        )
    }

    #[test]
    fn test_two_person_scenario() {
        let csv = format!("{}\n{}\n{}", HEADER, row(1, "100.00", ""), row(2, "40.00", ""));
        let report = generate_summary(CONFIG.as_bytes(), csv.as_bytes()).unwrap();

        assert!(report.body.contains("B owes A $60.00."));
        assert_eq!(report.subject, "Transactions Summary: 03/01/24 - 03/01/24");
        assert_eq!(report.recipients, vec!["a@x.com", "b@x.com"]);
    }

    #[test]
    fn test_excluded_row_scenario() {
        let csv = format!(
            "{}\n{}\n{}",
            HEADER,
            row(1, "100.00", ""),
            row(2, "40.00", "budget")
        );
        let report = generate_summary(CONFIG.as_bytes(), csv.as_bytes()).unwrap();

        assert!(report.body.contains("B\n  No shared expenses\n"));
        assert!(report.body.contains("B owes A $100.00."));
    }

    #[test]
    fn test_empty_statement() {
        let report = generate_summary(CONFIG.as_bytes(), HEADER.as_bytes()).unwrap();
        assert_eq!(report.subject, "Transactions Summary: no transactions");
        assert!(report.body.contains("A and B are even."));
    }

    #[test]
    fn test_configuration_checked_first() {
        let config = r#"{
            "Owner": "a@x.com",
            "People": [
                {"Name": "A", "Email": "a@x.com", "Accounts": [1]},
                {"Name": "B", "Email": "b@x.com", "Accounts": [1]}
            ]
        }"#;
        let err = generate_summary(config.as_bytes(), b"not,a,valid,header").unwrap_err();
        assert!(matches!(
            err,
            AnalyzerError::Configuration(ConfigError::DuplicateAccount { .. })
        ));
    }

    #[test]
    fn test_header_mismatch_stops_run() {
        let csv = "Date,Amount\n2024-03-01,5.00";
        let err = generate_summary(CONFIG.as_bytes(), csv.as_bytes()).unwrap_err();
        assert!(matches!(err, AnalyzerError::HeaderMismatch { .. }));
    }

    #[test]
    fn test_row_error_stops_run() {
        let csv = format!("{}\n{}\n{}", HEADER, row(1, "100.00", ""), row(2, "forty", ""));
        let err = generate_summary(CONFIG.as_bytes(), csv.as_bytes()).unwrap_err();
        assert!(matches!(err, AnalyzerError::RowParse { line: 3, .. }));
    }

    #[test]
    fn test_oversized_amounts_fail_instead_of_overflowing() {
        let csv = format!(
            "{}\n{}\n{}",
            HEADER,
            row(1, "92233720368547758.07", ""),
            row(1, "92233720368547758.07", "")
        );
        let err = generate_summary(CONFIG.as_bytes(), csv.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            AnalyzerError::RowParse { ref field, .. } if field == "Amount"
        ));
    }

    #[test]
    fn test_unmatched_account_is_not_an_error() {
        let csv = format!("{}\n{}\n{}", HEADER, row(1, "10.00", ""), row(42, "99.00", ""));
        let report = generate_summary(CONFIG.as_bytes(), csv.as_bytes()).unwrap();
        assert!(report.body.contains("B owes A $10.00."));
        assert!(report
            .body
            .contains("1 transaction did not match a configured account."));
    }
}
