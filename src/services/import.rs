//! CSV import service
//!
//! Parses a transaction export into typed [`Transaction`] records. The export
//! format is fixed, so the header is checked column by column before any row
//! is read, and the first malformed row aborts the import: a partial
//! statement must never produce a partial summary.

use std::io::Read;

use chrono::NaiveDate;
use csv::{Reader, ReaderBuilder, StringRecord, Trim};

use crate::error::{AnalyzerError, AnalyzerResult};
use crate::models::{AccountNumber, Category, IgnoredFrom, Money, Transaction};

/// Date format used by the export
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Columns of the transaction export, in order
pub const EXPECTED_HEADER: [&str; 14] = [
    "Date",
    "Original Date",
    "Account Type",
    "Account Name",
    "Account Number",
    "Institution Name",
    "Name",
    "Custom Name",
    "Amount",
    "Description",
    "Category",
    "Note",
    "Ignored From",
    "Tax Deductible",
];

const DATE_COLUMN: usize = 0;
const ORIGINAL_DATE_COLUMN: usize = 1;
const ACCOUNT_NAME_COLUMN: usize = 3;
const ACCOUNT_NUMBER_COLUMN: usize = 4;
const NAME_COLUMN: usize = 6;
const AMOUNT_COLUMN: usize = 8;
const CATEGORY_COLUMN: usize = 10;
const NOTE_COLUMN: usize = 11;
const IGNORED_FROM_COLUMN: usize = 12;

/// Bound on the summed magnitude of every amount in one export. Keeping it
/// at half the cent range means any per-person total, and the difference
/// between two totals, fits without overflow.
pub const MAX_STATEMENT_CENTS: i64 = i64::MAX / 2;

/// Parser for transaction exports
#[derive(Debug, Clone, Copy, Default)]
pub struct TransactionParser;

impl TransactionParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse an export held in memory
    pub fn parse(&self, bytes: &[u8]) -> AnalyzerResult<Vec<Transaction>> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::Fields)
            .from_reader(bytes);
        self.parse_csv_from_reader(&mut reader)
    }

    /// Parse an export from a CSV reader
    ///
    /// Returns transactions in file order.
    pub fn parse_csv_from_reader<R: Read>(
        &self,
        reader: &mut Reader<R>,
    ) -> AnalyzerResult<Vec<Transaction>> {
        let headers = reader.headers().map_err(|e| AnalyzerError::HeaderMismatch {
            expected: expected_header(),
            found: vec![format!("<unreadable: {}>", e)],
        })?;
        check_header(headers)?;

        let mut transactions = Vec::new();
        let mut magnitude: i64 = 0;
        for result in reader.records() {
            let record = result.map_err(|e| {
                let line = e.position().map(|p| p.line()).unwrap_or(0);
                AnalyzerError::row(line, "row", format!("Error reading CSV record: {}", e))
            })?;
            let transaction = self.parse_record(&record)?;

            magnitude = magnitude
                .checked_add(transaction.amount.abs().cents())
                .filter(|total| *total <= MAX_STATEMENT_CENTS)
                .ok_or_else(|| {
                    AnalyzerError::row(
                        record.position().map(|p| p.line()).unwrap_or(0),
                        EXPECTED_HEADER[AMOUNT_COLUMN],
                        format!(
                            "Amounts in this export exceed {}",
                            Money::from_cents(MAX_STATEMENT_CENTS)
                        ),
                    )
                })?;
            transactions.push(transaction);
        }

        tracing::debug!("Parsed {} transactions", transactions.len());
        Ok(transactions)
    }

    /// Parse a single CSV record
    fn parse_record(&self, record: &StringRecord) -> AnalyzerResult<Transaction> {
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        if record.len() != EXPECTED_HEADER.len() {
            return Err(AnalyzerError::row(
                line,
                "row",
                format!(
                    "expected {} columns, found {}",
                    EXPECTED_HEADER.len(),
                    record.len()
                ),
            ));
        }
        let field = |idx: usize| record.get(idx).unwrap_or("");

        let date = parse_date(field(DATE_COLUMN))
            .map_err(|reason| AnalyzerError::row(line, EXPECTED_HEADER[DATE_COLUMN], reason))?;

        let original_date = match field(ORIGINAL_DATE_COLUMN) {
            "" => None,
            s => Some(parse_date(s).map_err(|reason| {
                AnalyzerError::row(line, EXPECTED_HEADER[ORIGINAL_DATE_COLUMN], reason)
            })?),
        };

        let account_number: AccountNumber =
            field(ACCOUNT_NUMBER_COLUMN).parse().map_err(|_| {
                AnalyzerError::row(
                    line,
                    EXPECTED_HEADER[ACCOUNT_NUMBER_COLUMN],
                    format!(
                        "Could not parse account number: '{}'",
                        field(ACCOUNT_NUMBER_COLUMN)
                    ),
                )
            })?;

        let amount = Money::parse(field(AMOUNT_COLUMN)).map_err(|e| {
            AnalyzerError::row(line, EXPECTED_HEADER[AMOUNT_COLUMN], e.to_string())
        })?;

        let category = Category::from_label(field(CATEGORY_COLUMN));
        if category.is_other() {
            tracing::debug!(
                "Line {}: category '{}' is not tracked, using {}",
                line,
                field(CATEGORY_COLUMN),
                category
            );
        }

        let ignore = IgnoredFrom::parse(field(IGNORED_FROM_COLUMN)).ok_or_else(|| {
            AnalyzerError::row(
                line,
                EXPECTED_HEADER[IGNORED_FROM_COLUMN],
                format!(
                    "Unknown ignore status: '{}'",
                    field(IGNORED_FROM_COLUMN)
                ),
            )
        })?;

        Ok(Transaction {
            date,
            original_date,
            account_number,
            account_name: field(ACCOUNT_NAME_COLUMN).to_string(),
            name: field(NAME_COLUMN).to_string(),
            amount,
            category,
            ignore,
            note: field(NOTE_COLUMN).to_string(),
        })
    }
}

fn expected_header() -> Vec<String> {
    EXPECTED_HEADER.iter().map(|h| h.to_string()).collect()
}

/// Check the header row against the export format
fn check_header(headers: &StringRecord) -> AnalyzerResult<()> {
    let matches = headers.len() == EXPECTED_HEADER.len()
        && headers
            .iter()
            .zip(EXPECTED_HEADER)
            .all(|(found, expected)| found == expected);

    if matches {
        Ok(())
    } else {
        Err(AnalyzerError::HeaderMismatch {
            expected: expected_header(),
            found: headers.iter().map(|h| h.to_string()).collect(),
        })
    }
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .map_err(|_| format!("Could not parse date: '{}' (expected YYYY-MM-DD)", s))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Date,Original Date,Account Type,Account Name,Account Number,Institution Name,Name,Custom Name,Amount,Description,Category,Note,Ignored From,Tax Deductible";

    fn csv_with(rows: &[&str]) -> String {
        let mut csv = HEADER.to_string();
        for row in rows {
            csv.push('\n');
            csv.push_str(row);
        }
        csv
    }

    #[test]
    fn test_parse_export() {
        let csv = csv_with(&[
            "2023-08-31,2023-08-31,Credit Card,SavorOne,1313,Capital One,MADCATS DANCE,,17,MADCATS DANCE,R & T Shared,,,",
            "2023-09-04,2023-09-03,Credit Card,CREDIT CARD,1234,Chase,TIKICAT BAR,,12.66,TIKICAT BAR,Dining & Drinks,date night,budget,",
        ]);

        let transactions = TransactionParser::new().parse(csv.as_bytes()).unwrap();
        assert_eq!(transactions.len(), 2);

        let first = &transactions[0];
        assert_eq!(first.date, NaiveDate::from_ymd_opt(2023, 8, 31).unwrap());
        assert_eq!(first.account_number, AccountNumber::new(1313));
        assert_eq!(first.account_name, "SavorOne");
        assert_eq!(first.name, "MADCATS DANCE");
        assert_eq!(first.amount, Money::from_cents(1700));
        assert_eq!(first.category, Category::Other);
        assert_eq!(first.ignore, IgnoredFrom::Nothing);

        let second = &transactions[1];
        assert_eq!(
            second.original_date,
            Some(NaiveDate::from_ymd_opt(2023, 9, 3).unwrap())
        );
        assert_eq!(second.amount, Money::from_cents(1266));
        assert_eq!(second.category, Category::Dining);
        assert_eq!(second.ignore, IgnoredFrom::Budget);
        assert_eq!(second.note, "date night");
    }

    #[test]
    fn test_header_only_is_empty() {
        let transactions = TransactionParser::new().parse(HEADER.as_bytes()).unwrap();
        assert!(transactions.is_empty());
    }

    #[test]
    fn test_quoted_fields() {
        let csv = csv_with(&[
            "2023-09-01,,Credit Card,Card,1234,Chase,\"Shop, Inc\",,-5.25,desc,groceries,,,",
        ]);
        let transactions = TransactionParser::new().parse(csv.as_bytes()).unwrap();
        assert_eq!(transactions[0].name, "Shop, Inc");
        assert_eq!(transactions[0].amount, Money::from_cents(-525));
        assert_eq!(transactions[0].category, Category::Groceries);
        assert_eq!(transactions[0].original_date, None);
    }

    #[test]
    fn test_missing_header_column() {
        let csv = "Date,Original Date,Account Type,Account Name,Account Number,Institution Name,Name,Custom Name,Amount,Description,Category,Note,Tax Deductible\n\
                   2023-09-01,,Credit Card,Card,1234,Chase,Shop,,5,desc,Groceries,,";
        let err = TransactionParser::new().parse(csv.as_bytes()).unwrap_err();
        match err {
            AnalyzerError::HeaderMismatch { expected, found } => {
                assert_eq!(expected.len(), 14);
                assert_eq!(found.len(), 13);
            }
            other => panic!("expected header mismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_reordered_header() {
        let csv = HEADER.replace("Date,Original Date", "Original Date,Date");
        let err = TransactionParser::new().parse(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, AnalyzerError::HeaderMismatch { .. }));
    }

    #[test]
    fn test_header_is_compared_untrimmed() {
        let csv = HEADER.replace("Date,Original Date", " Date ,Original Date");
        let err = TransactionParser::new().parse(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, AnalyzerError::HeaderMismatch { .. }));
    }

    #[test]
    fn test_data_fields_are_trimmed() {
        let csv = csv_with(&[
            " 2023-09-01 ,,Credit Card, Card , 1234 ,Chase, Shop ,, 5.00 ,desc, Pets ,, budget ,",
        ]);
        let transactions = TransactionParser::new().parse(csv.as_bytes()).unwrap();
        assert_eq!(transactions[0].account_number, AccountNumber::new(1234));
        assert_eq!(transactions[0].name, "Shop");
        assert_eq!(transactions[0].category, Category::Pets);
        assert_eq!(transactions[0].ignore, IgnoredFrom::Budget);
    }

    #[test]
    fn test_statement_magnitude_is_bounded() {
        // Each amount is half the cent range; two of them cannot be summed
        let half = "46116860184273879.03";
        let row = |amount: &str| {
            format!("2023-09-01,,Credit Card,Card,1234,Chase,Shop,,{},desc,Groceries,,,", amount)
        };

        let one = csv_with(&[&row(half)]);
        assert_eq!(
            TransactionParser::new().parse(one.as_bytes()).unwrap()[0].amount,
            Money::from_cents(MAX_STATEMENT_CENTS)
        );

        let two = csv_with(&[&row(half), &row(&format!("-{}", half))]);
        let err = TransactionParser::new().parse(two.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            AnalyzerError::RowParse { line: 3, ref field, .. } if field == "Amount"
        ));

        let max = csv_with(&[&row("92233720368547758.07")]);
        assert!(matches!(
            TransactionParser::new().parse(max.as_bytes()).unwrap_err(),
            AnalyzerError::RowParse { line: 2, .. }
        ));
    }

    #[test]
    fn test_empty_input() {
        let err = TransactionParser::new().parse(b"").unwrap_err();
        assert!(matches!(err, AnalyzerError::HeaderMismatch { .. }));
    }

    #[test]
    fn test_bad_date_reports_line() {
        let csv = csv_with(&[
            "2023-09-01,,Credit Card,Card,1234,Chase,Shop,,5,desc,Groceries,,,",
            "09/02/2023,,Credit Card,Card,1234,Chase,Shop,,5,desc,Groceries,,,",
        ]);
        let err = TransactionParser::new().parse(csv.as_bytes()).unwrap_err();
        match err {
            AnalyzerError::RowParse { line, field, .. } => {
                assert_eq!(line, 3);
                assert_eq!(field, "Date");
            }
            other => panic!("expected row error, got {:?}", other),
        }
    }

    #[test]
    fn test_bad_amount() {
        let csv = csv_with(&["2023-09-01,,Credit Card,Card,1234,Chase,Shop,,12.3x,desc,Groceries,,,"]);
        let err = TransactionParser::new().parse(csv.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            AnalyzerError::RowParse { line: 2, ref field, .. } if field == "Amount"
        ));
    }

    #[test]
    fn test_bad_account_number() {
        let csv = csv_with(&["2023-09-01,,Credit Card,Card,12x4,Chase,Shop,,1.00,desc,Groceries,,,"]);
        let err = TransactionParser::new().parse(csv.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            AnalyzerError::RowParse { ref field, .. } if field == "Account Number"
        ));
    }

    #[test]
    fn test_unknown_ignore_status() {
        let csv = csv_with(&["2023-09-01,,Credit Card,Card,1234,Chase,Shop,,1.00,desc,Groceries,,sometimes,"]);
        let err = TransactionParser::new().parse(csv.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            AnalyzerError::RowParse { ref field, .. } if field == "Ignored From"
        ));
    }

    #[test]
    fn test_short_row() {
        let csv = csv_with(&["2023-09-01,,Credit Card,Card,1234"]);
        let err = TransactionParser::new().parse(csv.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            AnalyzerError::RowParse { line: 2, ref field, .. } if field == "row"
        ));
    }

    #[test]
    fn test_first_bad_row_aborts() {
        let csv = csv_with(&[
            "bad,,Credit Card,Card,1234,Chase,Shop,,1.00,desc,Groceries,,,",
            "2023-09-01,,Credit Card,Card,1234,Chase,Shop,,oops,desc,Groceries,,,",
        ]);
        let err = TransactionParser::new().parse(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, AnalyzerError::RowParse { line: 2, .. }));
    }
}
