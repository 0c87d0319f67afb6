//! Transaction model
//!
//! Represents one row of a transaction export, with its ignore status
//! deciding whether it counts toward any totals.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::account::AccountNumber;
use super::category::Category;
use super::money::Money;

/// Whether a transaction has been excluded from totals in the export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum IgnoredFrom {
    /// Not ignored; the transaction counts toward totals
    #[default]
    Nothing,
    /// Hidden from the budget only
    Budget,
    /// Hidden from everything
    Everything,
}

impl IgnoredFrom {
    /// Parse the export's "Ignored From" cell
    ///
    /// An empty cell means the transaction is included.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "" => Some(Self::Nothing),
            "budget" => Some(Self::Budget),
            "everything" => Some(Self::Everything),
            _ => None,
        }
    }

    /// Check if a transaction with this status contributes to totals
    pub fn is_included(&self) -> bool {
        matches!(self, Self::Nothing)
    }
}

impl fmt::Display for IgnoredFrom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nothing => write!(f, "included"),
            Self::Budget => write!(f, "budget"),
            Self::Everything => write!(f, "everything"),
        }
    }
}

/// A single transaction from an export
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Posting date
    pub date: NaiveDate,

    /// Date of the original charge, when the export provides one
    pub original_date: Option<NaiveDate>,

    /// Account the transaction was made on
    pub account_number: AccountNumber,

    /// Human-readable account name
    #[serde(default)]
    pub account_name: String,

    /// Payee or merchant name
    pub name: String,

    /// Signed amount (positive for spending in the export's convention)
    pub amount: Money,

    pub category: Category,

    pub ignore: IgnoredFrom,

    /// Free-form note
    #[serde(default)]
    pub note: String,
}

impl Transaction {
    /// Create a transaction with the fields the summary depends on
    pub fn new(
        date: NaiveDate,
        account_number: AccountNumber,
        name: impl Into<String>,
        amount: Money,
        category: Category,
    ) -> Self {
        Self {
            date,
            original_date: None,
            account_number,
            account_name: String::new(),
            name: name.into(),
            amount,
            category,
            ignore: IgnoredFrom::Nothing,
            note: String::new(),
        }
    }

    /// Set the ignore status
    pub fn with_ignore(mut self, ignore: IgnoredFrom) -> Self {
        self.ignore = ignore;
        self
    }

    /// Check if this transaction counts toward totals
    pub fn is_included(&self) -> bool {
        self.ignore.is_included()
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} ({}, account {})",
            self.date.format("%Y-%m-%d"),
            self.name,
            self.amount,
            self.category,
            self.account_number
        )
    }
}
