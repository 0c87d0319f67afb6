//! Household spending summary
//!
//! Aggregates each member's included transactions by category and, for a
//! two-person household, the balance one owes the other.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use crate::models::{Category, Group, Money, Person, Transaction};

/// First and last transaction dates of a statement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatementPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl StatementPeriod {
    /// Span the dates of a set of transactions, if there are any
    pub fn of<'a>(transactions: impl IntoIterator<Item = &'a Transaction>) -> Option<Self> {
        transactions.into_iter().fold(None, |period, txn| {
            Some(match period {
                None => Self {
                    start: txn.date,
                    end: txn.date,
                },
                Some(Self { start, end }) => Self {
                    start: start.min(txn.date),
                    end: end.max(txn.date),
                },
            })
        })
    }
}

/// Totals for one household member
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonSummary {
    pub name: String,
    pub email: String,
    /// Included spending per category; every category is present
    pub categories: BTreeMap<Category, Money>,
    /// Sum of all included spending
    pub total: Money,
    /// Transactions counted in the totals
    pub included_count: usize,
    /// Transactions owned but ignored
    pub excluded_count: usize,
}

impl PersonSummary {
    fn from_person(person: &Person) -> Self {
        let mut categories: BTreeMap<Category, Money> =
            Category::ALL.into_iter().map(|c| (c, Money::zero())).collect();

        let mut included_count = 0;
        for txn in person.included_transactions() {
            *categories.entry(txn.category).or_default() += txn.amount;
            included_count += 1;
        }

        Self {
            name: person.name.clone(),
            email: person.email.to_string(),
            total: categories.values().sum(),
            included_count,
            excluded_count: person.transactions().len() - included_count,
            categories,
        }
    }

    /// Included spending in one category
    pub fn category_total(&self, category: Category) -> Money {
        self.categories.get(&category).copied().unwrap_or_default()
    }

    /// Categories with a nonzero total, in display order
    pub fn nonzero_categories(&self) -> impl Iterator<Item = (Category, Money)> + '_ {
        self.categories
            .iter()
            .filter(|(_, amount)| !amount.is_zero())
            .map(|(category, amount)| (*category, *amount))
    }
}

/// What the second member of a pair owes the first
///
/// A positive amount means the second person owes the first; a negative
/// amount means the first owes the second.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Balance {
    pub amount: Money,
}

/// Aggregated totals for one statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    /// Earliest and latest transaction dates in the statement
    pub period: Option<StatementPeriod>,
    /// Per-member totals, in configuration order
    pub people: Vec<PersonSummary>,
    /// Present only for a two-person household
    pub balance: Option<Balance>,
    /// Transactions on accounts no member owns
    pub unattributed_count: usize,
}

impl Summary {
    /// Generate a summary from a group whose transactions are attributed
    ///
    /// `all_transactions` is the full statement, used for the period.
    /// `unattributed` are the transactions no member claimed.
    ///
    /// Rows in an unrecognized category count as `Other`, so they move each
    /// member's total and the balance like any tracked category.
    pub fn generate(
        group: &Group,
        all_transactions: &[Transaction],
        unattributed: &[Transaction],
    ) -> Self {
        let people: Vec<PersonSummary> = group
            .members()
            .iter()
            .map(PersonSummary::from_person)
            .collect();

        let balance = match people.as_slice() {
            [first, second] => Some(Balance {
                amount: first.total - second.total,
            }),
            _ => None,
        };

        let summary = Self {
            period: StatementPeriod::of(all_transactions),
            people,
            balance,
            unattributed_count: unattributed.len(),
        };

        tracing::info!(
            "Summarized {} transactions for {} people ({} unattributed)",
            all_transactions.len(),
            summary.people.len(),
            summary.unattributed_count
        );

        summary
    }

    /// Difference between the two members in one category
    ///
    /// Uses the same sign as [`Balance`]. `None` unless there are exactly
    /// two people.
    pub fn category_difference(&self, category: Category) -> Option<Money> {
        match self.people.as_slice() {
            [first, second] => {
                Some(first.category_total(category) - second.category_total(category))
            }
            _ => None,
        }
    }

    /// Categories with a nonzero total for at least one member
    pub fn active_categories(&self) -> Vec<Category> {
        Category::ALL
            .into_iter()
            .filter(|c| self.people.iter().any(|p| !p.category_total(*c).is_zero()))
            .collect()
    }
}
