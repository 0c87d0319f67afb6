//! Household members and their transactions
//!
//! A [`Group`] owns its people and each [`Person`] owns the transactions
//! attributed to it. Membership is fixed at construction; only the
//! per-person transaction lists grow.

use std::collections::BTreeSet;

use email_address::EmailAddress;

use super::account::AccountNumber;
use super::transaction::Transaction;
use crate::config::{HouseholdConfig, PersonConfig};

/// A household member
#[derive(Debug, Clone)]
pub struct Person {
    pub name: String,
    pub email: EmailAddress,
    accounts: BTreeSet<AccountNumber>,
    transactions: Vec<Transaction>,
}

impl Person {
    /// Create a person with no transactions
    pub fn new(
        name: impl Into<String>,
        email: EmailAddress,
        accounts: impl IntoIterator<Item = AccountNumber>,
    ) -> Self {
        Self {
            name: name.into(),
            email,
            accounts: accounts.into_iter().collect(),
            transactions: Vec::new(),
        }
    }

    /// Check if this person owns an account
    pub fn owns(&self, account: AccountNumber) -> bool {
        self.accounts.contains(&account)
    }

    /// Transactions attributed to this person, in file order
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Transactions that count toward totals
    pub fn included_transactions(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions.iter().filter(|t| t.is_included())
    }

    fn add_transaction(&mut self, transaction: Transaction) {
        self.transactions.push(transaction);
    }
}

impl From<&PersonConfig> for Person {
    fn from(config: &PersonConfig) -> Self {
        Self::new(
            config.name.clone(),
            config.email.clone(),
            config.accounts.iter().copied(),
        )
    }
}

/// The household: every member plus the owner who receives the summary
#[derive(Debug, Clone)]
pub struct Group {
    owner: EmailAddress,
    members: Vec<Person>,
}

impl Group {
    /// Build a group from a validated configuration
    ///
    /// Validation guarantees at least one person and disjoint accounts.
    pub fn from_config(config: &HouseholdConfig) -> Self {
        Self {
            owner: config.owner.clone(),
            members: config.people.iter().map(Person::from).collect(),
        }
    }

    pub fn owner(&self) -> &EmailAddress {
        &self.owner
    }

    /// Members in configuration order
    pub fn members(&self) -> &[Person] {
        &self.members
    }

    /// Hand each transaction to the member owning its account
    ///
    /// Ignored transactions are attributed too; they are filtered when
    /// totals are computed. Transactions on accounts nobody owns are
    /// returned in file order rather than treated as an error.
    pub fn attribute(
        &mut self,
        transactions: impl IntoIterator<Item = Transaction>,
    ) -> Vec<Transaction> {
        let mut unattributed = Vec::new();

        for transaction in transactions {
            let account = transaction.account_number;
            match self.members.iter_mut().find(|p| p.owns(account)) {
                Some(person) => person.add_transaction(transaction),
                None => {
                    tracing::warn!("Skipped transaction, account not configured: {}", transaction);
                    unattributed.push(transaction);
                }
            }
        }

        unattributed
    }
}
