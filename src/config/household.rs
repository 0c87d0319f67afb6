//! Household configuration
//!
//! Parses and validates the JSON document describing who is in the
//! household and which accounts belong to whom:
//!
//! ```json
//! {
//!   "Owner": "owner@example.com",
//!   "People": [
//!     { "Name": "George", "Email": "george@example.com", "Accounts": [1234, 4321] }
//!   ]
//! }
//! ```
//!
//! Validation is all-or-nothing: any problem rejects the whole document.

use std::collections::BTreeMap;
use std::path::Path;
use std::str::FromStr;

use email_address::EmailAddress;
use serde::Deserialize;

use crate::error::{AnalyzerError, AnalyzerResult, ConfigError};
use crate::models::AccountNumber;

/// The document as written on disk, before validation
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawConfig {
    owner: String,
    people: Vec<RawPerson>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawPerson {
    name: String,
    email: String,
    accounts: Vec<AccountNumber>,
}

/// A validated household member definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonConfig {
    pub name: String,
    pub email: EmailAddress,
    /// Accounts owned by this person, in configuration order without repeats
    pub accounts: Vec<AccountNumber>,
}

/// A validated household configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HouseholdConfig {
    /// Address the summary is sent from
    pub owner: EmailAddress,
    /// Household members, in configuration order
    pub people: Vec<PersonConfig>,
}

impl HouseholdConfig {
    /// Parse and validate a configuration document
    pub fn from_json(bytes: &[u8]) -> Result<Self, ConfigError> {
        let raw: RawConfig = serde_json::from_slice(bytes)
            .map_err(|e| ConfigError::MalformedDocument(e.to_string()))?;

        let owner = parse_email("Owner", &raw.owner)?;

        if raw.people.is_empty() {
            return Err(ConfigError::EmptyPersonList);
        }

        let mut people = Vec::with_capacity(raw.people.len());
        // Account number -> (index, name) of the person who claimed it first
        let mut claimed: BTreeMap<AccountNumber, (usize, String)> = BTreeMap::new();

        for (idx, person) in raw.people.into_iter().enumerate() {
            let name = person.name.trim().to_string();
            if name.is_empty() {
                return Err(ConfigError::MalformedDocument(format!(
                    "People[{}] has an empty Name",
                    idx
                )));
            }

            let email = parse_email(&format!("{} (People[{}])", name, idx), &person.email)?;

            if person.accounts.is_empty() {
                return Err(ConfigError::MalformedDocument(format!(
                    "'{}' has no Accounts",
                    name
                )));
            }

            let mut accounts = Vec::with_capacity(person.accounts.len());
            for account in person.accounts {
                match claimed.get(&account) {
                    Some((owner_idx, _)) if *owner_idx == idx => continue,
                    Some((_, owner)) => {
                        return Err(ConfigError::DuplicateAccount {
                            account,
                            first: owner.clone(),
                            second: name,
                        });
                    }
                    None => {
                        claimed.insert(account, (idx, name.clone()));
                        accounts.push(account);
                    }
                }
            }

            people.push(PersonConfig {
                name,
                email,
                accounts,
            });
        }

        Ok(Self { owner, people })
    }

    /// Load and validate a configuration file
    pub fn load(path: &Path) -> AnalyzerResult<Self> {
        let contents = std::fs::read(path).map_err(|e| {
            AnalyzerError::Io(format!(
                "Failed to read configuration file {}: {}",
                path.display(),
                e
            ))
        })?;

        Ok(Self::from_json(&contents)?)
    }
}

fn parse_email(field: &str, value: &str) -> Result<EmailAddress, ConfigError> {
    EmailAddress::from_str(value.trim()).map_err(|_| ConfigError::InvalidEmail {
        field: field.to_string(),
        value: value.to_string(),
    })
}
