//! Core data models for RMAnalyzer
//!
//! This module contains the data structures that represent the household
//! summary domain: money, accounts, categories, transactions and the
//! people who own them.

pub mod account;
pub mod category;
pub mod group;
pub mod money;
pub mod transaction;

pub use account::AccountNumber;
pub use category::Category;
pub use group::{Group, Person};
pub use money::{Money, MoneyParseError};
pub use transaction::{IgnoredFrom, Transaction};
