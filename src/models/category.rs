//! Spending categories
//!
//! Transaction exports label each row with a free-form category string.
//! Only a fixed set of shared-expense categories is summarized; anything
//! else lands in [`Category::Other`] instead of failing the row.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A spending category tracked in household summaries
///
/// Declaration order is the display order used by reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Dining,
    Groceries,
    Pets,
    Bills,
    Purchases,
    Subscriptions,
    Travel,
    /// Catch-all for category labels outside the tracked set
    Other,
}

impl Category {
    /// Every category, in display order
    pub const ALL: [Category; 8] = [
        Self::Dining,
        Self::Groceries,
        Self::Pets,
        Self::Bills,
        Self::Purchases,
        Self::Subscriptions,
        Self::Travel,
        Self::Other,
    ];

    /// The label used by the transaction export
    pub fn label(&self) -> &'static str {
        match self {
            Self::Dining => "Dining & Drinks",
            Self::Groceries => "Groceries",
            Self::Pets => "Pets",
            Self::Bills => "Bills & Utilities",
            Self::Purchases => "Shared Purchases",
            Self::Subscriptions => "Shared Subscriptions",
            Self::Travel => "Travel & Vacation",
            Self::Other => "Other",
        }
    }

    /// Map an export label to a category
    ///
    /// Matching ignores case and surrounding whitespace. Unknown labels map
    /// to [`Category::Other`].
    pub fn from_label(label: &str) -> Self {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .filter(|c| !c.is_other())
            .find(|c| c.label().eq_ignore_ascii_case(label))
            .unwrap_or(Self::Other)
    }

    /// Check if this is the catch-all category
    pub fn is_other(&self) -> bool {
        matches!(self, Self::Other)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}
