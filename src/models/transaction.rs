//! Transaction model
//!
//! A transaction is either single-category or split across several
//! categories. When splits exist their signed amounts add back up to the
//! parent amount.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{AccountId, CategoryId, TransactionId};
use super::money::Money;

/// A split portion of a transaction
///
/// Persisted splits carry the same sign as their parent transaction. A split
/// without a category is kept as uncategorized money.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Split {
    /// The category for this split portion
    #[serde(default)]
    pub category_id: Option<CategoryId>,

    /// Signed amount
    pub amount: Money,

    /// Optional memo for this split
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
}

impl Split {
    /// Create a new split
    pub fn new(category_id: Option<CategoryId>, amount: Money) -> Self {
        Self {
            category_id,
            amount,
            memo: None,
        }
    }

    /// Create a new split with a memo
    pub fn with_memo(
        category_id: Option<CategoryId>,
        amount: Money,
        memo: impl Into<String>,
    ) -> Self {
        Self {
            category_id,
            amount,
            memo: Some(memo.into()),
        }
    }
}

/// A financial transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,

    /// The account this transaction belongs to
    pub account_id: AccountId,

    /// Transaction date
    pub date: NaiveDate,

    /// Amount (positive for inflow, negative for outflow)
    pub amount: Money,

    /// Category ID (None if this is a split or uncategorized transaction)
    #[serde(default)]
    pub category_id: Option<CategoryId>,

    /// Split portions - if non-empty, category_id is None
    #[serde(default)]
    pub splits: Vec<Split>,

    /// Memo/notes
    #[serde(default)]
    pub memo: String,
}

impl Transaction {
    /// Create a new uncategorized transaction
    pub fn new(account_id: AccountId, date: NaiveDate, amount: Money) -> Self {
        Self {
            id: TransactionId::new(),
            account_id,
            date,
            amount,
            category_id: None,
            splits: Vec::new(),
            memo: String::new(),
        }
    }

    /// Create a single-category transaction
    pub fn categorized(
        account_id: AccountId,
        date: NaiveDate,
        amount: Money,
        category_id: CategoryId,
    ) -> Self {
        let mut txn = Self::new(account_id, date, amount);
        txn.category_id = Some(category_id);
        txn
    }

    /// Check if this is a split transaction
    pub fn is_split(&self) -> bool {
        !self.splits.is_empty()
    }

    /// Check if this is an inflow (positive amount)
    pub fn is_inflow(&self) -> bool {
        self.amount.is_positive()
    }

    /// Check if this is an outflow (negative amount)
    pub fn is_outflow(&self) -> bool {
        self.amount.is_negative()
    }

    /// Replace all splits, clearing the single category
    pub fn set_splits(&mut self, splits: Vec<Split>) {
        self.splits = splits;
        self.category_id = None;
    }

    /// Clear all splits and set a single category
    pub fn set_category(&mut self, category_id: Option<CategoryId>) {
        self.splits.clear();
        self.category_id = category_id;
    }

    /// Get the total of all splits
    pub fn splits_total(&self) -> Money {
        self.splits.iter().map(|s| s.amount).sum()
    }

    /// Every (category, signed amount) pair this transaction contributes
    ///
    /// A split transaction yields one pair per split; otherwise a single pair
    /// for the whole amount.
    pub fn allocations(&self) -> Vec<(Option<CategoryId>, Money)> {
        if self.is_split() {
            self.splits
                .iter()
                .map(|s| (s.category_id, s.amount))
                .collect()
        } else {
            vec![(self.category_id, self.amount)]
        }
    }

    /// Validate the transaction
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if self.is_split() {
            let splits_total = self.splits_total();
            if !splits_total.within_tolerance(self.amount) {
                return Err(TransactionValidationError::SplitsMismatch {
                    transaction_amount: self.amount,
                    splits_total,
                });
            }
        }

        if self
            .splits
            .iter()
            .any(|s| s.amount.is_negative() != self.amount.is_negative() && !s.amount.is_zero())
        {
            return Err(TransactionValidationError::MixedSignSplits);
        }

        if self.category_id.is_some() && self.is_split() {
            return Err(TransactionValidationError::CategoryAndSplits);
        }

        Ok(())
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.date.format("%Y-%m-%d"), self.id, self.amount)
    }
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    SplitsMismatch {
        transaction_amount: Money,
        splits_total: Money,
    },
    MixedSignSplits,
    CategoryAndSplits,
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SplitsMismatch {
                transaction_amount,
                splits_total,
            } => write!(
                f,
                "Split totals ({}) do not match transaction amount ({})",
                splits_total, transaction_amount
            ),
            Self::MixedSignSplits => {
                write!(f, "Every split must share the transaction's sign")
            }
            Self::CategoryAndSplits => {
                write!(f, "Transaction cannot have both a category and splits")
            }
        }
    }
}

impl std::error::Error for TransactionValidationError {}
