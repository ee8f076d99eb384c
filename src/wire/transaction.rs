//! Inbound transaction documents
//!
//! The API has served a few shapes over time: camelCase or snake_case keys,
//! amounts as numbers or strings, an unsigned amount plus a direction flag,
//! and an optional list of splits. [`TransactionDto::into_transaction`]
//! folds all of them into one [`Transaction`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::WireAmount;
use crate::error::{EnvelopeError, EnvelopeResult};
use crate::models::transaction::TransactionValidationError;
use crate::models::{AccountId, CategoryId, Money, Split, Transaction, TransactionId};

/// Explicit direction for documents that carry an unsigned amount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Inflow,
    Outflow,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitDto {
    #[serde(default, alias = "category_id")]
    pub category_id: Option<CategoryId>,
    pub amount: WireAmount,
    #[serde(default)]
    pub memo: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDto {
    #[serde(default)]
    pub id: Option<TransactionId>,
    #[serde(alias = "account_id")]
    pub account_id: AccountId,
    pub date: NaiveDate,
    pub amount: WireAmount,
    #[serde(default)]
    pub direction: Option<Direction>,
    #[serde(default, alias = "category_id")]
    pub category_id: Option<CategoryId>,
    #[serde(default)]
    pub splits: Vec<SplitDto>,
    #[serde(default)]
    pub memo: Option<String>,
}

impl TransactionDto {
    /// Normalize into the internal transaction
    ///
    /// With a `direction`, amounts are magnitudes and get the direction's
    /// sign (splits included). Splits win over a single category. Fails
    /// with `AmountMismatch` if the splits do not reconstitute the amount.
    pub fn into_transaction(self) -> EnvelopeResult<Transaction> {
        let signed = |amount: Money| match self.direction {
            Some(Direction::Inflow) => amount.abs(),
            Some(Direction::Outflow) => -amount.abs(),
            None => amount,
        };

        let amount = signed(self.amount.to_money()?);
        let splits = self
            .splits
            .iter()
            .map(|s| -> EnvelopeResult<Split> {
                Ok(Split {
                    category_id: s.category_id,
                    amount: signed(s.amount.to_money()?),
                    memo: s.memo.clone().filter(|m| !m.is_empty()),
                })
            })
            .collect::<EnvelopeResult<Vec<_>>>()?;

        let mut txn = Transaction::new(self.account_id, self.date, amount);
        if let Some(id) = self.id {
            txn.id = id;
        }
        txn.memo = self.memo.unwrap_or_default();

        if splits.is_empty() {
            txn.set_category(self.category_id);
        } else {
            if self.category_id.is_some() {
                debug!(transaction = %txn.id, "dropping single category in favour of splits");
            }
            txn.set_splits(splits);
        }

        txn.validate().map_err(|e| match e {
            TransactionValidationError::SplitsMismatch {
                transaction_amount,
                splits_total,
            } => EnvelopeError::AmountMismatch {
                expected: transaction_amount,
                actual: splits_total,
            },
            other => EnvelopeError::Validation(other.to_string()),
        })?;

        Ok(txn)
    }
}
