//! Split allocation
//!
//! Split rows in the editor hold unsigned magnitudes. The transaction's
//! sign is tracked once and reapplied by [`to_persisted_splits`] when the
//! rows are handed to storage. Every function takes the current rows and
//! returns new ones; the caller owns the editor state.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::models::{CategoryId, Money, MoneyParseError, Split, Transaction};

/// One editable row of a split
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SplitRow {
    #[serde(default)]
    pub category_id: Option<CategoryId>,

    /// Unsigned magnitude
    pub amount: Money,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
}

impl SplitRow {
    pub fn new(category_id: Option<CategoryId>, amount: Money) -> Self {
        Self {
            category_id,
            amount,
            memo: None,
        }
    }

    /// Build a row from editor text; blank text is a zero amount
    pub fn from_input(
        category_id: Option<CategoryId>,
        amount: &str,
        memo: Option<String>,
    ) -> Result<Self, MoneyParseError> {
        let amount = if amount.trim().is_empty() {
            Money::zero()
        } else {
            Money::parse(amount)?
        };

        Ok(Self {
            category_id,
            amount,
            memo: memo.filter(|m| !m.trim().is_empty()),
        })
    }
}

/// Equal-distribution presets offered by the split editor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresetKind {
    EqualHalves,
    EqualThirds,
    EqualQuarters,
    Reset,
}

impl PresetKind {
    /// Number of rows the preset produces
    pub fn row_count(&self) -> usize {
        match self {
            Self::EqualHalves => 2,
            Self::EqualThirds => 3,
            Self::EqualQuarters => 4,
            Self::Reset => 1,
        }
    }
}

impl fmt::Display for PresetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EqualHalves => write!(f, "halves"),
            Self::EqualThirds => write!(f, "thirds"),
            Self::EqualQuarters => write!(f, "quarters"),
            Self::Reset => write!(f, "reset"),
        }
    }
}

/// Direction of the parent transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitSign {
    Positive,
    Negative,
}

impl SplitSign {
    /// Outflows are negative; zero counts as positive
    pub fn of(amount: Money) -> Self {
        if amount.is_negative() {
            Self::Negative
        } else {
            Self::Positive
        }
    }

    fn apply(&self, magnitude: Money) -> Money {
        match self {
            Self::Positive => magnitude,
            Self::Negative => -magnitude,
        }
    }
}

/// The one way a split can be rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitError {
    AmountMismatch { expected: Money, actual: Money },
}

impl fmt::Display for SplitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AmountMismatch { expected, actual } => write!(
                f,
                "Splits total {} but the transaction amount is {}",
                actual, expected
            ),
        }
    }
}

impl std::error::Error for SplitError {}

/// Sum of the row magnitudes
pub fn rows_total(rows: &[SplitRow]) -> Money {
    rows.iter().map(|r| r.amount).sum()
}

/// `abs(target) - sum(rows)`; positive while money is still unallocated
pub fn remaining(rows: &[SplitRow], target_amount: Money) -> Money {
    target_amount.abs() - rows_total(rows)
}

/// Check that the rows add up to the magnitude of the target amount
///
/// Saving must stay blocked while this fails.
pub fn validate_splits(rows: &[SplitRow], target_amount: Money) -> Result<(), SplitError> {
    let expected = target_amount.abs();
    let actual = rows_total(rows);

    if actual.within_tolerance(expected) {
        Ok(())
    } else {
        warn!(%expected, %actual, rows = rows.len(), "split rows do not match transaction");
        Err(SplitError::AmountMismatch { expected, actual })
    }
}

/// Produce the rows for a preset
///
/// Each row gets `abs(target) / n` rounded down to the cent; the leftover
/// cents land on the last row so the rows always add up exactly.
/// `Reset` yields a single empty row.
pub fn apply_preset(kind: PresetKind, target_amount: Money) -> Vec<SplitRow> {
    if kind == PresetKind::Reset {
        return vec![SplitRow::default()];
    }

    let rows: Vec<SplitRow> = target_amount
        .abs()
        .split_evenly(kind.row_count())
        .into_iter()
        .map(|share| SplitRow::new(None, share))
        .collect();

    debug!(preset = %kind, target = %target_amount, "applied split preset");
    auto_distribute_remaining(rows, target_amount)
}

/// Add whatever is left to allocate onto the last row
///
/// Returns the rows unchanged when nothing (within tolerance) is left or
/// there are no rows. An over-allocation is taken back from the last row.
pub fn auto_distribute_remaining(mut rows: Vec<SplitRow>, target_amount: Money) -> Vec<SplitRow> {
    let left = remaining(&rows, target_amount);
    if left.abs() < Money::TOLERANCE {
        return rows;
    }

    if let Some(last) = rows.last_mut() {
        debug!(remaining = %left, "distributing remainder to last split row");
        last.amount += left;
    }

    rows
}

/// Reapply the transaction sign to every row for storage
///
/// Rows without a category are kept as uncategorized splits.
pub fn to_persisted_splits(rows: &[SplitRow], sign: SplitSign) -> Vec<Split> {
    rows.iter()
        .map(|row| Split {
            category_id: row.category_id,
            amount: sign.apply(row.amount),
            memo: row.memo.clone(),
        })
        .collect()
}

/// Load a transaction into editor rows
///
/// Persisted splits become one row each; a single-category transaction
/// becomes one row holding the whole amount.
pub fn rows_from_transaction(txn: &Transaction) -> Vec<SplitRow> {
    if txn.is_split() {
        txn.splits
            .iter()
            .map(|s| SplitRow {
                category_id: s.category_id,
                amount: s.amount.abs(),
                memo: s.memo.clone(),
            })
            .collect()
    } else {
        vec![SplitRow::new(txn.category_id, txn.amount.abs())]
    }
}
