//! Category balance calculations
//!
//! Pure functions over caller-owned data: nothing here holds state or does
//! I/O, so every function can be called from any thread at any time.

use std::collections::HashMap;
use std::fmt;

use tracing::debug;

use crate::models::{CategoryBalance, CategoryGroup, CategoryId, Money, PeriodSpan, Transaction};

/// `carryover + assigned - spent`
///
/// Negative results mean the category is overspent and are returned as-is.
pub fn compute_available(carryover: Money, assigned: Money, spent: Money) -> Money {
    carryover + assigned - spent
}

/// Income not yet given to any category: `total_income - sum(assignments)`
///
/// Accepts any map-like iterator, e.g. `&HashMap<CategoryId, Money>`.
pub fn compute_unassigned<'a, I>(total_income: Money, assignments: I) -> Money
where
    I: IntoIterator<Item = (&'a CategoryId, &'a Money)>,
{
    let assigned: Money = assignments.into_iter().map(|(_, amount)| *amount).sum();
    total_income - assigned
}

/// Balances whose available amount is below zero, in input order
pub fn find_overspent(balances: &[CategoryBalance]) -> Vec<CategoryBalance> {
    balances
        .iter()
        .filter(|b| b.is_overspent())
        .copied()
        .collect()
}

/// Signed net activity per category for transactions dated inside `span`
///
/// Split transactions contribute each split to its own category.
/// Uncategorized money is left out.
pub fn activity_by_category(
    transactions: &[Transaction],
    span: &PeriodSpan,
) -> HashMap<CategoryId, Money> {
    let mut activity: HashMap<CategoryId, Money> = HashMap::new();
    let mut uncategorized = 0usize;

    for txn in transactions.iter().filter(|t| span.contains(t.date)) {
        for (category_id, amount) in txn.allocations() {
            match category_id {
                Some(id) => *activity.entry(id).or_default() += amount,
                None => uncategorized += 1,
            }
        }
    }

    if uncategorized > 0 {
        debug!(period = %span, uncategorized, "skipped uncategorized amounts");
    }

    activity
}

/// Spent is the negated net activity, so refunds lower it
pub fn spent_from_activity(activity: Money) -> Money {
    -activity
}

/// Net activity of every category that lives in an income group
pub fn actual_income(groups: &[CategoryGroup], activity: &HashMap<CategoryId, Money>) -> Money {
    groups
        .iter()
        .filter(|g| g.is_income())
        .flat_map(|g| g.categories.iter())
        .filter_map(|c| activity.get(&c.id))
        .sum()
}

/// Carryover for the following period: each category's available amount
pub fn roll_forward(balances: &[CategoryBalance]) -> HashMap<CategoryId, Money> {
    balances
        .iter()
        .map(|b| (b.category_id(), b.available()))
        .collect()
}

/// Where the budget stands once every assignment is counted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetStatus {
    /// Every dollar has a job
    Complete,
    /// Income left to assign
    Unbudgeted(Money),
    /// More assigned than received
    OverAllocated(Money),
}

impl BudgetStatus {
    pub fn from_unassigned(unassigned: Money) -> Self {
        if unassigned.is_zero() {
            Self::Complete
        } else if unassigned.is_positive() {
            Self::Unbudgeted(unassigned)
        } else {
            Self::OverAllocated(unassigned.abs())
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Complete)
    }
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Complete => write!(f, "Every dollar has a job"),
            Self::Unbudgeted(amount) => write!(f, "{} left to assign", amount),
            Self::OverAllocated(amount) => write!(f, "Over-assigned by {}", amount),
        }
    }
}
