//! Assignment and category balance models
//!
//! An [`Assignment`] records how much income was given to a category in a
//! period. A [`CategoryBalance`] is the derived view of that category:
//! carryover, assigned, spent and the resulting available amount.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{BudgetPeriodId, CategoryId};
use super::money::Money;
use crate::services::balance::compute_available;

/// Money assigned to a category for a budget period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    /// The category this assignment is for
    pub category_id: CategoryId,

    /// The budget period
    pub period_id: BudgetPeriodId,

    /// Amount assigned
    pub amount: Money,
}

impl Assignment {
    /// Create a new assignment
    pub fn new(category_id: CategoryId, period_id: BudgetPeriodId, amount: Money) -> Self {
        Self {
            category_id,
            period_id,
            amount,
        }
    }

    /// Validate the assignment
    pub fn validate(&self) -> Result<(), AssignmentValidationError> {
        if self.amount.is_negative() {
            return Err(AssignmentValidationError::NegativeAmount);
        }

        Ok(())
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} assigned {}", self.category_id, self.amount)
    }
}

/// Derived balance of one category in one period
///
/// Never stored or edited in place: construct a new one whenever the
/// inputs change. `available` is always `carryover + assigned - spent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryBalance {
    category_id: CategoryId,
    carryover: Money,
    assigned: Money,
    spent: Money,
    available: Money,
}

impl CategoryBalance {
    /// Build a balance, computing `available` from its inputs
    pub fn new(category_id: CategoryId, carryover: Money, assigned: Money, spent: Money) -> Self {
        Self {
            category_id,
            carryover,
            assigned,
            spent,
            available: compute_available(carryover, assigned, spent),
        }
    }

    pub fn category_id(&self) -> CategoryId {
        self.category_id
    }

    /// Signed balance rolled in from the previous period
    pub fn carryover(&self) -> Money {
        self.carryover
    }

    pub fn assigned(&self) -> Money {
        self.assigned
    }

    /// Net outflow in the period (refunds reduce it)
    pub fn spent(&self) -> Money {
        self.spent
    }

    pub fn available(&self) -> Money {
        self.available
    }

    /// Check if this category is overspent (available is negative)
    pub fn is_overspent(&self) -> bool {
        self.available.is_negative()
    }

    /// Check if less than the target has been assigned
    pub fn is_underfunded(&self, target: Option<Money>) -> bool {
        target.is_some_and(|t| self.assigned < t)
    }
}

impl fmt::Display for CategoryBalance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Assigned: {} | Spent: {} | Available: {}",
            self.assigned, self.spent, self.available
        )
    }
}

/// Validation errors for assignments
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssignmentValidationError {
    NegativeAmount,
}

impl fmt::Display for AssignmentValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeAmount => write!(f, "Assigned amount cannot be negative"),
        }
    }
}

impl std::error::Error for AssignmentValidationError {}
