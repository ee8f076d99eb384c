//! Core data models for envelope-reconcile
//!
//! This module contains the data structures of the budgeting domain:
//! categories, periods, assignments, transactions, splits and the derived
//! category balances.

pub mod budget;
pub mod category;
pub mod ids;
pub mod money;
pub mod period;
pub mod transaction;

pub use budget::{Assignment, CategoryBalance};
pub use category::{Category, CategoryGroup, GroupKind};
pub use ids::{AccountId, BudgetPeriodId, CategoryGroupId, CategoryId, TransactionId};
pub use money::{Money, MoneyParseError};
pub use period::{BudgetPeriod, PeriodSpan};
pub use transaction::{Split, Transaction};
