//! Reconciliation services
//!
//! Stateless business logic over caller-owned models: category balances,
//! split allocation, and the budget overview built from both.

pub mod balance;
pub mod overview;
pub mod split;

pub use balance::{compute_available, compute_unassigned, find_overspent, BudgetStatus};
pub use overview::{BudgetOverview, IncomeBasis, OverviewInput};
pub use split::{
    apply_preset, auto_distribute_remaining, to_persisted_splits, validate_splits, PresetKind,
    SplitError, SplitRow, SplitSign,
};
