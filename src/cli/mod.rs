//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod balance;
pub mod split;

pub use balance::{handle_balance_command, BalanceArgs};
pub use split::{handle_split_command, PresetChoice, SplitCommands};
