//! envelope-reconcile - category balances and split allocation for
//! zero-based budgets
//!
//! The library computes what each category has available in a period,
//! how much income is still unassigned, and whether a split transaction's
//! parts add up to its amount. Everything is computed from caller-owned
//! models; nothing is persisted here.
//!
//! # Architecture
//!
//! - `models`: Money, ids, categories, periods, transactions and balances
//! - `services`: balance calculation, split allocation, budget overview
//! - `wire`: conversion of API documents into models and back
//! - `config`: path and settings management
//! - `display`: plain-text formatting for the terminal
//! - `cli`: command handlers for the `envelope-reconcile` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use envelope_reconcile::services::split::{apply_preset, validate_splits, PresetKind};
//! use envelope_reconcile::models::Money;
//!
//! let target = Money::from_dollars(-100);
//! let rows = apply_preset(PresetKind::EqualThirds, target);
//! assert!(validate_splits(&rows, target).is_ok());
//! ```

use std::sync::Once;

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod services;
pub mod wire;

pub use error::{EnvelopeError, EnvelopeResult};

static TRACING_INIT: Once = Once::new();

/// Install the global tracing subscriber
///
/// `RUST_LOG` wins when set. Otherwise this crate logs at warn, info
/// (`verbosity == 1`) or debug (`verbosity >= 2`). Output goes to stderr.
pub fn init_tracing(verbosity: u8) {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let level = match verbosity {
            0 => "warn",
            1 => "info",
            _ => "debug",
        };

        let filter = match std::env::var("RUST_LOG") {
            Ok(_) => EnvFilter::from_default_env(),
            Err(_) => EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), level)),
        };

        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    });
}
