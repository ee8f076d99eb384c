//! Balance CLI command
//!
//! Reads a budget snapshot and prints the per-category balance overview.

use std::path::PathBuf;

use clap::Args;

use crate::config::settings::Settings;
use crate::display::{format_overspent, format_overview};
use crate::error::EnvelopeResult;
use crate::services::overview::IncomeBasis;
use crate::wire::read_snapshot;

/// Arguments for `balances`
#[derive(Debug, Args)]
pub struct BalanceArgs {
    /// Path to a budget snapshot (JSON)
    pub snapshot: PathBuf,

    /// Only list overspent categories
    #[arg(long)]
    pub overspent: bool,

    /// Income the unassigned amount is measured against (expected, actual)
    #[arg(long)]
    pub income_basis: Option<IncomeBasis>,
}

/// Handle the `balances` command
pub fn handle_balance_command(args: BalanceArgs, settings: &Settings) -> EnvelopeResult<()> {
    let snapshot = read_snapshot(&args.snapshot)?;
    let basis = args.income_basis.unwrap_or(settings.income_basis);
    let overview = snapshot.overview(basis);
    let symbol = settings.currency_symbol.as_str();

    if args.overspent {
        print!("{}", format_overspent(&overview, symbol));
        return Ok(());
    }

    println!(
        "{} to {}",
        overview.period.start_date().format(&settings.date_format),
        overview.period.end_date().format(&settings.date_format)
    );
    print!("{}", format_overview(&overview, basis, symbol));

    Ok(())
}
