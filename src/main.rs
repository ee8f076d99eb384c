use anyhow::Result;
use clap::{Parser, Subcommand};

use envelope_reconcile::cli::{
    handle_balance_command, handle_split_command, BalanceArgs, SplitCommands,
};
use envelope_reconcile::config::{paths::EnvelopePaths, settings::Settings};

#[derive(Parser)]
#[command(
    name = "envelope-reconcile",
    version,
    about = "Category balances and split allocation for zero-based budgets",
    long_about = "envelope-reconcile computes what each budget category has available, \
                  how much income is still unassigned, and whether a split transaction's \
                  parts add up to its amount."
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show category balances for a budget snapshot
    #[command(alias = "bal")]
    Balances(BalanceArgs),

    /// Split allocation commands
    #[command(subcommand)]
    Splits(SplitCommands),

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    envelope_reconcile::init_tracing(cli.verbose);

    let paths = EnvelopePaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    match cli.command {
        Some(Commands::Balances(args)) => {
            handle_balance_command(args, &settings)?;
        }
        Some(Commands::Splits(cmd)) => {
            handle_split_command(cmd, &settings)?;
        }
        Some(Commands::Config) => {
            println!("envelope-reconcile Configuration");
            println!("================================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Settings file:  {}", paths.settings_file().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Date format:     {}", settings.date_format);
            println!("  Income basis:    {}", settings.income_basis);
        }
        None => {
            println!("envelope-reconcile - category balances and split allocation");
            println!();
            println!("Run 'envelope-reconcile --help' for usage information.");
        }
    }

    Ok(())
}
