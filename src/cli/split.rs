//! Split CLI commands
//!
//! Drives the split allocator from the command line: check a set of
//! amounts against a transaction, apply a preset, or top up the last row.

use clap::{Subcommand, ValueEnum};

use crate::config::settings::Settings;
use crate::display::{format_persisted_splits, format_split_rows};
use crate::error::{EnvelopeError, EnvelopeResult};
use crate::models::Money;
use crate::services::split::{
    apply_preset, auto_distribute_remaining, to_persisted_splits, validate_splits, PresetKind,
    SplitRow, SplitSign,
};
use crate::wire::ReplaceSplitsRequest;

/// Preset names accepted on the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PresetChoice {
    Halves,
    Thirds,
    Quarters,
    Reset,
}

impl From<PresetChoice> for PresetKind {
    fn from(choice: PresetChoice) -> Self {
        match choice {
            PresetChoice::Halves => PresetKind::EqualHalves,
            PresetChoice::Thirds => PresetKind::EqualThirds,
            PresetChoice::Quarters => PresetKind::EqualQuarters,
            PresetChoice::Reset => PresetKind::Reset,
        }
    }
}

/// Split subcommands
#[derive(Subcommand)]
pub enum SplitCommands {
    /// Check that split amounts add up to the transaction amount
    Check {
        /// Transaction amount (negative for outflow, e.g. "-100.00")
        #[arg(allow_hyphen_values = true)]
        target: String,
        /// Split amounts (unsigned)
        #[arg(required = true)]
        amounts: Vec<String>,
    },

    /// Fill the split rows from a preset
    Preset {
        /// halves, thirds, quarters or reset
        #[arg(value_enum)]
        kind: PresetChoice,
        /// Transaction amount
        #[arg(allow_hyphen_values = true)]
        target: String,
        /// Show the rows with the transaction sign applied
        #[arg(long)]
        persisted: bool,
        /// Print the replace-splits request body
        #[arg(long)]
        json: bool,
    },

    /// Add whatever is left to allocate onto the last row
    Distribute {
        /// Transaction amount
        #[arg(allow_hyphen_values = true)]
        target: String,
        /// Split amounts (unsigned)
        #[arg(required = true)]
        amounts: Vec<String>,
        /// Print the replace-splits request body
        #[arg(long)]
        json: bool,
    },
}

/// Handle a split command
pub fn handle_split_command(cmd: SplitCommands, settings: &Settings) -> EnvelopeResult<()> {
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        SplitCommands::Check { target, amounts } => {
            let target = parse_amount(&target)?;
            let rows = parse_rows(&amounts)?;

            print!("{}", format_split_rows(&rows, target, symbol));
            validate_splits(&rows, target)?;
        }

        SplitCommands::Preset {
            kind,
            target,
            persisted,
            json,
        } => {
            let target = parse_amount(&target)?;
            let rows = apply_preset(kind.into(), target);

            if json {
                print_request(&rows, target)?;
            } else if persisted {
                let splits = to_persisted_splits(&rows, SplitSign::of(target));
                print!("{}", format_persisted_splits(&splits, symbol));
            } else {
                print!("{}", format_split_rows(&rows, target, symbol));
            }
        }

        SplitCommands::Distribute {
            target,
            amounts,
            json,
        } => {
            let target = parse_amount(&target)?;
            let rows = auto_distribute_remaining(parse_rows(&amounts)?, target);

            if json {
                print_request(&rows, target)?;
            } else {
                print!("{}", format_split_rows(&rows, target, symbol));
            }
        }
    }

    Ok(())
}

fn parse_amount(text: &str) -> EnvelopeResult<Money> {
    Money::parse(text).map_err(|e| EnvelopeError::Parse(format!("'{}': {}", text, e)))
}

fn parse_rows(amounts: &[String]) -> EnvelopeResult<Vec<SplitRow>> {
    amounts
        .iter()
        .map(|text| {
            SplitRow::from_input(None, text, None)
                .map_err(|e| EnvelopeError::Parse(format!("'{}': {}", text, e)))
        })
        .collect()
}

fn print_request(rows: &[SplitRow], target: Money) -> EnvelopeResult<()> {
    let request = ReplaceSplitsRequest::build(rows, target)?;
    println!("{}", serde_json::to_string_pretty(&request)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rows_blank_is_zero() {
        let rows = parse_rows(&["60".into(), "".into()]).unwrap();
        assert_eq!(rows[0].amount, Money::from_dollars(60));
        assert!(rows[1].amount.is_zero());
    }

    #[test]
    fn test_parse_amount_error() {
        assert!(matches!(
            parse_amount("abc"),
            Err(EnvelopeError::Parse(_))
        ));
    }

    #[test]
    fn test_check_mismatch_is_error() {
        let cmd = SplitCommands::Check {
            target: "-100".into(),
            amounts: vec!["60".into(), "30".into()],
        };
        let err = handle_split_command(cmd, &Settings::default()).unwrap_err();
        assert!(matches!(err, EnvelopeError::AmountMismatch { .. }));
    }

    #[test]
    fn test_preset_choice_mapping() {
        assert_eq!(PresetKind::from(PresetChoice::Thirds), PresetKind::EqualThirds);
        assert_eq!(PresetKind::from(PresetChoice::Reset), PresetKind::Reset);
    }
}
