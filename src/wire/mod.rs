//! Boundary between the REST JSON API and the internal models
//!
//! Documents are converted once on the way in, so nothing past this module
//! has to care which shape a payload arrived in. Outbound payloads are
//! built here too, after the same validation the editor applies.

pub mod payload;
pub mod snapshot;
pub mod transaction;

pub use payload::{AssignRequest, ReplaceSplitsRequest, SplitPayload};
pub use snapshot::{read_snapshot, BudgetSnapshot, SnapshotDocument};
pub use transaction::{Direction, SplitDto, TransactionDto};

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{EnvelopeError, EnvelopeResult};
use crate::models::Money;

/// An amount as it appears on the wire: a JSON number or a decimal string
///
/// Numbers are converted through their shortest decimal rendering, never
/// through float arithmetic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireAmount {
    Number(serde_json::Number),
    Text(String),
}

impl WireAmount {
    pub fn to_money(&self) -> EnvelopeResult<Money> {
        let text = match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s.clone(),
        };
        Money::parse(&text).map_err(|e| EnvelopeError::Parse(e.to_string()))
    }
}

impl From<Money> for WireAmount {
    fn from(amount: Money) -> Self {
        Self::Text(amount.to_decimal_string())
    }
}

impl fmt::Display for WireAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => write!(f, "{}", s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_amount_number_and_text() {
        let number: WireAmount = serde_json::from_str("69.99").unwrap();
        assert_eq!(number.to_money().unwrap(), Money::from_cents(6999));

        let integer: WireAmount = serde_json::from_str("-300").unwrap();
        assert_eq!(integer.to_money().unwrap(), Money::from_dollars(-300));

        let text: WireAmount = serde_json::from_str("\"$1,200.50\"").unwrap();
        assert_eq!(text.to_money().unwrap(), Money::from_cents(120050));
    }

    #[test]
    fn test_wire_amount_from_money() {
        let wire = WireAmount::from(Money::from_cents(-10000));
        assert_eq!(serde_json::to_string(&wire).unwrap(), "\"-100.00\"");
    }
}
