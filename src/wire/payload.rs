//! Outbound request bodies
//!
//! Amounts are sent as signed decimal strings ("-100.00") so the server
//! never sees a float.

use serde::{Deserialize, Serialize};

use crate::models::{Assignment, BudgetPeriodId, CategoryId, Money, TransactionId};
use crate::services::split::{to_persisted_splits, validate_splits, SplitError, SplitRow, SplitSign};

/// One split in a `splits/replace` body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitPayload {
    pub category_id: Option<CategoryId>,
    pub amount: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
}

/// Body of `POST /transactions/{id}/splits/replace`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplaceSplitsRequest {
    pub splits: Vec<SplitPayload>,
}

impl ReplaceSplitsRequest {
    /// Validate the editor rows and build the body
    ///
    /// Refuses to build anything while the rows do not add up to the
    /// transaction amount; the sign comes from `target_amount`.
    pub fn build(rows: &[SplitRow], target_amount: Money) -> Result<Self, SplitError> {
        validate_splits(rows, target_amount)?;

        let splits = to_persisted_splits(rows, SplitSign::of(target_amount))
            .into_iter()
            .map(|split| SplitPayload {
                category_id: split.category_id,
                amount: split.amount.to_decimal_string(),
                memo: split.memo,
            })
            .collect();

        Ok(Self { splits })
    }

    pub fn path(transaction_id: TransactionId) -> String {
        format!("/transactions/{}/splits/replace", transaction_id.as_uuid())
    }
}

/// Body of `POST /assignments/assign`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignRequest {
    pub category_id: CategoryId,
    pub period_id: BudgetPeriodId,
    pub amount: String,
}

impl AssignRequest {
    pub const PATH: &'static str = "/assignments/assign";
}

impl From<&Assignment> for AssignRequest {
    fn from(assignment: &Assignment) -> Self {
        Self {
            category_id: assignment.category_id,
            period_id: assignment.period_id,
            amount: assignment.amount.to_decimal_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::split::{apply_preset, PresetKind};

    #[test]
    fn test_replace_splits_body() {
        let groceries = CategoryId::new();
        let mut rows = apply_preset(PresetKind::EqualThirds, Money::from_dollars(-100));
        rows[0].category_id = Some(groceries);
        rows[2].memo = Some("rounding".into());

        let body = ReplaceSplitsRequest::build(&rows, Money::from_dollars(-100)).unwrap();
        let amounts: Vec<&str> = body.splits.iter().map(|s| s.amount.as_str()).collect();
        assert_eq!(amounts, vec!["-33.33", "-33.33", "-33.34"]);

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json["splits"][0]["categoryId"],
            serde_json::json!(groceries.as_uuid().to_string())
        );
        assert!(json["splits"][1]["categoryId"].is_null());
        assert!(json["splits"][1].get("memo").is_none());
        assert_eq!(json["splits"][2]["memo"], "rounding");
    }

    #[test]
    fn test_replace_splits_blocked_on_mismatch() {
        let rows = vec![
            SplitRow::new(None, Money::from_dollars(30)),
            SplitRow::new(None, Money::from_cents(6999)),
        ];
        assert!(matches!(
            ReplaceSplitsRequest::build(&rows, Money::from_dollars(-100)),
            Err(SplitError::AmountMismatch { .. })
        ));
    }

    #[test]
    fn test_paths() {
        let id = TransactionId::parse("550e8400-e29b-41d4-a716-446655440000").unwrap();
        assert_eq!(
            ReplaceSplitsRequest::path(id),
            "/transactions/550e8400-e29b-41d4-a716-446655440000/splits/replace"
        );
        assert_eq!(AssignRequest::PATH, "/assignments/assign");
    }

    #[test]
    fn test_assign_body() {
        let assignment = Assignment::new(
            CategoryId::new(),
            BudgetPeriodId::new(),
            Money::from_cents(120000),
        );
        let body = AssignRequest::from(&assignment);
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["amount"], "1200.00");
        assert!(json.get("periodId").is_some());
    }
}
