//! Split editor display formatting

use crate::models::{CategoryId, Money, Split};
use crate::services::split::{remaining, rows_total, SplitRow};

/// Format editor rows with a running total and the amount left to allocate
pub fn format_split_rows(rows: &[SplitRow], target_amount: Money, symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "{:>3}  {:38} {:>12}  {}\n",
        "#", "Category", "Amount", "Memo"
    ));
    output.push_str(&format!("{}\n", "-".repeat(64)));

    for (index, row) in rows.iter().enumerate() {
        output.push_str(&format!(
            "{:>3}  {:38} {:>12}  {}\n",
            index + 1,
            category_label(row.category_id),
            row.amount.format_with_symbol(symbol),
            row.memo.as_deref().unwrap_or("")
        ));
    }

    output.push_str(&format!("{}\n", "-".repeat(64)));
    output.push_str(&format!(
        "     {:38} {:>12}\n",
        "Total",
        rows_total(rows).format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "     {:38} {:>12}\n",
        "Transaction",
        target_amount.abs().format_with_symbol(symbol)
    ));

    let left = remaining(rows, target_amount);
    if left.within_tolerance(Money::zero()) {
        output.push_str("✓ Splits balance\n");
    } else {
        output.push_str(&format!(
            "✗ Remaining: {}\n",
            left.format_with_symbol(symbol)
        ));
    }

    output
}

/// Format signed splits as they would be stored
pub fn format_persisted_splits(splits: &[Split], symbol: &str) -> String {
    let mut output = String::new();

    for split in splits {
        output.push_str(&format!(
            "  {:38} {:>12}",
            category_label(split.category_id),
            split.amount.format_with_symbol(symbol)
        ));
        if let Some(memo) = &split.memo {
            output.push_str(&format!("  {}", memo));
        }
        output.push('\n');
    }

    output
}

fn category_label(category_id: Option<CategoryId>) -> String {
    category_id
        .map(|id| id.to_string())
        .unwrap_or_else(|| "(uncategorized)".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::split::{apply_preset, PresetKind};

    #[test]
    fn test_balanced_rows() {
        let rows = apply_preset(PresetKind::EqualThirds, Money::from_dollars(100));
        let text = format_split_rows(&rows, Money::from_dollars(-100), "$");

        assert!(text.contains("$33.33"));
        assert!(text.contains("$33.34"));
        assert!(text.contains("$100.00"));
        assert!(text.contains("✓ Splits balance"));
    }

    #[test]
    fn test_unbalanced_rows() {
        let rows = vec![SplitRow::new(None, Money::from_dollars(40))];
        let text = format_split_rows(&rows, Money::from_dollars(100), "$");

        assert!(text.contains("(uncategorized)"));
        assert!(text.contains("✗ Remaining: $60.00"));
    }

    #[test]
    fn test_persisted_splits() {
        let cat = CategoryId::new();
        let splits = vec![
            Split::with_memo(Some(cat), Money::from_dollars(-60), "weekly shop"),
            Split::new(None, Money::from_dollars(-40)),
        ];
        let text = format_persisted_splits(&splits, "$");

        assert!(text.contains(&cat.to_string()));
        assert!(text.contains("-$60.00  weekly shop"));
        assert!(text.contains("-$40.00"));
    }
}
