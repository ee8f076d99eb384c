//! Budget overview display formatting

use crate::models::Money;
use crate::services::balance::BudgetStatus;
use crate::services::overview::{BalanceRow, BudgetOverview, IncomeBasis};

const WIDTH: usize = 72;

/// Format the full overview as a grouped table
pub fn format_overview(overview: &BudgetOverview, basis: IncomeBasis, symbol: &str) -> String {
    let money = |m: Money| m.format_with_symbol(symbol);
    let mut output = String::new();

    output.push_str(&format!("Budget Overview: {}\n", overview.period));
    output.push_str(&format!("{}\n", "=".repeat(WIDTH)));

    if overview.sections.iter().all(|s| s.rows.is_empty()) {
        output.push_str("No expense categories in this snapshot.\n");
    }

    for section in overview.sections.iter().filter(|s| !s.rows.is_empty()) {
        output.push_str(&format!("\n{}\n", section.name));
        output.push_str(&format!(
            "{:26} {:>10} {:>10} {:>10} {:>10}\n",
            "", "Carryover", "Assigned", "Spent", "Available"
        ));
        output.push_str(&format!("{}\n", "-".repeat(WIDTH)));

        for row in &section.rows {
            output.push_str(&format!(
                "  {:24} {:>10} {:>10} {:>10} {:>10} {}\n",
                truncate(&row.name, 24),
                money(row.balance.carryover()),
                money(row.balance.assigned()),
                money(row.balance.spent()),
                money(row.balance.available()),
                status_mark(row)
            ));
        }
    }

    output.push_str(&format!("\n{}\n", "=".repeat(WIDTH)));
    output.push_str(&format!(
        "{:26} {:>10} {:>10} {:>10} {:>10}\n",
        "TOTALS:",
        money(overview.totals.carryover),
        money(overview.totals.assigned),
        money(overview.totals.spent),
        money(overview.totals.available)
    ));
    output.push('\n');
    output.push_str(&format!(
        "Income ({}): {}\n",
        basis,
        money(overview.total_income)
    ));
    output.push_str(&format!("Unassigned: {}\n", money(overview.unassigned)));
    output.push_str(&format!("{}\n", format_status(&overview.status, symbol)));

    if !overview.overspent.is_empty() {
        output.push_str(&format!(
            "\n⚠ {} overspent categor{}\n",
            overview.overspent.len(),
            if overview.overspent.len() == 1 { "y" } else { "ies" }
        ));
    }

    output
}

/// Format only the overspent categories
pub fn format_overspent(overview: &BudgetOverview, symbol: &str) -> String {
    if overview.overspent.is_empty() {
        return "No overspent categories.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!("Overspent categories ({}):\n", overview.period));

    for balance in &overview.overspent {
        let name = overview
            .row(balance.category_id())
            .map(|r| r.name.as_str())
            .unwrap_or("(unknown)");
        output.push_str(&format!(
            "  {:24} {:>10}\n",
            truncate(name, 24),
            balance.available().format_with_symbol(symbol)
        ));
    }

    output
}

/// One-line budget status
pub fn format_status(status: &BudgetStatus, symbol: &str) -> String {
    match status {
        BudgetStatus::Complete => "✓ Every dollar has a job".to_string(),
        BudgetStatus::Unbudgeted(amount) => {
            format!("{} left to assign", amount.format_with_symbol(symbol))
        }
        BudgetStatus::OverAllocated(amount) => {
            format!("⚠ Over-assigned by {}", amount.format_with_symbol(symbol))
        }
    }
}

fn status_mark(row: &BalanceRow) -> &'static str {
    if row.balance.is_overspent() {
        "⚠"
    } else if row.balance.is_underfunded(row.target) {
        "✗"
    } else if row.target.is_some() {
        "✓"
    } else {
        ""
    }
}

fn truncate(name: &str, width: usize) -> String {
    if name.chars().count() <= width {
        name.to_string()
    } else {
        let cut: String = name.chars().take(width - 1).collect();
        format!("{}…", cut)
    }
}
