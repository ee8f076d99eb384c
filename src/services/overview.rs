//! Budget overview
//!
//! Builds the per-group balance table for one period, together with the
//! unassigned amount and the overall budget status.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::models::{
    BudgetPeriod, CategoryBalance, CategoryGroup, CategoryGroupId, CategoryId, Money, Transaction,
};
use crate::services::balance::{
    activity_by_category, actual_income, compute_unassigned, find_overspent, spent_from_activity,
    BudgetStatus,
};

/// Which income figure the unassigned amount is measured against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IncomeBasis {
    /// The period's expected income
    #[default]
    Expected,
    /// Income actually received in income categories
    Actual,
}

impl fmt::Display for IncomeBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expected => write!(f, "expected"),
            Self::Actual => write!(f, "actual"),
        }
    }
}

impl FromStr for IncomeBasis {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "expected" => Ok(Self::Expected),
            "actual" => Ok(Self::Actual),
            other => Err(format!("unknown income basis '{}' (expected|actual)", other)),
        }
    }
}

/// Everything the overview is computed from; all of it owned by the caller
#[derive(Debug, Clone, Copy)]
pub struct OverviewInput<'a> {
    pub period: &'a BudgetPeriod,
    pub groups: &'a [CategoryGroup],
    pub assignments: &'a HashMap<CategoryId, Money>,
    pub carryover: &'a HashMap<CategoryId, Money>,
    pub transactions: &'a [Transaction],
    pub income_basis: IncomeBasis,
}

/// Column totals for a set of balances
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BalanceTotals {
    pub carryover: Money,
    pub assigned: Money,
    pub spent: Money,
    pub available: Money,
}

impl BalanceTotals {
    fn add(&mut self, balance: &CategoryBalance) {
        self.carryover += balance.carryover();
        self.assigned += balance.assigned();
        self.spent += balance.spent();
        self.available += balance.available();
    }
}

/// One category line of the overview
#[derive(Debug, Clone)]
pub struct BalanceRow {
    pub name: String,
    pub target: Option<Money>,
    pub balance: CategoryBalance,
}

/// One expense group with its category lines
#[derive(Debug, Clone)]
pub struct GroupSection {
    pub group_id: CategoryGroupId,
    pub name: String,
    pub rows: Vec<BalanceRow>,
    pub totals: BalanceTotals,
}

/// The complete budget picture for a period
#[derive(Debug, Clone)]
pub struct BudgetOverview {
    pub period: BudgetPeriod,
    pub sections: Vec<GroupSection>,
    pub totals: BalanceTotals,
    pub total_income: Money,
    pub unassigned: Money,
    pub status: BudgetStatus,
    pub overspent: Vec<CategoryBalance>,
}

impl BudgetOverview {
    /// Compute the overview
    ///
    /// Only expense groups get balance rows. Assignments to categories that
    /// are not in `groups` still reduce the unassigned amount.
    pub fn build(input: OverviewInput<'_>) -> Self {
        let activity = activity_by_category(input.transactions, &input.period.span);

        let mut sections = Vec::new();
        let mut totals = BalanceTotals::default();
        let mut balances = Vec::new();

        for group in input.groups.iter().filter(|g| !g.is_income()) {
            let mut section = GroupSection {
                group_id: group.id,
                name: group.name.clone(),
                rows: Vec::with_capacity(group.categories.len()),
                totals: BalanceTotals::default(),
            };

            for category in &group.categories {
                let lookup = |map: &HashMap<CategoryId, Money>| {
                    map.get(&category.id).copied().unwrap_or_default()
                };
                let balance = CategoryBalance::new(
                    category.id,
                    lookup(input.carryover),
                    lookup(input.assignments),
                    spent_from_activity(lookup(&activity)),
                );

                section.totals.add(&balance);
                totals.add(&balance);
                balances.push(balance);
                section.rows.push(BalanceRow {
                    name: category.name.clone(),
                    target: category.target_amount,
                    balance,
                });
            }

            sections.push(section);
        }

        let known: HashSet<CategoryId> = input
            .groups
            .iter()
            .flat_map(|g| g.categories.iter().map(|c| c.id))
            .collect();
        for category_id in input.assignments.keys().filter(|id| !known.contains(*id)) {
            warn!(category = %category_id, "assignment references unknown category");
        }

        let total_income = match input.income_basis {
            IncomeBasis::Expected => input.period.expected_income,
            IncomeBasis::Actual => actual_income(input.groups, &activity),
        };
        let unassigned = compute_unassigned(total_income, input.assignments);
        let status = BudgetStatus::from_unassigned(unassigned);
        let overspent = find_overspent(&balances);

        info!(
            period = %input.period,
            categories = balances.len(),
            overspent = overspent.len(),
            %unassigned,
            "built budget overview"
        );

        Self {
            period: input.period.clone(),
            sections,
            totals,
            total_income,
            unassigned,
            status,
            overspent,
        }
    }

    /// Every category balance in display order
    pub fn balances(&self) -> impl Iterator<Item = &CategoryBalance> {
        self.sections
            .iter()
            .flat_map(|s| s.rows.iter().map(|r| &r.balance))
    }

    /// Find the row for a category
    pub fn row(&self, category_id: CategoryId) -> Option<&BalanceRow> {
        self.sections
            .iter()
            .flat_map(|s| s.rows.iter())
            .find(|r| r.balance.category_id() == category_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AccountId, GroupKind, PeriodSpan, Split};
    use chrono::NaiveDate;

    fn dollars(d: i64) -> Money {
        Money::from_dollars(d)
    }

    struct Fixture {
        period: BudgetPeriod,
        groups: Vec<CategoryGroup>,
        paycheck: CategoryId,
        rent: CategoryId,
        food: CategoryId,
        fun: CategoryId,
    }

    fn fixture() -> Fixture {
        let period = BudgetPeriod::new(PeriodSpan::monthly(2025, 1)).with_expected_income(dollars(3000));

        let mut income = CategoryGroup::new("Income", GroupKind::Income);
        let paycheck = income.add_category("Paycheck");

        let mut bills = CategoryGroup::new("Bills", GroupKind::Expense);
        let rent = bills.add_category("Rent");

        let mut needs = CategoryGroup::new("Needs", GroupKind::Expense);
        let food = needs.add_category("Food");
        let fun = needs.add_category("Fun");

        Fixture {
            period,
            groups: vec![income, bills, needs],
            paycheck,
            rent,
            food,
            fun,
        }
    }

    #[test]
    fn test_overview_balances_and_unassigned() {
        let f = fixture();
        let account = AccountId::new();
        let day = NaiveDate::from_ymd_opt(2025, 1, 12).unwrap();

        let mut groceries_run = Transaction::new(account, day, dollars(-100));
        groceries_run.set_splits(vec![
            Split::new(Some(f.food), dollars(-80)),
            Split::new(Some(f.fun), dollars(-20)),
        ]);
        let transactions = vec![
            Transaction::categorized(account, day, dollars(2800), f.paycheck),
            Transaction::categorized(account, day, dollars(-1200), f.rent),
            groceries_run,
        ];

        let assignments = HashMap::from([(f.rent, dollars(1200)), (f.food, dollars(400))]);
        let carryover = HashMap::from([(f.food, dollars(50)), (f.fun, dollars(-5))]);

        let overview = BudgetOverview::build(OverviewInput {
            period: &f.period,
            groups: &f.groups,
            assignments: &assignments,
            carryover: &carryover,
            transactions: &transactions,
            income_basis: IncomeBasis::Expected,
        });

        assert_eq!(overview.sections.len(), 2);
        assert_eq!(overview.sections[0].name, "Bills");

        let food = overview.row(f.food).unwrap().balance;
        assert_eq!(food.available(), dollars(370)); // 50 + 400 - 80
        let fun = overview.row(f.fun).unwrap().balance;
        assert_eq!(fun.available(), dollars(-25));
        assert!(overview.row(f.paycheck).is_none());

        assert_eq!(overview.total_income, dollars(3000));
        assert_eq!(overview.unassigned, dollars(1400));
        assert_eq!(overview.status, BudgetStatus::Unbudgeted(dollars(1400)));
        assert_eq!(overview.overspent, vec![fun]);
        assert_eq!(overview.totals.spent, dollars(1300));
        assert_eq!(overview.sections[1].totals.assigned, dollars(400));
        assert_eq!(overview.balances().count(), 3);
    }

    #[test]
    fn test_actual_income_basis_reaches_complete() {
        let f = fixture();
        let day = NaiveDate::from_ymd_opt(2025, 1, 2).unwrap();
        let transactions = vec![Transaction::categorized(
            AccountId::new(),
            day,
            dollars(1600),
            f.paycheck,
        )];
        let assignments = HashMap::from([(f.rent, dollars(1200)), (f.food, dollars(400))]);
        let carryover = HashMap::new();

        let overview = BudgetOverview::build(OverviewInput {
            period: &f.period,
            groups: &f.groups,
            assignments: &assignments,
            carryover: &carryover,
            transactions: &transactions,
            income_basis: IncomeBasis::Actual,
        });

        assert_eq!(overview.total_income, dollars(1600));
        assert!(overview.status.is_complete());
    }

    #[test]
    fn test_unknown_assignment_still_counts() {
        let f = fixture();
        let assignments = HashMap::from([(CategoryId::new(), dollars(3000))]);
        let carryover = HashMap::new();

        let overview = BudgetOverview::build(OverviewInput {
            period: &f.period,
            groups: &f.groups,
            assignments: &assignments,
            carryover: &carryover,
            transactions: &[],
            income_basis: IncomeBasis::Expected,
        });

        assert!(overview.status.is_complete());
        assert!(overview.totals.assigned.is_zero());
    }

    #[test]
    fn test_income_basis_parse() {
        assert_eq!("Actual".parse::<IncomeBasis>().unwrap(), IncomeBasis::Actual);
        assert!("maybe".parse::<IncomeBasis>().is_err());
    }
}
