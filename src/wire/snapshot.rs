//! Budget snapshot documents
//!
//! A snapshot is everything needed to compute one period's balances:
//! the period, the category tree, assignments, carryover and the
//! period's transactions. It is read from a JSON file and normalized into
//! [`BudgetSnapshot`].

use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{TransactionDto, WireAmount};
use crate::error::{EnvelopeError, EnvelopeResult};
use crate::models::category::validate_groups;
use crate::models::{
    Assignment, BudgetPeriod, BudgetPeriodId, Category, CategoryGroup, CategoryGroupId, CategoryId,
    GroupKind, Money, PeriodSpan, Transaction,
};
use crate::services::overview::{BudgetOverview, IncomeBasis, OverviewInput};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodDocument {
    #[serde(default)]
    pub id: Option<BudgetPeriodId>,
    /// "2025-01", "2025-W03" or "2025-01-01..2025-01-15"
    pub span: String,
    #[serde(default, alias = "expected_income")]
    pub expected_income: Option<WireAmount>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDocument {
    #[serde(default)]
    pub id: Option<CategoryId>,
    pub name: String,
    #[serde(default, alias = "target_amount")]
    pub target_amount: Option<WireAmount>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupDocument {
    #[serde(default)]
    pub id: Option<CategoryGroupId>,
    pub name: String,
    #[serde(default, alias = "type")]
    pub kind: GroupKind,
    #[serde(default)]
    pub categories: Vec<CategoryDocument>,
}

/// The snapshot exactly as stored in JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotDocument {
    pub period: PeriodDocument,
    #[serde(default)]
    pub groups: Vec<GroupDocument>,
    /// Category id -> assigned amount
    #[serde(default)]
    pub assignments: HashMap<String, WireAmount>,
    /// Category id -> carryover from the previous period
    #[serde(default)]
    pub carryover: HashMap<String, WireAmount>,
    #[serde(default)]
    pub transactions: Vec<TransactionDto>,
}

/// A normalized snapshot, ready for the balance calculations
#[derive(Debug, Clone)]
pub struct BudgetSnapshot {
    pub period: BudgetPeriod,
    pub groups: Vec<CategoryGroup>,
    pub assignments: HashMap<CategoryId, Money>,
    pub carryover: HashMap<CategoryId, Money>,
    pub transactions: Vec<Transaction>,
}

impl BudgetSnapshot {
    /// Parse and normalize a snapshot from JSON text
    pub fn from_json(json: &str) -> EnvelopeResult<Self> {
        let document: SnapshotDocument = serde_json::from_str(json)?;
        Self::try_from(document)
    }

    /// Assignments as model values for this snapshot's period
    pub fn assignment_list(&self) -> Vec<Assignment> {
        let mut list: Vec<Assignment> = self
            .assignments
            .iter()
            .map(|(category_id, amount)| Assignment::new(*category_id, self.period.id, *amount))
            .collect();
        list.sort_by_key(|a| a.category_id);
        list
    }

    /// Compute the overview for this snapshot
    pub fn overview(&self, income_basis: IncomeBasis) -> BudgetOverview {
        BudgetOverview::build(OverviewInput {
            period: &self.period,
            groups: &self.groups,
            assignments: &self.assignments,
            carryover: &self.carryover,
            transactions: &self.transactions,
            income_basis,
        })
    }
}

impl TryFrom<SnapshotDocument> for BudgetSnapshot {
    type Error = EnvelopeError;

    fn try_from(document: SnapshotDocument) -> EnvelopeResult<Self> {
        let span = PeriodSpan::parse(&document.period.span)
            .map_err(|e| EnvelopeError::Parse(e.to_string()))?;
        let mut period = BudgetPeriod::new(span);
        if let Some(id) = document.period.id {
            period.id = id;
        }
        if let Some(income) = &document.period.expected_income {
            period.expected_income = income.to_money()?;
        }

        let groups = document
            .groups
            .into_iter()
            .map(normalize_group)
            .collect::<EnvelopeResult<Vec<_>>>()?;
        validate_groups(&groups).map_err(|e| EnvelopeError::Validation(e.to_string()))?;

        let assignments = normalize_amounts(&document.assignments)?;
        for (category_id, amount) in &assignments {
            Assignment::new(*category_id, period.id, *amount)
                .validate()
                .map_err(|e| EnvelopeError::Validation(format!("{}: {}", category_id, e)))?;
        }
        let carryover = normalize_amounts(&document.carryover)?;

        let transactions = document
            .transactions
            .into_iter()
            .map(TransactionDto::into_transaction)
            .collect::<EnvelopeResult<Vec<_>>>()?;

        let snapshot = Self {
            period,
            groups,
            assignments,
            carryover,
            transactions,
        };
        snapshot.warn_dangling_references();
        Ok(snapshot)
    }
}

impl BudgetSnapshot {
    fn warn_dangling_references(&self) {
        let known: HashSet<CategoryId> = self
            .groups
            .iter()
            .flat_map(|g| g.categories.iter().map(|c| c.id))
            .collect();

        for txn in &self.transactions {
            for (category_id, _) in txn.allocations() {
                if let Some(id) = category_id.filter(|id| !known.contains(id)) {
                    warn!(transaction = %txn.id, category = %id, "transaction references unknown category");
                }
            }
        }

        for id in self.carryover.keys().filter(|id| !known.contains(*id)) {
            warn!(category = %id, "carryover references unknown category");
        }
    }
}

fn normalize_group(document: GroupDocument) -> EnvelopeResult<CategoryGroup> {
    let mut group = CategoryGroup::new(document.name, document.kind);
    if let Some(id) = document.id {
        group.id = id;
    }

    for category in document.categories {
        let mut normalized = Category::new(category.name, group.id);
        if let Some(id) = category.id {
            normalized.id = id;
        }
        if let Some(target) = &category.target_amount {
            normalized.target_amount = Some(target.to_money()?);
        }
        group.push(normalized);
    }

    Ok(group)
}

fn normalize_amounts(raw: &HashMap<String, WireAmount>) -> EnvelopeResult<HashMap<CategoryId, Money>> {
    raw.iter()
        .map(|(key, amount)| -> EnvelopeResult<(CategoryId, Money)> {
            let id = CategoryId::parse(key)
                .map_err(|_| EnvelopeError::Parse(format!("Invalid category id: {}", key)))?;
            Ok((id, amount.to_money()?))
        })
        .collect()
}

/// Read a snapshot file, failing if it does not exist
pub fn read_snapshot<P: AsRef<Path>>(path: P) -> EnvelopeResult<BudgetSnapshot> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(EnvelopeError::Io(format!(
            "Snapshot not found: {}",
            path.display()
        )));
    }

    let file = File::open(path)
        .map_err(|e| EnvelopeError::Io(format!("Failed to open {}: {}", path.display(), e)))?;

    let document: SnapshotDocument = serde_json::from_reader(BufReader::new(file))
        .map_err(|e| EnvelopeError::Json(format!("Failed to parse {}: {}", path.display(), e)))?;

    debug!(path = %path.display(), "loaded budget snapshot");
    BudgetSnapshot::try_from(document)
}
