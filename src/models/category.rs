//! Category and CategoryGroup models
//!
//! Categories are organized into groups. A group is either an income group
//! (money arrives through it) or an expense group (money is assigned to and
//! spent from its categories).

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use super::ids::{CategoryGroupId, CategoryId};
use super::money::Money;

/// Whether a group's categories receive income or hold budgeted money
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GroupKind {
    Income,
    #[default]
    Expense,
}

impl fmt::Display for GroupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "Income"),
            Self::Expense => write!(f, "Expense"),
        }
    }
}

/// A budget category (e.g., "Groceries")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier
    pub id: CategoryId,

    /// Category name
    pub name: String,

    /// The group this category belongs to
    pub group_id: CategoryGroupId,

    /// Target amount to assign each month (optional)
    #[serde(default)]
    pub target_amount: Option<Money>,
}

impl Category {
    /// Create a new category
    pub fn new(name: impl Into<String>, group_id: CategoryGroupId) -> Self {
        Self {
            id: CategoryId::new(),
            name: name.into(),
            group_id,
            target_amount: None,
        }
    }

    /// Set the monthly target
    pub fn with_target(mut self, amount: Money) -> Self {
        self.target_amount = Some(amount);
        self
    }

    /// Validate the category
    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        validate_name(&self.name)?;

        if let Some(target) = self.target_amount {
            if target.is_negative() {
                return Err(CategoryValidationError::NegativeTarget);
            }
        }

        Ok(())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A group of related categories (e.g., "Bills", "Needs", "Paychecks")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryGroup {
    /// Unique identifier
    pub id: CategoryGroupId,

    /// Group name
    pub name: String,

    /// Income or expense
    #[serde(default)]
    pub kind: GroupKind,

    /// Categories in display order
    #[serde(default)]
    pub categories: Vec<Category>,
}

impl CategoryGroup {
    /// Create a new, empty category group
    pub fn new(name: impl Into<String>, kind: GroupKind) -> Self {
        Self {
            id: CategoryGroupId::new(),
            name: name.into(),
            kind,
            categories: Vec::new(),
        }
    }

    /// Append a category, moving it into this group
    pub fn push(&mut self, mut category: Category) -> CategoryId {
        category.group_id = self.id;
        let id = category.id;
        self.categories.push(category);
        id
    }

    /// Create a category by name at the end of this group
    pub fn add_category(&mut self, name: impl Into<String>) -> CategoryId {
        let group_id = self.id;
        self.push(Category::new(name, group_id))
    }

    /// Check whether this is an income group
    pub fn is_income(&self) -> bool {
        self.kind == GroupKind::Income
    }

    /// Look up a category in this group
    pub fn category(&self, id: CategoryId) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Validate the group and every category in it
    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        validate_name(&self.name)?;

        for category in &self.categories {
            category.validate()?;
            if category.group_id != self.id {
                return Err(CategoryValidationError::WrongGroup(category.name.clone()));
            }
        }

        Ok(())
    }
}

impl fmt::Display for CategoryGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Validate a full set of groups: each group is valid and no category
/// appears in more than one group
pub fn validate_groups(groups: &[CategoryGroup]) -> Result<(), CategoryValidationError> {
    let mut seen = HashSet::new();
    for group in groups {
        group.validate()?;
        for category in &group.categories {
            if !seen.insert(category.id) {
                return Err(CategoryValidationError::DuplicateMembership(
                    category.name.clone(),
                ));
            }
        }
    }
    Ok(())
}

fn validate_name(name: &str) -> Result<(), CategoryValidationError> {
    if name.trim().is_empty() {
        return Err(CategoryValidationError::EmptyName);
    }

    if name.len() > 50 {
        return Err(CategoryValidationError::NameTooLong(name.len()));
    }

    Ok(())
}

/// Validation errors for categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyName,
    NameTooLong(usize),
    NegativeTarget,
    WrongGroup(String),
    DuplicateMembership(String),
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Category name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Category name too long ({} chars, max 50)", len)
            }
            Self::NegativeTarget => write!(f, "Target amount cannot be negative"),
            Self::WrongGroup(name) => {
                write!(f, "Category '{}' does not point at its group", name)
            }
            Self::DuplicateMembership(name) => {
                write!(f, "Category '{}' belongs to more than one group", name)
            }
        }
    }
}

impl std::error::Error for CategoryValidationError {}
