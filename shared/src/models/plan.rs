//! Plan Model
//!
//! The plan catalog is static configuration: a built-in default, or a JSON
//! file supplied at startup. Members store the plan *name*, so editing the
//! catalog never rewrites existing members.

use std::collections::HashSet;
use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Plan catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub id: i64,
    /// Unique within a catalog
    pub name: String,
    /// Length of one membership period, in calendar days
    pub duration: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

impl Plan {
    pub fn new(id: i64, name: impl Into<String>, duration: u32, price: Decimal) -> Self {
        Self {
            id,
            name: name.into(),
            duration,
            price,
        }
    }
}

/// Plan catalog errors
#[derive(Debug, thiserror::Error)]
pub enum PlanCatalogError {
    #[error("plan catalog is empty")]
    Empty,

    #[error("plan {0} has a blank name")]
    BlankName(i64),

    #[error("duplicate plan name: {0}")]
    DuplicateName(String),

    #[error("plan '{0}' has a negative price")]
    NegativePrice(String),

    #[error("failed to read plan catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse plan catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Ordered, name-unique set of plans
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PlanCatalog {
    plans: Vec<Plan>,
}

impl PlanCatalog {
    /// Build a catalog, rejecting blank or duplicate names and negative prices
    pub fn new(plans: Vec<Plan>) -> Result<Self, PlanCatalogError> {
        if plans.is_empty() {
            return Err(PlanCatalogError::Empty);
        }

        let mut seen = HashSet::new();
        for plan in &plans {
            if plan.name.trim().is_empty() {
                return Err(PlanCatalogError::BlankName(plan.id));
            }
            if plan.price.is_sign_negative() && !plan.price.is_zero() {
                return Err(PlanCatalogError::NegativePrice(plan.name.clone()));
            }
            if !seen.insert(plan.name.as_str()) {
                return Err(PlanCatalogError::DuplicateName(plan.name.clone()));
            }
        }

        Ok(Self { plans })
    }

    /// Parse a JSON array of plans
    pub fn from_json_str(json: &str) -> Result<Self, PlanCatalogError> {
        let plans: Vec<Plan> = serde_json::from_str(json)?;
        Self::new(plans)
    }

    /// Load a JSON array of plans from disk
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, PlanCatalogError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn plans(&self) -> &[Plan] {
        &self.plans
    }

    /// Exact, case-sensitive name lookup
    pub fn find_by_name(&self, name: &str) -> Option<&Plan> {
        self.plans.iter().find(|p| p.name == name)
    }
}

impl Default for PlanCatalog {
    /// Monthly / Quarterly / 6 Months / Yearly
    fn default() -> Self {
        Self {
            plans: vec![
                Plan::new(1, "Monthly", 30, Decimal::from(1000)),
                Plan::new(2, "Quarterly", 90, Decimal::from(2500)),
                Plan::new(3, "6 Months", 180, Decimal::from(4000)),
                Plan::new(4, "Yearly", 365, Decimal::from(8000)),
            ],
        }
    }
}
