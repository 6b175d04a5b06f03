//! Allocation entity.
//!
//! An allocation commits a quantity of a project's stock to a business
//! unit at a date. The ledger of allocations is append-only: corrections
//! are recorded as new allocations, history is never rewritten.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A committed assignment of project stock to a business unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    id: String,
    project_id: String,
    business_unit_id: String,
    quantity: u64,
    date: DateTime<Utc>,
}

impl Allocation {
    pub fn new(
        id: impl Into<String>,
        project_id: impl Into<String>,
        business_unit_id: impl Into<String>,
        quantity: u64,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            project_id: project_id.into(),
            business_unit_id: business_unit_id.into(),
            quantity,
            date,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn business_unit_id(&self) -> &str {
        &self.business_unit_id
    }

    pub fn quantity(&self) -> u64 {
        self.quantity
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }
}
