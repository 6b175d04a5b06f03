//! Project entity.
//!
//! A project is a carbon-credit-generating venture (a forest restoration,
//! a direct-air-capture plant, ...). It exclusively owns its vintage
//! ledger; nothing else writes vintages.

use serde::{Deserialize, Serialize};

use crate::domain::entities::{Vintage, VintageLedger};
use crate::error::{LedgerError, LedgerResult};

/// What kind of credits the project generates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectType {
    Restoration,
    Conservation,
    DirectAirCapture,
    Biochar,
    Solar,
}

/// How the company sources the project's credits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectOrigin {
    /// Financed upfront, credits delivered as the project matures
    ForwardFinance,
    /// Bought on the spot from already-issued supply
    DirectPurchase,
}

/// Display color used by reporting dashboards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectColor {
    Green,
    Blue,
    Orange,
    Grey,
}

/// A carbon-credit-generating entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    id: String,
    name: String,
    slug: String,
    description: String,
    project_type: ProjectType,
    origin: ProjectOrigin,
    color: ProjectColor,
    /// Protected or exploited area, in hectares
    area: u64,
    /// Upfront funding committed, in cents
    funding_amount: u64,
    company_id: String,
    ledger: VintageLedger,
}

impl Project {
    /// Create a project with an empty vintage ledger
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        slug: impl Into<String>,
        description: impl Into<String>,
        project_type: ProjectType,
        origin: ProjectOrigin,
        color: ProjectColor,
        area: u64,
        funding_amount: u64,
        company_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            slug: slug.into(),
            description: description.into(),
            project_type,
            origin,
            color,
            area,
            funding_amount,
            company_id: company_id.into(),
            ledger: VintageLedger::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn project_type(&self) -> ProjectType {
        self.project_type
    }

    pub fn origin(&self) -> ProjectOrigin {
        self.origin
    }

    pub fn color(&self) -> ProjectColor {
        self.color
    }

    pub fn area(&self) -> u64 {
        self.area
    }

    pub fn funding_amount(&self) -> u64 {
        self.funding_amount
    }

    pub fn company_id(&self) -> &str {
        &self.company_id
    }

    pub fn ledger(&self) -> &VintageLedger {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut VintageLedger {
        &mut self.ledger
    }

    /// Record a freshly issued vintage for this project
    pub fn add_vintage(&mut self, vintage: Vintage) -> LedgerResult<()> {
        self.ledger.add(vintage).map_err(|err| match err {
            LedgerError::DuplicateVintage { year, .. } => LedgerError::DuplicateVintage {
                project_id: self.id.clone(),
                year,
            },
            other => other,
        })
    }
}
