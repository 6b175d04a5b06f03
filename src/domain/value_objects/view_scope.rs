//! View Scope Value Object
//!
//! Selects the accounting level a query runs against: company-wide,
//! business-unit-wide or project-wide. The three ids are mutually
//! exclusive in intent; when several are set the first match wins
//! (company, then business unit, then project), and an empty scope
//! falls back to a caller-configured default company.

use serde::{Deserialize, Serialize};

/// Raw query scope as received from the transport layer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewScope {
    /// Company-wide view
    #[serde(default)]
    pub company_id: Option<String>,
    /// Business-unit-wide view
    #[serde(default)]
    pub business_unit_id: Option<String>,
    /// Project-wide view
    #[serde(default)]
    pub project_id: Option<String>,
}

/// A scope with the first-match-wins rule already applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedScope {
    Company(String),
    BusinessUnit(String),
    Project(String),
}

impl ViewScope {
    /// Company-wide scope
    pub fn company(id: impl Into<String>) -> Self {
        Self {
            company_id: Some(id.into()),
            ..Self::default()
        }
    }

    /// Business-unit-wide scope
    pub fn business_unit(id: impl Into<String>) -> Self {
        Self {
            business_unit_id: Some(id.into()),
            ..Self::default()
        }
    }

    /// Project-wide scope
    pub fn project(id: impl Into<String>) -> Self {
        Self {
            project_id: Some(id.into()),
            ..Self::default()
        }
    }

    /// Apply the first-match-wins rule, falling back to `default_company_id`
    pub fn resolve(&self, default_company_id: &str) -> ResolvedScope {
        if let Some(id) = &self.company_id {
            return ResolvedScope::Company(id.clone());
        }
        if let Some(id) = &self.business_unit_id {
            return ResolvedScope::BusinessUnit(id.clone());
        }
        if let Some(id) = &self.project_id {
            return ResolvedScope::Project(id.clone());
        }
        ResolvedScope::Company(default_company_id.to_string())
    }
}
