//! Business unit, demand and company entities.
//!
//! Business units are the buyer side of the ledger: cost centers carrying
//! yearly emission figures and reduction targets. A company's demand for a
//! year is the element-wise sum of its business units' demands.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::Year;

/// One year's target/emission figures for a business unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Demand {
    year: Year,
    /// Tons emitted
    emission: u64,
    /// Tons to offset
    target: u64,
}

impl Demand {
    pub fn new(year: Year, emission: u64, target: u64) -> Self {
        Self {
            year,
            emission,
            target,
        }
    }

    /// Zero sentinel used when no demand exists for a queried year
    pub fn sentinel(year: Year) -> Self {
        Self::new(year, 0, 0)
    }

    pub fn year(&self) -> Year {
        self.year
    }

    pub fn emission(&self) -> u64 {
        self.emission
    }

    pub fn target(&self) -> u64 {
        self.target
    }
}

/// An ordered descriptive tag on a business unit (`{key, value}`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataTag {
    pub key: String,
    pub value: String,
}

impl MetadataTag {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Buyer-side cost center
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessUnit {
    id: String,
    name: String,
    description: String,
    /// Yearly emission assumed when no explicit demand exists
    default_emission: u64,
    /// Yearly target assumed when no explicit demand exists
    default_target: u64,
    /// Carried-over unmet tons from previous accounting periods
    debt: u64,
    company_id: String,
    metadata: Vec<MetadataTag>,
    demands: Vec<Demand>,
}

impl BusinessUnit {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        default_emission: u64,
        default_target: u64,
        debt: u64,
        company_id: impl Into<String>,
        metadata: Vec<MetadataTag>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            default_emission,
            default_target,
            debt,
            company_id: company_id.into(),
            metadata,
            demands: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn default_emission(&self) -> u64 {
        self.default_emission
    }

    pub fn default_target(&self) -> u64 {
        self.default_target
    }

    pub fn debt(&self) -> u64 {
        self.debt
    }

    pub fn company_id(&self) -> &str {
        &self.company_id
    }

    pub fn metadata(&self) -> &[MetadataTag] {
        &self.metadata
    }

    /// Explicit yearly demands, in year order
    pub fn demands(&self) -> &[Demand] {
        &self.demands
    }

    /// Record or replace the demand for one year
    pub fn set_demand(&mut self, demand: Demand) {
        match self.demands.iter_mut().find(|d| d.year() == demand.year()) {
            Some(existing) => *existing = demand,
            None => {
                self.demands.push(demand);
                self.demands.sort_by_key(Demand::year);
            }
        }
    }

    /// The explicit demand for a year, if any
    pub fn demand_for(&self, year: Year) -> Option<Demand> {
        self.demands.iter().copied().find(|d| d.year() == year)
    }

    /// Seed demand rows from the unit's defaults for every listed year that
    /// has no explicit figures yet
    pub fn fill_demands(&mut self, years: impl IntoIterator<Item = Year>) {
        for year in years {
            if self.demand_for(year).is_none() {
                self.set_demand(Demand::new(year, self.default_emission, self.default_target));
            }
        }
    }
}

/// The accounting root owning business units
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    id: String,
    name: String,
    slug: String,
}

impl Company {
    pub fn new(id: impl Into<String>, name: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            slug: slug.into(),
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

    /// Element-wise merge of the units' demands: per year, `target` and
    /// `emission` are summed across every unit that has a row for it.
    pub fn merge_demands(business_units: &[BusinessUnit]) -> Vec<Demand> {
        let mut merged: BTreeMap<Year, (u64, u64)> = BTreeMap::new();
        for unit in business_units {
            for demand in unit.demands() {
                let entry = merged.entry(demand.year()).or_insert((0, 0));
                entry.0 += demand.emission();
                entry.1 += demand.target();
            }
        }
        merged
            .into_iter()
            .map(|(year, (emission, target))| Demand::new(year, emission, target))
            .collect()
    }
}
