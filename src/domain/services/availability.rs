//! Allocatable-stock computation.
//!
//! Answers "how much of this project's stock can still be allocated" given
//! the demand already standing against it. Per year, the allocatable volume
//! is the pool rows' net availability minus that year's demand target;
//! allocated rows are excluded, they already left the pool.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::entities::{Demand, Stock};
use crate::domain::value_objects::Year;

/// One year's availability line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearlyAvailability {
    pub year: Year,
    /// Net available tons in the company-wide pool
    pub available: u64,
    /// Demand target standing against this year
    pub demand: u64,
    /// Tons still allocatable: `available - demand`, floored at zero
    pub allocatable: u64,
}

/// Per-year allocatable stock for a project
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockAvailability {
    years: Vec<YearlyAvailability>,
}

impl StockAvailability {
    /// Compute availability from a project's stock rows and standing demands
    ///
    /// `available` on a row already excludes active reservations (reserving
    /// decrements it), so no reservation arithmetic is repeated here.
    pub fn compute(stock: &[Stock], demands: &[Demand]) -> Self {
        let mut available_per_year: BTreeMap<Year, u64> = BTreeMap::new();
        for row in stock.iter().filter(|s| s.is_pool()) {
            *available_per_year.entry(row.vintage()).or_insert(0) += row.available();
        }

        let demand_per_year: BTreeMap<Year, u64> =
            demands.iter().map(|d| (d.year(), d.target())).collect();

        let years = available_per_year
            .into_iter()
            .map(|(year, available)| {
                let demand = demand_per_year.get(&year).copied().unwrap_or(0);
                YearlyAvailability {
                    year,
                    available,
                    demand,
                    allocatable: available.saturating_sub(demand),
                }
            })
            .collect();
        Self { years }
    }

    /// Availability lines in year order
    pub fn years(&self) -> &[YearlyAvailability] {
        &self.years
    }

    /// The line for one year, if the project has stock for it
    pub fn for_year(&self, year: Year) -> Option<&YearlyAvailability> {
        self.years.iter().find(|y| y.year == year)
    }

    /// Total tons still allocatable across all years
    pub fn total_allocatable(&self) -> u64 {
        self.years.iter().map(|y| y.allocatable).sum()
    }
}
