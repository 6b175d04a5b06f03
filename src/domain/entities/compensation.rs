//! Effective compensation entity.
//!
//! Actual tons retired for a vintage-year at some scope (company, business
//! unit or project). Aggregation queries that find no record for a year use
//! the zero sentinel rather than failing.

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::Year;

/// Actual tons retired for one vintage-year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectiveCompensation {
    vintage: Year,
    /// Tons retired
    compensation: u64,
}

impl EffectiveCompensation {
    pub fn new(vintage: Year, compensation: u64) -> Self {
        Self {
            vintage,
            compensation,
        }
    }

    /// Zero sentinel used when no record exists for a queried year
    pub fn sentinel(vintage: Year) -> Self {
        Self::new(vintage, 0)
    }

    pub fn vintage(&self) -> Year {
        self.vintage
    }

    pub fn compensation(&self) -> u64 {
        self.compensation
    }
}

/// Pick the record for `year` out of a yearly series, defaulting to zero
pub fn compensation_for_year(
    series: &[EffectiveCompensation],
    year: Year,
) -> EffectiveCompensation {
    series
        .iter()
        .copied()
        .find(|c| c.vintage() == year)
        .unwrap_or_else(|| EffectiveCompensation::sentinel(year))
}
