//! Vintage Year Value Object
//!
//! A validated calendar year used to key vintages, demands and
//! compensation records. The persisted store historically kept years as
//! strings, so parsing from the string form is part of the contract.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Calendar year of a vintage or demand entry
///
/// Immutable value object; ordering follows the calendar.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Year(u16);

impl Year {
    /// Create a new year
    pub const fn new(year: u16) -> Self {
        Self(year)
    }

    /// Get the raw year value
    pub fn value(&self) -> u16 {
        self.0
    }

    /// The year immediately after this one
    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u16> for Year {
    fn from(year: u16) -> Self {
        Self(year)
    }
}

impl FromStr for Year {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<u16>().map(Self)
    }
}
