//! Vintage entity and per-project vintage ledger.
//!
//! A vintage is one calendar year's issuance of credits for a project.
//! The ledger keys vintages by year and refuses any mutation that would
//! leave a vintage holding more available tons than its capacity.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::Year;
use crate::error::{LedgerError, LedgerResult};

/// One calendar year's issuance for a project
///
/// Invariants: `available <= capacity`, `purchased <= capacity` and
/// `available + purchased <= capacity`. Constructed through [`Vintage::new`]
/// which rejects violating inputs; mutations go through the ledger so a
/// rejected change never leaves partial state behind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vintage {
    id: String,
    year: Year,
    /// Total tons issuable for this year
    capacity: u64,
    /// Tons not yet purchased or reserved
    available: u64,
    /// Tons bought by the company ahead of issuance
    purchased: u64,
    /// Price paid for the forward-purchased tons, in cents per ton
    purchased_price: u64,
    /// Price at issuance, in cents per ton
    issued_price: u64,
}

impl Vintage {
    /// Create a vintage with `available` initialized to full capacity
    pub fn new(id: impl Into<String>, year: Year, capacity: u64) -> Self {
        Self {
            id: id.into(),
            year,
            capacity,
            available: capacity,
            purchased: 0,
            purchased_price: 0,
            issued_price: 0,
        }
    }

    /// Create a vintage with part of the capacity already forward-purchased
    ///
    /// The purchased volume is carved out of `available` at creation time.
    pub fn with_forward_purchase(
        id: impl Into<String>,
        year: Year,
        capacity: u64,
        purchased: u64,
        purchased_price: u64,
    ) -> LedgerResult<Self> {
        if purchased > capacity {
            return Err(LedgerError::conflict(format!(
                "vintage {year}: purchased {purchased}t exceeds capacity {capacity}t"
            )));
        }
        Ok(Self {
            id: id.into(),
            year,
            capacity,
            available: capacity - purchased,
            purchased,
            purchased_price,
            issued_price: 0,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn year(&self) -> Year {
        self.year
    }

    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    pub fn available(&self) -> u64 {
        self.available
    }

    pub fn purchased(&self) -> u64 {
        self.purchased
    }

    pub fn purchased_price(&self) -> u64 {
        self.purchased_price
    }

    pub fn issued_price(&self) -> u64 {
        self.issued_price
    }

    /// Set the issuance price, in cents per ton
    pub fn set_issued_price(&mut self, price: u64) {
        self.issued_price = price;
    }

    /// Take `quantity` tons out of availability
    pub fn draw(&mut self, quantity: u64) -> LedgerResult<()> {
        if quantity > self.available {
            return Err(LedgerError::InsufficientStock {
                stock_id: self.id.clone(),
                requested: quantity,
                available: self.available,
            });
        }
        self.available -= quantity;
        Ok(())
    }

    /// Return `quantity` tons to availability
    pub fn restore(&mut self, quantity: u64) -> LedgerResult<()> {
        let restored = self.available.saturating_add(quantity);
        if restored + self.purchased > self.capacity {
            return Err(LedgerError::conflict(format!(
                "vintage {}: restoring {quantity}t would exceed capacity {}t",
                self.year, self.capacity
            )));
        }
        self.available = restored;
        Ok(())
    }

    fn check(&self) -> LedgerResult<()> {
        if self.available + self.purchased > self.capacity || self.purchased > self.capacity {
            return Err(LedgerError::conflict(format!(
                "vintage {}: available {}t + purchased {}t exceeds capacity {}t",
                self.year, self.available, self.purchased, self.capacity
            )));
        }
        Ok(())
    }
}

/// Per-project collection of vintages, keyed by year
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VintageLedger {
    vintages: BTreeMap<Year, Vintage>,
}

impl VintageLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a vintage; each year appears at most once
    pub fn add(&mut self, vintage: Vintage) -> LedgerResult<()> {
        vintage.check()?;
        if self.vintages.contains_key(&vintage.year()) {
            return Err(LedgerError::DuplicateVintage {
                project_id: String::new(),
                year: vintage.year(),
            });
        }
        self.vintages.insert(vintage.year(), vintage);
        Ok(())
    }

    /// Look up the vintage for a year
    pub fn get(&self, year: Year) -> LedgerResult<&Vintage> {
        self.vintages
            .get(&year)
            .ok_or_else(|| LedgerError::not_found("vintage", year.to_string()))
    }

    /// Apply a mutation to one vintage, committing only if it upholds the
    /// capacity invariant; on failure the ledger is left untouched.
    pub fn with_vintage_mut<T>(
        &mut self,
        year: Year,
        f: impl FnOnce(&mut Vintage) -> LedgerResult<T>,
    ) -> LedgerResult<T> {
        let current = self
            .vintages
            .get(&year)
            .ok_or_else(|| LedgerError::not_found("vintage", year.to_string()))?;
        let mut candidate = current.clone();
        let out = f(&mut candidate)?;
        candidate.check()?;
        self.vintages.insert(year, candidate);
        Ok(out)
    }

    /// All vintages in year order
    pub fn iter(&self) -> impl Iterator<Item = &Vintage> {
        self.vintages.values()
    }

    /// Number of vintages
    pub fn len(&self) -> usize {
        self.vintages.len()
    }

    /// True when no vintage has been issued yet
    pub fn is_empty(&self) -> bool {
        self.vintages.is_empty()
    }

    /// Total issuable tons across all years
    pub fn total_capacity(&self) -> u64 {
        self.vintages.values().map(Vintage::capacity).sum()
    }

    /// Total unconsumed, unreserved tons across all years
    pub fn total_available(&self) -> u64 {
        self.vintages.values().map(Vintage::available).sum()
    }
}
