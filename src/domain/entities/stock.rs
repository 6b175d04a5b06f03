//! Stock and reservation entities.
//!
//! Stock is the tradable face of a vintage: one row per (project, year) at
//! materialization, further rows appearing when an allocation carves credits
//! out of the company-wide pool. Reservations are holds against a row's
//! availability; they are soft-deleted so the audit trail survives.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::Vintage;
use crate::domain::value_objects::Year;
use crate::error::{LedgerError, LedgerResult};

/// Tradable credits for one (project, vintage-year), company pool or allocated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stock {
    id: String,
    project_id: String,
    vintage: Year,
    /// Total tons this row accounts for
    quantity: u64,
    /// Tons not reserved or consumed
    available: u64,
    /// Tons permanently retired; monotone non-decreasing
    consumed: u64,
    /// Tons forward-purchased before issuance
    purchased: u64,
    /// Cents per ton paid for the forward purchase
    purchased_price: u64,
    /// Cents per ton at issuance
    issued_price: u64,
    /// Set when this row was carved out of the pool for a business unit
    business_unit_id: Option<String>,
    /// The allocation that carved this row out
    allocation_id: Option<String>,
}

impl Stock {
    /// Materialize the stock row for a freshly issued vintage (1:1)
    pub fn from_vintage(id: impl Into<String>, project_id: impl Into<String>, vintage: &Vintage) -> Self {
        Self {
            id: id.into(),
            project_id: project_id.into(),
            vintage: vintage.year(),
            quantity: vintage.capacity(),
            available: vintage.available(),
            consumed: 0,
            purchased: vintage.purchased(),
            purchased_price: vintage.purchased_price(),
            issued_price: vintage.issued_price(),
            business_unit_id: None,
            allocation_id: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn vintage(&self) -> Year {
        self.vintage
    }

    pub fn quantity(&self) -> u64 {
        self.quantity
    }

    pub fn available(&self) -> u64 {
        self.available
    }

    pub fn consumed(&self) -> u64 {
        self.consumed
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

    pub fn business_unit_id(&self) -> Option<&str> {
        self.business_unit_id.as_deref()
    }

    pub fn allocation_id(&self) -> Option<&str> {
        self.allocation_id.as_deref()
    }

    /// True while the row still belongs to the company-wide pool
    pub fn is_pool(&self) -> bool {
        self.business_unit_id.is_none() && self.allocation_id.is_none()
    }

    /// Take `quantity` tons out of availability for a reservation
    pub(crate) fn draw(&mut self, quantity: u64) -> LedgerResult<()> {
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

    /// Return `quantity` previously drawn tons to availability
    pub(crate) fn restore(&mut self, quantity: u64) {
        self.available += quantity;
    }

    /// Permanently retire `quantity` previously drawn tons
    pub(crate) fn retire(&mut self, quantity: u64) {
        self.consumed += quantity;
    }

    /// Carve `quantity` tons out of this pool row into a new row owned by a
    /// business unit. Only untouched (unreserved, unconsumed) tons can move.
    pub fn split_for_allocation(
        &mut self,
        new_id: impl Into<String>,
        business_unit_id: impl Into<String>,
        allocation_id: impl Into<String>,
        quantity: u64,
    ) -> LedgerResult<Stock> {
        if !self.is_pool() {
            return Err(LedgerError::conflict(format!(
                "stock {} is already allocated",
                self.id
            )));
        }
        if quantity > self.available {
            return Err(LedgerError::InsufficientStock {
                stock_id: self.id.clone(),
                requested: quantity,
                available: self.available,
            });
        }
        self.available -= quantity;
        self.quantity -= quantity;
        Ok(Stock {
            id: new_id.into(),
            project_id: self.project_id.clone(),
            vintage: self.vintage,
            quantity,
            available: quantity,
            consumed: 0,
            purchased: 0,
            purchased_price: self.purchased_price,
            issued_price: self.issued_price,
            business_unit_id: Some(business_unit_id.into()),
            allocation_id: Some(allocation_id.into()),
        })
    }

    /// Verify `consumed + available + reserved <= quantity` for this row
    pub fn check(&self, active_reserved: u64) -> LedgerResult<()> {
        let accounted = self
            .consumed
            .saturating_add(self.available)
            .saturating_add(active_reserved);
        if accounted > self.quantity {
            return Err(LedgerError::conflict(format!(
                "stock {}: consumed {}t + available {}t + reserved {}t exceeds quantity {}t",
                self.id, self.consumed, self.available, active_reserved, self.quantity
            )));
        }
        Ok(())
    }
}

/// Lifecycle of a hold against stock availability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    /// Counts against availability
    Active,
    /// Reversed; quantity went back to the pool
    Released,
    /// Converted into permanent retirement
    Consumed,
}

/// A hold placed on a stock row for a quantity of tons
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    id: String,
    stock_id: String,
    quantity: u64,
    status: ReservationStatus,
    created_at: DateTime<Utc>,
}

impl Reservation {
    /// Open a new active reservation
    pub fn new(
        id: impl Into<String>,
        stock_id: impl Into<String>,
        quantity: u64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            stock_id: stock_id.into(),
            quantity,
            status: ReservationStatus::Active,
            created_at,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn stock_id(&self) -> &str {
        &self.stock_id
    }

    pub fn quantity(&self) -> u64 {
        self.quantity
    }

    pub fn status(&self) -> ReservationStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn is_active(&self) -> bool {
        self.status == ReservationStatus::Active
    }

    pub(crate) fn mark_released(&mut self) {
        self.status = ReservationStatus::Released;
    }

    pub(crate) fn mark_consumed(&mut self) {
        self.status = ReservationStatus::Consumed;
    }
}

/// Sum of active holds against one stock row
pub fn active_reserved(reservations: &[Reservation], stock_id: &str) -> u64 {
    reservations
        .iter()
        .filter(|r| r.stock_id() == stock_id && r.is_active())
        .map(Reservation::quantity)
        .sum()
}

/// Stock rows with the reservations held against them, captured in one read
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockAndReservations {
    pub stock: Vec<Stock>,
    pub reservations: Vec<Reservation>,
}

impl StockAndReservations {
    /// Net availability across the snapshot
    pub fn total_available(&self) -> u64 {
        self.stock.iter().map(Stock::available).sum()
    }

    /// Permanently retired tons across the snapshot
    pub fn total_consumed(&self) -> u64 {
        self.stock.iter().map(Stock::consumed).sum()
    }
}
