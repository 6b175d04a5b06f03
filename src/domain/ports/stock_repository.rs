//! StockRepository port - abstraction for stock persistence.
//!
//! The ledger is the sole writer of stock mutation; everything behind this
//! trait must keep `reserve`, `release` and `consume` atomic with their
//! availability checks (row lock or compare-and-swap). Snapshot queries may
//! run at weaker isolation: they are projections, not the source of truth.

use crate::domain::entities::{Demand, Reservation, Stock, StockAndReservations};
use crate::domain::services::StockAvailability;
use crate::domain::value_objects::Year;
use crate::error::LedgerResult;

/// Abstract repository for stock rows and their reservations
pub trait StockRepository {
    /// Stock rows of a project for one vintage year
    fn find_project_stock_for_vintage(
        &self,
        project_id: &str,
        vintage: Year,
    ) -> LedgerResult<Vec<Stock>>;

    /// Stock rows carved out for a business unit, restricted to the given
    /// allocations
    fn find_allocated_stock_by_vintage(
        &self,
        business_unit_id: &str,
        allocation_ids: &[String],
    ) -> LedgerResult<Vec<Stock>>;

    /// All stock of a company's projects, with reservations, in one read
    fn find_company_stock(&self, company_id: &str) -> LedgerResult<StockAndReservations>;

    /// All stock allocated to a business unit, with reservations
    fn find_business_unit_stock(
        &self,
        business_unit_id: &str,
    ) -> LedgerResult<StockAndReservations>;

    /// All stock of a project, with reservations
    fn find_project_stock(&self, project_id: &str) -> LedgerResult<StockAndReservations>;

    /// Upsert stock rows; fails with `Conflict` when a row would violate
    /// the quantity invariant
    fn save(&self, stock: &[Stock]) -> LedgerResult<()>;

    /// Place a hold on a stock row, atomically with the availability check
    fn reserve(&self, stock_id: &str, quantity: u64) -> LedgerResult<Reservation>;

    /// Reverse an active hold, restoring its quantity
    fn release(&self, reservation_id: &str) -> LedgerResult<()>;

    /// Convert an active hold into permanent retirement
    fn consume(&self, reservation_id: &str) -> LedgerResult<()>;

    /// Per-year allocatable stock for a project given standing demands
    fn available_to_allocate(
        &self,
        project_id: &str,
        demands: &[Demand],
    ) -> LedgerResult<StockAvailability>;

    /// Carve `quantity` tons out of the project's pool rows for an
    /// allocation, oldest vintage first
    ///
    /// The availability check and the split run in the same transaction;
    /// a concurrent caller can never over-commit the pool. Fails with
    /// `OverAllocation` when `quantity` exceeds the allocatable total for
    /// the given demands. Returns the rows created for the business unit.
    fn allocate(
        &self,
        project_id: &str,
        business_unit_id: &str,
        allocation_id: &str,
        quantity: u64,
        demands: &[Demand],
    ) -> LedgerResult<Vec<Stock>>;
}
