//! AllocationRepository port.
//!
//! Allocations are append-only; the port offers no update or delete.

use crate::domain::entities::Allocation;
use crate::error::LedgerResult;

/// Abstract repository for the append-only allocation ledger
pub trait AllocationRepository {
    /// Append an allocation
    fn save(&self, allocation: Allocation) -> LedgerResult<()>;

    /// All allocations against a project, oldest first
    fn by_project(&self, project_id: &str) -> LedgerResult<Vec<Allocation>>;

    /// All allocations held by a business unit, oldest first
    fn by_business_unit(&self, business_unit_id: &str) -> LedgerResult<Vec<Allocation>>;
}
