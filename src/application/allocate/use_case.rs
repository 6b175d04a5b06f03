//! Allocate Use Case
//!
//! Commits a quantity of a project's pool stock to a business unit:
//! 1. Carve the quantity out of the pool (availability check and split in
//!    one transaction, see the stock port)
//! 2. Append the allocation record
//!
//! Allocations are never mutated; a correction is a new allocation.

use chrono::{DateTime, Utc};
use tracing::info;

use crate::domain::entities::{Allocation, Demand};
use crate::domain::ports::{AllocationRepository, IdGenerator, StockRepository};
use crate::error::LedgerResult;

use super::result::AllocateResult;

/// Allocation engine - links business units to project stock over time
pub struct AllocateUseCase<SR, AR, G>
where
    SR: StockRepository,
    AR: AllocationRepository,
    G: IdGenerator,
{
    stock_repo: SR,
    allocation_repo: AR,
    id_gen: G,
}

impl<SR, AR, G> AllocateUseCase<SR, AR, G>
where
    SR: StockRepository,
    AR: AllocationRepository,
    G: IdGenerator,
{
    pub fn new(stock_repo: SR, allocation_repo: AR, id_gen: G) -> Self {
        Self {
            stock_repo,
            allocation_repo,
            id_gen,
        }
    }

    /// Allocate `quantity` tons of `project_id` stock to `business_unit_id`
    ///
    /// `demands` is the demand already standing against the project; the
    /// stock store subtracts it before authorizing the carve. Fails with
    /// [`crate::error::LedgerError::OverAllocation`] when the project cannot
    /// cover the quantity.
    pub fn execute(
        &self,
        business_unit_id: &str,
        project_id: &str,
        quantity: u64,
        date: DateTime<Utc>,
        demands: &[Demand],
    ) -> LedgerResult<AllocateResult> {
        let allocation = Allocation::new(
            self.id_gen.generate(),
            project_id,
            business_unit_id,
            quantity,
            date,
        );

        let carved = self.stock_repo.allocate(
            project_id,
            business_unit_id,
            allocation.id(),
            quantity,
            demands,
        )?;
        self.allocation_repo.save(allocation.clone())?;

        info!(
            allocation_id = allocation.id(),
            project_id,
            business_unit_id,
            quantity,
            rows = carved.len(),
            "allocated stock"
        );

        Ok(AllocateResult {
            allocation,
            carved_stock: carved,
        })
    }
}
