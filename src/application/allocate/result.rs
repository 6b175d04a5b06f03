//! Allocate Result
//!
//! Result types for allocation operations.

use crate::domain::entities::{Allocation, Stock};

/// Result of a successful allocation
#[derive(Debug, Clone)]
pub struct AllocateResult {
    /// The appended allocation record
    pub allocation: Allocation,
    /// Stock rows carved out of the pool for the business unit
    pub carved_stock: Vec<Stock>,
}

impl AllocateResult {
    /// Tons carved across all new rows
    pub fn carved_total(&self) -> u64 {
        self.carved_stock.iter().map(Stock::quantity).sum()
    }
}
