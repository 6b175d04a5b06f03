//! Issuance Result
//!
//! Result types for issuance operations.

/// Result of registering a project's issuance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IssuanceResult {
    /// Vintages created
    pub vintage_count: usize,
    /// Total issuable tons across the new vintages
    pub total_capacity: u64,
    /// Tons immediately available (capacity minus forward purchases)
    pub total_available: u64,
}
