//! Error types for the ledger.
//!
//! Uses `thiserror` for library errors. Every failure is typed, synchronous
//! and non-retrying; retry policy belongs to the caller.

use thiserror::Error;

use crate::domain::value_objects::Year;

/// Result type alias for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Main error type for ledger operations
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Malformed absorption curve input
    #[error("invalid absorption curve: {reason}")]
    InvalidCurve { reason: String },

    /// A vintage already exists for this (project, year)
    #[error("duplicate vintage {year} for project {project_id}")]
    DuplicateVintage { project_id: String, year: Year },

    /// Entity lookup failed
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// Reservation exceeds what the stock can cover
    #[error("insufficient stock {stock_id}: requested {requested}t, available {available}t")]
    InsufficientStock {
        stock_id: String,
        requested: u64,
        available: u64,
    },

    /// Allocation exceeds what the project can still allocate
    #[error("over-allocation on project {project_id}: requested {requested}t, allocatable {allocatable}t")]
    OverAllocation {
        project_id: String,
        requested: u64,
        allocatable: u64,
    },

    /// Save or transactional section would violate the quantity invariant
    #[error("conflict: {message}")]
    Conflict { message: String },
}

impl LedgerError {
    /// Shorthand for lookup failures
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    /// Shorthand for invariant/transaction conflicts
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    /// Shorthand for curve validation failures
    pub fn invalid_curve(reason: impl Into<String>) -> Self {
        Self::InvalidCurve {
            reason: reason.into(),
        }
    }
}
