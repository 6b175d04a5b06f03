//! Reserve Module
//!
//! Places holds on a project's stock for a vintage, spreading the quantity
//! across rows and compensating on partial failure.

mod use_case;

pub use use_case::ReserveUseCase;
