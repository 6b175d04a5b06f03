//! Issuance Module
//!
//! Registers yearly vintage issuance from a project's absorption curve and
//! materializes the matching pool stock.
//!
//! ## Structure
//!
//! - `result` - Result types (`IssuanceResult`)
//! - `use_case` - Core use case logic (`IssuanceUseCase`)

mod result;
mod use_case;

pub use result::IssuanceResult;
pub use use_case::IssuanceUseCase;

#[cfg(test)]
mod tests;
