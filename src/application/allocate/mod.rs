//! Allocate Module
//!
//! Commits project stock to business units, append-only.
//!
//! ## Structure
//!
//! - `result` - Result types (`AllocateResult`)
//! - `use_case` - Core use case logic (`AllocateUseCase`)

mod result;
mod use_case;

pub use result::AllocateResult;
pub use use_case::AllocateUseCase;

#[cfg(test)]
mod tests;
