//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod view_scope;
mod year;

pub use view_scope::{ResolvedScope, ViewScope};
pub use year::Year;
