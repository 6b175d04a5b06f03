//! Global Data Module
//!
//! Aggregates demand and effective compensation into the target/actual/debt
//! triple for a company, business-unit or project scope.
//!
//! ## Structure
//!
//! - `result` - Result types (`GlobalData`)
//! - `use_case` - Core use case logic (`GlobalDataUseCase`, `GlobalDataConfig`)

mod result;
mod use_case;

pub use result::GlobalData;
pub use use_case::{GlobalDataConfig, GlobalDataUseCase};
