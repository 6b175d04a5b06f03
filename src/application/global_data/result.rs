//! Global Data Result
//!
//! Typed numeric figures for a query scope. Display formatting (unit
//! suffixes, grouping) is a presentation concern, see
//! [`crate::presentation::GlobalDataView`].

/// Target/actual/debt triple plus pass-through investment figures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlobalData {
    /// Tons actually retired for the current year
    pub actual: u64,
    /// Tons targeted for offset this year
    pub target: u64,
    /// `emission - actual`; negative means over-compensation
    pub debt: i64,
    /// Total invested amount, in cents
    pub invested_amount: u64,
    /// Registered projects, all scopes
    pub number_of_projects: u64,
}
