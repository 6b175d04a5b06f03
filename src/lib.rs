//! Carbonledger - carbon-credit inventory, allocation and reservation ledger
//!
//! Tracks carbon-credit supply (yearly vintages of sequestered or avoided
//! tons) and matches it against buyer-side demand while preserving strict
//! quantity-conservation invariants across three accounting levels:
//! Project -> Business Unit -> Company.
//!
//! Transport, persistence technology and bulk import are external
//! collaborators; they reach the core through the repository ports in
//! [`domain::ports`] and the use cases in [`application`].

pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;

// Re-exports for convenience
pub use application::{
    AllocateResult, AllocateUseCase, GlobalData, GlobalDataConfig, GlobalDataUseCase,
    IssuanceResult, IssuanceUseCase, ReserveUseCase,
};
pub use domain::entities::{
    Allocation, BusinessUnit, Company, Demand, EffectiveCompensation, MetadataTag, Project,
    ProjectColor, ProjectOrigin, ProjectType, Reservation, ReservationStatus, Stock,
    StockAndReservations, Vintage, VintageLedger,
};
pub use domain::services::{
    AbsorptionCurveConverter, CurvePoint, ReservationManager, StockAvailability,
};
pub use domain::value_objects::{ResolvedScope, ViewScope, Year};
pub use error::{LedgerError, LedgerResult};
