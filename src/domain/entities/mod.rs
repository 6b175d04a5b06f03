//! Domain Entities
//!
//! Core entities of the carbon ledger. Quantities are whole metric tons of
//! CO2-equivalent; prices are integer cents per ton.

mod allocation;
mod business_unit;
mod compensation;
mod project;
mod stock;
mod vintage;

pub use allocation::Allocation;
pub use business_unit::{BusinessUnit, Company, Demand, MetadataTag};
pub use compensation::{compensation_for_year, EffectiveCompensation};
pub use project::{Project, ProjectColor, ProjectOrigin, ProjectType};
pub use stock::{
    active_reserved, Reservation, ReservationStatus, Stock, StockAndReservations,
};
pub use vintage::{Vintage, VintageLedger};
