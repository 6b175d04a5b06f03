//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod allocation_repository;
pub mod business_unit_repository;
pub mod id_generator;
pub mod order_repository;
pub mod project_repository;
pub mod stock_repository;

pub use allocation_repository::AllocationRepository;
pub use business_unit_repository::BusinessUnitRepository;
pub use id_generator::IdGenerator;
pub use order_repository::OrderRepository;
pub use project_repository::ProjectRepository;
pub use stock_repository::StockRepository;
