//! Infrastructure Layer
//!
//! Concrete implementations of the domain ports: a thread-safe in-memory
//! store suitable for tests, development and single-process deployments,
//! plus id generation.

mod id;
pub mod repositories;

pub use id::{SequentialIdGenerator, UlidIdGenerator};
pub use repositories::{
    InMemoryAllocationRepository, InMemoryBusinessUnitRepository, InMemoryOrderRepository,
    InMemoryProjectRepository, InMemoryStockRepository, InMemoryStore,
};
