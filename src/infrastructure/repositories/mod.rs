//! Repository implementations.

mod memory;

pub use memory::{
    InMemoryAllocationRepository, InMemoryBusinessUnitRepository, InMemoryOrderRepository,
    InMemoryProjectRepository, InMemoryStockRepository, InMemoryStore,
};
