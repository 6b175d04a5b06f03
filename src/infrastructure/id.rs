//! Id generators.
//!
//! Production ids are ulids (sortable, collision-free across processes);
//! tests use a deterministic sequential generator.

use std::sync::atomic::{AtomicU64, Ordering};

use ulid::Ulid;

use crate::domain::ports::IdGenerator;

/// Ulid-backed id generator
#[derive(Debug, Clone, Copy, Default)]
pub struct UlidIdGenerator;

impl UlidIdGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl IdGenerator for UlidIdGenerator {
    fn generate(&self) -> String {
        Ulid::new().to_string()
    }
}

/// Deterministic generator yielding `prefix-1`, `prefix-2`, ...
///
/// For tests and reproducible fixtures.
#[derive(Debug)]
pub struct SequentialIdGenerator {
    prefix: String,
    next: AtomicU64,
}

impl SequentialIdGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: AtomicU64::new(1),
        }
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn generate(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        format!("{}-{}", self.prefix, n)
    }
}
