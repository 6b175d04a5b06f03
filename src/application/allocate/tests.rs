//! Allocate use case tests.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::entities::{Demand, Project, ProjectColor, ProjectOrigin, ProjectType, Stock, Vintage};
use crate::domain::ports::{AllocationRepository, ProjectRepository, StockRepository};
use crate::domain::value_objects::Year;
use crate::error::LedgerError;
use crate::infrastructure::{InMemoryStore, SequentialIdGenerator};

use super::AllocateUseCase;

fn store() -> InMemoryStore {
    InMemoryStore::with_id_generator(Arc::new(SequentialIdGenerator::new("id")))
}

fn seed(store: &InMemoryStore, capacity: u64) {
    let project = Project::new(
        "p1",
        "Banegas Farm",
        "banegas-farm",
        "",
        ProjectType::Restoration,
        ProjectOrigin::ForwardFinance,
        ProjectColor::Green,
        50,
        0,
        "c1",
    );
    store.projects().save(project).unwrap();
    let vintage = Vintage::new("v-2024", Year::new(2024), capacity);
    store
        .stock()
        .save(&[Stock::from_vintage("s1", "p1", &vintage)])
        .unwrap();
}

fn use_case(
    store: &InMemoryStore,
) -> AllocateUseCase<
    crate::infrastructure::InMemoryStockRepository,
    crate::infrastructure::InMemoryAllocationRepository,
    SequentialIdGenerator,
> {
    AllocateUseCase::new(
        store.stock(),
        store.allocations(),
        SequentialIdGenerator::new("alloc"),
    )
}

#[test]
fn allocation_carves_stock_and_appends_record() {
    let store = store();
    seed(&store, 100);

    let result = use_case(&store)
        .execute("bu1", "p1", 60, Utc::now(), &[])
        .unwrap();
    assert_eq!(result.carved_total(), 60);
    assert_eq!(result.allocation.quantity(), 60);

    let allocations = store.allocations().by_project("p1").unwrap();
    assert_eq!(allocations.len(), 1);
    assert_eq!(allocations[0].business_unit_id(), "bu1");

    let bu_stock = store.stock().find_business_unit_stock("bu1").unwrap();
    assert_eq!(bu_stock.total_available(), 60);
}

#[test]
fn over_allocation_fails_and_appends_nothing() {
    let store = store();
    seed(&store, 100);
    let demands = vec![Demand::new(Year::new(2024), 70, 70)];

    let err = use_case(&store)
        .execute("bu1", "p1", 40, Utc::now(), &demands)
        .unwrap_err();
    assert!(matches!(
        err,
        LedgerError::OverAllocation {
            requested: 40,
            allocatable: 30,
            ..
        }
    ));
    assert!(store.allocations().by_project("p1").unwrap().is_empty());
    assert!(store
        .stock()
        .find_business_unit_stock("bu1")
        .unwrap()
        .stock
        .is_empty());
}

#[test]
fn corrections_are_new_allocations() {
    let store = store();
    seed(&store, 100);
    let uc = use_case(&store);

    uc.execute("bu1", "p1", 30, Utc::now(), &[]).unwrap();
    uc.execute("bu1", "p1", 20, Utc::now(), &[]).unwrap();

    let history = store.allocations().by_business_unit("bu1").unwrap();
    assert_eq!(history.len(), 2);
    let total: u64 = history.iter().map(|a| a.quantity()).sum();
    assert_eq!(total, 50);
}

#[test]
fn allocations_never_exceed_total_capacity() {
    let store = store();
    seed(&store, 100);
    let uc = use_case(&store);

    uc.execute("bu1", "p1", 70, Utc::now(), &[]).unwrap();
    uc.execute("bu2", "p1", 30, Utc::now(), &[]).unwrap();
    let err = uc.execute("bu3", "p1", 1, Utc::now(), &[]).unwrap_err();
    assert!(matches!(err, LedgerError::OverAllocation { .. }));

    let allocated: u64 = store
        .allocations()
        .by_project("p1")
        .unwrap()
        .iter()
        .map(|a| a.quantity())
        .sum();
    assert!(allocated <= 100);
}
