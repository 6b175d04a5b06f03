//! End-to-end ledger flow.
//!
//! Drives the public use cases against the in-memory store: curve
//! issuance, allocation to a business unit, reservation, retirement and
//! aggregation, checking conservation at every step.

mod common;

use chrono::Utc;
use common::{absorption_curve, deterministic_store, seed_business_unit, seed_project, COMPANY_ID};

use carbonledger::domain::entities::active_reserved;
use carbonledger::domain::ports::StockRepository;
use carbonledger::infrastructure::SequentialIdGenerator;
use carbonledger::{
    AllocateUseCase, GlobalDataConfig, GlobalDataUseCase, IssuanceUseCase, LedgerError,
    ReserveUseCase, Stock, ViewScope, Year,
};

#[test]
fn full_lifecycle_from_curve_to_debt() {
    let store = deterministic_store();
    seed_project(&store, "p1", "Las Delicias");
    seed_business_unit(&store, "bu1", &[(2024, 1200, 1000)]);

    // issue three vintages from the curve
    let issuance = IssuanceUseCase::new(
        store.projects(),
        store.stock(),
        SequentialIdGenerator::new("iss"),
    );
    let issued = issuance.execute("p1", &absorption_curve()).unwrap();
    assert_eq!(issued.vintage_count, 3);
    assert_eq!(issued.total_capacity, 240);

    // allocate 2024 supply to the business unit
    let allocate = AllocateUseCase::new(
        store.stock(),
        store.allocations(),
        SequentialIdGenerator::new("alloc"),
    );
    let allocated = allocate
        .execute("bu1", "p1", 50, Utc::now(), &[])
        .unwrap();
    assert_eq!(allocated.carved_total(), 50);

    // reserve and retire part of the remaining 2024 pool
    let holds = ReserveUseCase::new(store.stock())
        .execute("p1", Year::new(2024), 10)
        .unwrap();
    for hold in &holds {
        store.stock().consume(hold.id()).unwrap();
    }

    // conservation across every row of the project
    let snapshot = store.stock().find_project_stock("p1").unwrap();
    for row in &snapshot.stock {
        let reserved = active_reserved(&snapshot.reservations, row.id());
        assert_eq!(
            row.consumed() + row.available() + reserved + row.purchased(),
            row.quantity(),
            "conservation violated on {}",
            row.id()
        );
    }
    let total_quantity: u64 = snapshot.stock.iter().map(Stock::quantity).sum();
    assert_eq!(total_quantity, 240);

    // aggregate company-wide
    let global = GlobalDataUseCase::new(
        store.business_units(),
        store.orders(),
        store.projects(),
        GlobalDataConfig::new(COMPANY_ID),
    );
    let data = global
        .execute(&ViewScope::default(), Year::new(2024))
        .unwrap();
    assert_eq!(data.actual, 10);
    assert_eq!(data.target, 1000);
    assert_eq!(data.debt, 1190);
    assert_eq!(data.number_of_projects, 1);
}

#[test]
fn allocation_is_bounded_by_issued_capacity() {
    let store = deterministic_store();
    seed_project(&store, "p1", "Banegas Farm");

    IssuanceUseCase::new(
        store.projects(),
        store.stock(),
        SequentialIdGenerator::new("iss"),
    )
    .execute("p1", &absorption_curve())
    .unwrap();

    let allocate = AllocateUseCase::new(
        store.stock(),
        store.allocations(),
        SequentialIdGenerator::new("alloc"),
    );
    // 240t issued in total; a 300t commitment must fail
    let err = allocate
        .execute("bu1", "p1", 300, Utc::now(), &[])
        .unwrap_err();
    assert!(matches!(
        err,
        LedgerError::OverAllocation {
            requested: 300,
            allocatable: 240,
            ..
        }
    ));
}

#[test]
fn reservations_do_not_leak_across_projects() {
    let store = deterministic_store();
    seed_project(&store, "p1", "Las Delicias");
    seed_project(&store, "p2", "Manjarisoa");

    let issuance = IssuanceUseCase::new(
        store.projects(),
        store.stock(),
        SequentialIdGenerator::new("iss"),
    );
    issuance.execute("p1", &absorption_curve()).unwrap();
    issuance.execute("p2", &absorption_curve()).unwrap();

    ReserveUseCase::new(store.stock())
        .execute("p1", Year::new(2022), 100)
        .unwrap();

    let p2 = store.stock().find_project_stock("p2").unwrap();
    assert_eq!(p2.total_available(), 240);
    assert!(p2.reservations.is_empty());
}
