//! Property tests for stock conservation.
//!
//! For every stock row at all times:
//! `consumed + available + sum(active reservations) = quantity`.

use std::sync::Arc;

use proptest::prelude::*;
use proptest::test_runner::TestCaseError;

use carbonledger::domain::ports::{ProjectRepository, StockRepository};
use carbonledger::infrastructure::{InMemoryStore, SequentialIdGenerator};
use carbonledger::{
    Project, ProjectColor, ProjectOrigin, ProjectType, Stock, Vintage, Year,
};

const QUANTITY: u64 = 1_000;

/// One step of a reservation workload
#[derive(Debug, Clone, Copy)]
enum Op {
    Reserve(u64),
    ReleaseOldest,
    ConsumeOldest,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (1u64..400).prop_map(Op::Reserve),
        Just(Op::ReleaseOldest),
        Just(Op::ConsumeOldest),
    ]
}

fn seeded_store() -> InMemoryStore {
    let store = InMemoryStore::with_id_generator(Arc::new(SequentialIdGenerator::new("prop")));
    let project = Project::new(
        "p1",
        "Chaco Agroforestry",
        "chaco-agroforestry",
        "",
        ProjectType::Restoration,
        ProjectOrigin::ForwardFinance,
        ProjectColor::Green,
        100,
        0,
        "c1",
    );
    store.projects().save(project).unwrap();
    let vintage = Vintage::new("v-2024", Year::new(2024), QUANTITY);
    store
        .stock()
        .save(&[Stock::from_vintage("s1", "p1", &vintage)])
        .unwrap();
    store
}

fn assert_conserved(store: &InMemoryStore) -> Result<(), TestCaseError> {
    let snapshot = store.stock().find_project_stock("p1").unwrap();
    let row = &snapshot.stock[0];
    let reserved: u64 = snapshot
        .reservations
        .iter()
        .filter(|r| r.is_active())
        .map(|r| r.quantity())
        .sum();
    prop_assert_eq!(row.consumed() + row.available() + reserved, QUANTITY);
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: conservation holds after every step of any workload.
    #[test]
    fn property_conservation_holds_under_any_workload(
        ops in proptest::collection::vec(op(), 1..60)
    ) {
        let store = seeded_store();
        let repo = store.stock();
        let mut open: Vec<String> = Vec::new();

        for step in ops {
            match step {
                Op::Reserve(quantity) => {
                    // may fail with InsufficientStock; both outcomes are legal
                    if let Ok(r) = repo.reserve("s1", quantity) {
                        open.push(r.id().to_string());
                    }
                }
                Op::ReleaseOldest => {
                    if !open.is_empty() {
                        let id = open.remove(0);
                        repo.release(&id).unwrap();
                    }
                }
                Op::ConsumeOldest => {
                    if !open.is_empty() {
                        let id = open.remove(0);
                        repo.consume(&id).unwrap();
                    }
                }
            }
            assert_conserved(&store)?;
        }
    }

    /// PROPERTY: a failed reservation leaves the row untouched.
    #[test]
    fn property_failed_reserve_mutates_nothing(
        held in 0u64..QUANTITY,
        excess in 1u64..500,
    ) {
        let store = seeded_store();
        let repo = store.stock();
        if held > 0 {
            repo.reserve("s1", held).unwrap();
        }

        let before = repo.find_project_stock("p1").unwrap();
        let over = QUANTITY - held + excess;
        prop_assert!(repo.reserve("s1", over).is_err());

        let after = repo.find_project_stock("p1").unwrap();
        prop_assert_eq!(before.stock, after.stock);
        prop_assert_eq!(before.reservations.len(), after.reservations.len());
    }

    /// PROPERTY: release restores availability to the pre-reserve value.
    #[test]
    fn property_release_is_inverse_of_reserve(quantity in 1u64..=QUANTITY) {
        let store = seeded_store();
        let repo = store.stock();

        let before = repo.find_project_stock("p1").unwrap().total_available();
        let hold = repo.reserve("s1", quantity).unwrap();
        repo.release(hold.id()).unwrap();
        let after = repo.find_project_stock("p1").unwrap().total_available();

        prop_assert_eq!(before, after);
    }
}
