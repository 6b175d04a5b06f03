//! Issuance use case tests.

use std::sync::Arc;

use crate::domain::entities::{ProjectColor, ProjectOrigin, ProjectType, Project};
use crate::domain::ports::{ProjectRepository, StockRepository};
use crate::domain::services::CurvePoint;
use crate::domain::value_objects::Year;
use crate::error::LedgerError;
use crate::infrastructure::{InMemoryStore, SequentialIdGenerator};

use super::IssuanceUseCase;

fn store() -> InMemoryStore {
    InMemoryStore::with_id_generator(Arc::new(SequentialIdGenerator::new("id")))
}

fn seed_project(store: &InMemoryStore, id: &str) {
    let project = Project::new(
        id,
        "Las Delicias",
        "las-delicias",
        "Mangrove restoration",
        ProjectType::Restoration,
        ProjectOrigin::ForwardFinance,
        ProjectColor::Green,
        180,
        0,
        "c1",
    );
    store.projects().save(project).unwrap();
}

fn use_case(
    store: &InMemoryStore,
) -> IssuanceUseCase<
    crate::infrastructure::InMemoryProjectRepository,
    crate::infrastructure::InMemoryStockRepository,
    SequentialIdGenerator,
> {
    IssuanceUseCase::new(
        store.projects(),
        store.stock(),
        SequentialIdGenerator::new("gen"),
    )
}

fn curve() -> Vec<CurvePoint> {
    vec![
        CurvePoint::new(Year::new(2022), 100),
        CurvePoint::new(Year::new(2023), 180),
        CurvePoint::new(Year::new(2024), 240),
    ]
}

#[test]
fn registers_vintages_and_pool_stock() {
    let store = store();
    seed_project(&store, "p1");

    let result = use_case(&store).execute("p1", &curve()).unwrap();
    assert_eq!(result.vintage_count, 3);
    assert_eq!(result.total_capacity, 240);
    assert_eq!(result.total_available, 240);

    let project = store.projects().by_id("p1").unwrap();
    assert_eq!(project.ledger().len(), 3);
    assert_eq!(project.ledger().get(Year::new(2023)).unwrap().capacity(), 80);

    let snapshot = store.stock().find_project_stock("p1").unwrap();
    assert_eq!(snapshot.stock.len(), 3);
    assert!(snapshot.stock.iter().all(|s| s.is_pool()));
    assert_eq!(snapshot.total_available(), 240);
}

#[test]
fn re_issuing_the_same_years_fails() {
    let store = store();
    seed_project(&store, "p1");
    let uc = use_case(&store);
    uc.execute("p1", &curve()).unwrap();

    let err = uc.execute("p1", &curve()).unwrap_err();
    assert!(matches!(err, LedgerError::DuplicateVintage { .. }));
}

#[test]
fn invalid_curve_persists_nothing() {
    let store = store();
    seed_project(&store, "p1");
    let bad = vec![
        CurvePoint::new(Year::new(2022), 100),
        CurvePoint::new(Year::new(2024), 50),
    ];

    let err = use_case(&store).execute("p1", &bad).unwrap_err();
    assert!(matches!(err, LedgerError::InvalidCurve { .. }));

    assert!(store.projects().by_id("p1").unwrap().ledger().is_empty());
    assert!(store.stock().find_project_stock("p1").unwrap().stock.is_empty());
}

#[test]
fn unknown_project_fails() {
    let store = store();
    let err = use_case(&store).execute("ghost", &curve()).unwrap_err();
    assert!(matches!(err, LedgerError::NotFound { .. }));
}
