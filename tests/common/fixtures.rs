//! Test fixtures - deterministic stores and reusable seed data.

use std::sync::Arc;

use carbonledger::domain::ports::{BusinessUnitRepository, ProjectRepository};
use carbonledger::infrastructure::{InMemoryStore, SequentialIdGenerator};
use carbonledger::{
    BusinessUnit, CurvePoint, Demand, Project, ProjectColor, ProjectOrigin, ProjectType, Year,
};

/// The company every fixture hangs off
pub const COMPANY_ID: &str = "01H5739RTVV0JV8M3DAN0C10ME";

/// A store with sequential ids, so assertions can name entities
pub fn deterministic_store() -> InMemoryStore {
    InMemoryStore::with_id_generator(Arc::new(SequentialIdGenerator::new("fix")))
}

/// A forward-financed restoration project owned by [`COMPANY_ID`]
pub fn seed_project(store: &InMemoryStore, id: &str, name: &str) {
    let project = Project::new(
        id,
        name,
        name.to_lowercase().replace(' ', "-"),
        "Mangrove restoration",
        ProjectType::Restoration,
        ProjectOrigin::ForwardFinance,
        ProjectColor::Green,
        180,
        1_500_000_00,
        COMPANY_ID,
    );
    store.projects().save(project).unwrap();
}

/// A business unit of [`COMPANY_ID`] with explicit yearly demands
pub fn seed_business_unit(store: &InMemoryStore, id: &str, demands: &[(u16, u64, u64)]) {
    let mut bu = BusinessUnit::new(id, id, "", 100, 50, 0, COMPANY_ID, vec![]);
    for (year, emission, target) in demands {
        bu.set_demand(Demand::new(Year::new(*year), *emission, *target));
    }
    store.business_units().save(bu).unwrap();
}

/// Three-point cumulative curve: 100t, +80t, +60t
pub fn absorption_curve() -> Vec<CurvePoint> {
    vec![
        CurvePoint::new(Year::new(2022), 100),
        CurvePoint::new(Year::new(2023), 180),
        CurvePoint::new(Year::new(2024), 240),
    ]
}
