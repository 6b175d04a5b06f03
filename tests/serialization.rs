//! Serde round-trips for the persisted entity shapes.
//!
//! The external store consumes these types through the repository
//! contracts; their JSON form is part of the fixture/bulk-import surface.

use carbonledger::{CurvePoint, Stock, Vintage, ViewScope, Year};

#[test]
fn stock_round_trips_through_json() {
    let vintage = Vintage::with_forward_purchase("v-2024", Year::new(2024), 100, 30, 950).unwrap();
    let stock = Stock::from_vintage("s1", "p1", &vintage);

    let json = serde_json::to_string(&stock).unwrap();
    let back: Stock = serde_json::from_str(&json).unwrap();
    assert_eq!(back, stock);
    assert_eq!(back.available(), 70);
}

#[test]
fn view_scope_parses_the_transport_shape() {
    let scope: ViewScope = serde_json::from_str(r#"{"business_unit_id":"bu1"}"#).unwrap();
    assert_eq!(scope, ViewScope::business_unit("bu1"));

    let empty: ViewScope = serde_json::from_str("{}").unwrap();
    assert_eq!(empty, ViewScope::default());
}

#[test]
fn curve_points_accept_bare_year_and_cumulative() {
    let point: CurvePoint =
        serde_json::from_str(r#"{"year":2024,"cumulative":240}"#).unwrap();
    assert_eq!(point.year(), Year::new(2024));
    assert_eq!(point.cumulative(), 240);
}
