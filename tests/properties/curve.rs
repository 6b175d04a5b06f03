//! Property tests for absorption curve conversion.

use proptest::prelude::*;

use carbonledger::infrastructure::SequentialIdGenerator;
use carbonledger::{AbsorptionCurveConverter, CurvePoint, LedgerError, Year};

/// Strictly increasing years with non-decreasing cumulative capacities.
fn monotone_curve() -> impl Strategy<Value = Vec<CurvePoint>> {
    (
        2000u16..2050,
        proptest::collection::vec(0u64..5_000, 1..20),
    )
        .prop_map(|(start_year, increments)| {
            let mut cumulative = 0u64;
            increments
                .into_iter()
                .enumerate()
                .map(|(i, inc)| {
                    cumulative += inc;
                    CurvePoint::new(Year::new(start_year + i as u16), cumulative)
                })
                .collect()
        })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: capacities sum to the curve's final cumulative value.
    #[test]
    fn property_capacities_sum_to_final_cumulative(points in monotone_curve()) {
        let converter = AbsorptionCurveConverter::new(SequentialIdGenerator::new("v"));
        let vintages = converter.convert(&points).unwrap();

        let total: u64 = vintages.iter().map(|v| v.capacity()).sum();
        prop_assert_eq!(total, points.last().unwrap().cumulative());
        prop_assert_eq!(vintages.len(), points.len());
    }

    /// PROPERTY: without forward purchases, every vintage starts fully available.
    #[test]
    fn property_vintages_start_fully_available(points in monotone_curve()) {
        let converter = AbsorptionCurveConverter::new(SequentialIdGenerator::new("v"));
        let vintages = converter.convert(&points).unwrap();

        for v in &vintages {
            prop_assert_eq!(v.available(), v.capacity());
            prop_assert_eq!(v.purchased(), 0);
        }
    }

    /// PROPERTY: any dip in the cumulative series is rejected.
    #[test]
    fn property_cumulative_dips_are_rejected(
        points in monotone_curve().prop_filter("need two points", |p| p.len() >= 2),
        dip in 1u64..1_000,
    ) {
        let last = points.last().unwrap();
        let mut broken = points.clone();
        broken.push(CurvePoint::new(
            last.year().next(),
            last.cumulative().saturating_sub(dip),
        ));

        // the appended point only dips when there was something to lose;
        // a curve still at zero stays flat and remains valid
        let converter = AbsorptionCurveConverter::new(SequentialIdGenerator::new("v"));
        let result = converter.convert(&broken);
        if last.cumulative() > 0 {
            let is_invalid_curve = matches!(result, Err(LedgerError::InvalidCurve { .. }));
            prop_assert!(is_invalid_curve);
        } else {
            prop_assert!(result.is_ok());
        }
    }
}
