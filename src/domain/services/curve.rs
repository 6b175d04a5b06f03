//! Absorption curve conversion service.
//!
//! Turns a project's cumulative sequestration curve into discrete yearly
//! vintages. Pure domain logic: no I/O, ids come from the injected
//! generator, and the output is a finite restartable sequence (curves are
//! tens of points at most).

use serde::{Deserialize, Serialize};

use crate::domain::entities::Vintage;
use crate::domain::ports::IdGenerator;
use crate::domain::value_objects::Year;
use crate::error::{LedgerError, LedgerResult};

/// One point of a cumulative absorption curve
///
/// `cumulative` is the total tons sequestered or avoided from project start
/// through the end of `year`. A point may carry a forward-purchased volume
/// for its year; that volume is carved out of the vintage's availability at
/// creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurvePoint {
    year: Year,
    cumulative: u64,
    #[serde(default)]
    forward_purchased: u64,
    /// Cents per ton paid for the forward-purchased volume
    #[serde(default)]
    purchase_price: u64,
}

impl CurvePoint {
    pub fn new(year: Year, cumulative: u64) -> Self {
        Self {
            year,
            cumulative,
            forward_purchased: 0,
            purchase_price: 0,
        }
    }

    /// Attach a forward-purchase volume for this year
    pub fn with_forward_purchase(mut self, quantity: u64, price: u64) -> Self {
        self.forward_purchased = quantity;
        self.purchase_price = price;
        self
    }

    pub fn year(&self) -> Year {
        self.year
    }

    pub fn cumulative(&self) -> u64 {
        self.cumulative
    }
}

/// Converts cumulative curves into yearly vintage issuance
pub struct AbsorptionCurveConverter<G: IdGenerator> {
    id_gen: G,
}

impl<G: IdGenerator> AbsorptionCurveConverter<G> {
    pub fn new(id_gen: G) -> Self {
        Self { id_gen }
    }

    /// Convert curve points into one vintage per year
    ///
    /// `capacity(year)` is the cumulative delta against the previous point;
    /// the first point's capacity equals its cumulative value. Fails with
    /// [`LedgerError::InvalidCurve`] when the curve is empty, years are not
    /// strictly increasing, the cumulative value decreases, or a point's
    /// forward-purchased volume exceeds its year's capacity.
    pub fn convert(&self, points: &[CurvePoint]) -> LedgerResult<Vec<Vintage>> {
        if points.is_empty() {
            return Err(LedgerError::invalid_curve("curve has no points"));
        }

        let mut vintages = Vec::with_capacity(points.len());
        let mut previous: Option<&CurvePoint> = None;
        for point in points {
            if let Some(prev) = previous {
                if point.year <= prev.year {
                    return Err(LedgerError::invalid_curve(format!(
                        "years must be strictly increasing, got {} after {}",
                        point.year, prev.year
                    )));
                }
                if point.cumulative < prev.cumulative {
                    return Err(LedgerError::invalid_curve(format!(
                        "cumulative capacity decreases at {}: {}t after {}t",
                        point.year, point.cumulative, prev.cumulative
                    )));
                }
            }
            let capacity = point.cumulative - previous.map_or(0, |p| p.cumulative);
            if point.forward_purchased > capacity {
                return Err(LedgerError::invalid_curve(format!(
                    "forward purchase {}t exceeds {} capacity {}t",
                    point.forward_purchased, point.year, capacity
                )));
            }
            let vintage = Vintage::with_forward_purchase(
                self.id_gen.generate(),
                point.year,
                capacity,
                point.forward_purchased,
                point.purchase_price,
            )?;
            vintages.push(vintage);
            previous = Some(point);
        }
        Ok(vintages)
    }
}
