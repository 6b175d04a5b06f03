//! Reservation state machine.
//!
//! Pure transitions over a stock row and its reservations:
//! `Available(n) -> Reserved(k)` with `k <= n`, reversible until consumed.
//! Callers that need concurrency safety execute these transitions inside a
//! single transaction or critical section; the in-memory repository holds
//! its write lock across the whole read-modify-write.

use chrono::{DateTime, Utc};

use crate::domain::entities::{Reservation, Stock};
use crate::error::{LedgerError, LedgerResult};

/// Applies reservation transitions to stock rows
pub struct ReservationManager;

impl ReservationManager {
    /// Place a hold of `quantity` tons on `stock`
    ///
    /// Atomically (from the caller's transaction point of view) decrements
    /// `available` and opens an active [`Reservation`]. Fails with
    /// [`LedgerError::InsufficientStock`] when `quantity` is zero or exceeds
    /// the row's availability, leaving the row unchanged.
    pub fn reserve(
        stock: &mut Stock,
        id: impl Into<String>,
        quantity: u64,
        now: DateTime<Utc>,
    ) -> LedgerResult<Reservation> {
        if quantity == 0 {
            return Err(LedgerError::InsufficientStock {
                stock_id: stock.id().to_string(),
                requested: 0,
                available: stock.available(),
            });
        }
        stock.draw(quantity)?;
        Ok(Reservation::new(id, stock.id(), quantity, now))
    }

    /// Reverse an active hold, restoring its quantity to availability
    ///
    /// The reservation is kept for audit and marked released.
    pub fn release(stock: &mut Stock, reservation: &mut Reservation) -> LedgerResult<()> {
        Self::guard(stock, reservation)?;
        stock.restore(reservation.quantity());
        reservation.mark_released();
        Ok(())
    }

    /// Convert an active hold into permanent retirement
    ///
    /// The quantity was already excluded from `available` at reserve time;
    /// consuming only moves it into `consumed`.
    pub fn consume(stock: &mut Stock, reservation: &mut Reservation) -> LedgerResult<()> {
        Self::guard(stock, reservation)?;
        stock.retire(reservation.quantity());
        reservation.mark_consumed();
        Ok(())
    }

    fn guard(stock: &Stock, reservation: &Reservation) -> LedgerResult<()> {
        if reservation.stock_id() != stock.id() {
            return Err(LedgerError::conflict(format!(
                "reservation {} does not belong to stock {}",
                reservation.id(),
                stock.id()
            )));
        }
        if !reservation.is_active() {
            return Err(LedgerError::conflict(format!(
                "reservation {} is not active",
                reservation.id()
            )));
        }
        Ok(())
    }
}
