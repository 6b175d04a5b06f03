//! Reserve Use Case
//!
//! Spreads one requested quantity across a project's stock rows for a
//! vintage, oldest row first. Each row-level hold is atomic; if a later
//! row cannot cover the remainder, the holds already placed are released
//! and the whole operation reports `InsufficientStock`.

use tracing::{info, warn};

use crate::domain::entities::Reservation;
use crate::domain::ports::StockRepository;
use crate::domain::value_objects::Year;
use crate::error::{LedgerError, LedgerResult};

/// Reserve use case - places holds on a project's stock for one vintage
pub struct ReserveUseCase<SR>
where
    SR: StockRepository,
{
    stock_repo: SR,
}

impl<SR> ReserveUseCase<SR>
where
    SR: StockRepository,
{
    pub fn new(stock_repo: SR) -> Self {
        Self { stock_repo }
    }

    /// Reserve `quantity` tons of `project_id` stock for `vintage`
    ///
    /// Fails immediately rather than queuing when the rows jointly cannot
    /// cover the quantity; demand is revisited by the caller later.
    pub fn execute(
        &self,
        project_id: &str,
        vintage: Year,
        quantity: u64,
    ) -> LedgerResult<Vec<Reservation>> {
        let rows = self
            .stock_repo
            .find_project_stock_for_vintage(project_id, vintage)?;

        let mut placed: Vec<Reservation> = Vec::new();
        let mut remaining = quantity;
        for row in &rows {
            if remaining == 0 {
                break;
            }
            let take = remaining.min(row.available());
            if take == 0 {
                continue;
            }
            match self.stock_repo.reserve(row.id(), take) {
                Ok(reservation) => {
                    remaining -= take;
                    placed.push(reservation);
                }
                // a concurrent caller drained the row between the read and
                // the hold; move on to the next row
                Err(LedgerError::InsufficientStock { .. }) => continue,
                Err(other) => {
                    self.rollback(&placed);
                    return Err(other);
                }
            }
        }

        if remaining > 0 {
            self.rollback(&placed);
            let available: u64 = rows.iter().map(|r| r.available()).sum();
            return Err(LedgerError::InsufficientStock {
                stock_id: format!("{project_id}/{vintage}"),
                requested: quantity,
                available,
            });
        }

        info!(
            project_id,
            %vintage,
            quantity,
            holds = placed.len(),
            "reserved stock"
        );
        Ok(placed)
    }

    fn rollback(&self, placed: &[Reservation]) {
        for reservation in placed {
            if let Err(err) = self.stock_repo.release(reservation.id()) {
                warn!(
                    reservation_id = reservation.id(),
                    %err,
                    "failed to release hold during rollback"
                );
            }
        }
    }
}
