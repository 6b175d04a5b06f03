//! In-memory repository implementations.
//!
//! One shared store backs every repository handle, the way a relational
//! schema backs several tables. State lives behind a single `RwLock`:
//! reservation and allocation writes hold the write lock across the whole
//! read-modify-write, so two concurrent callers can never jointly overdraw
//! a stock row. Snapshot queries take the read lock.
//!
//! ## Limitations
//!
//! - **Single-process only**: no persistence, no cross-process coordination.
//!   A relational adapter would use row locks or compare-and-swap on
//!   `available` for the same sections.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, PoisonError, RwLock};

use chrono::Utc;
use tracing::debug;

use crate::domain::entities::{
    Allocation, BusinessUnit, Demand, EffectiveCompensation, Project, Reservation, Stock,
    StockAndReservations,
};
use crate::domain::ports::{
    AllocationRepository, BusinessUnitRepository, IdGenerator, OrderRepository,
    ProjectRepository, StockRepository,
};
use crate::domain::services::{ReservationManager, StockAvailability};
use crate::domain::value_objects::Year;
use crate::error::{LedgerError, LedgerResult};
use crate::infrastructure::UlidIdGenerator;

/// Converts a lock poison error to a conflict error.
fn poison_err<T>(_: PoisonError<T>) -> LedgerError {
    LedgerError::conflict("store lock poisoned")
}

#[derive(Debug, Default)]
struct State {
    projects: BTreeMap<String, Project>,
    stock: BTreeMap<String, Stock>,
    reservations: BTreeMap<String, Reservation>,
    allocations: Vec<Allocation>,
    business_units: BTreeMap<String, BusinessUnit>,
    invested_by_company: BTreeMap<String, u64>,
    invested_by_business_unit: BTreeMap<String, u64>,
    invested_by_project: BTreeMap<String, u64>,
}

impl State {
    fn active_reserved(&self, stock_id: &str) -> u64 {
        self.reservations
            .values()
            .filter(|r| r.stock_id() == stock_id && r.is_active())
            .map(Reservation::quantity)
            .sum()
    }

    /// Stock rows of a project, pool rows first, then by vintage and id
    fn project_rows(&self, project_id: &str) -> Vec<Stock> {
        let mut rows: Vec<Stock> = self
            .stock
            .values()
            .filter(|s| s.project_id() == project_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| {
            (!a.is_pool(), a.vintage(), a.id().to_string()).cmp(&(
                !b.is_pool(),
                b.vintage(),
                b.id().to_string(),
            ))
        });
        rows
    }

    fn reservations_for(&self, rows: &[Stock]) -> Vec<Reservation> {
        let ids: BTreeSet<&str> = rows.iter().map(Stock::id).collect();
        self.reservations
            .values()
            .filter(|r| ids.contains(r.stock_id()))
            .cloned()
            .collect()
    }

    fn company_project_ids(&self, company_id: &str) -> BTreeSet<String> {
        self.projects
            .values()
            .filter(|p| p.company_id() == company_id)
            .map(|p| p.id().to_string())
            .collect()
    }

    /// Sum consumed tons per vintage year over a set of rows
    fn yearly_consumed<'a>(
        rows: impl Iterator<Item = &'a Stock>,
    ) -> Vec<EffectiveCompensation> {
        let mut per_year: BTreeMap<Year, u64> = BTreeMap::new();
        for row in rows {
            *per_year.entry(row.vintage()).or_insert(0) += row.consumed();
        }
        per_year
            .into_iter()
            .filter(|(_, consumed)| *consumed > 0)
            .map(|(year, consumed)| EffectiveCompensation::new(year, consumed))
            .collect()
    }
}

/// Shared in-memory store; hand out repository handles with the accessors
///
/// ## Example
///
/// ```
/// use carbonledger::infrastructure::InMemoryStore;
///
/// let store = InMemoryStore::new();
/// let stock_repo = store.stock();
/// let project_repo = store.projects();
/// ```
#[derive(Clone)]
pub struct InMemoryStore {
    state: Arc<RwLock<State>>,
    id_gen: Arc<dyn IdGenerator + Send + Sync>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    /// Create a store generating ulid ids
    pub fn new() -> Self {
        Self::with_id_generator(Arc::new(UlidIdGenerator::new()))
    }

    /// Create a store with a custom id generator (for deterministic tests)
    pub fn with_id_generator(id_gen: Arc<dyn IdGenerator + Send + Sync>) -> Self {
        Self {
            state: Arc::new(RwLock::new(State::default())),
            id_gen,
        }
    }

    pub fn stock(&self) -> InMemoryStockRepository {
        InMemoryStockRepository {
            store: self.clone(),
        }
    }

    pub fn projects(&self) -> InMemoryProjectRepository {
        InMemoryProjectRepository {
            store: self.clone(),
        }
    }

    pub fn business_units(&self) -> InMemoryBusinessUnitRepository {
        InMemoryBusinessUnitRepository {
            store: self.clone(),
        }
    }

    pub fn allocations(&self) -> InMemoryAllocationRepository {
        InMemoryAllocationRepository {
            store: self.clone(),
        }
    }

    pub fn orders(&self) -> InMemoryOrderRepository {
        InMemoryOrderRepository {
            store: self.clone(),
        }
    }

    /// Record an investment at every scope it touches, in cents
    ///
    /// Stands in for the order/purchase records an external order book
    /// would hold.
    pub fn record_investment(
        &self,
        company_id: &str,
        business_unit_id: Option<&str>,
        project_id: &str,
        amount: u64,
    ) -> LedgerResult<()> {
        let mut state = self.state.write().map_err(poison_err)?;
        *state
            .invested_by_company
            .entry(company_id.to_string())
            .or_insert(0) += amount;
        if let Some(bu) = business_unit_id {
            *state
                .invested_by_business_unit
                .entry(bu.to_string())
                .or_insert(0) += amount;
        }
        *state
            .invested_by_project
            .entry(project_id.to_string())
            .or_insert(0) += amount;
        Ok(())
    }
}

/// Stock repository handle over an [`InMemoryStore`]
#[derive(Clone)]
pub struct InMemoryStockRepository {
    store: InMemoryStore,
}

impl StockRepository for InMemoryStockRepository {
    fn find_project_stock_for_vintage(
        &self,
        project_id: &str,
        vintage: Year,
    ) -> LedgerResult<Vec<Stock>> {
        let state = self.store.state.read().map_err(poison_err)?;
        Ok(state
            .project_rows(project_id)
            .into_iter()
            .filter(|s| s.vintage() == vintage)
            .collect())
    }

    fn find_allocated_stock_by_vintage(
        &self,
        business_unit_id: &str,
        allocation_ids: &[String],
    ) -> LedgerResult<Vec<Stock>> {
        let state = self.store.state.read().map_err(poison_err)?;
        let wanted: BTreeSet<&str> = allocation_ids.iter().map(String::as_str).collect();
        let mut rows: Vec<Stock> = state
            .stock
            .values()
            .filter(|s| {
                s.business_unit_id() == Some(business_unit_id)
                    && s.allocation_id().is_some_and(|id| wanted.contains(id))
            })
            .cloned()
            .collect();
        rows.sort_by_key(|s| (s.vintage(), s.id().to_string()));
        Ok(rows)
    }

    fn find_company_stock(&self, company_id: &str) -> LedgerResult<StockAndReservations> {
        let state = self.store.state.read().map_err(poison_err)?;
        let project_ids = state.company_project_ids(company_id);
        let mut rows: Vec<Stock> = state
            .stock
            .values()
            .filter(|s| project_ids.contains(s.project_id()))
            .cloned()
            .collect();
        rows.sort_by_key(|s| (s.vintage(), s.id().to_string()));
        let reservations = state.reservations_for(&rows);
        Ok(StockAndReservations {
            stock: rows,
            reservations,
        })
    }

    fn find_business_unit_stock(
        &self,
        business_unit_id: &str,
    ) -> LedgerResult<StockAndReservations> {
        let state = self.store.state.read().map_err(poison_err)?;
        let mut rows: Vec<Stock> = state
            .stock
            .values()
            .filter(|s| s.business_unit_id() == Some(business_unit_id))
            .cloned()
            .collect();
        rows.sort_by_key(|s| (s.vintage(), s.id().to_string()));
        let reservations = state.reservations_for(&rows);
        Ok(StockAndReservations {
            stock: rows,
            reservations,
        })
    }

    fn find_project_stock(&self, project_id: &str) -> LedgerResult<StockAndReservations> {
        let state = self.store.state.read().map_err(poison_err)?;
        let rows = state.project_rows(project_id);
        let reservations = state.reservations_for(&rows);
        Ok(StockAndReservations {
            stock: rows,
            reservations,
        })
    }

    fn save(&self, stock: &[Stock]) -> LedgerResult<()> {
        let mut state = self.store.state.write().map_err(poison_err)?;
        // validate every row before touching any, so a rejected save
        // leaves the store unchanged
        for row in stock {
            row.check(state.active_reserved(row.id()))?;
        }
        for row in stock {
            state.stock.insert(row.id().to_string(), row.clone());
        }
        Ok(())
    }

    fn reserve(&self, stock_id: &str, quantity: u64) -> LedgerResult<Reservation> {
        let mut state = self.store.state.write().map_err(poison_err)?;
        let mut row = state
            .stock
            .get(stock_id)
            .cloned()
            .ok_or_else(|| LedgerError::not_found("stock", stock_id))?;

        let reservation = ReservationManager::reserve(
            &mut row,
            self.store.id_gen.generate(),
            quantity,
            Utc::now(),
        )?;
        debug!(stock_id, quantity, reservation_id = reservation.id(), "reserved");

        state.stock.insert(row.id().to_string(), row);
        state
            .reservations
            .insert(reservation.id().to_string(), reservation.clone());
        Ok(reservation)
    }

    fn release(&self, reservation_id: &str) -> LedgerResult<()> {
        let mut state = self.store.state.write().map_err(poison_err)?;
        let mut reservation = state
            .reservations
            .get(reservation_id)
            .cloned()
            .ok_or_else(|| LedgerError::not_found("reservation", reservation_id))?;
        let mut row = state
            .stock
            .get(reservation.stock_id())
            .cloned()
            .ok_or_else(|| LedgerError::not_found("stock", reservation.stock_id()))?;

        ReservationManager::release(&mut row, &mut reservation)?;

        state.stock.insert(row.id().to_string(), row);
        state
            .reservations
            .insert(reservation.id().to_string(), reservation);
        Ok(())
    }

    fn consume(&self, reservation_id: &str) -> LedgerResult<()> {
        let mut state = self.store.state.write().map_err(poison_err)?;
        let mut reservation = state
            .reservations
            .get(reservation_id)
            .cloned()
            .ok_or_else(|| LedgerError::not_found("reservation", reservation_id))?;
        let mut row = state
            .stock
            .get(reservation.stock_id())
            .cloned()
            .ok_or_else(|| LedgerError::not_found("stock", reservation.stock_id()))?;

        ReservationManager::consume(&mut row, &mut reservation)?;

        state.stock.insert(row.id().to_string(), row);
        state
            .reservations
            .insert(reservation.id().to_string(), reservation);
        Ok(())
    }

    fn available_to_allocate(
        &self,
        project_id: &str,
        demands: &[Demand],
    ) -> LedgerResult<StockAvailability> {
        let state = self.store.state.read().map_err(poison_err)?;
        Ok(StockAvailability::compute(
            &state.project_rows(project_id),
            demands,
        ))
    }

    fn allocate(
        &self,
        project_id: &str,
        business_unit_id: &str,
        allocation_id: &str,
        quantity: u64,
        demands: &[Demand],
    ) -> LedgerResult<Vec<Stock>> {
        // single write section: the availability check and the split can
        // never race against a concurrent reserve or allocate
        let mut state = self.store.state.write().map_err(poison_err)?;
        let rows = state.project_rows(project_id);
        let availability = StockAvailability::compute(&rows, demands);
        let allocatable = availability.total_allocatable();
        if quantity > allocatable {
            return Err(LedgerError::OverAllocation {
                project_id: project_id.to_string(),
                requested: quantity,
                allocatable,
            });
        }

        let mut carved = Vec::new();
        let mut remaining = quantity;
        for line in availability.years() {
            if remaining == 0 {
                break;
            }
            // cap each year's carve at its allocatable volume so demand
            // already standing against the year keeps its cover
            let mut year_budget = line.allocatable.min(remaining);
            for row in rows.iter().filter(|r| r.is_pool() && r.vintage() == line.year) {
                if year_budget == 0 {
                    break;
                }
                let mut pool_row = match state.stock.get(row.id()) {
                    Some(current) => current.clone(),
                    None => continue,
                };
                let take = year_budget.min(pool_row.available());
                if take == 0 {
                    continue;
                }
                let new_row = pool_row.split_for_allocation(
                    self.store.id_gen.generate(),
                    business_unit_id,
                    allocation_id,
                    take,
                )?;
                state.stock.insert(pool_row.id().to_string(), pool_row);
                state.stock.insert(new_row.id().to_string(), new_row.clone());
                carved.push(new_row);
                year_budget -= take;
                remaining -= take;
            }
        }

        if remaining > 0 {
            // availability said yes but the rows could not cover it; the
            // store is inconsistent with its own snapshot
            return Err(LedgerError::conflict(format!(
                "allocation {allocation_id}: {remaining}t left uncovered after carving"
            )));
        }
        debug!(
            project_id,
            business_unit_id, allocation_id, quantity, "carved allocation"
        );
        Ok(carved)
    }
}

/// Project repository handle over an [`InMemoryStore`]
#[derive(Clone)]
pub struct InMemoryProjectRepository {
    store: InMemoryStore,
}

impl ProjectRepository for InMemoryProjectRepository {
    fn by_id(&self, id: &str) -> LedgerResult<Project> {
        let state = self.store.state.read().map_err(poison_err)?;
        state
            .projects
            .get(id)
            .cloned()
            .ok_or_else(|| LedgerError::not_found("project", id))
    }

    fn by_identifier(&self, identifier: &str) -> LedgerResult<Project> {
        let state = self.store.state.read().map_err(poison_err)?;
        state
            .projects
            .values()
            .find(|p| p.name() == identifier || p.slug() == identifier)
            .cloned()
            .ok_or_else(|| LedgerError::not_found("project", identifier))
    }

    fn save(&self, project: Project) -> LedgerResult<()> {
        let mut state = self.store.state.write().map_err(poison_err)?;
        state.projects.insert(project.id().to_string(), project);
        Ok(())
    }

    fn count(&self) -> LedgerResult<u64> {
        let state = self.store.state.read().map_err(poison_err)?;
        Ok(state.projects.len() as u64)
    }
}

/// Business unit repository handle over an [`InMemoryStore`]
#[derive(Clone)]
pub struct InMemoryBusinessUnitRepository {
    store: InMemoryStore,
}

impl BusinessUnitRepository for InMemoryBusinessUnitRepository {
    fn by_id(&self, id: &str) -> LedgerResult<BusinessUnit> {
        let state = self.store.state.read().map_err(poison_err)?;
        state
            .business_units
            .get(id)
            .cloned()
            .ok_or_else(|| LedgerError::not_found("business unit", id))
    }

    fn by_company_id(&self, company_id: &str) -> LedgerResult<Vec<BusinessUnit>> {
        let state = self.store.state.read().map_err(poison_err)?;
        Ok(state
            .business_units
            .values()
            .filter(|bu| bu.company_id() == company_id)
            .cloned()
            .collect())
    }

    fn by_allocated_projects(&self, project_id: &str) -> LedgerResult<Vec<BusinessUnit>> {
        let state = self.store.state.read().map_err(poison_err)?;
        let holder_ids: BTreeSet<&str> = state
            .allocations
            .iter()
            .filter(|a| a.project_id() == project_id)
            .map(Allocation::business_unit_id)
            .collect();
        Ok(state
            .business_units
            .values()
            .filter(|bu| holder_ids.contains(bu.id()))
            .cloned()
            .collect())
    }

    fn save(&self, business_unit: BusinessUnit) -> LedgerResult<()> {
        let mut state = self.store.state.write().map_err(poison_err)?;
        state
            .business_units
            .insert(business_unit.id().to_string(), business_unit);
        Ok(())
    }
}

/// Allocation repository handle over an [`InMemoryStore`]
#[derive(Clone)]
pub struct InMemoryAllocationRepository {
    store: InMemoryStore,
}

impl AllocationRepository for InMemoryAllocationRepository {
    fn save(&self, allocation: Allocation) -> LedgerResult<()> {
        let mut state = self.store.state.write().map_err(poison_err)?;
        state.allocations.push(allocation);
        Ok(())
    }

    fn by_project(&self, project_id: &str) -> LedgerResult<Vec<Allocation>> {
        let state = self.store.state.read().map_err(poison_err)?;
        Ok(state
            .allocations
            .iter()
            .filter(|a| a.project_id() == project_id)
            .cloned()
            .collect())
    }

    fn by_business_unit(&self, business_unit_id: &str) -> LedgerResult<Vec<Allocation>> {
        let state = self.store.state.read().map_err(poison_err)?;
        Ok(state
            .allocations
            .iter()
            .filter(|a| a.business_unit_id() == business_unit_id)
            .cloned()
            .collect())
    }
}

/// Order repository handle over an [`InMemoryStore`]
///
/// Effective compensation is derived from consumed stock; invested amounts
/// come from the figures recorded via
/// [`InMemoryStore::record_investment`].
#[derive(Clone)]
pub struct InMemoryOrderRepository {
    store: InMemoryStore,
}

impl OrderRepository for InMemoryOrderRepository {
    fn company_yearly_effective_compensation(
        &self,
        company_id: &str,
    ) -> LedgerResult<Vec<EffectiveCompensation>> {
        let state = self.store.state.read().map_err(poison_err)?;
        let project_ids = state.company_project_ids(company_id);
        Ok(State::yearly_consumed(
            state
                .stock
                .values()
                .filter(|s| project_ids.contains(s.project_id())),
        ))
    }

    fn business_unit_yearly_effective_compensation(
        &self,
        business_unit_id: &str,
    ) -> LedgerResult<Vec<EffectiveCompensation>> {
        let state = self.store.state.read().map_err(poison_err)?;
        Ok(State::yearly_consumed(
            state
                .stock
                .values()
                .filter(|s| s.business_unit_id() == Some(business_unit_id)),
        ))
    }

    fn project_yearly_effective_compensation(
        &self,
        project_id: &str,
    ) -> LedgerResult<Vec<EffectiveCompensation>> {
        let state = self.store.state.read().map_err(poison_err)?;
        Ok(State::yearly_consumed(
            state.stock.values().filter(|s| s.project_id() == project_id),
        ))
    }

    fn company_total_invested_amount(&self, company_id: &str) -> LedgerResult<u64> {
        let state = self.store.state.read().map_err(poison_err)?;
        Ok(state
            .invested_by_company
            .get(company_id)
            .copied()
            .unwrap_or(0))
    }

    fn business_unit_total_invested_amount(&self, business_unit_id: &str) -> LedgerResult<u64> {
        let state = self.store.state.read().map_err(poison_err)?;
        Ok(state
            .invested_by_business_unit
            .get(business_unit_id)
            .copied()
            .unwrap_or(0))
    }

    fn project_total_invested_amount(&self, project_id: &str) -> LedgerResult<u64> {
        let state = self.store.state.read().map_err(poison_err)?;
        Ok(state
            .invested_by_project
            .get(project_id)
            .copied()
            .unwrap_or(0))
    }
}
