//! Global Data Use Case
//!
//! Merges demand (target emissions to offset) and effective compensation
//! (actual tons retired) for a query scope and an explicit current year,
//! producing the target/actual/debt triple plus pass-through investment
//! figures. Missing yearly records resolve to zero sentinels, never to
//! failures.

use tracing::debug;

use crate::domain::entities::{compensation_for_year, Company, Demand};
use crate::domain::ports::{BusinessUnitRepository, OrderRepository, ProjectRepository};
use crate::domain::value_objects::{ResolvedScope, ViewScope, Year};
use crate::error::LedgerResult;

use super::result::GlobalData;

/// Compensation aggregator configuration
///
/// The fallback company for scope-less queries is injected here rather
/// than read from a hidden constant, so tests can substitute it.
#[derive(Debug, Clone)]
pub struct GlobalDataConfig {
    pub default_company_id: String,
}

impl GlobalDataConfig {
    pub fn new(default_company_id: impl Into<String>) -> Self {
        Self {
            default_company_id: default_company_id.into(),
        }
    }
}

/// Compensation aggregator across the three accounting levels
pub struct GlobalDataUseCase<BR, OR, PR>
where
    BR: BusinessUnitRepository,
    OR: OrderRepository,
    PR: ProjectRepository,
{
    business_unit_repo: BR,
    order_repo: OR,
    project_repo: PR,
    config: GlobalDataConfig,
}

impl<BR, OR, PR> GlobalDataUseCase<BR, OR, PR>
where
    BR: BusinessUnitRepository,
    OR: OrderRepository,
    PR: ProjectRepository,
{
    pub fn new(
        business_unit_repo: BR,
        order_repo: OR,
        project_repo: PR,
        config: GlobalDataConfig,
    ) -> Self {
        Self {
            business_unit_repo,
            order_repo,
            project_repo,
            config,
        }
    }

    /// Compute the global figures for `scope` at `current_year`
    ///
    /// The current year is an explicit parameter, not a wall-clock read,
    /// so aggregation is deterministic under test.
    pub fn execute(&self, scope: &ViewScope, current_year: Year) -> LedgerResult<GlobalData> {
        let resolved = scope.resolve(&self.config.default_company_id);
        debug!(?resolved, %current_year, "aggregating global data");

        let (demands, actuals, invested_amount) = match &resolved {
            ResolvedScope::Company(id) => {
                let units = self.business_unit_repo.by_company_id(id)?;
                (
                    Company::merge_demands(&units),
                    self.order_repo.company_yearly_effective_compensation(id)?,
                    self.order_repo.company_total_invested_amount(id)?,
                )
            }
            ResolvedScope::BusinessUnit(id) => {
                let unit = self.business_unit_repo.by_id(id)?;
                (
                    unit.demands().to_vec(),
                    self.order_repo
                        .business_unit_yearly_effective_compensation(id)?,
                    self.order_repo.business_unit_total_invested_amount(id)?,
                )
            }
            ResolvedScope::Project(id) => {
                let units = self.business_unit_repo.by_allocated_projects(id)?;
                (
                    Company::merge_demands(&units),
                    self.order_repo.project_yearly_effective_compensation(id)?,
                    self.order_repo.project_total_invested_amount(id)?,
                )
            }
        };

        let actual = compensation_for_year(&actuals, current_year);
        let demand = demands
            .iter()
            .copied()
            .find(|d| d.year() == current_year)
            .unwrap_or_else(|| Demand::sentinel(current_year));

        Ok(GlobalData {
            actual: actual.compensation(),
            target: demand.target(),
            debt: demand.emission() as i64 - actual.compensation() as i64,
            invested_amount,
            number_of_projects: self.project_repo.count()?,
        })
    }
}
