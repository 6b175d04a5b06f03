//! Issuance Use Case
//!
//! Registers a project's yearly issuance from its absorption curve:
//! 1. Convert the cumulative curve into vintages
//! 2. Record the vintages in the project's ledger
//! 3. Materialize one stock row per vintage in the company-wide pool
//!
//! Pure orchestration - the conversion and the invariants live in the
//! domain layer.

use tracing::info;

use crate::domain::entities::Stock;
use crate::domain::ports::{IdGenerator, ProjectRepository, StockRepository};
use crate::domain::services::{AbsorptionCurveConverter, CurvePoint};
use crate::error::LedgerResult;

use super::result::IssuanceResult;

/// Issuance use case - turns a curve into ledgered vintages and pool stock
pub struct IssuanceUseCase<PR, SR, G>
where
    PR: ProjectRepository,
    SR: StockRepository,
    G: IdGenerator,
{
    project_repo: PR,
    stock_repo: SR,
    id_gen: G,
}

impl<PR, SR, G> IssuanceUseCase<PR, SR, G>
where
    PR: ProjectRepository,
    SR: StockRepository,
    G: IdGenerator,
{
    pub fn new(project_repo: PR, stock_repo: SR, id_gen: G) -> Self {
        Self {
            project_repo,
            stock_repo,
            id_gen,
        }
    }

    /// Register the issuance described by `points` for `project_id`
    ///
    /// Nothing is persisted when any step fails: the curve is validated
    /// first, every vintage is added to a working copy of the project, and
    /// only a fully consistent result is saved.
    pub fn execute(&self, project_id: &str, points: &[CurvePoint]) -> LedgerResult<IssuanceResult> {
        let mut project = self.project_repo.by_id(project_id)?;

        let converter = AbsorptionCurveConverter::new(&self.id_gen);
        let vintages = converter.convert(points)?;

        let mut stock = Vec::with_capacity(vintages.len());
        for vintage in vintages {
            stock.push(Stock::from_vintage(
                self.id_gen.generate(),
                project.id(),
                &vintage,
            ));
            project.add_vintage(vintage)?;
        }

        let result = IssuanceResult {
            vintage_count: stock.len(),
            total_capacity: project.ledger().total_capacity(),
            total_available: project.ledger().total_available(),
        };

        info!(
            project_id = project.id(),
            vintages = result.vintage_count,
            capacity = result.total_capacity,
            "registered issuance"
        );

        self.stock_repo.save(&stock)?;
        self.project_repo.save(project)?;
        Ok(result)
    }
}
