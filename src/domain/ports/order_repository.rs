//! OrderRepository port - compensation and investment reads.
//!
//! Purchase orders themselves live outside the core; the ledger only reads
//! back what they produced: actual tons retired per vintage-year and total
//! invested amounts, at each accounting level.

use crate::domain::entities::EffectiveCompensation;
use crate::error::LedgerResult;

/// Abstract read contract over order/retirement records
pub trait OrderRepository {
    /// Tons retired per vintage-year across a company
    fn company_yearly_effective_compensation(
        &self,
        company_id: &str,
    ) -> LedgerResult<Vec<EffectiveCompensation>>;

    /// Tons retired per vintage-year for a business unit
    fn business_unit_yearly_effective_compensation(
        &self,
        business_unit_id: &str,
    ) -> LedgerResult<Vec<EffectiveCompensation>>;

    /// Tons retired per vintage-year against a project
    fn project_yearly_effective_compensation(
        &self,
        project_id: &str,
    ) -> LedgerResult<Vec<EffectiveCompensation>>;

    /// Total invested amount for a company, in cents
    fn company_total_invested_amount(&self, company_id: &str) -> LedgerResult<u64>;

    /// Total invested amount for a business unit, in cents
    fn business_unit_total_invested_amount(&self, business_unit_id: &str) -> LedgerResult<u64>;

    /// Total invested amount against a project, in cents
    fn project_total_invested_amount(&self, project_id: &str) -> LedgerResult<u64>;
}
