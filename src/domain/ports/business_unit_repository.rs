//! BusinessUnitRepository port.

use crate::domain::entities::BusinessUnit;
use crate::error::LedgerResult;

/// Abstract repository for business units
pub trait BusinessUnitRepository {
    /// Look up one business unit
    fn by_id(&self, id: &str) -> LedgerResult<BusinessUnit>;

    /// All business units of a company
    fn by_company_id(&self, company_id: &str) -> LedgerResult<Vec<BusinessUnit>>;

    /// Business units holding at least one allocation against the project
    fn by_allocated_projects(&self, project_id: &str) -> LedgerResult<Vec<BusinessUnit>>;

    /// Insert or replace a business unit
    fn save(&self, business_unit: BusinessUnit) -> LedgerResult<()>;
}
