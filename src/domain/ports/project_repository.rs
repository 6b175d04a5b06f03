//! ProjectRepository port.

use crate::domain::entities::Project;
use crate::error::LedgerResult;

/// Abstract repository for projects
pub trait ProjectRepository {
    /// Look up one project
    fn by_id(&self, id: &str) -> LedgerResult<Project>;

    /// Find a project by name or slug
    fn by_identifier(&self, identifier: &str) -> LedgerResult<Project>;

    /// Insert or replace a project
    fn save(&self, project: Project) -> LedgerResult<()>;

    /// Number of registered projects
    fn count(&self) -> LedgerResult<u64>;
}
