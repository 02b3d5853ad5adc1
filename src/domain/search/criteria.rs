use chrono::{DateTime, Utc};

use crate::domain::common::CompanyId;
use crate::domain::storage::{DocumentQuery, FilterCondition, SortSpec};

use super::Pagination;

/// Field holding the tenant on every stored document
pub const COMPANY_FIELD: &str = "company_id";

/// Immutable search criteria scoped to one company
pub trait SearchCriteria: Send + Sync {
    fn company_id(&self) -> &CompanyId;

    /// Module-specific conditions evaluated as of `now`
    fn filters(&self, now: DateTime<Utc>) -> Vec<FilterCondition>;

    /// Requested sort, or the module default
    fn sort(&self) -> SortSpec;

    fn pagination(&self) -> Pagination;

    fn limit(&self) -> u32 {
        self.pagination().limit()
    }

    fn offset(&self) -> u64 {
        self.pagination().offset()
    }

    /// Tenant condition followed by module conditions
    fn conditions(&self, now: DateTime<Utc>) -> Vec<FilterCondition> {
        let mut conditions = vec![FilterCondition::eq(COMPANY_FIELD, self.company_id().as_str())];
        conditions.extend(self.filters(now));
        conditions
    }

    /// Translate into a paginated, sorted document query
    fn to_query(&self, now: DateTime<Utc>) -> DocumentQuery {
        DocumentQuery::new()
            .filters(self.conditions(now))
            .sort(self.sort())
            .offset(self.offset())
            .limit(u64::from(self.limit()))
    }
}
