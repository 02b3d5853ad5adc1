use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::fmt::Debug;

use crate::domain::DomainError;
use crate::domain::common::CompanyId;
use crate::domain::search::{Page, SearchCriteria};

/// An entity that belongs to exactly one company
pub trait TenantScoped {
    fn company_id(&self) -> &CompanyId;
}

/// Generic repository contract shared by every record module
///
/// Lookups by id are tenant-scoped: an entity stored under another company
/// is reported as absent.
#[async_trait]
pub trait Repository<T, ID, C>: Send + Sync + Debug
where
    T: Send + Sync,
    ID: Send + Sync,
    C: SearchCriteria,
{
    /// Persist a new entity; unique constraint violations surface as conflicts
    async fn save(&self, entity: T) -> Result<T, DomainError>;

    async fn find_by_id(&self, company_id: &CompanyId, id: &ID)
    -> Result<Option<T>, DomainError>;

    /// One page of entities matching the criteria as of `now`
    async fn find_by_criteria(&self, criteria: &C, now: DateTime<Utc>)
    -> Result<Vec<T>, DomainError>;

    /// Replace a stored entity
    async fn update(&self, entity: T) -> Result<T, DomainError>;

    async fn delete(&self, id: &ID) -> Result<bool, DomainError>;

    /// Total number of entities matching the criteria as of `now`, ignoring pagination
    async fn count(&self, criteria: &C, now: DateTime<Utc>) -> Result<u64, DomainError>;

    /// Items and total evaluated against the same instant
    async fn find_page(&self, criteria: &C) -> Result<Page<T>, DomainError> {
        let now = Utc::now();
        let items = self.find_by_criteria(criteria, now).await?;
        let total = self.count(criteria, now).await?;

        Ok(Page::new(items, total, criteria.pagination()))
    }

    async fn exists(&self, company_id: &CompanyId, id: &ID) -> Result<bool, DomainError> {
        Ok(self.find_by_id(company_id, id).await?.is_some())
    }
}
