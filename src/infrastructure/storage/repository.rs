//! Storage-backed implementation of the generic repository

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::DomainError;
use crate::domain::common::CompanyId;
use crate::domain::search::{COMPANY_FIELD, SearchCriteria};
use crate::domain::storage::{DocumentQuery, FilterCondition, Storage, StorageEntity};
use crate::domain::traits::{Repository, TenantScoped};

use super::in_memory::InMemoryStorage;

/// Repository over any [`Storage`] backend
///
/// One instance per entity type serves the generic contract; module
/// repository traits are implemented on top of it with [`Self::find_one`]
/// and [`Self::count_where`].
#[derive(Debug)]
pub struct StorageRepository<E>
where
    E: StorageEntity,
{
    storage: Arc<dyn Storage<E>>,
}

impl<E> Clone for StorageRepository<E>
where
    E: StorageEntity,
{
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
        }
    }
}

impl<E> StorageRepository<E>
where
    E: StorageEntity + TenantScoped + 'static,
{
    pub fn new(storage: Arc<dyn Storage<E>>) -> Self {
        Self { storage }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryStorage::<E>::new()))
    }

    /// First entity of a company matching every condition
    pub async fn find_one(
        &self,
        company_id: &CompanyId,
        conditions: Vec<FilterCondition>,
    ) -> Result<Option<E>, DomainError> {
        let query = DocumentQuery::new()
            .filter(FilterCondition::eq(COMPANY_FIELD, company_id.as_str()))
            .filters(conditions)
            .limit(1);

        Ok(self.storage.find(&query).await?.into_iter().next())
    }

    /// Every entity of a company matching the conditions, unpaged
    pub async fn find_all(
        &self,
        company_id: &CompanyId,
        conditions: Vec<FilterCondition>,
    ) -> Result<Vec<E>, DomainError> {
        let query = DocumentQuery::new()
            .filter(FilterCondition::eq(COMPANY_FIELD, company_id.as_str()))
            .filters(conditions);

        self.storage.find(&query).await
    }

    /// Number of a company's entities matching every condition
    pub async fn count_where(
        &self,
        company_id: &CompanyId,
        conditions: Vec<FilterCondition>,
    ) -> Result<u64, DomainError> {
        let mut all = vec![FilterCondition::eq(COMPANY_FIELD, company_id.as_str())];
        all.extend(conditions);

        let count = self.storage.count_matching(&all).await?;
        Ok(count as u64)
    }
}

#[async_trait]
impl<E, C> Repository<E, E::Key, C> for StorageRepository<E>
where
    E: StorageEntity + TenantScoped + 'static,
    C: SearchCriteria + 'static,
{
    async fn save(&self, entity: E) -> Result<E, DomainError> {
        self.storage.create(entity).await
    }

    async fn find_by_id(
        &self,
        company_id: &CompanyId,
        id: &E::Key,
    ) -> Result<Option<E>, DomainError> {
        Ok(self
            .storage
            .get(id)
            .await?
            .filter(|entity| entity.company_id() == company_id))
    }

    async fn find_by_criteria(
        &self,
        criteria: &C,
        now: DateTime<Utc>,
    ) -> Result<Vec<E>, DomainError> {
        self.storage.find(&criteria.to_query(now)).await
    }

    async fn update(&self, entity: E) -> Result<E, DomainError> {
        self.storage.update(entity).await
    }

    async fn delete(&self, id: &E::Key) -> Result<bool, DomainError> {
        self.storage.delete(id).await
    }

    async fn count(&self, criteria: &C, now: DateTime<Utc>) -> Result<u64, DomainError> {
        let count = self
            .storage
            .count_matching(&criteria.conditions(now))
            .await?;
        Ok(count as u64)
    }
}
