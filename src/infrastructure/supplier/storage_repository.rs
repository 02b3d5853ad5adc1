//! Storage-backed supplier repository

use async_trait::async_trait;

use crate::domain::DomainError;
use crate::domain::common::CompanyId;
use crate::domain::storage::FilterCondition;
use crate::domain::supplier::{Supplier, SupplierRepository, normalize_tax_id};
use crate::infrastructure::storage::StorageRepository;

#[async_trait]
impl SupplierRepository for StorageRepository<Supplier> {
    async fn find_by_tax_id(
        &self,
        company_id: &CompanyId,
        tax_id: &str,
    ) -> Result<Option<Supplier>, DomainError> {
        self.find_one(
            company_id,
            vec![FilterCondition::eq("tax_id", normalize_tax_id(tax_id))],
        )
        .await
    }
}
