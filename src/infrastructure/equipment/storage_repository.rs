//! Storage-backed equipment repository

use async_trait::async_trait;

use crate::domain::DomainError;
use crate::domain::common::CompanyId;
use crate::domain::equipment::{Equipment, EquipmentRepository};
use crate::domain::storage::FilterCondition;
use crate::infrastructure::storage::StorageRepository;

#[async_trait]
impl EquipmentRepository for StorageRepository<Equipment> {
    async fn find_by_code(
        &self,
        company_id: &CompanyId,
        code: &str,
    ) -> Result<Option<Equipment>, DomainError> {
        let code = code.trim().to_lowercase();

        // Codes keep their original case, narrow by substring then compare exactly
        let candidates = self
            .find_all(company_id, vec![FilterCondition::contains("code", code.as_str())])
            .await?;

        Ok(candidates
            .into_iter()
            .find(|equipment| equipment.code().to_lowercase() == code))
    }
}
