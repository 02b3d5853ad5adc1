//! Equipment repository trait

use async_trait::async_trait;

use super::criteria::EquipmentSearchCriteria;
use super::entity::{Equipment, EquipmentId};
use crate::domain::DomainError;
use crate::domain::common::CompanyId;
use crate::domain::traits::Repository;

#[async_trait]
pub trait EquipmentRepository: Repository<Equipment, EquipmentId, EquipmentSearchCriteria> {
    /// Find equipment by its inventory code, ignoring case
    async fn find_by_code(
        &self,
        company_id: &CompanyId,
        code: &str,
    ) -> Result<Option<Equipment>, DomainError>;
}
