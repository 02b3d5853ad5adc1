//! Supplier repository trait

use async_trait::async_trait;

use super::criteria::SupplierSearchCriteria;
use super::entity::{Supplier, SupplierId};
use crate::domain::DomainError;
use crate::domain::common::CompanyId;
use crate::domain::traits::Repository;

#[async_trait]
pub trait SupplierRepository: Repository<Supplier, SupplierId, SupplierSearchCriteria> {
    /// Find a supplier by tax id, ignoring case
    async fn find_by_tax_id(
        &self,
        company_id: &CompanyId,
        tax_id: &str,
    ) -> Result<Option<Supplier>, DomainError>;
}
