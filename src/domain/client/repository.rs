//! Client repository trait

use async_trait::async_trait;

use super::criteria::ClientSearchCriteria;
use super::entity::{Client, ClientId};
use crate::domain::DomainError;
use crate::domain::common::CompanyId;
use crate::domain::traits::Repository;

/// Repository for client persistence
#[async_trait]
pub trait ClientRepository: Repository<Client, ClientId, ClientSearchCriteria> {
    /// Find a client by email, ignoring case
    async fn find_by_email(
        &self,
        company_id: &CompanyId,
        email: &str,
    ) -> Result<Option<Client>, DomainError>;
}
