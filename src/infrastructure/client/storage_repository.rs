//! Storage-backed client repository

use async_trait::async_trait;

use crate::domain::DomainError;
use crate::domain::client::{Client, ClientRepository};
use crate::domain::common::CompanyId;
use crate::domain::common::validation::normalize_email;
use crate::domain::storage::FilterCondition;
use crate::infrastructure::storage::StorageRepository;

#[async_trait]
impl ClientRepository for StorageRepository<Client> {
    async fn find_by_email(
        &self,
        company_id: &CompanyId,
        email: &str,
    ) -> Result<Option<Client>, DomainError> {
        self.find_one(
            company_id,
            vec![FilterCondition::eq("email", normalize_email(email))],
        )
        .await
    }
}
