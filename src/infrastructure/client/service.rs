//! Client use cases

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::DomainError;
use crate::domain::client::{
    Client, ClientChanges, ClientId, ClientRepository, ClientSearchCriteria, ClientStatus,
    NewClient,
};
use crate::domain::common::CompanyId;
use crate::domain::common::validation::normalize_email;
use crate::domain::search::{Page, SearchCriteria};

/// Client service for managing a company's customers
#[derive(Debug)]
pub struct ClientService<R: ClientRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: ClientRepository + ?Sized> ClientService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub async fn create(&self, company_id: &CompanyId, data: NewClient) -> Result<Client, DomainError> {
        info!(company_id = %company_id, email = %data.email, "Creating client");

        self.ensure_email_available(company_id, &data.email, None).await?;

        let client = Client::new(company_id.clone(), data)?;
        self.repository.save(client).await
    }

    pub async fn get(&self, company_id: &CompanyId, id: &str) -> Result<Client, DomainError> {
        debug!(company_id = %company_id, id = %id, "Getting client");

        let client_id = ClientId::parse(id)?;
        self.repository
            .find_by_id(company_id, &client_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Cliente no encontrado"))
    }

    pub async fn search(&self, criteria: &ClientSearchCriteria) -> Result<Page<Client>, DomainError> {
        debug!(company_id = %criteria.company_id(), "Searching clients");

        self.repository.find_page(criteria).await
    }

    pub async fn update(
        &self,
        company_id: &CompanyId,
        id: &str,
        changes: ClientChanges,
    ) -> Result<Client, DomainError> {
        info!(company_id = %company_id, id = %id, "Updating client");

        let mut client = self.get(company_id, id).await?;

        if let Some(email) = &changes.email {
            self.ensure_email_available(company_id, email, Some(client.id()))
                .await?;
        }

        client.apply(changes)?;
        self.repository.update(client).await
    }

    pub async fn change_status(
        &self,
        company_id: &CompanyId,
        id: &str,
        status: ClientStatus,
    ) -> Result<Client, DomainError> {
        info!(company_id = %company_id, id = %id, status = %status, "Changing client status");

        let mut client = self.get(company_id, id).await?;
        client.set_status(status);
        self.repository.update(client).await
    }

    /// Soft delete: the client is kept as INACTIVE
    pub async fn delete(&self, company_id: &CompanyId, id: &str) -> Result<Client, DomainError> {
        info!(company_id = %company_id, id = %id, "Deactivating client");

        let mut client = self.get(company_id, id).await?;
        client.deactivate();
        self.repository.update(client).await
    }

    async fn ensure_email_available(
        &self,
        company_id: &CompanyId,
        email: &str,
        current: Option<&ClientId>,
    ) -> Result<(), DomainError> {
        if let Some(existing) = self.repository.find_by_email(company_id, email).await? {
            if Some(existing.id()) != current {
                return Err(DomainError::conflict(format!(
                    "Ya existe un cliente con el email {}",
                    normalize_email(email)
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::client::ClientType;
    use crate::domain::search::DateRange;
    use crate::domain::storage::SortOrder;
    use crate::domain::traits::TenantScoped;
    use crate::infrastructure::storage::StorageRepository;

    fn company() -> CompanyId {
        CompanyId::new("acme").unwrap()
    }

    fn create_service() -> ClientService<dyn ClientRepository> {
        let repository: Arc<dyn ClientRepository> =
            Arc::new(StorageRepository::<Client>::in_memory());
        ClientService::new(repository)
    }

    fn new_client(name: &str, email: &str) -> NewClient {
        NewClient {
            name: name.to_string(),
            email: email.to_string(),
            client_type: ClientType::Company,
            phone: Some("+34 600 000 000".to_string()),
            address: None,
            tax_id: None,
            contact_person: None,
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_create_client() {
        let service = create_service();

        let client = service
            .create(&company(), new_client("Globex", "Info@Globex.com"))
            .await
            .unwrap();

        assert_eq!(client.email(), "info@globex.com");
        assert_eq!(client.status(), ClientStatus::Active);
        assert_eq!(client.created_at(), client.updated_at());
    }

    #[tokio::test]
    async fn test_create_duplicate_email() {
        let service = create_service();
        service
            .create(&company(), new_client("Globex", "info@globex.com"))
            .await
            .unwrap();

        let result = service
            .create(&company(), new_client("Globex 2", "INFO@globex.com"))
            .await;

        match result {
            Err(DomainError::Conflict { message }) => {
                assert_eq!(message, "Ya existe un cliente con el email info@globex.com")
            }
            other => panic!("Expected conflict, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_same_email_in_other_company() {
        let service = create_service();
        let other = CompanyId::new("globex").unwrap();

        service
            .create(&company(), new_client("Initech", "hola@initech.com"))
            .await
            .unwrap();
        let result = service
            .create(&other, new_client("Initech", "hola@initech.com"))
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_company_ids_differing_in_case_are_separate_tenants() {
        let service = create_service();
        let upper = CompanyId::new("ACME").unwrap();

        service
            .create(&company(), new_client("Globex", "info@globex.com"))
            .await
            .unwrap();
        let client = service
            .create(&upper, new_client("Globex", "info@globex.com"))
            .await
            .unwrap();

        assert_eq!(client.company_id().as_str(), "ACME");
    }

    #[tokio::test]
    async fn test_get_from_other_company_is_not_found() {
        let service = create_service();
        let client = service
            .create(&company(), new_client("Globex", "info@globex.com"))
            .await
            .unwrap();

        let other = CompanyId::new("globex").unwrap();
        let result = service.get(&other, client.id().as_str()).await;

        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_get_with_malformed_id() {
        let service = create_service();
        let result = service.get(&company(), "not-a-uuid").await;

        assert!(matches!(result, Err(DomainError::InvalidId { .. })));
    }

    #[tokio::test]
    async fn test_update_email_rechecks_uniqueness() {
        let service = create_service();
        service
            .create(&company(), new_client("Globex", "info@globex.com"))
            .await
            .unwrap();
        let initech = service
            .create(&company(), new_client("Initech", "hola@initech.com"))
            .await
            .unwrap();

        let clash = service
            .update(
                &company(),
                initech.id().as_str(),
                ClientChanges {
                    email: Some("info@globex.com".to_string()),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(clash, Err(DomainError::Conflict { .. })));

        let same = service
            .update(
                &company(),
                initech.id().as_str(),
                ClientChanges {
                    email: Some("HOLA@initech.com".to_string()),
                    name: Some("Initech SL".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(same.name(), "Initech SL");
        assert!(same.updated_at() >= same.created_at());
    }

    #[tokio::test]
    async fn test_delete_deactivates() {
        let service = create_service();
        let client = service
            .create(&company(), new_client("Globex", "info@globex.com"))
            .await
            .unwrap();

        let deleted = service.delete(&company(), client.id().as_str()).await.unwrap();
        assert_eq!(deleted.status(), ClientStatus::Inactive);

        let stored = service.get(&company(), client.id().as_str()).await.unwrap();
        assert!(!stored.is_active());
    }

    #[tokio::test]
    async fn test_search_pages_and_filters() {
        let service = create_service();
        for i in 0..3 {
            service
                .create(&company(), new_client(&format!("Acme {}", i), &format!("a{}@acme.com", i)))
                .await
                .unwrap();
        }
        service
            .create(&company(), new_client("Globex", "info@globex.com"))
            .await
            .unwrap();

        let criteria = ClientSearchCriteria::builder(company())
            .with_name("acme")
            .with_created(DateRange::default())
            .with_sorting(crate::domain::client::ClientSortField::Name, SortOrder::Asc)
            .with_pagination(1, 2)
            .build();

        let page = service.search(&criteria).await.unwrap();

        assert_eq!(page.total, 3);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].name(), "Acme 0");
    }
}
