//! Supplier use cases

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::DomainError;
use crate::domain::common::CompanyId;
use crate::domain::search::{Page, SearchCriteria};
use crate::domain::supplier::{
    NewSupplier, Supplier, SupplierChanges, SupplierId, SupplierRepository,
    SupplierSearchCriteria, SupplierStatus, normalize_tax_id,
};
use crate::domain::user::UserId;

/// Supplier service for vendor approval and evaluation
#[derive(Debug)]
pub struct SupplierService<R: SupplierRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: SupplierRepository + ?Sized> SupplierService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub async fn create(
        &self,
        company_id: &CompanyId,
        data: NewSupplier,
    ) -> Result<Supplier, DomainError> {
        info!(company_id = %company_id, tax_id = %data.tax_id, "Creating supplier");

        self.ensure_tax_id_available(company_id, &data.tax_id, None)
            .await?;

        let supplier = Supplier::new(company_id.clone(), data)?;
        self.repository.save(supplier).await
    }

    pub async fn get(&self, company_id: &CompanyId, id: &str) -> Result<Supplier, DomainError> {
        debug!(company_id = %company_id, id = %id, "Getting supplier");

        let supplier_id = SupplierId::parse(id)?;
        self.repository
            .find_by_id(company_id, &supplier_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Proveedor no encontrado"))
    }

    pub async fn search(
        &self,
        criteria: &SupplierSearchCriteria,
    ) -> Result<Page<Supplier>, DomainError> {
        debug!(company_id = %criteria.company_id(), "Searching suppliers");

        self.repository.find_page(criteria).await
    }

    pub async fn update(
        &self,
        company_id: &CompanyId,
        id: &str,
        changes: SupplierChanges,
    ) -> Result<Supplier, DomainError> {
        info!(company_id = %company_id, id = %id, "Updating supplier");

        let mut supplier = self.get(company_id, id).await?;

        if let Some(tax_id) = &changes.tax_id {
            self.ensure_tax_id_available(company_id, tax_id, Some(supplier.id()))
                .await?;
        }

        supplier.apply(changes)?;
        self.repository.update(supplier).await
    }

    /// Record an evaluation; the score decides the new approval status
    pub async fn evaluate(
        &self,
        company_id: &CompanyId,
        id: &str,
        score: f64,
        comments: Option<String>,
        evaluated_by: &UserId,
    ) -> Result<Supplier, DomainError> {
        info!(company_id = %company_id, id = %id, score, "Evaluating supplier");

        let mut supplier = self.get(company_id, id).await?;
        supplier.evaluate(score, comments, evaluated_by.clone())?;
        self.repository.update(supplier).await
    }

    pub async fn change_status(
        &self,
        company_id: &CompanyId,
        id: &str,
        status: SupplierStatus,
    ) -> Result<Supplier, DomainError> {
        info!(company_id = %company_id, id = %id, status = %status, "Changing supplier status");

        let mut supplier = self.get(company_id, id).await?;
        supplier.set_status(status);
        self.repository.update(supplier).await
    }

    /// Soft delete: the supplier is kept as INACTIVE
    pub async fn delete(&self, company_id: &CompanyId, id: &str) -> Result<Supplier, DomainError> {
        info!(company_id = %company_id, id = %id, "Deactivating supplier");

        let mut supplier = self.get(company_id, id).await?;
        supplier.deactivate();
        self.repository.update(supplier).await
    }

    async fn ensure_tax_id_available(
        &self,
        company_id: &CompanyId,
        tax_id: &str,
        current: Option<&SupplierId>,
    ) -> Result<(), DomainError> {
        if let Some(existing) = self.repository.find_by_tax_id(company_id, tax_id).await? {
            if Some(existing.id()) != current {
                return Err(DomainError::conflict(format!(
                    "Ya existe un proveedor con el NIF {}",
                    normalize_tax_id(tax_id)
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::supplier::SupplierCategory;
    use crate::infrastructure::storage::StorageRepository;

    fn company() -> CompanyId {
        CompanyId::new("acme").unwrap()
    }

    fn create_service() -> SupplierService<dyn SupplierRepository> {
        let repository: Arc<dyn SupplierRepository> =
            Arc::new(StorageRepository::<Supplier>::in_memory());
        SupplierService::new(repository)
    }

    fn new_supplier(name: &str, tax_id: &str) -> NewSupplier {
        NewSupplier {
            name: name.to_string(),
            tax_id: tax_id.to_string(),
            category: SupplierCategory::Product,
            email: Some("ventas@proveedor.es".to_string()),
            phone: None,
            address: None,
            contact_name: None,
        }
    }

    #[tokio::test]
    async fn test_duplicate_tax_id_ignores_case() {
        let service = create_service();
        service
            .create(&company(), new_supplier("Tornillos SA", "b12345678"))
            .await
            .unwrap();

        let result = service
            .create(&company(), new_supplier("Tornillos Norte", " B12345678 "))
            .await;

        match result {
            Err(DomainError::Conflict { message }) => {
                assert_eq!(message, "Ya existe un proveedor con el NIF B12345678")
            }
            other => panic!("Expected conflict, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_evaluation_thresholds() {
        let service = create_service();
        let evaluator = UserId::generate();
        let supplier = service
            .create(&company(), new_supplier("Tornillos SA", "B12345678"))
            .await
            .unwrap();
        let id = supplier.id().as_str();

        let cases = [
            (80.0, SupplierStatus::Approved),
            (79.9, SupplierStatus::Conditional),
            (60.0, SupplierStatus::Conditional),
            (59.0, SupplierStatus::Rejected),
        ];

        for (score, expected) in cases {
            let evaluated = service
                .evaluate(&company(), id, score, None, &evaluator)
                .await
                .unwrap();
            assert_eq!(evaluated.status(), expected, "score {}", score);
            assert_eq!(evaluated.last_score(), Some(score));
        }

        let stored = service.get(&company(), id).await.unwrap();
        assert_eq!(stored.evaluations().len(), 4);
    }

    #[tokio::test]
    async fn test_evaluate_out_of_range() {
        let service = create_service();
        let supplier = service
            .create(&company(), new_supplier("Tornillos SA", "B12345678"))
            .await
            .unwrap();

        let result = service
            .evaluate(&company(), supplier.id().as_str(), 101.0, None, &UserId::generate())
            .await;

        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_score_range_filter() {
        let service = create_service();
        let evaluator = UserId::generate();

        for (name, tax_id, score) in [("Alfa", "A1", 90.0), ("Beta", "B2", 65.0), ("Gamma", "C3", 30.0)] {
            let supplier = service
                .create(&company(), new_supplier(name, tax_id))
                .await
                .unwrap();
            service
                .evaluate(&company(), supplier.id().as_str(), score, None, &evaluator)
                .await
                .unwrap();
        }

        let criteria = SupplierSearchCriteria::builder(company())
            .with_score_range(Some(60.0), Some(95.0))
            .build();
        let page = service.search(&criteria).await.unwrap();

        assert_eq!(page.total, 2);
        assert_eq!(page.items[0].name(), "Alfa");
        assert_eq!(page.items[1].name(), "Beta");
    }

    #[tokio::test]
    async fn test_delete_deactivates_and_blocks_evaluation() {
        let service = create_service();
        let supplier = service
            .create(&company(), new_supplier("Tornillos SA", "B12345678"))
            .await
            .unwrap();
        let id = supplier.id().as_str();

        let deleted = service.delete(&company(), id).await.unwrap();
        assert_eq!(deleted.status(), SupplierStatus::Inactive);

        let result = service
            .evaluate(&company(), id, 90.0, None, &UserId::generate())
            .await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }
}
