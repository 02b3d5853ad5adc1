//! Equipment use cases

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::domain::DomainError;
use crate::domain::common::CompanyId;
use crate::domain::equipment::{
    Equipment, EquipmentChanges, EquipmentId, EquipmentRepository, EquipmentSearchCriteria,
    EquipmentStatus, NewEquipment,
};
use crate::domain::search::{Page, SearchCriteria};

/// Equipment service for inventory and maintenance control
#[derive(Debug)]
pub struct EquipmentService<R: EquipmentRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: EquipmentRepository + ?Sized> EquipmentService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub async fn create(
        &self,
        company_id: &CompanyId,
        data: NewEquipment,
    ) -> Result<Equipment, DomainError> {
        info!(company_id = %company_id, code = %data.code, "Creating equipment");

        self.ensure_code_available(company_id, &data.code, None)
            .await?;

        let equipment = Equipment::new(company_id.clone(), data)?;
        self.repository.save(equipment).await
    }

    pub async fn get(&self, company_id: &CompanyId, id: &str) -> Result<Equipment, DomainError> {
        debug!(company_id = %company_id, id = %id, "Getting equipment");

        let equipment_id = EquipmentId::parse(id)?;
        self.repository
            .find_by_id(company_id, &equipment_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Equipo no encontrado"))
    }

    pub async fn search(
        &self,
        criteria: &EquipmentSearchCriteria,
    ) -> Result<Page<Equipment>, DomainError> {
        debug!(company_id = %criteria.company_id(), "Searching equipment");

        self.repository.find_page(criteria).await
    }

    pub async fn update(
        &self,
        company_id: &CompanyId,
        id: &str,
        changes: EquipmentChanges,
    ) -> Result<Equipment, DomainError> {
        info!(company_id = %company_id, id = %id, "Updating equipment");

        let mut equipment = self.get(company_id, id).await?;

        if let Some(code) = &changes.code {
            self.ensure_code_available(company_id, code, Some(equipment.id()))
                .await?;
        }

        equipment.apply(changes)?;
        self.repository.update(equipment).await
    }

    pub async fn change_status(
        &self,
        company_id: &CompanyId,
        id: &str,
        status: EquipmentStatus,
    ) -> Result<Equipment, DomainError> {
        info!(company_id = %company_id, id = %id, status = %status, "Changing equipment status");

        let mut equipment = self.get(company_id, id).await?;
        equipment.set_status(status)?;
        self.repository.update(equipment).await
    }

    /// Record a maintenance performed at the given instant, or now
    pub async fn record_maintenance(
        &self,
        company_id: &CompanyId,
        id: &str,
        performed_at: Option<DateTime<Utc>>,
    ) -> Result<Equipment, DomainError> {
        let performed_at = performed_at.unwrap_or_else(Utc::now);
        info!(company_id = %company_id, id = %id, performed_at = %performed_at, "Recording maintenance");

        let mut equipment = self.get(company_id, id).await?;
        equipment.record_maintenance(performed_at)?;
        self.repository.update(equipment).await
    }

    pub async fn delete(&self, company_id: &CompanyId, id: &str) -> Result<(), DomainError> {
        info!(company_id = %company_id, id = %id, "Deleting equipment");

        let equipment = self.get(company_id, id).await?;
        self.repository.delete(equipment.id()).await?;
        Ok(())
    }

    async fn ensure_code_available(
        &self,
        company_id: &CompanyId,
        code: &str,
        current: Option<&EquipmentId>,
    ) -> Result<(), DomainError> {
        if let Some(existing) = self.repository.find_by_code(company_id, code).await? {
            if Some(existing.id()) != current {
                return Err(DomainError::conflict(format!(
                    "Ya existe un equipo con el código {}",
                    code.trim()
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::StorageRepository;
    use chrono::{Duration, TimeZone};

    fn company() -> CompanyId {
        CompanyId::new("acme").unwrap()
    }

    fn create_service() -> EquipmentService<dyn EquipmentRepository> {
        let repository: Arc<dyn EquipmentRepository> =
            Arc::new(StorageRepository::<Equipment>::in_memory());
        EquipmentService::new(repository)
    }

    fn new_equipment(code: &str) -> NewEquipment {
        NewEquipment {
            name: "Balanza analítica".to_string(),
            code: code.to_string(),
            equipment_type: "Medición".to_string(),
            location: Some("Laboratorio".to_string()),
            maintenance_frequency_days: Some(30),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_duplicate_code_ignores_case() {
        let service = create_service();
        service.create(&company(), new_equipment("BAL-01")).await.unwrap();

        let result = service.create(&company(), new_equipment("bal-01")).await;

        match result {
            Err(DomainError::Conflict { message }) => {
                assert_eq!(message, "Ya existe un equipo con el código bal-01")
            }
            other => panic!("Expected conflict, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_record_maintenance() {
        let service = create_service();
        let equipment = service.create(&company(), new_equipment("BAL-01")).await.unwrap();
        let performed = Utc.with_ymd_and_hms(2024, 1, 10, 8, 0, 0).unwrap();

        let updated = service
            .record_maintenance(&company(), equipment.id().as_str(), Some(performed))
            .await
            .unwrap();

        assert_eq!(updated.last_maintenance_date(), Some(performed));
        assert_eq!(
            updated.next_maintenance_date(),
            Some(performed + Duration::days(30))
        );
        assert_eq!(updated.status(), EquipmentStatus::Operational);
    }

    #[tokio::test]
    async fn test_retired_equipment_rejects_maintenance() {
        let service = create_service();
        let equipment = service.create(&company(), new_equipment("BAL-01")).await.unwrap();
        let id = equipment.id().as_str();

        service
            .change_status(&company(), id, EquipmentStatus::Retired)
            .await
            .unwrap();

        let result = service.record_maintenance(&company(), id, None).await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_needs_maintenance_filter() {
        let service = create_service();
        let overdue = NewEquipment {
            next_maintenance_date: Some(Utc::now() - Duration::days(1)),
            ..new_equipment("BAL-01")
        };
        let upcoming = NewEquipment {
            next_maintenance_date: Some(Utc::now() + Duration::days(10)),
            ..new_equipment("BAL-02")
        };
        service.create(&company(), overdue).await.unwrap();
        service.create(&company(), upcoming).await.unwrap();

        let criteria = EquipmentSearchCriteria::builder(company())
            .with_needs_maintenance(true)
            .build();
        let page = service.search(&criteria).await.unwrap();

        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].code(), "BAL-01");
    }

    #[tokio::test]
    async fn test_update_code_rechecks_uniqueness() {
        let service = create_service();
        service.create(&company(), new_equipment("BAL-01")).await.unwrap();
        let other = service.create(&company(), new_equipment("BAL-02")).await.unwrap();

        let result = service
            .update(
                &company(),
                other.id().as_str(),
                EquipmentChanges {
                    code: Some("BAL-01".to_string()),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(result, Err(DomainError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_delete_is_permanent() {
        let service = create_service();
        let equipment = service.create(&company(), new_equipment("BAL-01")).await.unwrap();
        let id = equipment.id().as_str();

        service.delete(&company(), id).await.unwrap();

        assert!(matches!(
            service.get(&company(), id).await,
            Err(DomainError::NotFound { .. })
        ));
        assert!(matches!(
            service.delete(&company(), id).await,
            Err(DomainError::NotFound { .. })
        ));
    }
}
