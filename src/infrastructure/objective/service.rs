//! Objective use cases

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::DomainError;
use crate::domain::common::CompanyId;
use crate::domain::objective::{
    NewObjective, Objective, ObjectiveChanges, ObjectiveId, ObjectiveRepository,
    ObjectiveSearchCriteria, ObjectiveStatus,
};
use crate::domain::search::{Page, SearchCriteria};
use crate::domain::user::UserId;

/// Objective service tracking targets and measured progress
#[derive(Debug)]
pub struct ObjectiveService<R: ObjectiveRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: ObjectiveRepository + ?Sized> ObjectiveService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub async fn create(
        &self,
        company_id: &CompanyId,
        data: NewObjective,
    ) -> Result<Objective, DomainError> {
        info!(company_id = %company_id, title = %data.title, "Creating objective");

        let objective = Objective::new(company_id.clone(), data)?;
        self.repository.save(objective).await
    }

    pub async fn get(&self, company_id: &CompanyId, id: &str) -> Result<Objective, DomainError> {
        debug!(company_id = %company_id, id = %id, "Getting objective");

        let objective_id = ObjectiveId::parse(id)?;
        self.repository
            .find_by_id(company_id, &objective_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Objetivo no encontrado"))
    }

    pub async fn search(
        &self,
        criteria: &ObjectiveSearchCriteria,
    ) -> Result<Page<Objective>, DomainError> {
        debug!(company_id = %criteria.company_id(), "Searching objectives");

        self.repository.find_page(criteria).await
    }

    pub async fn update(
        &self,
        company_id: &CompanyId,
        id: &str,
        changes: ObjectiveChanges,
    ) -> Result<Objective, DomainError> {
        info!(company_id = %company_id, id = %id, "Updating objective");

        let mut objective = self.get(company_id, id).await?;
        objective.apply(changes)?;
        self.repository.update(objective).await
    }

    pub async fn record_progress(
        &self,
        company_id: &CompanyId,
        id: &str,
        value: f64,
        notes: Option<String>,
        recorded_by: Option<&UserId>,
    ) -> Result<Objective, DomainError> {
        info!(company_id = %company_id, id = %id, value, "Recording objective progress");

        let mut objective = self.get(company_id, id).await?;
        objective.record_progress(value, notes, recorded_by.cloned())?;
        self.repository.update(objective).await
    }

    pub async fn change_status(
        &self,
        company_id: &CompanyId,
        id: &str,
        status: ObjectiveStatus,
    ) -> Result<Objective, DomainError> {
        info!(company_id = %company_id, id = %id, status = %status, "Changing objective status");

        let mut objective = self.get(company_id, id).await?;
        objective.set_status(status)?;
        self.repository.update(objective).await
    }

    pub async fn delete(&self, company_id: &CompanyId, id: &str) -> Result<(), DomainError> {
        info!(company_id = %company_id, id = %id, "Deleting objective");

        let objective = self.get(company_id, id).await?;
        self.repository.delete(objective.id()).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::StorageRepository;
    use chrono::{Duration, Utc};

    fn company() -> CompanyId {
        CompanyId::new("acme").unwrap()
    }

    fn create_service() -> ObjectiveService<dyn ObjectiveRepository> {
        let repository: Arc<dyn ObjectiveRepository> =
            Arc::new(StorageRepository::<Objective>::in_memory());
        ObjectiveService::new(repository)
    }

    fn new_objective(title: &str, due_in_days: i64) -> NewObjective {
        let now = Utc::now();
        NewObjective {
            title: title.to_string(),
            description: None,
            process: Some("Atención al cliente".to_string()),
            indicator: "Satisfacción media".to_string(),
            target_value: 80.0,
            current_value: None,
            unit: Some("%".to_string()),
            start_date: now - Duration::days(30),
            due_date: now + Duration::days(due_in_days),
            responsible_user_id: None,
        }
    }

    #[tokio::test]
    async fn test_record_progress_until_achieved() {
        let service = create_service();
        let recorder = UserId::generate();
        let objective = service
            .create(&company(), new_objective("Mejorar satisfacción", 30))
            .await
            .unwrap();
        let id = objective.id().as_str();
        assert_eq!(objective.status(), ObjectiveStatus::Pending);

        let partial = service
            .record_progress(&company(), id, 40.0, Some("Encuesta Q1".to_string()), Some(&recorder))
            .await
            .unwrap();
        assert_eq!(partial.status(), ObjectiveStatus::InProgress);
        assert_eq!(partial.progress(), 50.0);

        let reached = service
            .record_progress(&company(), id, 85.0, None, None)
            .await
            .unwrap();
        assert_eq!(reached.status(), ObjectiveStatus::Achieved);
        assert_eq!(reached.progress(), 100.0);
        assert_eq!(reached.progress_history().len(), 2);

        let closed = service.record_progress(&company(), id, 90.0, None, None).await;
        assert!(matches!(closed, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_overdue_filter() {
        let service = create_service();
        service
            .create(&company(), new_objective("Vencido", -1))
            .await
            .unwrap();
        service
            .create(&company(), new_objective("En plazo", 10))
            .await
            .unwrap();

        let criteria = ObjectiveSearchCriteria::builder(company())
            .with_overdue(true)
            .build();
        let page = service.search(&criteria).await.unwrap();

        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].title(), "Vencido");
    }

    #[tokio::test]
    async fn test_cancelled_is_final() {
        let service = create_service();
        let objective = service
            .create(&company(), new_objective("Reducir reclamaciones", 30))
            .await
            .unwrap();
        let id = objective.id().as_str();

        service
            .change_status(&company(), id, ObjectiveStatus::Cancelled)
            .await
            .unwrap();

        let reopen = service
            .change_status(&company(), id, ObjectiveStatus::InProgress)
            .await;
        assert!(matches!(reopen, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_due_before_start_is_rejected() {
        let service = create_service();
        let mut data = new_objective("Fechas invertidas", 0);
        data.due_date = data.start_date - Duration::days(1);

        let result = service.create(&company(), data).await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_delete() {
        let service = create_service();
        let objective = service
            .create(&company(), new_objective("Temporal", 5))
            .await
            .unwrap();

        service.delete(&company(), objective.id().as_str()).await.unwrap();

        assert!(matches!(
            service.get(&company(), objective.id().as_str()).await,
            Err(DomainError::NotFound { .. })
        ));
    }
}
