//! Training plan use cases

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::DomainError;
use crate::domain::common::CompanyId;
use crate::domain::search::{Page, SearchCriteria};
use crate::domain::training_plan::{
    NewTrainingPlan, TrainingPlan, TrainingPlanChanges, TrainingPlanId, TrainingPlanRepository,
    TrainingPlanSearchCriteria, TrainingStatus,
};
use crate::domain::user::{UserId, UserRepository};

/// Training plan service
///
/// Participants are users of the same company; the user repository is used
/// to check them on enrollment.
#[derive(Debug)]
pub struct TrainingPlanService<R: TrainingPlanRepository + ?Sized, U: UserRepository + ?Sized> {
    repository: Arc<R>,
    users: Arc<U>,
}

impl<R: TrainingPlanRepository + ?Sized, U: UserRepository + ?Sized> TrainingPlanService<R, U> {
    pub fn new(repository: Arc<R>, users: Arc<U>) -> Self {
        Self { repository, users }
    }

    pub async fn create(
        &self,
        company_id: &CompanyId,
        data: NewTrainingPlan,
    ) -> Result<TrainingPlan, DomainError> {
        info!(company_id = %company_id, title = %data.title, "Creating training plan");

        for participant in &data.participants {
            self.ensure_user_exists(company_id, participant).await?;
        }

        let plan = TrainingPlan::new(company_id.clone(), data)?;
        self.repository.save(plan).await
    }

    pub async fn get(&self, company_id: &CompanyId, id: &str) -> Result<TrainingPlan, DomainError> {
        debug!(company_id = %company_id, id = %id, "Getting training plan");

        let plan_id = TrainingPlanId::parse(id)?;
        self.repository
            .find_by_id(company_id, &plan_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Plan de formación no encontrado"))
    }

    pub async fn search(
        &self,
        criteria: &TrainingPlanSearchCriteria,
    ) -> Result<Page<TrainingPlan>, DomainError> {
        debug!(company_id = %criteria.company_id(), "Searching training plans");

        self.repository.find_page(criteria).await
    }

    pub async fn update(
        &self,
        company_id: &CompanyId,
        id: &str,
        changes: TrainingPlanChanges,
    ) -> Result<TrainingPlan, DomainError> {
        info!(company_id = %company_id, id = %id, "Updating training plan");

        let mut plan = self.get(company_id, id).await?;
        plan.apply(changes)?;
        self.repository.update(plan).await
    }

    /// PLANNED -> IN_PROGRESS -> COMPLETED, any open plan can be cancelled
    pub async fn change_status(
        &self,
        company_id: &CompanyId,
        id: &str,
        status: TrainingStatus,
    ) -> Result<TrainingPlan, DomainError> {
        info!(company_id = %company_id, id = %id, status = %status, "Changing training plan status");

        let mut plan = self.get(company_id, id).await?;
        plan.change_status(status)?;
        self.repository.update(plan).await
    }

    pub async fn add_participant(
        &self,
        company_id: &CompanyId,
        id: &str,
        user_id: &str,
    ) -> Result<TrainingPlan, DomainError> {
        info!(company_id = %company_id, id = %id, user_id = %user_id, "Adding training participant");

        let user_id = UserId::parse(user_id)?;
        let mut plan = self.get(company_id, id).await?;

        self.ensure_user_exists(company_id, &user_id).await?;
        plan.add_participant(user_id)?;

        self.repository.update(plan).await
    }

    pub async fn remove_participant(
        &self,
        company_id: &CompanyId,
        id: &str,
        user_id: &str,
    ) -> Result<TrainingPlan, DomainError> {
        info!(company_id = %company_id, id = %id, user_id = %user_id, "Removing training participant");

        let user_id = UserId::parse(user_id)?;
        let mut plan = self.get(company_id, id).await?;
        plan.remove_participant(&user_id)?;
        self.repository.update(plan).await
    }

    pub async fn delete(&self, company_id: &CompanyId, id: &str) -> Result<(), DomainError> {
        info!(company_id = %company_id, id = %id, "Deleting training plan");

        let plan = self.get(company_id, id).await?;
        self.repository.delete(plan.id()).await?;
        Ok(())
    }

    async fn ensure_user_exists(
        &self,
        company_id: &CompanyId,
        user_id: &UserId,
    ) -> Result<(), DomainError> {
        if !self.users.exists(company_id, user_id).await? {
            return Err(DomainError::validation(format!(
                "El participante {} no es un usuario de la empresa",
                user_id
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::training_plan::TrainingModality;
    use crate::domain::user::{NewUser, User, UserRole};
    use crate::infrastructure::storage::StorageRepository;
    use chrono::{TimeZone, Utc};

    fn company() -> CompanyId {
        CompanyId::new("acme").unwrap()
    }

    struct Fixture {
        service: TrainingPlanService<dyn TrainingPlanRepository, dyn UserRepository>,
        users: Arc<dyn UserRepository>,
    }

    fn fixture() -> Fixture {
        let plans: Arc<dyn TrainingPlanRepository> =
            Arc::new(StorageRepository::<TrainingPlan>::in_memory());
        let users: Arc<dyn UserRepository> = Arc::new(StorageRepository::<User>::in_memory());

        Fixture {
            service: TrainingPlanService::new(plans, Arc::clone(&users)),
            users,
        }
    }

    async fn employee(users: &Arc<dyn UserRepository>, email: &str) -> User {
        let user = User::new(
            company(),
            NewUser {
                name: "Ana Pérez".to_string(),
                email: email.to_string(),
                role: UserRole::Employee,
                job_profile_id: None,
                must_change_password: false,
            },
            "hash",
        )
        .unwrap();
        users.save(user).await.unwrap()
    }

    fn new_plan(title: &str, year: i32, participants: Vec<UserId>) -> NewTrainingPlan {
        NewTrainingPlan {
            title: title.to_string(),
            description: None,
            topic: Some("ISO 9001".to_string()),
            trainer: Some("Consultora externa".to_string()),
            modality: TrainingModality::Online,
            start_date: Utc.with_ymd_and_hms(year, 3, 1, 9, 0, 0).unwrap(),
            end_date: Utc.with_ymd_and_hms(year, 3, 2, 14, 0, 0).unwrap(),
            duration_hours: 8.0,
            participants,
        }
    }

    #[tokio::test]
    async fn test_status_workflow() {
        let Fixture { service, .. } = fixture();
        let plan = service
            .create(&company(), new_plan("Auditor interno", 2024, Vec::new()))
            .await
            .unwrap();
        let id = plan.id().as_str();
        assert_eq!(plan.status(), TrainingStatus::Planned);

        let skip = service
            .change_status(&company(), id, TrainingStatus::Completed)
            .await;
        assert!(matches!(skip, Err(DomainError::Validation { .. })));

        service
            .change_status(&company(), id, TrainingStatus::InProgress)
            .await
            .unwrap();
        let completed = service
            .change_status(&company(), id, TrainingStatus::Completed)
            .await
            .unwrap();
        assert_eq!(completed.status(), TrainingStatus::Completed);

        let cancel = service
            .change_status(&company(), id, TrainingStatus::Cancelled)
            .await;
        assert!(matches!(cancel, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_participants() {
        let Fixture { service, users } = fixture();
        let ana = employee(&users, "ana@acme.com").await;
        let plan = service
            .create(&company(), new_plan("Auditor interno", 2024, Vec::new()))
            .await
            .unwrap();
        let id = plan.id().as_str();

        let enrolled = service
            .add_participant(&company(), id, ana.id().as_str())
            .await
            .unwrap();
        assert_eq!(enrolled.participants(), &[ana.id().clone()]);

        let twice = service
            .add_participant(&company(), id, ana.id().as_str())
            .await;
        assert!(matches!(twice, Err(DomainError::Conflict { .. })));

        let stranger = service
            .add_participant(&company(), id, UserId::generate().as_str())
            .await;
        assert!(matches!(stranger, Err(DomainError::Validation { .. })));

        let removed = service
            .remove_participant(&company(), id, ana.id().as_str())
            .await
            .unwrap();
        assert!(removed.participants().is_empty());

        let missing = service
            .remove_participant(&company(), id, ana.id().as_str())
            .await;
        assert!(matches!(missing, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_create_rejects_unknown_participants() {
        let Fixture { service, .. } = fixture();

        let result = service
            .create(
                &company(),
                new_plan("Auditor interno", 2024, vec![UserId::generate()]),
            )
            .await;

        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_search_by_year_and_participant() {
        let Fixture { service, users } = fixture();
        let ana = employee(&users, "ana@acme.com").await;

        service
            .create(&company(), new_plan("Primeros auxilios", 2023, vec![ana.id().clone()]))
            .await
            .unwrap();
        service
            .create(&company(), new_plan("Auditor interno", 2024, vec![ana.id().clone()]))
            .await
            .unwrap();
        service
            .create(&company(), new_plan("Carretilla elevadora", 2024, Vec::new()))
            .await
            .unwrap();

        let criteria = TrainingPlanSearchCriteria::builder(company())
            .with_year(2024)
            .with_participant(ana.id().clone())
            .build();
        let page = service.search(&criteria).await.unwrap();

        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].title(), "Auditor interno");
        assert_eq!(page.items[0].year(), 2024);
    }

    #[tokio::test]
    async fn test_delete() {
        let Fixture { service, .. } = fixture();
        let plan = service
            .create(&company(), new_plan("Auditor interno", 2024, Vec::new()))
            .await
            .unwrap();

        service.delete(&company(), plan.id().as_str()).await.unwrap();

        assert!(matches!(
            service.get(&company(), plan.id().as_str()).await,
            Err(DomainError::NotFound { .. })
        ));
    }
}
