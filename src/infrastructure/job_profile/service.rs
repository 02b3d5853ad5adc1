//! Job profile use cases

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::DomainError;
use crate::domain::common::CompanyId;
use crate::domain::job_profile::{
    JobProfile, JobProfileChanges, JobProfileId, JobProfileRepository, JobProfileSearchCriteria,
    JobProfileStatus, NewJobProfile,
};
use crate::domain::search::{Page, SearchCriteria};
use crate::domain::user::UserRepository;

/// Job profile service
///
/// Holds the user repository as well, since a profile cannot be deleted while
/// users are assigned to it.
#[derive(Debug)]
pub struct JobProfileService<R: JobProfileRepository + ?Sized, U: UserRepository + ?Sized> {
    repository: Arc<R>,
    users: Arc<U>,
}

impl<R: JobProfileRepository + ?Sized, U: UserRepository + ?Sized> JobProfileService<R, U> {
    pub fn new(repository: Arc<R>, users: Arc<U>) -> Self {
        Self { repository, users }
    }

    pub async fn create(
        &self,
        company_id: &CompanyId,
        data: NewJobProfile,
    ) -> Result<JobProfile, DomainError> {
        info!(company_id = %company_id, title = %data.title, "Creating job profile");

        self.ensure_title_available(company_id, &data.title, None)
            .await?;

        let profile = JobProfile::new(company_id.clone(), data)?;
        if let Some(parent) = profile.reports_to() {
            self.ensure_reporting_line(company_id, profile.id(), parent)
                .await?;
        }

        self.repository.save(profile).await
    }

    pub async fn get(&self, company_id: &CompanyId, id: &str) -> Result<JobProfile, DomainError> {
        debug!(company_id = %company_id, id = %id, "Getting job profile");

        let profile_id = JobProfileId::parse(id)?;
        self.repository
            .find_by_id(company_id, &profile_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Puesto no encontrado"))
    }

    pub async fn search(
        &self,
        criteria: &JobProfileSearchCriteria,
    ) -> Result<Page<JobProfile>, DomainError> {
        debug!(company_id = %criteria.company_id(), "Searching job profiles");

        self.repository.find_page(criteria).await
    }

    pub async fn update(
        &self,
        company_id: &CompanyId,
        id: &str,
        changes: JobProfileChanges,
    ) -> Result<JobProfile, DomainError> {
        info!(company_id = %company_id, id = %id, "Updating job profile");

        let mut profile = self.get(company_id, id).await?;

        if let Some(title) = &changes.title {
            self.ensure_title_available(company_id, title, Some(profile.id()))
                .await?;
        }

        let reporting_changed = changes.reports_to.is_some();
        profile.apply(changes)?;

        if reporting_changed {
            if let Some(parent) = profile.reports_to() {
                self.ensure_reporting_line(company_id, profile.id(), parent)
                    .await?;
            }
        }

        self.repository.update(profile).await
    }

    pub async fn change_status(
        &self,
        company_id: &CompanyId,
        id: &str,
        status: JobProfileStatus,
    ) -> Result<JobProfile, DomainError> {
        info!(company_id = %company_id, id = %id, status = %status, "Changing job profile status");

        let mut profile = self.get(company_id, id).await?;
        profile.set_status(status);
        self.repository.update(profile).await
    }

    /// Delete a profile nobody references
    pub async fn delete(&self, company_id: &CompanyId, id: &str) -> Result<(), DomainError> {
        info!(company_id = %company_id, id = %id, "Deleting job profile");

        let profile = self.get(company_id, id).await?;

        let assigned = self
            .users
            .count_with_job_profile(company_id, profile.id())
            .await?;
        if assigned > 0 {
            return Err(DomainError::conflict(format!(
                "El puesto está asignado a {} usuario(s) y no puede eliminarse",
                assigned
            )));
        }

        let subordinates = self
            .repository
            .count_reporting_to(company_id, profile.id())
            .await?;
        if subordinates > 0 {
            return Err(DomainError::conflict(format!(
                "{} puesto(s) reportan a este puesto y no puede eliminarse",
                subordinates
            )));
        }

        self.repository.delete(profile.id()).await?;
        Ok(())
    }

    async fn ensure_title_available(
        &self,
        company_id: &CompanyId,
        title: &str,
        current: Option<&JobProfileId>,
    ) -> Result<(), DomainError> {
        if let Some(existing) = self.repository.find_by_title(company_id, title).await? {
            if Some(existing.id()) != current {
                return Err(DomainError::conflict(format!(
                    "Ya existe un puesto con el título {}",
                    title.trim()
                )));
            }
        }
        Ok(())
    }

    /// The parent must exist in the company and must not lead back to `id`
    async fn ensure_reporting_line(
        &self,
        company_id: &CompanyId,
        id: &JobProfileId,
        parent: &JobProfileId,
    ) -> Result<(), DomainError> {
        let mut visited = HashSet::new();
        let mut next = Some(parent.clone());

        while let Some(current) = next {
            if &current == id {
                return Err(DomainError::validation(
                    "La línea de reporte del puesto formaría un ciclo",
                ));
            }
            if !visited.insert(current.clone()) {
                break;
            }

            let Some(profile) = self.repository.find_by_id(company_id, &current).await? else {
                if &current == parent {
                    return Err(DomainError::validation(
                        "El puesto al que se reporta no existe",
                    ));
                }
                break;
            };
            next = profile.reports_to().cloned();
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::{NewUser, User, UserRole};
    use crate::infrastructure::storage::StorageRepository;

    fn company() -> CompanyId {
        CompanyId::new("acme").unwrap()
    }

    struct Fixture {
        service: JobProfileService<dyn JobProfileRepository, dyn UserRepository>,
        users: Arc<dyn UserRepository>,
    }

    fn fixture() -> Fixture {
        let profiles: Arc<dyn JobProfileRepository> =
            Arc::new(StorageRepository::<JobProfile>::in_memory());
        let users: Arc<dyn UserRepository> = Arc::new(StorageRepository::<User>::in_memory());

        Fixture {
            service: JobProfileService::new(profiles, Arc::clone(&users)),
            users,
        }
    }

    fn new_profile(title: &str, reports_to: Option<JobProfileId>) -> NewJobProfile {
        NewJobProfile {
            title: title.to_string(),
            department: "Calidad".to_string(),
            responsibilities: vec!["Mantener el sistema de gestión".to_string()],
            reports_to,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_duplicate_title() {
        let Fixture { service, .. } = fixture();
        service
            .create(&company(), new_profile("Responsable de Calidad", None))
            .await
            .unwrap();

        let result = service
            .create(&company(), new_profile("RESPONSABLE DE CALIDAD", None))
            .await;

        assert!(matches!(result, Err(DomainError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_reports_to_must_exist() {
        let Fixture { service, .. } = fixture();

        let result = service
            .create(
                &company(),
                new_profile("Técnico", Some(JobProfileId::generate())),
            )
            .await;

        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_reporting_cycle_is_rejected() {
        let Fixture { service, .. } = fixture();
        let director = service
            .create(&company(), new_profile("Director", None))
            .await
            .unwrap();
        let technician = service
            .create(&company(), new_profile("Técnico", Some(director.id().clone())))
            .await
            .unwrap();

        let result = service
            .update(
                &company(),
                director.id().as_str(),
                JobProfileChanges {
                    reports_to: Some(Some(technician.id().clone())),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_delete_rejected_while_users_assigned() {
        let Fixture { service, users } = fixture();
        let profile = service
            .create(&company(), new_profile("Auditor interno", None))
            .await
            .unwrap();

        let user = User::new(
            company(),
            NewUser {
                name: "Ana Pérez".to_string(),
                email: "ana@acme.com".to_string(),
                role: UserRole::Auditor,
                job_profile_id: Some(profile.id().clone()),
                must_change_password: false,
            },
            "hash",
        )
        .unwrap();
        users.save(user).await.unwrap();

        let result = service.delete(&company(), profile.id().as_str()).await;
        assert!(matches!(result, Err(DomainError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_delete_rejected_while_profiles_report_to_it() {
        let Fixture { service, .. } = fixture();
        let director = service
            .create(&company(), new_profile("Director", None))
            .await
            .unwrap();
        service
            .create(&company(), new_profile("Técnico", Some(director.id().clone())))
            .await
            .unwrap();

        let result = service.delete(&company(), director.id().as_str()).await;
        assert!(matches!(result, Err(DomainError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_delete_unreferenced_profile() {
        let Fixture { service, .. } = fixture();
        let profile = service
            .create(&company(), new_profile("Técnico", None))
            .await
            .unwrap();

        service.delete(&company(), profile.id().as_str()).await.unwrap();

        assert!(matches!(
            service.get(&company(), profile.id().as_str()).await,
            Err(DomainError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_search_by_department() {
        let Fixture { service, .. } = fixture();
        service
            .create(&company(), new_profile("Técnico", None))
            .await
            .unwrap();
        service
            .create(
                &company(),
                NewJobProfile {
                    department: "Producción".to_string(),
                    ..new_profile("Operario", None)
                },
            )
            .await
            .unwrap();

        let criteria = JobProfileSearchCriteria::builder(company())
            .with_department("produc")
            .build();
        let page = service.search(&criteria).await.unwrap();

        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].title(), "Operario");
    }
}
