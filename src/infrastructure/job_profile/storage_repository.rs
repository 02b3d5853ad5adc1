//! Storage-backed job profile repository

use async_trait::async_trait;

use crate::domain::DomainError;
use crate::domain::common::CompanyId;
use crate::domain::job_profile::{JobProfile, JobProfileId, JobProfileRepository};
use crate::domain::storage::FilterCondition;
use crate::infrastructure::storage::StorageRepository;

#[async_trait]
impl JobProfileRepository for StorageRepository<JobProfile> {
    async fn find_by_title(
        &self,
        company_id: &CompanyId,
        title: &str,
    ) -> Result<Option<JobProfile>, DomainError> {
        let title = title.trim().to_lowercase();

        let candidates = self
            .find_all(company_id, vec![FilterCondition::contains("title", title.as_str())])
            .await?;

        Ok(candidates
            .into_iter()
            .find(|profile| profile.title().to_lowercase() == title))
    }

    async fn count_reporting_to(
        &self,
        company_id: &CompanyId,
        id: &JobProfileId,
    ) -> Result<u64, DomainError> {
        self.count_where(company_id, vec![FilterCondition::eq("reports_to", id.as_str())])
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::job_profile::NewJobProfile;
    use std::sync::Arc;

    fn company() -> CompanyId {
        CompanyId::new("acme").unwrap()
    }

    fn profile(title: &str, reports_to: Option<JobProfileId>) -> JobProfile {
        JobProfile::new(
            company(),
            NewJobProfile {
                title: title.to_string(),
                department: "Calidad".to_string(),
                reports_to,
                ..Default::default()
            },
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_find_by_title_and_reporting_count() {
        let repo: Arc<dyn JobProfileRepository> =
            Arc::new(StorageRepository::<JobProfile>::in_memory());
        let head = repo.save(profile("Director de Calidad", None)).await.unwrap();
        repo.save(profile("Técnico de Calidad", Some(head.id().clone())))
            .await
            .unwrap();

        let found = repo
            .find_by_title(&company(), "director de calidad")
            .await
            .unwrap();
        assert_eq!(found.map(|p| p.id().clone()), Some(head.id().clone()));
        assert!(repo.find_by_title(&company(), "Director").await.unwrap().is_none());

        assert_eq!(repo.count_reporting_to(&company(), head.id()).await.unwrap(), 1);
    }
}
