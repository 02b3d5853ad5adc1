//! Storage-backed user repository

use async_trait::async_trait;

use crate::domain::DomainError;
use crate::domain::common::CompanyId;
use crate::domain::common::validation::normalize_email;
use crate::domain::job_profile::JobProfileId;
use crate::domain::storage::FilterCondition;
use crate::domain::user::{User, UserRepository};
use crate::infrastructure::storage::StorageRepository;

#[async_trait]
impl UserRepository for StorageRepository<User> {
    async fn find_by_email(
        &self,
        company_id: &CompanyId,
        email: &str,
    ) -> Result<Option<User>, DomainError> {
        self.find_one(
            company_id,
            vec![FilterCondition::eq("email", normalize_email(email))],
        )
        .await
    }

    async fn count_in_company(&self, company_id: &CompanyId) -> Result<u64, DomainError> {
        self.count_where(company_id, Vec::new()).await
    }

    async fn count_with_job_profile(
        &self,
        company_id: &CompanyId,
        job_profile_id: &JobProfileId,
    ) -> Result<u64, DomainError> {
        self.count_where(
            company_id,
            vec![FilterCondition::eq("job_profile_id", job_profile_id.as_str())],
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::{NewUser, UserRole};
    use std::sync::Arc;

    fn company() -> CompanyId {
        CompanyId::new("acme").unwrap()
    }

    fn user(email: &str, job_profile_id: Option<JobProfileId>) -> User {
        User::new(
            company(),
            NewUser {
                name: "Ana Pérez".to_string(),
                email: email.to_string(),
                role: UserRole::Employee,
                job_profile_id,
                must_change_password: false,
            },
            "hash",
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_find_by_email_ignores_case() {
        let repo: Arc<dyn UserRepository> = Arc::new(StorageRepository::<User>::in_memory());
        repo.save(user("ana@acme.com", None)).await.unwrap();

        let found = repo.find_by_email(&company(), "  ANA@Acme.com ").await.unwrap();
        assert!(found.is_some());

        let other = CompanyId::new("globex").unwrap();
        assert!(repo.find_by_email(&other, "ana@acme.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_counts() {
        let repo: Arc<dyn UserRepository> = Arc::new(StorageRepository::<User>::in_memory());
        let profile = JobProfileId::generate();

        repo.save(user("ana@acme.com", Some(profile.clone()))).await.unwrap();
        repo.save(user("luis@acme.com", None)).await.unwrap();

        assert_eq!(repo.count_in_company(&company()).await.unwrap(), 2);
        assert_eq!(repo.count_with_job_profile(&company(), &profile).await.unwrap(), 1);
        assert_eq!(
            repo.count_with_job_profile(&company(), &JobProfileId::generate())
                .await
                .unwrap(),
            0
        );
    }
}
