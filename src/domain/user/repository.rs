//! User repository trait

use async_trait::async_trait;

use super::criteria::UserSearchCriteria;
use super::entity::{User, UserId};
use crate::domain::DomainError;
use crate::domain::common::CompanyId;
use crate::domain::job_profile::JobProfileId;
use crate::domain::traits::Repository;

/// Repository trait for user storage
#[async_trait]
pub trait UserRepository: Repository<User, UserId, UserSearchCriteria> {
    /// Get a user by email (for login), ignoring case
    async fn find_by_email(
        &self,
        company_id: &CompanyId,
        email: &str,
    ) -> Result<Option<User>, DomainError>;

    /// Number of users of a company, whatever their status
    async fn count_in_company(&self, company_id: &CompanyId) -> Result<u64, DomainError>;

    /// Number of users assigned to a job profile
    async fn count_with_job_profile(
        &self,
        company_id: &CompanyId,
        job_profile_id: &JobProfileId,
    ) -> Result<u64, DomainError>;
}
