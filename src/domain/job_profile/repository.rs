//! Job profile repository trait

use async_trait::async_trait;

use super::criteria::JobProfileSearchCriteria;
use super::entity::{JobProfile, JobProfileId};
use crate::domain::DomainError;
use crate::domain::common::CompanyId;
use crate::domain::traits::Repository;

#[async_trait]
pub trait JobProfileRepository:
    Repository<JobProfile, JobProfileId, JobProfileSearchCriteria>
{
    /// Find a profile by title, ignoring case
    async fn find_by_title(
        &self,
        company_id: &CompanyId,
        title: &str,
    ) -> Result<Option<JobProfile>, DomainError>;

    /// Number of profiles reporting to the given one
    async fn count_reporting_to(
        &self,
        company_id: &CompanyId,
        id: &JobProfileId,
    ) -> Result<u64, DomainError>;
}
