//! Meeting minutes use cases

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::DomainError;
use crate::domain::common::CompanyId;
use crate::domain::minutes::{
    AgreementId, MeetingMinutes, MinutesChanges, MinutesId, MinutesRepository,
    MinutesSearchCriteria, NewAgreement, NewMinutes,
};
use crate::domain::search::{Page, SearchCriteria};
use crate::domain::user::UserId;

/// Minutes service covering drafting, approval and follow-up of agreements
#[derive(Debug)]
pub struct MinutesService<R: MinutesRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: MinutesRepository + ?Sized> MinutesService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub async fn create(
        &self,
        company_id: &CompanyId,
        data: NewMinutes,
    ) -> Result<MeetingMinutes, DomainError> {
        info!(company_id = %company_id, title = %data.title, meeting_type = %data.meeting_type, "Creating minutes");

        let minutes = MeetingMinutes::new(company_id.clone(), data)?;
        self.repository.save(minutes).await
    }

    pub async fn get(&self, company_id: &CompanyId, id: &str) -> Result<MeetingMinutes, DomainError> {
        debug!(company_id = %company_id, id = %id, "Getting minutes");

        let minutes_id = MinutesId::parse(id)?;
        self.repository
            .find_by_id(company_id, &minutes_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Acta no encontrada"))
    }

    pub async fn search(
        &self,
        criteria: &MinutesSearchCriteria,
    ) -> Result<Page<MeetingMinutes>, DomainError> {
        debug!(company_id = %criteria.company_id(), "Searching minutes");

        self.repository.find_page(criteria).await
    }

    /// Only drafts can be edited
    pub async fn update(
        &self,
        company_id: &CompanyId,
        id: &str,
        changes: MinutesChanges,
    ) -> Result<MeetingMinutes, DomainError> {
        info!(company_id = %company_id, id = %id, "Updating minutes");

        let mut minutes = self.get(company_id, id).await?;
        minutes.apply(changes)?;
        self.repository.update(minutes).await
    }

    pub async fn approve(
        &self,
        company_id: &CompanyId,
        id: &str,
        approver: &UserId,
    ) -> Result<MeetingMinutes, DomainError> {
        info!(company_id = %company_id, id = %id, approver = %approver, "Approving minutes");

        let mut minutes = self.get(company_id, id).await?;
        minutes.approve(approver.clone())?;
        self.repository.update(minutes).await
    }

    pub async fn archive(
        &self,
        company_id: &CompanyId,
        id: &str,
    ) -> Result<MeetingMinutes, DomainError> {
        info!(company_id = %company_id, id = %id, "Archiving minutes");

        let mut minutes = self.get(company_id, id).await?;
        minutes.archive()?;
        self.repository.update(minutes).await
    }

    pub async fn add_agreement(
        &self,
        company_id: &CompanyId,
        id: &str,
        agreement: NewAgreement,
    ) -> Result<MeetingMinutes, DomainError> {
        info!(company_id = %company_id, id = %id, "Adding agreement to minutes");

        let mut minutes = self.get(company_id, id).await?;
        minutes.add_agreement(agreement)?;
        self.repository.update(minutes).await
    }

    pub async fn complete_agreement(
        &self,
        company_id: &CompanyId,
        id: &str,
        agreement_id: &str,
    ) -> Result<MeetingMinutes, DomainError> {
        info!(company_id = %company_id, id = %id, agreement_id = %agreement_id, "Completing agreement");

        let agreement_id = AgreementId::parse(agreement_id)?;
        let mut minutes = self.get(company_id, id).await?;
        minutes.complete_agreement(&agreement_id)?;
        self.repository.update(minutes).await
    }

    /// Only drafts can be deleted
    pub async fn delete(&self, company_id: &CompanyId, id: &str) -> Result<(), DomainError> {
        info!(company_id = %company_id, id = %id, "Deleting minutes");

        let minutes = self.get(company_id, id).await?;
        minutes.ensure_draft()?;
        self.repository.delete(minutes.id()).await?;
        Ok(())
    }
}
