//! Meeting minutes entity with agreements and approval workflow

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validation::{
    MAX_ITEM_LENGTH, MinutesValidationError, validate_attendees, validate_list, validate_summary,
    validate_title,
};
use crate::domain::common::validation::{normalize_list, normalize_optional};
use crate::domain::common::{CompanyId, define_id, string_enum};
use crate::domain::storage::StorageEntity;
use crate::domain::traits::TenantScoped;
use crate::domain::user::UserId;

define_id!(
    /// Meeting minutes identifier
    MinutesId,
    "acta"
);

define_id!(
    /// Agreement identifier, unique within its minutes
    AgreementId,
    "acuerdo"
);

string_enum!(
    MeetingType, "tipo de reunión" {
        ManagementReview => "MANAGEMENT_REVIEW",
        InternalAudit => "INTERNAL_AUDIT",
        QualityCommittee => "QUALITY_COMMITTEE",
        Operational => "OPERATIONAL",
        Other => "OTHER",
    }
);

string_enum!(
    /// Approval workflow: DRAFT -> APPROVED -> ARCHIVED
    #[derive(Default)]
    MinutesStatus, "estado de acta" {
        #[default]
        Draft => "DRAFT",
        Approved => "APPROVED",
        Archived => "ARCHIVED",
    }
);

/// An action item agreed during the meeting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agreement {
    pub id: AgreementId,
    pub description: String,
    pub responsible: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct NewAgreement {
    pub description: String,
    pub responsible: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct NewMinutes {
    pub title: String,
    pub meeting_type: MeetingType,
    pub meeting_date: DateTime<Utc>,
    pub location: Option<String>,
    pub attendees: Vec<String>,
    pub agenda: Vec<String>,
    pub summary: Option<String>,
    pub agreements: Vec<NewAgreement>,
}

/// Partial update; only allowed while in draft
#[derive(Debug, Clone, Default)]
pub struct MinutesChanges {
    pub title: Option<String>,
    pub meeting_type: Option<MeetingType>,
    pub meeting_date: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub attendees: Option<Vec<String>>,
    pub agenda: Option<Vec<String>>,
    pub summary: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeetingMinutes {
    id: MinutesId,
    company_id: CompanyId,
    title: String,
    meeting_type: MeetingType,
    meeting_date: DateTime<Utc>,
    location: Option<String>,
    attendees: Vec<String>,
    agenda: Vec<String>,
    summary: Option<String>,
    agreements: Vec<Agreement>,
    status: MinutesStatus,
    approved_by: Option<UserId>,
    approved_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl MeetingMinutes {
    /// Create draft minutes
    pub fn new(company_id: CompanyId, data: NewMinutes) -> Result<Self, MinutesValidationError> {
        let title = data.title.trim().to_string();
        let attendees = normalize_list(data.attendees);
        let agenda = normalize_list(data.agenda);
        let summary = normalize_optional(data.summary);

        validate_title(&title)?;
        validate_attendees(&attendees)?;
        validate_list("puntos del orden del día", &agenda)?;
        validate_summary(summary.as_deref())?;

        let agreements = data
            .agreements
            .into_iter()
            .map(build_agreement)
            .collect::<Result<Vec<_>, _>>()?;

        let now = Utc::now();

        Ok(Self {
            id: MinutesId::generate(),
            company_id,
            title,
            meeting_type: data.meeting_type,
            meeting_date: data.meeting_date,
            location: normalize_optional(data.location),
            attendees,
            agenda,
            summary,
            agreements,
            status: MinutesStatus::default(),
            approved_by: None,
            approved_at: None,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn id(&self) -> &MinutesId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn meeting_type(&self) -> MeetingType {
        self.meeting_type
    }

    pub fn meeting_date(&self) -> DateTime<Utc> {
        self.meeting_date
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn attendees(&self) -> &[String] {
        &self.attendees
    }

    pub fn agenda(&self) -> &[String] {
        &self.agenda
    }

    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    pub fn agreements(&self) -> &[Agreement] {
        &self.agreements
    }

    pub fn status(&self) -> MinutesStatus {
        self.status
    }

    pub fn approved_by(&self) -> Option<&UserId> {
        self.approved_by.as_ref()
    }

    pub fn approved_at(&self) -> Option<DateTime<Utc>> {
        self.approved_at
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn is_draft(&self) -> bool {
        self.status == MinutesStatus::Draft
    }

    pub fn apply(&mut self, changes: MinutesChanges) -> Result<(), MinutesValidationError> {
        self.ensure_draft()?;

        let title = changes.title.map(|v| v.trim().to_string());
        let attendees = changes.attendees.map(normalize_list);
        let agenda = changes.agenda.map(normalize_list);

        if let Some(title) = &title {
            validate_title(title)?;
        }
        if let Some(attendees) = &attendees {
            validate_attendees(attendees)?;
        }
        if let Some(agenda) = &agenda {
            validate_list("puntos del orden del día", agenda)?;
        }
        validate_summary(changes.summary.as_deref())?;

        if let Some(title) = title {
            self.title = title;
        }
        if let Some(meeting_type) = changes.meeting_type {
            self.meeting_type = meeting_type;
        }
        if let Some(meeting_date) = changes.meeting_date {
            self.meeting_date = meeting_date;
        }
        if changes.location.is_some() {
            self.location = normalize_optional(changes.location);
        }
        if let Some(attendees) = attendees {
            self.attendees = attendees;
        }
        if let Some(agenda) = agenda {
            self.agenda = agenda;
        }
        if changes.summary.is_some() {
            self.summary = normalize_optional(changes.summary);
        }

        self.touch();
        Ok(())
    }

    /// DRAFT -> APPROVED, recording the approver
    pub fn approve(&mut self, approver: UserId) -> Result<(), MinutesValidationError> {
        self.transition(MinutesStatus::Draft, MinutesStatus::Approved)?;
        self.approved_by = Some(approver);
        self.approved_at = Some(self.updated_at);
        Ok(())
    }

    /// APPROVED -> ARCHIVED
    pub fn archive(&mut self) -> Result<(), MinutesValidationError> {
        self.transition(MinutesStatus::Approved, MinutesStatus::Archived)
    }

    pub fn add_agreement(
        &mut self,
        agreement: NewAgreement,
    ) -> Result<&Agreement, MinutesValidationError> {
        self.ensure_not_archived()?;

        let agreement = build_agreement(agreement)?;
        self.agreements.push(agreement);
        self.touch();

        let last = self.agreements.len() - 1;
        Ok(&self.agreements[last])
    }

    /// Mark an agreement as completed; completing twice is a no-op
    pub fn complete_agreement(
        &mut self,
        agreement_id: &AgreementId,
    ) -> Result<(), MinutesValidationError> {
        self.ensure_not_archived()?;

        let now = Utc::now();
        let agreement = self
            .agreements
            .iter_mut()
            .find(|a| &a.id == agreement_id)
            .ok_or(MinutesValidationError::AgreementNotFound)?;

        if !agreement.completed {
            agreement.completed = true;
            agreement.completed_at = Some(now);
            self.touch();
        }

        Ok(())
    }

    /// Minutes can only be removed while still a draft
    pub fn ensure_draft(&self) -> Result<(), MinutesValidationError> {
        if !self.is_draft() {
            return Err(MinutesValidationError::NotDraft(self.status));
        }
        Ok(())
    }

    fn ensure_not_archived(&self) -> Result<(), MinutesValidationError> {
        if self.status == MinutesStatus::Archived {
            return Err(MinutesValidationError::Archived);
        }
        Ok(())
    }

    fn transition(
        &mut self,
        from: MinutesStatus,
        to: MinutesStatus,
    ) -> Result<(), MinutesValidationError> {
        if self.status != from {
            return Err(MinutesValidationError::InvalidTransition {
                from: self.status,
                to,
            });
        }

        self.status = to;
        self.touch();
        Ok(())
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

fn build_agreement(data: NewAgreement) -> Result<Agreement, MinutesValidationError> {
    let description = data.description.trim().to_string();

    if description.is_empty() {
        return Err(MinutesValidationError::EmptyAgreement);
    }
    validate_list("acuerdos", std::slice::from_ref(&description))?;

    let responsible = normalize_optional(data.responsible);
    if responsible
        .as_deref()
        .is_some_and(|r| r.chars().count() > MAX_ITEM_LENGTH)
    {
        return Err(MinutesValidationError::InvalidList(
            "responsables",
            1,
            MAX_ITEM_LENGTH,
        ));
    }

    Ok(Agreement {
        id: AgreementId::generate(),
        description,
        responsible,
        due_date: data.due_date,
        completed: false,
        completed_at: None,
    })
}

impl TenantScoped for MeetingMinutes {
    fn company_id(&self) -> &CompanyId {
        &self.company_id
    }
}

impl StorageEntity for MeetingMinutes {
    type Key = MinutesId;
    const COLLECTION: &'static str = "minutes";

    fn key(&self) -> &Self::Key {
        &self.id
    }

    fn indexes() -> Vec<&'static [&'static str]> {
        vec![
            &["company_id", "status"],
            &["company_id", "meeting_type"],
            &["company_id", "meeting_date"],
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_minutes() -> MeetingMinutes {
        MeetingMinutes::new(
            CompanyId::new("acme").unwrap(),
            NewMinutes {
                title: "Revisión por la dirección 2024".to_string(),
                meeting_type: MeetingType::ManagementReview,
                meeting_date: Utc::now(),
                location: Some("Sala 1".to_string()),
                attendees: vec!["Ana".to_string(), "Luis".to_string()],
                agenda: vec!["Indicadores".to_string()],
                summary: None,
                agreements: vec![NewAgreement {
                    description: "Actualizar matriz de riesgos".to_string(),
                    responsible: Some("Ana".to_string()),
                    due_date: None,
                }],
            },
        )
        .unwrap()
    }

    #[test]
    fn test_new_minutes_start_as_draft() {
        let minutes = create_minutes();
        assert_eq!(minutes.status(), MinutesStatus::Draft);
        assert_eq!(minutes.agreements().len(), 1);
        assert!(!minutes.agreements()[0].completed);
        assert_eq!(minutes.created_at(), minutes.updated_at());
    }

    #[test]
    fn test_requires_attendees() {
        let result = MeetingMinutes::new(
            CompanyId::new("acme").unwrap(),
            NewMinutes {
                title: "Comité".to_string(),
                meeting_type: MeetingType::QualityCommittee,
                meeting_date: Utc::now(),
                location: None,
                attendees: vec!["  ".to_string()],
                agenda: vec![],
                summary: None,
                agreements: vec![],
            },
        );
        assert_eq!(result.unwrap_err(), MinutesValidationError::NoAttendees);
    }

    #[test]
    fn test_approval_workflow() {
        let mut minutes = create_minutes();
        let approver = UserId::generate();

        assert!(minutes.archive().is_err());

        minutes.approve(approver.clone()).unwrap();
        assert_eq!(minutes.status(), MinutesStatus::Approved);
        assert_eq!(minutes.approved_by(), Some(&approver));
        assert!(minutes.approved_at().is_some());

        assert!(minutes.approve(approver).is_err());
        assert!(minutes.apply(MinutesChanges::default()).is_err());

        minutes.archive().unwrap();
        assert_eq!(minutes.status(), MinutesStatus::Archived);
    }

    #[test]
    fn test_agreements_after_approval() {
        let mut minutes = create_minutes();
        minutes.approve(UserId::generate()).unwrap();

        let agreement_id = minutes
            .add_agreement(NewAgreement {
                description: "Formar al personal nuevo".to_string(),
                responsible: None,
                due_date: None,
            })
            .unwrap()
            .id
            .clone();

        minutes.complete_agreement(&agreement_id).unwrap();
        let agreement = minutes
            .agreements()
            .iter()
            .find(|a| a.id == agreement_id)
            .unwrap();
        assert!(agreement.completed);
        assert!(agreement.completed_at.is_some());

        minutes.archive().unwrap();
        assert_eq!(
            minutes.complete_agreement(&agreement_id),
            Err(MinutesValidationError::Archived)
        );
    }

    #[test]
    fn test_complete_unknown_agreement() {
        let mut minutes = create_minutes();
        assert_eq!(
            minutes.complete_agreement(&AgreementId::generate()),
            Err(MinutesValidationError::AgreementNotFound)
        );
    }
}
