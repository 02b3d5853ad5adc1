//! Training plan entity

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use super::validation::{
    MAX_DESCRIPTION_LENGTH, MAX_TEXT_LENGTH, TrainingPlanValidationError, validate_duration,
    validate_text, validate_title,
};
use crate::domain::common::validation::normalize_optional;
use crate::domain::common::{CompanyId, define_id, string_enum};
use crate::domain::storage::StorageEntity;
use crate::domain::traits::TenantScoped;
use crate::domain::user::UserId;

define_id!(
    /// Training plan identifier
    TrainingPlanId,
    "plan de formación"
);

string_enum!(
    TrainingModality, "modalidad" {
        InPerson => "IN_PERSON",
        Online => "ONLINE",
        Blended => "BLENDED",
    }
);

string_enum!(
    /// PLANNED -> IN_PROGRESS -> COMPLETED; open plans can be CANCELLED
    #[derive(Default)]
    TrainingStatus, "estado de formación" {
        #[default]
        Planned => "PLANNED",
        InProgress => "IN_PROGRESS",
        Completed => "COMPLETED",
        Cancelled => "CANCELLED",
    }
);

impl TrainingStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    pub fn can_transition_to(&self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Planned, Self::InProgress)
                | (Self::InProgress, Self::Completed)
                | (Self::Planned | Self::InProgress, Self::Cancelled)
        )
    }
}

#[derive(Debug, Clone)]
pub struct NewTrainingPlan {
    pub title: String,
    pub description: Option<String>,
    pub topic: Option<String>,
    pub trainer: Option<String>,
    pub modality: TrainingModality,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub duration_hours: f64,
    pub participants: Vec<UserId>,
}

#[derive(Debug, Clone, Default)]
pub struct TrainingPlanChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub topic: Option<String>,
    pub trainer: Option<String>,
    pub modality: Option<TrainingModality>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub duration_hours: Option<f64>,
}

/// Planned training action for the company's staff
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingPlan {
    id: TrainingPlanId,
    company_id: CompanyId,
    title: String,
    description: Option<String>,
    topic: Option<String>,
    trainer: Option<String>,
    modality: TrainingModality,
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
    duration_hours: f64,
    participants: Vec<UserId>,
    /// Calendar year of `start_date`, stored for filtering
    year: i32,
    status: TrainingStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TrainingPlan {
    pub fn new(
        company_id: CompanyId,
        data: NewTrainingPlan,
    ) -> Result<Self, TrainingPlanValidationError> {
        let title = data.title.trim().to_string();
        let description = normalize_optional(data.description);
        let topic = normalize_optional(data.topic);
        let trainer = normalize_optional(data.trainer);

        validate_title(&title)?;
        validate_text("descripción", description.as_deref(), MAX_DESCRIPTION_LENGTH)?;
        validate_text("tema", topic.as_deref(), MAX_TEXT_LENGTH)?;
        validate_text("formador", trainer.as_deref(), MAX_TEXT_LENGTH)?;
        validate_duration(data.duration_hours)?;

        if data.end_date < data.start_date {
            return Err(TrainingPlanValidationError::EndBeforeStart);
        }

        let mut participants = Vec::with_capacity(data.participants.len());
        for participant in data.participants {
            if !participants.contains(&participant) {
                participants.push(participant);
            }
        }

        let now = Utc::now();

        Ok(Self {
            id: TrainingPlanId::generate(),
            company_id,
            title,
            description,
            topic,
            trainer,
            modality: data.modality,
            start_date: data.start_date,
            end_date: data.end_date,
            duration_hours: data.duration_hours,
            participants,
            year: data.start_date.year(),
            status: TrainingStatus::default(),
            created_at: now,
            updated_at: now,
        })
    }

    pub fn id(&self) -> &TrainingPlanId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn topic(&self) -> Option<&str> {
        self.topic.as_deref()
    }

    pub fn trainer(&self) -> Option<&str> {
        self.trainer.as_deref()
    }

    pub fn modality(&self) -> TrainingModality {
        self.modality
    }

    pub fn start_date(&self) -> DateTime<Utc> {
        self.start_date
    }

    pub fn end_date(&self) -> DateTime<Utc> {
        self.end_date
    }

    pub fn duration_hours(&self) -> f64 {
        self.duration_hours
    }

    pub fn participants(&self) -> &[UserId] {
        &self.participants
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn status(&self) -> TrainingStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn apply(&mut self, changes: TrainingPlanChanges) -> Result<(), TrainingPlanValidationError> {
        let title = changes.title.map(|v| v.trim().to_string());

        if let Some(title) = &title {
            validate_title(title)?;
        }
        validate_text(
            "descripción",
            changes.description.as_deref(),
            MAX_DESCRIPTION_LENGTH,
        )?;
        validate_text("tema", changes.topic.as_deref(), MAX_TEXT_LENGTH)?;
        validate_text("formador", changes.trainer.as_deref(), MAX_TEXT_LENGTH)?;
        if let Some(hours) = changes.duration_hours {
            validate_duration(hours)?;
        }

        let start_date = changes.start_date.unwrap_or(self.start_date);
        let end_date = changes.end_date.unwrap_or(self.end_date);
        if end_date < start_date {
            return Err(TrainingPlanValidationError::EndBeforeStart);
        }

        if let Some(title) = title {
            self.title = title;
        }
        if changes.description.is_some() {
            self.description = normalize_optional(changes.description);
        }
        if changes.topic.is_some() {
            self.topic = normalize_optional(changes.topic);
        }
        if changes.trainer.is_some() {
            self.trainer = normalize_optional(changes.trainer);
        }
        if let Some(modality) = changes.modality {
            self.modality = modality;
        }
        if let Some(hours) = changes.duration_hours {
            self.duration_hours = hours;
        }
        self.start_date = start_date;
        self.end_date = end_date;
        self.year = start_date.year();

        self.touch();
        Ok(())
    }

    pub fn change_status(&mut self, next: TrainingStatus) -> Result<(), TrainingPlanValidationError> {
        if !self.status.can_transition_to(next) {
            return Err(TrainingPlanValidationError::InvalidTransition {
                from: self.status,
                to: next,
            });
        }

        self.status = next;
        self.touch();
        Ok(())
    }

    pub fn add_participant(&mut self, user_id: UserId) -> Result<(), TrainingPlanValidationError> {
        self.ensure_open()?;

        if self.participants.contains(&user_id) {
            return Err(TrainingPlanValidationError::AlreadyEnrolled);
        }

        self.participants.push(user_id);
        self.touch();
        Ok(())
    }

    pub fn remove_participant(&mut self, user_id: &UserId) -> Result<(), TrainingPlanValidationError> {
        self.ensure_open()?;

        let before = self.participants.len();
        self.participants.retain(|p| p != user_id);

        if self.participants.len() == before {
            return Err(TrainingPlanValidationError::NotEnrolled);
        }

        self.touch();
        Ok(())
    }

    fn ensure_open(&self) -> Result<(), TrainingPlanValidationError> {
        if self.status.is_terminal() {
            return Err(TrainingPlanValidationError::Closed(self.status));
        }
        Ok(())
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl TenantScoped for TrainingPlan {
    fn company_id(&self) -> &CompanyId {
        &self.company_id
    }
}

impl StorageEntity for TrainingPlan {
    type Key = TrainingPlanId;
    const COLLECTION: &'static str = "training_plans";

    fn key(&self) -> &Self::Key {
        &self.id
    }

    fn indexes() -> Vec<&'static [&'static str]> {
        vec![
            &["company_id", "status"],
            &["company_id", "year"],
            &["company_id", "start_date"],
        ]
    }
}
