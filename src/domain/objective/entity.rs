//! Quality objective entity and progress tracking

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validation::{
    MAX_DESCRIPTION_LENGTH, MAX_TEXT_LENGTH, ObjectiveValidationError, validate_indicator, validate_measurement, validate_target,
    validate_text, validate_title,
};
use crate::domain::common::validation::normalize_optional;
use crate::domain::common::{CompanyId, define_id, string_enum};
use crate::domain::storage::StorageEntity;
use crate::domain::traits::TenantScoped;
use crate::domain::user::UserId;

define_id!(
    /// Objective identifier
    ObjectiveId,
    "objetivo"
);

string_enum!(
    #[derive(Default)]
    ObjectiveStatus, "estado de objetivo" {
        #[default]
        Pending => "PENDING",
        InProgress => "IN_PROGRESS",
        Achieved => "ACHIEVED",
        NotAchieved => "NOT_ACHIEVED",
        Cancelled => "CANCELLED",
    }
);

impl ObjectiveStatus {
    /// Statuses still being worked on
    pub const OPEN: &'static [Self] = &[Self::Pending, Self::InProgress];

    pub fn is_open(&self) -> bool {
        Self::OPEN.contains(self)
    }
}

/// One measurement of the indicator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressEntry {
    pub value: f64,
    pub notes: Option<String>,
    pub recorded_by: Option<UserId>,
    pub recorded_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewObjective {
    pub title: String,
    pub description: Option<String>,
    pub process: Option<String>,
    pub indicator: String,
    pub target_value: f64,
    pub current_value: Option<f64>,
    pub unit: Option<String>,
    pub start_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub responsible_user_id: Option<UserId>,
}

#[derive(Debug, Clone, Default)]
pub struct ObjectiveChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub process: Option<String>,
    pub indicator: Option<String>,
    pub target_value: Option<f64>,
    pub unit: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub due_date: Option<DateTime<Utc>>,
    pub responsible_user_id: Option<Option<UserId>>,
}

/// Measurable quality objective
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Objective {
    id: ObjectiveId,
    company_id: CompanyId,
    title: String,
    description: Option<String>,
    process: Option<String>,
    indicator: String,
    target_value: f64,
    current_value: f64,
    unit: Option<String>,
    start_date: DateTime<Utc>,
    due_date: DateTime<Utc>,
    responsible_user_id: Option<UserId>,
    progress_history: Vec<ProgressEntry>,
    status: ObjectiveStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Objective {
    pub fn new(company_id: CompanyId, data: NewObjective) -> Result<Self, ObjectiveValidationError> {
        let title = data.title.trim().to_string();
        let indicator = data.indicator.trim().to_string();
        let description = normalize_optional(data.description);
        let process = normalize_optional(data.process);
        let unit = normalize_optional(data.unit);
        let current_value = data.current_value.unwrap_or(0.0);

        validate_title(&title)?;
        validate_indicator(&indicator)?;
        validate_text("descripción", description.as_deref(), MAX_DESCRIPTION_LENGTH)?;
        validate_text("proceso", process.as_deref(), MAX_TEXT_LENGTH)?;
        validate_text("unidad", unit.as_deref(), MAX_TEXT_LENGTH)?;
        validate_target(data.target_value)?;
        validate_measurement(current_value)?;

        if data.due_date < data.start_date {
            return Err(ObjectiveValidationError::DueBeforeStart);
        }

        let now = Utc::now();

        Ok(Self {
            id: ObjectiveId::generate(),
            company_id,
            title,
            description,
            process,
            indicator,
            target_value: data.target_value,
            current_value,
            unit,
            start_date: data.start_date,
            due_date: data.due_date,
            responsible_user_id: data.responsible_user_id,
            progress_history: Vec::new(),
            status: ObjectiveStatus::default(),
            created_at: now,
            updated_at: now,
        })
    }

    pub fn id(&self) -> &ObjectiveId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn process(&self) -> Option<&str> {
        self.process.as_deref()
    }

    pub fn indicator(&self) -> &str {
        &self.indicator
    }

    pub fn target_value(&self) -> f64 {
        self.target_value
    }

    pub fn current_value(&self) -> f64 {
        self.current_value
    }

    pub fn unit(&self) -> Option<&str> {
        self.unit.as_deref()
    }

    pub fn start_date(&self) -> DateTime<Utc> {
        self.start_date
    }

    pub fn due_date(&self) -> DateTime<Utc> {
        self.due_date
    }

    pub fn responsible_user_id(&self) -> Option<&UserId> {
        self.responsible_user_id.as_ref()
    }

    pub fn progress_history(&self) -> &[ProgressEntry] {
        &self.progress_history
    }

    pub fn status(&self) -> ObjectiveStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Percentage of the target reached, clamped to 0..=100
    pub fn progress(&self) -> f64 {
        (self.current_value / self.target_value * 100.0).clamp(0.0, 100.0)
    }

    /// Past due and still open as of `now`
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.due_date < now && self.status.is_open()
    }

    pub fn apply(&mut self, changes: ObjectiveChanges) -> Result<(), ObjectiveValidationError> {
        let title = changes.title.map(|v| v.trim().to_string());
        let indicator = changes.indicator.map(|v| v.trim().to_string());

        if let Some(title) = &title {
            validate_title(title)?;
        }
        if let Some(indicator) = &indicator {
            validate_indicator(indicator)?;
        }
        validate_text(
            "descripción",
            changes.description.as_deref(),
            MAX_DESCRIPTION_LENGTH,
        )?;
        validate_text("proceso", changes.process.as_deref(), MAX_TEXT_LENGTH)?;
        validate_text("unidad", changes.unit.as_deref(), MAX_TEXT_LENGTH)?;
        if let Some(target) = changes.target_value {
            validate_target(target)?;
        }

        let start_date = changes.start_date.unwrap_or(self.start_date);
        let due_date = changes.due_date.unwrap_or(self.due_date);
        if due_date < start_date {
            return Err(ObjectiveValidationError::DueBeforeStart);
        }

        if let Some(title) = title {
            self.title = title;
        }
        if let Some(indicator) = indicator {
            self.indicator = indicator;
        }
        if changes.description.is_some() {
            self.description = normalize_optional(changes.description);
        }
        if changes.process.is_some() {
            self.process = normalize_optional(changes.process);
        }
        if changes.unit.is_some() {
            self.unit = normalize_optional(changes.unit);
        }
        if let Some(target) = changes.target_value {
            self.target_value = target;
        }
        if let Some(responsible) = changes.responsible_user_id {
            self.responsible_user_id = responsible;
        }
        self.start_date = start_date;
        self.due_date = due_date;

        self.touch();
        Ok(())
    }

    /// Record a new indicator measurement
    ///
    /// A pending objective moves to in progress; reaching the target marks it
    /// achieved.
    pub fn record_progress(
        &mut self,
        value: f64,
        notes: Option<String>,
        recorded_by: Option<UserId>,
    ) -> Result<(), ObjectiveValidationError> {
        if !self.status.is_open() {
            return Err(ObjectiveValidationError::ProgressNotAllowed(self.status));
        }
        validate_measurement(value)?;

        let now = Utc::now();
        self.current_value = value;
        self.progress_history.push(ProgressEntry {
            value,
            notes: normalize_optional(notes),
            recorded_by,
            recorded_at: now,
        });

        self.status = if value >= self.target_value {
            ObjectiveStatus::Achieved
        } else {
            ObjectiveStatus::InProgress
        };

        self.touch();
        Ok(())
    }

    pub fn set_status(&mut self, status: ObjectiveStatus) -> Result<(), ObjectiveValidationError> {
        if self.status == ObjectiveStatus::Cancelled && status != ObjectiveStatus::Cancelled {
            return Err(ObjectiveValidationError::Cancelled);
        }

        self.status = status;
        self.touch();
        Ok(())
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl TenantScoped for Objective {
    fn company_id(&self) -> &CompanyId {
        &self.company_id
    }
}

impl StorageEntity for Objective {
    type Key = ObjectiveId;
    const COLLECTION: &'static str = "objectives";

    fn key(&self) -> &Self::Key {
        &self.id
    }

    fn indexes() -> Vec<&'static [&'static str]> {
        vec![&["company_id", "status"], &["company_id", "due_date"]]
    }
}
