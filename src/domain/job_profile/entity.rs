//! Job profile entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validation::{
    JobProfileValidationError, validate_department, validate_description, validate_list,
    validate_title,
};
use crate::domain::common::validation::{normalize_list, normalize_optional};
use crate::domain::common::{CompanyId, define_id, string_enum};
use crate::domain::storage::{StorageEntity, UniqueConstraint};
use crate::domain::traits::TenantScoped;

define_id!(
    /// Job profile identifier
    JobProfileId,
    "puesto"
);

string_enum!(
    #[derive(Default)]
    JobProfileStatus, "estado de puesto" {
        #[default]
        Active => "ACTIVE",
        Inactive => "INACTIVE",
    }
);

#[derive(Debug, Clone, Default)]
pub struct NewJobProfile {
    pub title: String,
    pub department: String,
    pub description: Option<String>,
    pub responsibilities: Vec<String>,
    pub requirements: Vec<String>,
    pub competencies: Vec<String>,
    pub reports_to: Option<JobProfileId>,
}

/// Partial update; `reports_to: Some(None)` clears the reporting line
#[derive(Debug, Clone, Default)]
pub struct JobProfileChanges {
    pub title: Option<String>,
    pub department: Option<String>,
    pub description: Option<String>,
    pub responsibilities: Option<Vec<String>>,
    pub requirements: Option<Vec<String>>,
    pub competencies: Option<Vec<String>>,
    pub reports_to: Option<Option<JobProfileId>>,
}

/// Position description used for competence management
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobProfile {
    id: JobProfileId,
    company_id: CompanyId,
    title: String,
    department: String,
    description: Option<String>,
    responsibilities: Vec<String>,
    requirements: Vec<String>,
    competencies: Vec<String>,
    reports_to: Option<JobProfileId>,
    status: JobProfileStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl JobProfile {
    pub fn new(
        company_id: CompanyId,
        data: NewJobProfile,
    ) -> Result<Self, JobProfileValidationError> {
        let title = data.title.trim().to_string();
        let department = data.department.trim().to_string();
        let description = normalize_optional(data.description);
        let responsibilities = normalize_list(data.responsibilities);
        let requirements = normalize_list(data.requirements);
        let competencies = normalize_list(data.competencies);

        validate_title(&title)?;
        validate_department(&department)?;
        validate_description(description.as_deref())?;
        validate_list("responsabilidades", &responsibilities)?;
        validate_list("requisitos", &requirements)?;
        validate_list("competencias", &competencies)?;

        let now = Utc::now();

        Ok(Self {
            id: JobProfileId::generate(),
            company_id,
            title,
            department,
            description,
            responsibilities,
            requirements,
            competencies,
            reports_to: data.reports_to,
            status: JobProfileStatus::default(),
            created_at: now,
            updated_at: now,
        })
    }

    pub fn id(&self) -> &JobProfileId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn department(&self) -> &str {
        &self.department
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn responsibilities(&self) -> &[String] {
        &self.responsibilities
    }

    pub fn requirements(&self) -> &[String] {
        &self.requirements
    }

    pub fn competencies(&self) -> &[String] {
        &self.competencies
    }

    pub fn reports_to(&self) -> Option<&JobProfileId> {
        self.reports_to.as_ref()
    }

    pub fn status(&self) -> JobProfileStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn apply(&mut self, changes: JobProfileChanges) -> Result<(), JobProfileValidationError> {
        let title = changes.title.map(|v| v.trim().to_string());
        let department = changes.department.map(|v| v.trim().to_string());
        let responsibilities = changes.responsibilities.map(normalize_list);
        let requirements = changes.requirements.map(normalize_list);
        let competencies = changes.competencies.map(normalize_list);

        if let Some(title) = &title {
            validate_title(title)?;
        }
        if let Some(department) = &department {
            validate_department(department)?;
        }
        validate_description(changes.description.as_deref())?;
        if let Some(items) = &responsibilities {
            validate_list("responsabilidades", items)?;
        }
        if let Some(items) = &requirements {
            validate_list("requisitos", items)?;
        }
        if let Some(items) = &competencies {
            validate_list("competencias", items)?;
        }
        if let Some(Some(reports_to)) = &changes.reports_to {
            if reports_to == &self.id {
                return Err(JobProfileValidationError::ReportsToItself);
            }
        }

        if let Some(title) = title {
            self.title = title;
        }
        if let Some(department) = department {
            self.department = department;
        }
        if changes.description.is_some() {
            self.description = normalize_optional(changes.description);
        }
        if let Some(items) = responsibilities {
            self.responsibilities = items;
        }
        if let Some(items) = requirements {
            self.requirements = items;
        }
        if let Some(items) = competencies {
            self.competencies = items;
        }
        if let Some(reports_to) = changes.reports_to {
            self.reports_to = reports_to;
        }

        self.touch();
        Ok(())
    }

    pub fn set_status(&mut self, status: JobProfileStatus) {
        self.status = status;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl TenantScoped for JobProfile {
    fn company_id(&self) -> &CompanyId {
        &self.company_id
    }
}

impl StorageEntity for JobProfile {
    type Key = JobProfileId;
    const COLLECTION: &'static str = "job_profiles";

    fn key(&self) -> &Self::Key {
        &self.id
    }

    fn unique_constraints() -> Vec<UniqueConstraint> {
        vec![UniqueConstraint::new("company_title", &["company_id", "title"]).case_insensitive()]
    }

    fn indexes() -> Vec<&'static [&'static str]> {
        vec![&["company_id", "status"], &["company_id", "department"]]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_profile() -> JobProfile {
        JobProfile::new(
            CompanyId::new("acme").unwrap(),
            NewJobProfile {
                title: "Responsable de Calidad".to_string(),
                department: "Calidad".to_string(),
                competencies: vec![" ISO 9001 ".to_string(), "".to_string()],
                ..Default::default()
            },
        )
        .unwrap()
    }

    #[test]
    fn test_new_profile_normalizes_lists() {
        let profile = create_profile();
        assert_eq!(profile.competencies(), &["ISO 9001".to_string()]);
        assert_eq!(profile.status(), JobProfileStatus::Active);
        assert_eq!(profile.created_at(), profile.updated_at());
    }

    #[test]
    fn test_cannot_report_to_itself() {
        let mut profile = create_profile();
        let own_id = profile.id().clone();

        let result = profile.apply(JobProfileChanges {
            reports_to: Some(Some(own_id)),
            ..Default::default()
        });
        assert_eq!(result, Err(JobProfileValidationError::ReportsToItself));
    }

    #[test]
    fn test_apply_replaces_lists() {
        let mut profile = create_profile();
        profile
            .apply(JobProfileChanges {
                requirements: Some(vec!["Grado en ingeniería".to_string()]),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(profile.requirements().len(), 1);
        assert_eq!(profile.competencies().len(), 1);
    }
}
