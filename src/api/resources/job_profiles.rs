//! Job profile endpoints

use axum::extract::{Path, State};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use validator::Validate;

use crate::api::middleware::RequireUser;
use crate::api::state::AppState;
use crate::api::types::{
    ApiError, ApiResponse, Created, ListParams, Query, ValidatedJson, date_range, double_option,
    parse_optional,
};
use crate::domain::job_profile::{
    JobProfile, JobProfileChanges, JobProfileId, JobProfileSearchCriteria, JobProfileSortField,
    JobProfileStatus, NewJobProfile,
};
use crate::domain::search::Page;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateJobProfileRequest {
    #[validate(length(min = 2, max = 200, message = "debe tener entre 2 y 200 caracteres"))]
    pub title: String,
    #[validate(length(min = 1, max = 200, message = "debe tener entre 1 y 200 caracteres"))]
    pub department: String,
    #[validate(length(max = 2000, message = "no puede superar 2000 caracteres"))]
    pub description: Option<String>,
    #[serde(default)]
    #[validate(length(max = 50, message = "admite como máximo 50 elementos"))]
    pub responsibilities: Vec<String>,
    #[serde(default)]
    #[validate(length(max = 50, message = "admite como máximo 50 elementos"))]
    pub requirements: Vec<String>,
    #[serde(default)]
    #[validate(length(max = 50, message = "admite como máximo 50 elementos"))]
    pub competencies: Vec<String>,
    pub reports_to: Option<JobProfileId>,
}

impl From<CreateJobProfileRequest> for NewJobProfile {
    fn from(request: CreateJobProfileRequest) -> Self {
        Self {
            title: request.title,
            department: request.department,
            description: request.description,
            responsibilities: request.responsibilities,
            requirements: request.requirements,
            competencies: request.competencies,
            reports_to: request.reports_to,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateJobProfileRequest {
    #[validate(length(min = 2, max = 200, message = "debe tener entre 2 y 200 caracteres"))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 200, message = "debe tener entre 1 y 200 caracteres"))]
    pub department: Option<String>,
    #[validate(length(max = 2000, message = "no puede superar 2000 caracteres"))]
    pub description: Option<String>,
    #[validate(length(max = 50, message = "admite como máximo 50 elementos"))]
    pub responsibilities: Option<Vec<String>>,
    #[validate(length(max = 50, message = "admite como máximo 50 elementos"))]
    pub requirements: Option<Vec<String>>,
    #[validate(length(max = 50, message = "admite como máximo 50 elementos"))]
    pub competencies: Option<Vec<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub reports_to: Option<Option<JobProfileId>>,
}

impl From<UpdateJobProfileRequest> for JobProfileChanges {
    fn from(request: UpdateJobProfileRequest) -> Self {
        Self {
            title: request.title,
            department: request.department,
            description: request.description,
            responsibilities: request.responsibilities,
            requirements: request.requirements,
            competencies: request.competencies,
            reports_to: request.reports_to,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct JobProfileStatusRequest {
    pub status: JobProfileStatus,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobProfileFilters {
    pub title: Option<String>,
    pub department: Option<String>,
    pub status: Option<String>,
    pub reports_to: Option<String>,
    pub created_from: Option<DateTime<Utc>>,
    pub created_to: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct JobProfileResponse {
    pub id: String,
    pub title: String,
    pub department: String,
    pub description: Option<String>,
    pub responsibilities: Vec<String>,
    pub requirements: Vec<String>,
    pub competencies: Vec<String>,
    pub reports_to: Option<String>,
    pub status: JobProfileStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&JobProfile> for JobProfileResponse {
    fn from(profile: &JobProfile) -> Self {
        Self {
            id: profile.id().to_string(),
            title: profile.title().to_string(),
            department: profile.department().to_string(),
            description: profile.description().map(String::from),
            responsibilities: profile.responsibilities().to_vec(),
            requirements: profile.requirements().to_vec(),
            competencies: profile.competencies().to_vec(),
            reports_to: profile.reports_to().map(ToString::to_string),
            status: profile.status(),
            created_at: profile.created_at(),
            updated_at: profile.updated_at(),
        }
    }
}

/// GET /api/job-profiles
pub async fn list_job_profiles(
    State(state): State<AppState>,
    user: RequireUser,
    Query(params): Query<ListParams>,
    Query(filters): Query<JobProfileFilters>,
) -> Result<ApiResponse<Page<JobProfileResponse>>, ApiError> {
    debug!(company_id = %user.company_id(), "Listing job profiles");

    let pagination = params.pagination()?;
    let mut builder = JobProfileSearchCriteria::builder(user.company_id().clone())
        .with_pagination(pagination.page().into(), pagination.limit().into())
        .with_created(date_range(filters.created_from, filters.created_to)?);

    if let Some(title) = filters.title {
        builder = builder.with_title(title);
    }
    if let Some(department) = filters.department {
        builder = builder.with_department(department);
    }
    if let Some(status) = parse_optional(filters.status.as_deref())? {
        builder = builder.with_status(status);
    }
    if let Some(reports_to) = parse_optional(filters.reports_to.as_deref())? {
        builder = builder.with_reports_to(reports_to);
    }
    if let Some(sort) = params.sort::<JobProfileSortField>()? {
        builder = builder.with_sorting(sort.field, sort.order);
    }

    let page = state.job_profile_service.search(&builder.build()).await?;
    Ok(ApiResponse::ok(page.map(|p| JobProfileResponse::from(&p))))
}

/// POST /api/job-profiles
pub async fn create_job_profile(
    State(state): State<AppState>,
    user: RequireUser,
    ValidatedJson(request): ValidatedJson<CreateJobProfileRequest>,
) -> Result<Created<JobProfileResponse>, ApiError> {
    let profile = state
        .job_profile_service
        .create(user.company_id(), request.into())
        .await?;

    Ok(Created(JobProfileResponse::from(&profile)))
}

/// GET /api/job-profiles/{id}
pub async fn get_job_profile(
    State(state): State<AppState>,
    user: RequireUser,
    Path(id): Path<String>,
) -> Result<ApiResponse<JobProfileResponse>, ApiError> {
    let profile = state.job_profile_service.get(user.company_id(), &id).await?;
    Ok(ApiResponse::ok(JobProfileResponse::from(&profile)))
}

/// PUT /api/job-profiles/{id}
pub async fn update_job_profile(
    State(state): State<AppState>,
    user: RequireUser,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateJobProfileRequest>,
) -> Result<ApiResponse<JobProfileResponse>, ApiError> {
    let profile = state
        .job_profile_service
        .update(user.company_id(), &id, request.into())
        .await?;

    Ok(ApiResponse::ok(JobProfileResponse::from(&profile)))
}

/// PATCH /api/job-profiles/{id}/status
pub async fn change_job_profile_status(
    State(state): State<AppState>,
    user: RequireUser,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<JobProfileStatusRequest>,
) -> Result<ApiResponse<JobProfileResponse>, ApiError> {
    let profile = state
        .job_profile_service
        .change_status(user.company_id(), &id, request.status)
        .await?;

    Ok(ApiResponse::ok(JobProfileResponse::from(&profile)))
}

/// DELETE /api/job-profiles/{id}
pub async fn delete_job_profile(
    State(state): State<AppState>,
    user: RequireUser,
    Path(id): Path<String>,
) -> Result<ApiResponse<()>, ApiError> {
    state.job_profile_service.delete(user.company_id(), &id).await?;
    Ok(ApiResponse::message("Puesto eliminado"))
}
