//! Training plan endpoints

use axum::extract::{Path, State};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use validator::Validate;

use crate::api::middleware::RequireUser;
use crate::api::state::AppState;
use crate::api::types::{
    ApiError, ApiResponse, Created, ListParams, Query, ValidatedJson, date_range, parse_optional,
};
use crate::domain::search::Page;
use crate::domain::training_plan::{
    NewTrainingPlan, TrainingModality, TrainingPlan, TrainingPlanChanges,
    TrainingPlanSearchCriteria, TrainingPlanSortField, TrainingStatus,
};
use crate::domain::user::UserId;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTrainingPlanRequest {
    #[validate(length(min = 2, max = 200, message = "debe tener entre 2 y 200 caracteres"))]
    pub title: String,
    #[validate(length(max = 2000, message = "no puede superar 2000 caracteres"))]
    pub description: Option<String>,
    #[validate(length(max = 200, message = "no puede superar 200 caracteres"))]
    pub topic: Option<String>,
    #[validate(length(max = 200, message = "no puede superar 200 caracteres"))]
    pub trainer: Option<String>,
    pub modality: TrainingModality,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[validate(range(min = 0.0, max = 10000.0, message = "debe estar entre 0 y 10000 horas"))]
    pub duration_hours: f64,
    #[serde(default)]
    #[validate(length(max = 500, message = "admite como máximo 500 participantes"))]
    pub participants: Vec<UserId>,
}

impl From<CreateTrainingPlanRequest> for NewTrainingPlan {
    fn from(request: CreateTrainingPlanRequest) -> Self {
        Self {
            title: request.title,
            description: request.description,
            topic: request.topic,
            trainer: request.trainer,
            modality: request.modality,
            start_date: request.start_date,
            end_date: request.end_date,
            duration_hours: request.duration_hours,
            participants: request.participants,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateTrainingPlanRequest {
    #[validate(length(min = 2, max = 200, message = "debe tener entre 2 y 200 caracteres"))]
    pub title: Option<String>,
    #[validate(length(max = 2000, message = "no puede superar 2000 caracteres"))]
    pub description: Option<String>,
    #[validate(length(max = 200, message = "no puede superar 200 caracteres"))]
    pub topic: Option<String>,
    #[validate(length(max = 200, message = "no puede superar 200 caracteres"))]
    pub trainer: Option<String>,
    pub modality: Option<TrainingModality>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    #[validate(range(min = 0.0, max = 10000.0, message = "debe estar entre 0 y 10000 horas"))]
    pub duration_hours: Option<f64>,
}

impl From<UpdateTrainingPlanRequest> for TrainingPlanChanges {
    fn from(request: UpdateTrainingPlanRequest) -> Self {
        Self {
            title: request.title,
            description: request.description,
            topic: request.topic,
            trainer: request.trainer,
            modality: request.modality,
            start_date: request.start_date,
            end_date: request.end_date,
            duration_hours: request.duration_hours,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TrainingStatusRequest {
    pub status: TrainingStatus,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ParticipantRequest {
    #[validate(length(min = 1, message = "es obligatorio"))]
    pub user_id: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrainingPlanFilters {
    pub title: Option<String>,
    pub modality: Option<String>,
    pub status: Option<String>,
    pub participant: Option<String>,
    pub year: Option<i32>,
    pub start_from: Option<DateTime<Utc>>,
    pub start_to: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrainingPlanResponse {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub topic: Option<String>,
    pub trainer: Option<String>,
    pub modality: TrainingModality,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub duration_hours: f64,
    pub participants: Vec<String>,
    pub year: i32,
    pub status: TrainingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&TrainingPlan> for TrainingPlanResponse {
    fn from(plan: &TrainingPlan) -> Self {
        Self {
            id: plan.id().to_string(),
            title: plan.title().to_string(),
            description: plan.description().map(String::from),
            topic: plan.topic().map(String::from),
            trainer: plan.trainer().map(String::from),
            modality: plan.modality(),
            start_date: plan.start_date(),
            end_date: plan.end_date(),
            duration_hours: plan.duration_hours(),
            participants: plan.participants().iter().map(ToString::to_string).collect(),
            year: plan.year(),
            status: plan.status(),
            created_at: plan.created_at(),
            updated_at: plan.updated_at(),
        }
    }
}

/// GET /api/training-plans
pub async fn list_training_plans(
    State(state): State<AppState>,
    user: RequireUser,
    Query(params): Query<ListParams>,
    Query(filters): Query<TrainingPlanFilters>,
) -> Result<ApiResponse<Page<TrainingPlanResponse>>, ApiError> {
    debug!(company_id = %user.company_id(), "Listing training plans");

    let pagination = params.pagination()?;
    let mut builder = TrainingPlanSearchCriteria::builder(user.company_id().clone())
        .with_pagination(pagination.page().into(), pagination.limit().into())
        .with_start(date_range(filters.start_from, filters.start_to)?);

    if let Some(title) = filters.title {
        builder = builder.with_title(title);
    }
    if let Some(modality) = parse_optional(filters.modality.as_deref())? {
        builder = builder.with_modality(modality);
    }
    if let Some(status) = parse_optional(filters.status.as_deref())? {
        builder = builder.with_status(status);
    }
    if let Some(participant) = parse_optional::<UserId>(filters.participant.as_deref())? {
        builder = builder.with_participant(participant);
    }
    if let Some(year) = filters.year {
        builder = builder.with_year(year);
    }
    if let Some(sort) = params.sort::<TrainingPlanSortField>()? {
        builder = builder.with_sorting(sort.field, sort.order);
    }

    let page = state.training_plan_service.search(&builder.build()).await?;
    Ok(ApiResponse::ok(page.map(|p| TrainingPlanResponse::from(&p))))
}

/// POST /api/training-plans
pub async fn create_training_plan(
    State(state): State<AppState>,
    user: RequireUser,
    ValidatedJson(request): ValidatedJson<CreateTrainingPlanRequest>,
) -> Result<Created<TrainingPlanResponse>, ApiError> {
    let plan = state
        .training_plan_service
        .create(user.company_id(), request.into())
        .await?;

    Ok(Created(TrainingPlanResponse::from(&plan)))
}

/// GET /api/training-plans/{id}
pub async fn get_training_plan(
    State(state): State<AppState>,
    user: RequireUser,
    Path(id): Path<String>,
) -> Result<ApiResponse<TrainingPlanResponse>, ApiError> {
    let plan = state.training_plan_service.get(user.company_id(), &id).await?;
    Ok(ApiResponse::ok(TrainingPlanResponse::from(&plan)))
}

/// PUT /api/training-plans/{id}
pub async fn update_training_plan(
    State(state): State<AppState>,
    user: RequireUser,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateTrainingPlanRequest>,
) -> Result<ApiResponse<TrainingPlanResponse>, ApiError> {
    let plan = state
        .training_plan_service
        .update(user.company_id(), &id, request.into())
        .await?;

    Ok(ApiResponse::ok(TrainingPlanResponse::from(&plan)))
}

/// PATCH /api/training-plans/{id}/status
pub async fn change_training_plan_status(
    State(state): State<AppState>,
    user: RequireUser,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<TrainingStatusRequest>,
) -> Result<ApiResponse<TrainingPlanResponse>, ApiError> {
    let plan = state
        .training_plan_service
        .change_status(user.company_id(), &id, request.status)
        .await?;

    Ok(ApiResponse::ok(TrainingPlanResponse::from(&plan)))
}

/// POST /api/training-plans/{id}/participants
pub async fn add_training_participant(
    State(state): State<AppState>,
    user: RequireUser,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<ParticipantRequest>,
) -> Result<ApiResponse<TrainingPlanResponse>, ApiError> {
    let plan = state
        .training_plan_service
        .add_participant(user.company_id(), &id, &request.user_id)
        .await?;

    Ok(ApiResponse::ok(TrainingPlanResponse::from(&plan)))
}

/// DELETE /api/training-plans/{id}/participants/{user_id}
pub async fn remove_training_participant(
    State(state): State<AppState>,
    user: RequireUser,
    Path((id, user_id)): Path<(String, String)>,
) -> Result<ApiResponse<TrainingPlanResponse>, ApiError> {
    let plan = state
        .training_plan_service
        .remove_participant(user.company_id(), &id, &user_id)
        .await?;

    Ok(ApiResponse::ok(TrainingPlanResponse::from(&plan)))
}

/// DELETE /api/training-plans/{id}
pub async fn delete_training_plan(
    State(state): State<AppState>,
    user: RequireUser,
    Path(id): Path<String>,
) -> Result<ApiResponse<()>, ApiError> {
    state.training_plan_service.delete(user.company_id(), &id).await?;
    Ok(ApiResponse::message("Plan de formación eliminado"))
}
