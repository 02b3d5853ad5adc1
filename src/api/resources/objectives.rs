//! Quality objective endpoints

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
use crate::domain::objective::{
    NewObjective, Objective, ObjectiveChanges, ObjectiveSearchCriteria, ObjectiveSortField,
    ObjectiveStatus, ProgressEntry,
};
use crate::domain::search::Page;
use crate::domain::traits::TenantScoped;
use crate::domain::user::UserId;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateObjectiveRequest {
    #[validate(length(min = 2, max = 200, message = "debe tener entre 2 y 200 caracteres"))]
    pub title: String,
    #[validate(length(max = 2000, message = "no puede superar 2000 caracteres"))]
    pub description: Option<String>,
    #[validate(length(max = 200, message = "no puede superar 200 caracteres"))]
    pub process: Option<String>,
    #[validate(length(min = 1, max = 200, message = "debe tener entre 1 y 200 caracteres"))]
    pub indicator: String,
    pub target_value: f64,
    pub current_value: Option<f64>,
    #[validate(length(max = 50, message = "no puede superar 50 caracteres"))]
    pub unit: Option<String>,
    pub start_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub responsible_user_id: Option<UserId>,
}

impl From<CreateObjectiveRequest> for NewObjective {
    fn from(request: CreateObjectiveRequest) -> Self {
        Self {
            title: request.title,
            description: request.description,
            process: request.process,
            indicator: request.indicator,
            target_value: request.target_value,
            current_value: request.current_value,
            unit: request.unit,
            start_date: request.start_date,
            due_date: request.due_date,
            responsible_user_id: request.responsible_user_id,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateObjectiveRequest {
    #[validate(length(min = 2, max = 200, message = "debe tener entre 2 y 200 caracteres"))]
    pub title: Option<String>,
    #[validate(length(max = 2000, message = "no puede superar 2000 caracteres"))]
    pub description: Option<String>,
    #[validate(length(max = 200, message = "no puede superar 200 caracteres"))]
    pub process: Option<String>,
    #[validate(length(min = 1, max = 200, message = "debe tener entre 1 y 200 caracteres"))]
    pub indicator: Option<String>,
    pub target_value: Option<f64>,
    #[validate(length(max = 50, message = "no puede superar 50 caracteres"))]
    pub unit: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "double_option")]
    pub responsible_user_id: Option<Option<UserId>>,
}

impl From<UpdateObjectiveRequest> for ObjectiveChanges {
    fn from(request: UpdateObjectiveRequest) -> Self {
        Self {
            title: request.title,
            description: request.description,
            process: request.process,
            indicator: request.indicator,
            target_value: request.target_value,
            unit: request.unit,
            start_date: request.start_date,
            due_date: request.due_date,
            responsible_user_id: request.responsible_user_id,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ObjectiveStatusRequest {
    pub status: ObjectiveStatus,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ProgressRequest {
    pub value: f64,
    #[validate(length(max = 1000, message = "no puede superar 1000 caracteres"))]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ObjectiveFilters {
    pub title: Option<String>,
    pub process: Option<String>,
    pub status: Option<String>,
    pub responsible_user_id: Option<String>,
    pub overdue: Option<bool>,
    pub due_from: Option<DateTime<Utc>>,
    pub due_to: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ObjectiveResponse {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub process: Option<String>,
    pub indicator: String,
    pub target_value: f64,
    pub current_value: f64,
    pub unit: Option<String>,
    /// Percentage of the target reached, capped at 100
    pub progress: f64,
    pub overdue: bool,
    pub start_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub responsible_user_id: Option<String>,
    pub progress_history: Vec<ProgressEntry>,
    pub status: ObjectiveStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Objective> for ObjectiveResponse {
    fn from(objective: &Objective) -> Self {
        Self {
            id: objective.id().to_string(),
            title: objective.title().to_string(),
            description: objective.description().map(String::from),
            process: objective.process().map(String::from),
            indicator: objective.indicator().to_string(),
            target_value: objective.target_value(),
            current_value: objective.current_value(),
            unit: objective.unit().map(String::from),
            progress: objective.progress(),
            overdue: objective.is_overdue(Utc::now()),
            start_date: objective.start_date(),
            due_date: objective.due_date(),
            responsible_user_id: objective.responsible_user_id().map(ToString::to_string),
            progress_history: objective.progress_history().to_vec(),
            status: objective.status(),
            created_at: objective.created_at(),
            updated_at: objective.updated_at(),
        }
    }
}

/// GET /api/objectives
pub async fn list_objectives(
    State(state): State<AppState>,
    user: RequireUser,
    Query(params): Query<ListParams>,
    Query(filters): Query<ObjectiveFilters>,
) -> Result<ApiResponse<Page<ObjectiveResponse>>, ApiError> {
    debug!(company_id = %user.company_id(), "Listing objectives");

    let pagination = params.pagination()?;
    let mut builder = ObjectiveSearchCriteria::builder(user.company_id().clone())
        .with_pagination(pagination.page().into(), pagination.limit().into())
        .with_due_date(date_range(filters.due_from, filters.due_to)?);

    if let Some(title) = filters.title {
        builder = builder.with_title(title);
    }
    if let Some(process) = filters.process {
        builder = builder.with_process(process);
    }
    if let Some(status) = parse_optional(filters.status.as_deref())? {
        builder = builder.with_status(status);
    }
    if let Some(user_id) = parse_optional::<UserId>(filters.responsible_user_id.as_deref())? {
        builder = builder.with_responsible_user_id(user_id);
    }
    if let Some(overdue) = filters.overdue {
        builder = builder.with_overdue(overdue);
    }
    if let Some(sort) = params.sort::<ObjectiveSortField>()? {
        builder = builder.with_sorting(sort.field, sort.order);
    }

    let page = state.objective_service.search(&builder.build()).await?;
    Ok(ApiResponse::ok(page.map(|o| ObjectiveResponse::from(&o))))
}

/// POST /api/objectives
pub async fn create_objective(
    State(state): State<AppState>,
    user: RequireUser,
    ValidatedJson(request): ValidatedJson<CreateObjectiveRequest>,
) -> Result<Created<ObjectiveResponse>, ApiError> {
    let objective = state
        .objective_service
        .create(user.company_id(), request.into())
        .await?;

    Ok(Created(ObjectiveResponse::from(&objective)))
}

/// GET /api/objectives/{id}
pub async fn get_objective(
    State(state): State<AppState>,
    user: RequireUser,
    Path(id): Path<String>,
) -> Result<ApiResponse<ObjectiveResponse>, ApiError> {
    let objective = state.objective_service.get(user.company_id(), &id).await?;
    Ok(ApiResponse::ok(ObjectiveResponse::from(&objective)))
}

/// PUT /api/objectives/{id}
pub async fn update_objective(
    State(state): State<AppState>,
    user: RequireUser,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateObjectiveRequest>,
) -> Result<ApiResponse<ObjectiveResponse>, ApiError> {
    let objective = state
        .objective_service
        .update(user.company_id(), &id, request.into())
        .await?;

    Ok(ApiResponse::ok(ObjectiveResponse::from(&objective)))
}

/// POST /api/objectives/{id}/progress
pub async fn record_objective_progress(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<ProgressRequest>,
) -> Result<ApiResponse<ObjectiveResponse>, ApiError> {
    let objective = state
        .objective_service
        .record_progress(
            user.company_id(),
            &id,
            request.value,
            request.notes,
            Some(user.id()),
        )
        .await?;

    Ok(ApiResponse::ok(ObjectiveResponse::from(&objective)))
}

/// PATCH /api/objectives/{id}/status
pub async fn change_objective_status(
    State(state): State<AppState>,
    user: RequireUser,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<ObjectiveStatusRequest>,
) -> Result<ApiResponse<ObjectiveResponse>, ApiError> {
    let objective = state
        .objective_service
        .change_status(user.company_id(), &id, request.status)
        .await?;

    Ok(ApiResponse::ok(ObjectiveResponse::from(&objective)))
}

/// DELETE /api/objectives/{id}
pub async fn delete_objective(
    State(state): State<AppState>,
    user: RequireUser,
    Path(id): Path<String>,
) -> Result<ApiResponse<()>, ApiError> {
    state.objective_service.delete(user.company_id(), &id).await?;
    Ok(ApiResponse::message("Objetivo eliminado"))
}
