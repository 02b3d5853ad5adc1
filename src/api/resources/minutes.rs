//! Meeting minutes endpoints

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
use crate::domain::minutes::{
    Agreement, MeetingMinutes, MeetingType, MinutesChanges, MinutesSearchCriteria,
    MinutesSortField, MinutesStatus, NewAgreement, NewMinutes,
};
use crate::domain::search::Page;
use crate::domain::traits::TenantScoped;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AgreementRequest {
    #[validate(length(min = 1, max = 500, message = "debe tener entre 1 y 500 caracteres"))]
    pub description: String,
    #[validate(length(max = 200, message = "no puede superar 200 caracteres"))]
    pub responsible: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
}

impl From<AgreementRequest> for NewAgreement {
    fn from(request: AgreementRequest) -> Self {
        Self {
            description: request.description,
            responsible: request.responsible,
            due_date: request.due_date,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateMinutesRequest {
    #[validate(length(min = 2, max = 200, message = "debe tener entre 2 y 200 caracteres"))]
    pub title: String,
    pub meeting_type: MeetingType,
    pub meeting_date: DateTime<Utc>,
    #[validate(length(max = 200, message = "no puede superar 200 caracteres"))]
    pub location: Option<String>,
    #[validate(length(min = 1, max = 100, message = "debe incluir entre 1 y 100 asistentes"))]
    pub attendees: Vec<String>,
    #[serde(default)]
    #[validate(length(max = 100, message = "admite como máximo 100 puntos"))]
    pub agenda: Vec<String>,
    #[validate(length(max = 10000, message = "no puede superar 10000 caracteres"))]
    pub summary: Option<String>,
    #[serde(default)]
    #[validate(nested)]
    pub agreements: Vec<AgreementRequest>,
}

impl From<CreateMinutesRequest> for NewMinutes {
    fn from(request: CreateMinutesRequest) -> Self {
        Self {
            title: request.title,
            meeting_type: request.meeting_type,
            meeting_date: request.meeting_date,
            location: request.location,
            attendees: request.attendees,
            agenda: request.agenda,
            summary: request.summary,
            agreements: request.agreements.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateMinutesRequest {
    #[validate(length(min = 2, max = 200, message = "debe tener entre 2 y 200 caracteres"))]
    pub title: Option<String>,
    pub meeting_type: Option<MeetingType>,
    pub meeting_date: Option<DateTime<Utc>>,
    #[validate(length(max = 200, message = "no puede superar 200 caracteres"))]
    pub location: Option<String>,
    #[validate(length(min = 1, max = 100, message = "debe incluir entre 1 y 100 asistentes"))]
    pub attendees: Option<Vec<String>>,
    #[validate(length(max = 100, message = "admite como máximo 100 puntos"))]
    pub agenda: Option<Vec<String>>,
    #[validate(length(max = 10000, message = "no puede superar 10000 caracteres"))]
    pub summary: Option<String>,
}

impl From<UpdateMinutesRequest> for MinutesChanges {
    fn from(request: UpdateMinutesRequest) -> Self {
        Self {
            title: request.title,
            meeting_type: request.meeting_type,
            meeting_date: request.meeting_date,
            location: request.location,
            attendees: request.attendees,
            agenda: request.agenda,
            summary: request.summary,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MinutesFilters {
    pub title: Option<String>,
    pub meeting_type: Option<String>,
    pub status: Option<String>,
    pub attendee: Option<String>,
    pub meeting_from: Option<DateTime<Utc>>,
    pub meeting_to: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MinutesResponse {
    pub id: String,
    pub title: String,
    pub meeting_type: MeetingType,
    pub meeting_date: DateTime<Utc>,
    pub location: Option<String>,
    pub attendees: Vec<String>,
    pub agenda: Vec<String>,
    pub summary: Option<String>,
    pub agreements: Vec<Agreement>,
    pub status: MinutesStatus,
    pub approved_by: Option<String>,
    pub approved_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&MeetingMinutes> for MinutesResponse {
    fn from(minutes: &MeetingMinutes) -> Self {
        Self {
            id: minutes.id().to_string(),
            title: minutes.title().to_string(),
            meeting_type: minutes.meeting_type(),
            meeting_date: minutes.meeting_date(),
            location: minutes.location().map(String::from),
            attendees: minutes.attendees().to_vec(),
            agenda: minutes.agenda().to_vec(),
            summary: minutes.summary().map(String::from),
            agreements: minutes.agreements().to_vec(),
            status: minutes.status(),
            approved_by: minutes.approved_by().map(ToString::to_string),
            approved_at: minutes.approved_at(),
            created_at: minutes.created_at(),
            updated_at: minutes.updated_at(),
        }
    }
}

/// GET /api/minutes
pub async fn list_minutes(
    State(state): State<AppState>,
    user: RequireUser,
    Query(params): Query<ListParams>,
    Query(filters): Query<MinutesFilters>,
) -> Result<ApiResponse<Page<MinutesResponse>>, ApiError> {
    debug!(company_id = %user.company_id(), "Listing minutes");

    let pagination = params.pagination()?;
    let mut builder = MinutesSearchCriteria::builder(user.company_id().clone())
        .with_pagination(pagination.page().into(), pagination.limit().into())
        .with_meeting_date(date_range(filters.meeting_from, filters.meeting_to)?);

    if let Some(title) = filters.title {
        builder = builder.with_title(title);
    }
    if let Some(meeting_type) = parse_optional(filters.meeting_type.as_deref())? {
        builder = builder.with_meeting_type(meeting_type);
    }
    if let Some(status) = parse_optional(filters.status.as_deref())? {
        builder = builder.with_status(status);
    }
    if let Some(attendee) = filters.attendee {
        builder = builder.with_attendee(attendee);
    }
    if let Some(sort) = params.sort::<MinutesSortField>()? {
        builder = builder.with_sorting(sort.field, sort.order);
    }

    let page = state.minutes_service.search(&builder.build()).await?;
    Ok(ApiResponse::ok(page.map(|m| MinutesResponse::from(&m))))
}

/// POST /api/minutes
pub async fn create_minutes(
    State(state): State<AppState>,
    user: RequireUser,
    ValidatedJson(request): ValidatedJson<CreateMinutesRequest>,
) -> Result<Created<MinutesResponse>, ApiError> {
    let minutes = state
        .minutes_service
        .create(user.company_id(), request.into())
        .await?;

    Ok(Created(MinutesResponse::from(&minutes)))
}

/// GET /api/minutes/{id}
pub async fn get_minutes(
    State(state): State<AppState>,
    user: RequireUser,
    Path(id): Path<String>,
) -> Result<ApiResponse<MinutesResponse>, ApiError> {
    let minutes = state.minutes_service.get(user.company_id(), &id).await?;
    Ok(ApiResponse::ok(MinutesResponse::from(&minutes)))
}

/// PUT /api/minutes/{id}
pub async fn update_minutes(
    State(state): State<AppState>,
    user: RequireUser,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateMinutesRequest>,
) -> Result<ApiResponse<MinutesResponse>, ApiError> {
    let minutes = state
        .minutes_service
        .update(user.company_id(), &id, request.into())
        .await?;

    Ok(ApiResponse::ok(MinutesResponse::from(&minutes)))
}

/// POST /api/minutes/{id}/approve
///
/// The caller is recorded as approver.
pub async fn approve_minutes(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<String>,
) -> Result<ApiResponse<MinutesResponse>, ApiError> {
    let minutes = state
        .minutes_service
        .approve(user.company_id(), &id, user.id())
        .await?;

    Ok(ApiResponse::ok(MinutesResponse::from(&minutes)))
}

/// POST /api/minutes/{id}/archive
pub async fn archive_minutes(
    State(state): State<AppState>,
    user: RequireUser,
    Path(id): Path<String>,
) -> Result<ApiResponse<MinutesResponse>, ApiError> {
    let minutes = state.minutes_service.archive(user.company_id(), &id).await?;
    Ok(ApiResponse::ok(MinutesResponse::from(&minutes)))
}

/// POST /api/minutes/{id}/agreements
pub async fn add_minutes_agreement(
    State(state): State<AppState>,
    user: RequireUser,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<AgreementRequest>,
) -> Result<Created<MinutesResponse>, ApiError> {
    let minutes = state
        .minutes_service
        .add_agreement(user.company_id(), &id, request.into())
        .await?;

    Ok(Created(MinutesResponse::from(&minutes)))
}

/// POST /api/minutes/{id}/agreements/{agreement_id}/complete
pub async fn complete_minutes_agreement(
    State(state): State<AppState>,
    user: RequireUser,
    Path((id, agreement_id)): Path<(String, String)>,
) -> Result<ApiResponse<MinutesResponse>, ApiError> {
    let minutes = state
        .minutes_service
        .complete_agreement(user.company_id(), &id, &agreement_id)
        .await?;

    Ok(ApiResponse::ok(MinutesResponse::from(&minutes)))
}

/// DELETE /api/minutes/{id}
pub async fn delete_minutes(
    State(state): State<AppState>,
    user: RequireUser,
    Path(id): Path<String>,
) -> Result<ApiResponse<()>, ApiError> {
    state.minutes_service.delete(user.company_id(), &id).await?;
    Ok(ApiResponse::message("Acta eliminada"))
}
