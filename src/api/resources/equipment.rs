//! Equipment endpoints

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
use crate::domain::equipment::{
    Equipment, EquipmentChanges, EquipmentSearchCriteria, EquipmentSortField, EquipmentStatus,
    NewEquipment,
};
use crate::domain::search::Page;
use crate::domain::user::UserId;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateEquipmentRequest {
    #[validate(length(min = 1, max = 200, message = "debe tener entre 1 y 200 caracteres"))]
    pub name: String,
    #[validate(length(min = 1, max = 50, message = "debe tener entre 1 y 50 caracteres"))]
    pub code: String,
    #[validate(length(min = 1, max = 200, message = "debe tener entre 1 y 200 caracteres"))]
    pub equipment_type: String,
    #[validate(length(max = 200, message = "no puede superar 200 caracteres"))]
    pub brand: Option<String>,
    #[validate(length(max = 200, message = "no puede superar 200 caracteres"))]
    pub model: Option<String>,
    #[validate(length(max = 200, message = "no puede superar 200 caracteres"))]
    pub serial_number: Option<String>,
    #[validate(length(max = 200, message = "no puede superar 200 caracteres"))]
    pub location: Option<String>,
    pub responsible_user_id: Option<UserId>,
    pub purchase_date: Option<DateTime<Utc>>,
    #[validate(range(min = 1, max = 3650, message = "debe estar entre 1 y 3650 días"))]
    pub maintenance_frequency_days: Option<u32>,
    pub last_maintenance_date: Option<DateTime<Utc>>,
    pub next_maintenance_date: Option<DateTime<Utc>>,
}

impl From<CreateEquipmentRequest> for NewEquipment {
    fn from(request: CreateEquipmentRequest) -> Self {
        Self {
            name: request.name,
            code: request.code,
            equipment_type: request.equipment_type,
            brand: request.brand,
            model: request.model,
            serial_number: request.serial_number,
            location: request.location,
            responsible_user_id: request.responsible_user_id,
            purchase_date: request.purchase_date,
            maintenance_frequency_days: request.maintenance_frequency_days,
            last_maintenance_date: request.last_maintenance_date,
            next_maintenance_date: request.next_maintenance_date,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateEquipmentRequest {
    #[validate(length(min = 1, max = 200, message = "debe tener entre 1 y 200 caracteres"))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 50, message = "debe tener entre 1 y 50 caracteres"))]
    pub code: Option<String>,
    #[validate(length(min = 1, max = 200, message = "debe tener entre 1 y 200 caracteres"))]
    pub equipment_type: Option<String>,
    #[validate(length(max = 200, message = "no puede superar 200 caracteres"))]
    pub brand: Option<String>,
    #[validate(length(max = 200, message = "no puede superar 200 caracteres"))]
    pub model: Option<String>,
    #[validate(length(max = 200, message = "no puede superar 200 caracteres"))]
    pub serial_number: Option<String>,
    #[validate(length(max = 200, message = "no puede superar 200 caracteres"))]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub responsible_user_id: Option<Option<UserId>>,
    pub purchase_date: Option<DateTime<Utc>>,
    #[validate(range(min = 1, max = 3650, message = "debe estar entre 1 y 3650 días"))]
    pub maintenance_frequency_days: Option<u32>,
    pub next_maintenance_date: Option<DateTime<Utc>>,
}

impl From<UpdateEquipmentRequest> for EquipmentChanges {
    fn from(request: UpdateEquipmentRequest) -> Self {
        Self {
            name: request.name,
            code: request.code,
            equipment_type: request.equipment_type,
            brand: request.brand,
            model: request.model,
            serial_number: request.serial_number,
            location: request.location,
            responsible_user_id: request.responsible_user_id,
            purchase_date: request.purchase_date,
            maintenance_frequency_days: request.maintenance_frequency_days,
            next_maintenance_date: request.next_maintenance_date,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct EquipmentStatusRequest {
    pub status: EquipmentStatus,
}

/// Body of `POST /api/equipment/{id}/maintenance`; defaults to now
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct MaintenanceRequest {
    pub performed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EquipmentFilters {
    pub name: Option<String>,
    pub code: Option<String>,
    pub location: Option<String>,
    pub equipment_type: Option<String>,
    pub status: Option<String>,
    pub responsible_user_id: Option<String>,
    pub needs_maintenance: Option<bool>,
    pub next_maintenance_from: Option<DateTime<Utc>>,
    pub next_maintenance_to: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EquipmentResponse {
    pub id: String,
    pub name: String,
    pub code: String,
    pub equipment_type: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub serial_number: Option<String>,
    pub location: Option<String>,
    pub responsible_user_id: Option<String>,
    pub purchase_date: Option<DateTime<Utc>>,
    pub maintenance_frequency_days: Option<u32>,
    pub last_maintenance_date: Option<DateTime<Utc>>,
    pub next_maintenance_date: Option<DateTime<Utc>>,
    pub needs_maintenance: bool,
    pub status: EquipmentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Equipment> for EquipmentResponse {
    fn from(equipment: &Equipment) -> Self {
        Self {
            id: equipment.id().to_string(),
            name: equipment.name().to_string(),
            code: equipment.code().to_string(),
            equipment_type: equipment.equipment_type().to_string(),
            brand: equipment.brand().map(String::from),
            model: equipment.model().map(String::from),
            serial_number: equipment.serial_number().map(String::from),
            location: equipment.location().map(String::from),
            responsible_user_id: equipment.responsible_user_id().map(ToString::to_string),
            purchase_date: equipment.purchase_date(),
            maintenance_frequency_days: equipment.maintenance_frequency_days(),
            last_maintenance_date: equipment.last_maintenance_date(),
            next_maintenance_date: equipment.next_maintenance_date(),
            needs_maintenance: equipment.needs_maintenance(Utc::now()),
            status: equipment.status(),
            created_at: equipment.created_at(),
            updated_at: equipment.updated_at(),
        }
    }
}

/// GET /api/equipment
pub async fn list_equipment(
    State(state): State<AppState>,
    user: RequireUser,
    Query(params): Query<ListParams>,
    Query(filters): Query<EquipmentFilters>,
) -> Result<ApiResponse<Page<EquipmentResponse>>, ApiError> {
    debug!(company_id = %user.company_id(), "Listing equipment");

    let pagination = params.pagination()?;
    let mut builder = EquipmentSearchCriteria::builder(user.company_id().clone())
        .with_pagination(pagination.page().into(), pagination.limit().into())
        .with_next_maintenance(date_range(
            filters.next_maintenance_from,
            filters.next_maintenance_to,
        )?);

    if let Some(name) = filters.name {
        builder = builder.with_name(name);
    }
    if let Some(code) = filters.code {
        builder = builder.with_code(code);
    }
    if let Some(location) = filters.location {
        builder = builder.with_location(location);
    }
    if let Some(equipment_type) = filters.equipment_type {
        builder = builder.with_equipment_type(equipment_type);
    }
    if let Some(status) = parse_optional(filters.status.as_deref())? {
        builder = builder.with_status(status);
    }
    if let Some(user_id) = parse_optional::<UserId>(filters.responsible_user_id.as_deref())? {
        builder = builder.with_responsible_user_id(user_id);
    }
    if let Some(needs_maintenance) = filters.needs_maintenance {
        builder = builder.with_needs_maintenance(needs_maintenance);
    }
    if let Some(sort) = params.sort::<EquipmentSortField>()? {
        builder = builder.with_sorting(sort.field, sort.order);
    }

    let page = state.equipment_service.search(&builder.build()).await?;
    Ok(ApiResponse::ok(page.map(|e| EquipmentResponse::from(&e))))
}

/// POST /api/equipment
pub async fn create_equipment(
    State(state): State<AppState>,
    user: RequireUser,
    ValidatedJson(request): ValidatedJson<CreateEquipmentRequest>,
) -> Result<Created<EquipmentResponse>, ApiError> {
    let equipment = state
        .equipment_service
        .create(user.company_id(), request.into())
        .await?;

    Ok(Created(EquipmentResponse::from(&equipment)))
}

/// GET /api/equipment/{id}
pub async fn get_equipment(
    State(state): State<AppState>,
    user: RequireUser,
    Path(id): Path<String>,
) -> Result<ApiResponse<EquipmentResponse>, ApiError> {
    let equipment = state.equipment_service.get(user.company_id(), &id).await?;
    Ok(ApiResponse::ok(EquipmentResponse::from(&equipment)))
}

/// PUT /api/equipment/{id}
pub async fn update_equipment(
    State(state): State<AppState>,
    user: RequireUser,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateEquipmentRequest>,
) -> Result<ApiResponse<EquipmentResponse>, ApiError> {
    let equipment = state
        .equipment_service
        .update(user.company_id(), &id, request.into())
        .await?;

    Ok(ApiResponse::ok(EquipmentResponse::from(&equipment)))
}

/// PATCH /api/equipment/{id}/status
pub async fn change_equipment_status(
    State(state): State<AppState>,
    user: RequireUser,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<EquipmentStatusRequest>,
) -> Result<ApiResponse<EquipmentResponse>, ApiError> {
    let equipment = state
        .equipment_service
        .change_status(user.company_id(), &id, request.status)
        .await?;

    Ok(ApiResponse::ok(EquipmentResponse::from(&equipment)))
}

/// POST /api/equipment/{id}/maintenance
pub async fn record_equipment_maintenance(
    State(state): State<AppState>,
    user: RequireUser,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<MaintenanceRequest>,
) -> Result<ApiResponse<EquipmentResponse>, ApiError> {
    let equipment = state
        .equipment_service
        .record_maintenance(user.company_id(), &id, request.performed_at)
        .await?;

    Ok(ApiResponse::ok(EquipmentResponse::from(&equipment)))
}

/// DELETE /api/equipment/{id}
pub async fn delete_equipment(
    State(state): State<AppState>,
    user: RequireUser,
    Path(id): Path<String>,
) -> Result<ApiResponse<()>, ApiError> {
    state.equipment_service.delete(user.company_id(), &id).await?;
    Ok(ApiResponse::message("Equipo eliminado"))
}
