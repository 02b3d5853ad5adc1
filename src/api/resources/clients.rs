//! Client endpoints

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
use crate::domain::client::{
    Client, ClientChanges, ClientSearchCriteria, ClientSortField, ClientStatus, ClientType,
    NewClient,
};
use crate::domain::search::Page;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateClientRequest {
    #[validate(length(min = 2, max = 100, message = "debe tener entre 2 y 100 caracteres"))]
    pub name: String,
    #[validate(email(message = "no es un email válido"))]
    pub email: String,
    pub client_type: ClientType,
    #[validate(length(max = 200, message = "no puede superar 200 caracteres"))]
    pub phone: Option<String>,
    #[validate(length(max = 200, message = "no puede superar 200 caracteres"))]
    pub address: Option<String>,
    #[validate(length(max = 200, message = "no puede superar 200 caracteres"))]
    pub tax_id: Option<String>,
    #[validate(length(max = 200, message = "no puede superar 200 caracteres"))]
    pub contact_person: Option<String>,
    #[validate(length(max = 2000, message = "no puede superar 2000 caracteres"))]
    pub notes: Option<String>,
}

impl From<CreateClientRequest> for NewClient {
    fn from(request: CreateClientRequest) -> Self {
        Self {
            name: request.name,
            email: request.email,
            client_type: request.client_type,
            phone: request.phone,
            address: request.address,
            tax_id: request.tax_id,
            contact_person: request.contact_person,
            notes: request.notes,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateClientRequest {
    #[validate(length(min = 2, max = 100, message = "debe tener entre 2 y 100 caracteres"))]
    pub name: Option<String>,
    #[validate(email(message = "no es un email válido"))]
    pub email: Option<String>,
    pub client_type: Option<ClientType>,
    #[validate(length(max = 200, message = "no puede superar 200 caracteres"))]
    pub phone: Option<String>,
    #[validate(length(max = 200, message = "no puede superar 200 caracteres"))]
    pub address: Option<String>,
    #[validate(length(max = 200, message = "no puede superar 200 caracteres"))]
    pub tax_id: Option<String>,
    #[validate(length(max = 200, message = "no puede superar 200 caracteres"))]
    pub contact_person: Option<String>,
    #[validate(length(max = 2000, message = "no puede superar 2000 caracteres"))]
    pub notes: Option<String>,
}

impl From<UpdateClientRequest> for ClientChanges {
    fn from(request: UpdateClientRequest) -> Self {
        Self {
            name: request.name,
            email: request.email,
            client_type: request.client_type,
            phone: request.phone,
            address: request.address,
            tax_id: request.tax_id,
            contact_person: request.contact_person,
            notes: request.notes,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ClientStatusRequest {
    pub status: ClientStatus,
}

/// Filters accepted by `GET /api/clients`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClientFilters {
    pub name: Option<String>,
    pub email: Option<String>,
    pub client_type: Option<String>,
    pub status: Option<String>,
    pub created_from: Option<DateTime<Utc>>,
    pub created_to: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClientResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub client_type: ClientType,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub tax_id: Option<String>,
    pub contact_person: Option<String>,
    pub notes: Option<String>,
    pub status: ClientStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Client> for ClientResponse {
    fn from(client: &Client) -> Self {
        Self {
            id: client.id().to_string(),
            name: client.name().to_string(),
            email: client.email().to_string(),
            client_type: client.client_type(),
            phone: client.phone().map(String::from),
            address: client.address().map(String::from),
            tax_id: client.tax_id().map(String::from),
            contact_person: client.contact_person().map(String::from),
            notes: client.notes().map(String::from),
            status: client.status(),
            created_at: client.created_at(),
            updated_at: client.updated_at(),
        }
    }
}

/// GET /api/clients
pub async fn list_clients(
    State(state): State<AppState>,
    user: RequireUser,
    Query(params): Query<ListParams>,
    Query(filters): Query<ClientFilters>,
) -> Result<ApiResponse<Page<ClientResponse>>, ApiError> {
    debug!(company_id = %user.company_id(), "Listing clients");

    let pagination = params.pagination()?;
    let mut builder = ClientSearchCriteria::builder(user.company_id().clone())
        .with_pagination(pagination.page().into(), pagination.limit().into())
        .with_created(date_range(filters.created_from, filters.created_to)?);

    if let Some(name) = filters.name {
        builder = builder.with_name(name);
    }
    if let Some(email) = filters.email {
        builder = builder.with_email(email);
    }
    if let Some(client_type) = parse_optional(filters.client_type.as_deref())? {
        builder = builder.with_client_type(client_type);
    }
    if let Some(status) = parse_optional(filters.status.as_deref())? {
        builder = builder.with_status(status);
    }
    if let Some(sort) = params.sort::<ClientSortField>()? {
        builder = builder.with_sorting(sort.field, sort.order);
    }

    let page = state.client_service.search(&builder.build()).await?;
    Ok(ApiResponse::ok(page.map(|c| ClientResponse::from(&c))))
}

/// POST /api/clients
pub async fn create_client(
    State(state): State<AppState>,
    user: RequireUser,
    ValidatedJson(request): ValidatedJson<CreateClientRequest>,
) -> Result<Created<ClientResponse>, ApiError> {
    let client = state
        .client_service
        .create(user.company_id(), request.into())
        .await?;

    Ok(Created(ClientResponse::from(&client)))
}

/// GET /api/clients/{id}
pub async fn get_client(
    State(state): State<AppState>,
    user: RequireUser,
    Path(id): Path<String>,
) -> Result<ApiResponse<ClientResponse>, ApiError> {
    let client = state.client_service.get(user.company_id(), &id).await?;
    Ok(ApiResponse::ok(ClientResponse::from(&client)))
}

/// PUT /api/clients/{id}
pub async fn update_client(
    State(state): State<AppState>,
    user: RequireUser,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateClientRequest>,
) -> Result<ApiResponse<ClientResponse>, ApiError> {
    let client = state
        .client_service
        .update(user.company_id(), &id, request.into())
        .await?;

    Ok(ApiResponse::ok(ClientResponse::from(&client)))
}

/// PATCH /api/clients/{id}/status
pub async fn change_client_status(
    State(state): State<AppState>,
    user: RequireUser,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<ClientStatusRequest>,
) -> Result<ApiResponse<ClientResponse>, ApiError> {
    let client = state
        .client_service
        .change_status(user.company_id(), &id, request.status)
        .await?;

    Ok(ApiResponse::ok(ClientResponse::from(&client)))
}

/// DELETE /api/clients/{id}
///
/// Clients are deactivated, not removed.
pub async fn delete_client(
    State(state): State<AppState>,
    user: RequireUser,
    Path(id): Path<String>,
) -> Result<ApiResponse<ClientResponse>, ApiError> {
    let client = state.client_service.delete(user.company_id(), &id).await?;

    Ok(ApiResponse::ok(ClientResponse::from(&client)).with_message("Cliente desactivado"))
}
