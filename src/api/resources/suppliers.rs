//! Supplier endpoints

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
use crate::domain::supplier::{
    NewSupplier, Supplier, SupplierCategory, SupplierChanges, SupplierEvaluation,
    SupplierSearchCriteria, SupplierSortField, SupplierStatus,
};
use crate::domain::traits::TenantScoped;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateSupplierRequest {
    #[validate(length(min = 2, max = 200, message = "debe tener entre 2 y 200 caracteres"))]
    pub name: String,
    #[validate(length(min = 1, max = 50, message = "debe tener entre 1 y 50 caracteres"))]
    pub tax_id: String,
    pub category: SupplierCategory,
    #[validate(email(message = "no es un email válido"))]
    pub email: Option<String>,
    #[validate(length(max = 50, message = "no puede superar 50 caracteres"))]
    pub phone: Option<String>,
    #[validate(length(max = 500, message = "no puede superar 500 caracteres"))]
    pub address: Option<String>,
    #[validate(length(max = 200, message = "no puede superar 200 caracteres"))]
    pub contact_name: Option<String>,
}

impl From<CreateSupplierRequest> for NewSupplier {
    fn from(request: CreateSupplierRequest) -> Self {
        Self {
            name: request.name,
            tax_id: request.tax_id,
            category: request.category,
            email: request.email,
            phone: request.phone,
            address: request.address,
            contact_name: request.contact_name,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateSupplierRequest {
    #[validate(length(min = 2, max = 200, message = "debe tener entre 2 y 200 caracteres"))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 50, message = "debe tener entre 1 y 50 caracteres"))]
    pub tax_id: Option<String>,
    pub category: Option<SupplierCategory>,
    #[validate(email(message = "no es un email válido"))]
    pub email: Option<String>,
    #[validate(length(max = 50, message = "no puede superar 50 caracteres"))]
    pub phone: Option<String>,
    #[validate(length(max = 500, message = "no puede superar 500 caracteres"))]
    pub address: Option<String>,
    #[validate(length(max = 200, message = "no puede superar 200 caracteres"))]
    pub contact_name: Option<String>,
}

impl From<UpdateSupplierRequest> for SupplierChanges {
    fn from(request: UpdateSupplierRequest) -> Self {
        Self {
            name: request.name,
            tax_id: request.tax_id,
            category: request.category,
            email: request.email,
            phone: request.phone,
            address: request.address,
            contact_name: request.contact_name,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SupplierStatusRequest {
    pub status: SupplierStatus,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct EvaluationRequest {
    #[validate(range(min = 0.0, max = 100.0, message = "debe estar entre 0 y 100"))]
    pub score: f64,
    #[validate(length(max = 2000, message = "no puede superar 2000 caracteres"))]
    pub comments: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SupplierFilters {
    pub name: Option<String>,
    pub tax_id: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
    pub min_score: Option<f64>,
    pub max_score: Option<f64>,
    pub created_from: Option<DateTime<Utc>>,
    pub created_to: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SupplierResponse {
    pub id: String,
    pub name: String,
    pub tax_id: String,
    pub category: SupplierCategory,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub contact_name: Option<String>,
    pub status: SupplierStatus,
    pub last_score: Option<f64>,
    pub last_evaluated_at: Option<DateTime<Utc>>,
    pub evaluations: Vec<SupplierEvaluation>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Supplier> for SupplierResponse {
    fn from(supplier: &Supplier) -> Self {
        Self {
            id: supplier.id().to_string(),
            name: supplier.name().to_string(),
            tax_id: supplier.tax_id().to_string(),
            category: supplier.category(),
            email: supplier.email().map(String::from),
            phone: supplier.phone().map(String::from),
            address: supplier.address().map(String::from),
            contact_name: supplier.contact_name().map(String::from),
            status: supplier.status(),
            last_score: supplier.last_score(),
            last_evaluated_at: supplier.last_evaluated_at(),
            evaluations: supplier.evaluations().to_vec(),
            created_at: supplier.created_at(),
            updated_at: supplier.updated_at(),
        }
    }
}

/// GET /api/suppliers
pub async fn list_suppliers(
    State(state): State<AppState>,
    user: RequireUser,
    Query(params): Query<ListParams>,
    Query(filters): Query<SupplierFilters>,
) -> Result<ApiResponse<Page<SupplierResponse>>, ApiError> {
    debug!(company_id = %user.company_id(), "Listing suppliers");

    if let (Some(min), Some(max)) = (filters.min_score, filters.max_score) {
        if min > max {
            return Err(ApiError::bad_request(
                "min_score no puede ser mayor que max_score",
            ));
        }
    }

    let pagination = params.pagination()?;
    let mut builder = SupplierSearchCriteria::builder(user.company_id().clone())
        .with_pagination(pagination.page().into(), pagination.limit().into())
        .with_created(date_range(filters.created_from, filters.created_to)?)
        .with_score_range(filters.min_score, filters.max_score);

    if let Some(name) = filters.name {
        builder = builder.with_name(name);
    }
    if let Some(tax_id) = filters.tax_id {
        builder = builder.with_tax_id(tax_id);
    }
    if let Some(category) = parse_optional(filters.category.as_deref())? {
        builder = builder.with_category(category);
    }
    if let Some(status) = parse_optional(filters.status.as_deref())? {
        builder = builder.with_status(status);
    }
    if let Some(sort) = params.sort::<SupplierSortField>()? {
        builder = builder.with_sorting(sort.field, sort.order);
    }

    let page = state.supplier_service.search(&builder.build()).await?;
    Ok(ApiResponse::ok(page.map(|s| SupplierResponse::from(&s))))
}

/// POST /api/suppliers
pub async fn create_supplier(
    State(state): State<AppState>,
    user: RequireUser,
    ValidatedJson(request): ValidatedJson<CreateSupplierRequest>,
) -> Result<Created<SupplierResponse>, ApiError> {
    let supplier = state
        .supplier_service
        .create(user.company_id(), request.into())
        .await?;

    Ok(Created(SupplierResponse::from(&supplier)))
}

/// GET /api/suppliers/{id}
pub async fn get_supplier(
    State(state): State<AppState>,
    user: RequireUser,
    Path(id): Path<String>,
) -> Result<ApiResponse<SupplierResponse>, ApiError> {
    let supplier = state.supplier_service.get(user.company_id(), &id).await?;
    Ok(ApiResponse::ok(SupplierResponse::from(&supplier)))
}

/// PUT /api/suppliers/{id}
pub async fn update_supplier(
    State(state): State<AppState>,
    user: RequireUser,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateSupplierRequest>,
) -> Result<ApiResponse<SupplierResponse>, ApiError> {
    let supplier = state
        .supplier_service
        .update(user.company_id(), &id, request.into())
        .await?;

    Ok(ApiResponse::ok(SupplierResponse::from(&supplier)))
}

/// POST /api/suppliers/{id}/evaluate
///
/// The resulting status follows the score thresholds.
pub async fn evaluate_supplier(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<EvaluationRequest>,
) -> Result<ApiResponse<SupplierResponse>, ApiError> {
    let supplier = state
        .supplier_service
        .evaluate(
            user.company_id(),
            &id,
            request.score,
            request.comments,
            user.id(),
        )
        .await?;

    Ok(ApiResponse::ok(SupplierResponse::from(&supplier)))
}

/// PATCH /api/suppliers/{id}/status
pub async fn change_supplier_status(
    State(state): State<AppState>,
    user: RequireUser,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<SupplierStatusRequest>,
) -> Result<ApiResponse<SupplierResponse>, ApiError> {
    let supplier = state
        .supplier_service
        .change_status(user.company_id(), &id, request.status)
        .await?;

    Ok(ApiResponse::ok(SupplierResponse::from(&supplier)))
}

/// DELETE /api/suppliers/{id}
pub async fn delete_supplier(
    State(state): State<AppState>,
    user: RequireUser,
    Path(id): Path<String>,
) -> Result<ApiResponse<SupplierResponse>, ApiError> {
    let supplier = state.supplier_service.delete(user.company_id(), &id).await?;
    Ok(ApiResponse::ok(SupplierResponse::from(&supplier)).with_message("Proveedor desactivado"))
}
