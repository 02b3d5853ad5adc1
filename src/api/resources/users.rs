//! User management endpoints
//!
//! Reads are open to any authenticated user of the company; every mutation
//! requires an administrator.

use axum::extract::{Path, State};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use validator::Validate;

use crate::api::middleware::{RequireAdmin, RequireUser};
use crate::api::state::AppState;
use crate::api::types::{
    ApiError, ApiResponse, Created, ListParams, Query, ValidatedJson, date_range, double_option,
    parse_optional,
};
use crate::domain::job_profile::JobProfileId;
use crate::domain::search::Page;
use crate::domain::traits::TenantScoped;
use crate::domain::user::{
    NewUser, User, UserChanges, UserRole, UserSearchCriteria, UserSortField, UserStatus,
};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 2, max = 100, message = "debe tener entre 2 y 100 caracteres"))]
    pub name: String,
    #[validate(email(message = "no es un email válido"))]
    pub email: String,
    #[validate(length(min = 8, max = 128, message = "debe tener entre 8 y 128 caracteres"))]
    pub password: String,
    pub role: UserRole,
    pub job_profile_id: Option<JobProfileId>,
    #[serde(default)]
    pub must_change_password: bool,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 2, max = 100, message = "debe tener entre 2 y 100 caracteres"))]
    pub name: Option<String>,
    #[validate(email(message = "no es un email válido"))]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub job_profile_id: Option<Option<JobProfileId>>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UserRoleRequest {
    pub role: UserRole,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UserStatusRequest {
    pub status: UserStatus,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserFilters {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub status: Option<String>,
    pub job_profile_id: Option<String>,
    pub created_from: Option<DateTime<Utc>>,
    pub created_to: Option<DateTime<Utc>>,
}

/// User as exposed by the API, without the password hash
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub company_id: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub status: UserStatus,
    pub job_profile_id: Option<String>,
    pub must_change_password: bool,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            company_id: user.company_id().to_string(),
            name: user.name().to_string(),
            email: user.email().to_string(),
            role: user.role(),
            status: user.status(),
            job_profile_id: user.job_profile_id().map(ToString::to_string),
            must_change_password: user.must_change_password(),
            last_login_at: user.last_login_at(),
            created_at: user.created_at(),
            updated_at: user.updated_at(),
        }
    }
}

/// Returned once by a password reset
#[derive(Debug, Clone, Serialize)]
pub struct PasswordResetResponse {
    pub user: UserResponse,
    pub temporary_password: String,
}

/// GET /api/users
pub async fn list_users(
    State(state): State<AppState>,
    user: RequireUser,
    Query(params): Query<ListParams>,
    Query(filters): Query<UserFilters>,
) -> Result<ApiResponse<Page<UserResponse>>, ApiError> {
    debug!(company_id = %user.company_id(), "Listing users");

    let pagination = params.pagination()?;
    let mut builder = UserSearchCriteria::builder(user.company_id().clone())
        .with_pagination(pagination.page().into(), pagination.limit().into())
        .with_created(date_range(filters.created_from, filters.created_to)?);

    if let Some(name) = filters.name {
        builder = builder.with_name(name);
    }
    if let Some(email) = filters.email {
        builder = builder.with_email(email);
    }
    if let Some(role) = parse_optional(filters.role.as_deref())? {
        builder = builder.with_role(role);
    }
    if let Some(status) = parse_optional(filters.status.as_deref())? {
        builder = builder.with_status(status);
    }
    if let Some(job_profile_id) = parse_optional(filters.job_profile_id.as_deref())? {
        builder = builder.with_job_profile_id(job_profile_id);
    }
    if let Some(sort) = params.sort::<UserSortField>()? {
        builder = builder.with_sorting(sort.field, sort.order);
    }

    let page = state.user_service.search(&builder.build()).await?;
    Ok(ApiResponse::ok(page.map(|u| UserResponse::from(&u))))
}

/// POST /api/users
pub async fn create_user(
    State(state): State<AppState>,
    admin: RequireAdmin,
    ValidatedJson(request): ValidatedJson<CreateUserRequest>,
) -> Result<Created<UserResponse>, ApiError> {
    let data = NewUser {
        name: request.name,
        email: request.email,
        role: request.role,
        job_profile_id: request.job_profile_id,
        must_change_password: request.must_change_password,
    };

    let user = state
        .user_service
        .create(admin.company_id(), data, &request.password)
        .await?;

    Ok(Created(UserResponse::from(&user)))
}

/// GET /api/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    user: RequireUser,
    Path(id): Path<String>,
) -> Result<ApiResponse<UserResponse>, ApiError> {
    let found = state.user_service.get(user.company_id(), &id).await?;
    Ok(ApiResponse::ok(UserResponse::from(&found)))
}

/// PUT /api/users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    admin: RequireAdmin,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateUserRequest>,
) -> Result<ApiResponse<UserResponse>, ApiError> {
    let changes = UserChanges {
        name: request.name,
        email: request.email,
        job_profile_id: request.job_profile_id,
    };

    let user = state
        .user_service
        .update(admin.company_id(), &id, changes)
        .await?;

    Ok(ApiResponse::ok(UserResponse::from(&user)))
}

/// PATCH /api/users/{id}/role
pub async fn assign_user_role(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UserRoleRequest>,
) -> Result<ApiResponse<UserResponse>, ApiError> {
    let user = state
        .user_service
        .assign_role(admin.company_id(), admin.id(), &id, request.role)
        .await?;

    Ok(ApiResponse::ok(UserResponse::from(&user)))
}

/// PATCH /api/users/{id}/status
pub async fn change_user_status(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UserStatusRequest>,
) -> Result<ApiResponse<UserResponse>, ApiError> {
    let user = state
        .user_service
        .change_status(admin.company_id(), admin.id(), &id, request.status)
        .await?;

    Ok(ApiResponse::ok(UserResponse::from(&user)))
}

/// POST /api/users/{id}/reset-password
pub async fn reset_user_password(
    State(state): State<AppState>,
    admin: RequireAdmin,
    Path(id): Path<String>,
) -> Result<ApiResponse<PasswordResetResponse>, ApiError> {
    let (user, temporary_password) = state
        .user_service
        .reset_password(admin.company_id(), &id)
        .await?;

    Ok(ApiResponse::ok(PasswordResetResponse {
        user: UserResponse::from(&user),
        temporary_password,
    })
    .with_message("La contraseña temporal solo se muestra una vez"))
}

/// DELETE /api/users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<String>,
) -> Result<ApiResponse<UserResponse>, ApiError> {
    let user = state
        .user_service
        .delete(admin.company_id(), admin.id(), &id)
        .await?;

    Ok(ApiResponse::ok(UserResponse::from(&user)).with_message("Usuario desactivado"))
}
