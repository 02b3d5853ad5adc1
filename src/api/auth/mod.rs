//! Authentication API endpoints
//!
//! Login issues a company-scoped JWT; the other endpoints act on the caller.

use axum::{
    Router,
    extract::State,
    routing::{get, post},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;
use validator::Validate;

use crate::api::middleware::RequireSession;
use crate::api::resources::users::UserResponse;
use crate::api::state::AppState;
use crate::api::types::{ApiError, ApiResponse, ValidatedJson};
use crate::domain::CompanyId;
use crate::domain::traits::TenantScoped;
use crate::infrastructure::observability::record_auth_attempt;

/// Create the authentication router
pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/me", get(get_current_user))
        .route("/change-password", post(change_password))
}

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "es obligatorio"))]
    pub company_id: String,
    #[validate(length(min = 1, message = "es obligatorio"))]
    pub email: String,
    #[validate(length(min = 1, message = "es obligatoria"))]
    pub password: String,
}

/// Login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub user: UserResponse,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1, message = "es obligatoria"))]
    pub current_password: String,
    #[validate(length(min = 8, max = 128, message = "debe tener entre 8 y 128 caracteres"))]
    pub new_password: String,
}

/// Login with company, email and password
///
/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<ApiResponse<LoginResponse>, ApiError> {
    let outcome = authenticate(&state, &request).await;
    record_auth_attempt(if outcome.is_ok() { "success" } else { "failure" });

    let user = outcome?;
    let issued = state.jwt_service.generate(&user)?;

    Ok(ApiResponse::ok(LoginResponse {
        token: issued.token,
        expires_at: issued.expires_at,
        user: UserResponse::from(&user),
    }))
}

async fn authenticate(
    state: &AppState,
    request: &LoginRequest,
) -> Result<crate::domain::user::User, ApiError> {
    let company_id = CompanyId::new(request.company_id.trim()).map_err(|_| {
        warn!("Login attempt with malformed company id");
        ApiError::unauthorized("Credenciales inválidas")
    })?;

    let user = state
        .user_service
        .authenticate(&company_id, &request.email, &request.password)
        .await?;

    Ok(user)
}

/// Get the authenticated user
///
/// GET /api/auth/me
pub async fn get_current_user(
    RequireSession(user): RequireSession,
) -> Result<ApiResponse<UserResponse>, ApiError> {
    Ok(ApiResponse::ok(UserResponse::from(&user)))
}

/// Change the caller's own password
///
/// POST /api/auth/change-password
pub async fn change_password(
    State(state): State<AppState>,
    RequireSession(user): RequireSession,
    ValidatedJson(request): ValidatedJson<ChangePasswordRequest>,
) -> Result<ApiResponse<UserResponse>, ApiError> {
    let user = state
        .user_service
        .change_own_password(
            user.company_id(),
            user.id(),
            &request.current_password,
            &request.new_password,
        )
        .await?;

    Ok(ApiResponse::ok(UserResponse::from(&user)).with_message("Contraseña actualizada"))
}
