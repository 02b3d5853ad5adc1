//! User authentication using JWT tokens

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use tracing::{debug, warn};

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::common::CompanyId;
use crate::domain::traits::TenantScoped;
use crate::domain::user::User;

const INVALID_TOKEN: &str = "Token inválido o expirado";

pub const PASSWORD_CHANGE_REQUIRED: &str = "Debe cambiar su contraseña antes de continuar";

/// Extractor that requires a valid JWT token for a still-active user
///
/// The token comes from the `Authorization: Bearer <jwt_token>` header.
/// Users with a pending password change are rejected with 403; only
/// [`RequireSession`] endpoints stay reachable for them.
#[derive(Debug, Clone)]
pub struct RequireUser(pub User);

impl RequireUser {
    pub fn company_id(&self) -> &CompanyId {
        self.0.company_id()
    }
}

impl FromRequestParts<AppState> for RequireUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = authenticate(parts, state).await?;

        if user.must_change_password() {
            warn!(user_id = %user.id(), "Request blocked until password is changed");
            return Err(ApiError::forbidden(PASSWORD_CHANGE_REQUIRED));
        }

        Ok(RequireUser(user))
    }
}

/// Valid token for an active user, even one that must change password
#[derive(Debug, Clone)]
pub struct RequireSession(pub User);

impl FromRequestParts<AppState> for RequireSession {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(RequireSession(authenticate(parts, state).await?))
    }
}

async fn authenticate(parts: &Parts, state: &AppState) -> Result<User, ApiError> {
    let token = extract_jwt_token(&parts.headers)?;

    debug!("Validating JWT token");

    let claims = state
        .jwt_service
        .validate(&token)
        .map_err(|_| ApiError::unauthorized(INVALID_TOKEN))?;

    let company_id =
        CompanyId::new(claims.company_id).map_err(|_| ApiError::unauthorized(INVALID_TOKEN))?;

    let user = state
        .user_service
        .get_active(&company_id, &claims.sub)
        .await?;

    Ok(user)
}

/// Extract the bearer token from the Authorization header
pub fn extract_jwt_token(headers: &axum::http::HeaderMap) -> Result<String, ApiError> {
    if let Some(auth_header) = headers.get(header::AUTHORIZATION) {
        let auth_str = auth_header
            .to_str()
            .map_err(|_| ApiError::unauthorized("Cabecera Authorization mal codificada"))?;

        if let Some(token) = auth_str.strip_prefix("Bearer ") {
            let token = token.trim();
            if !token.is_empty() {
                return Ok(token.to_string());
            }
        }
    }

    Err(ApiError::unauthorized(
        "Autenticación requerida: envíe 'Authorization: Bearer <token>'",
    ))
}
