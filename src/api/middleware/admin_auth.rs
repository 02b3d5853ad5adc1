//! Admin-only access

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
};
use tracing::{debug, warn};

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::common::CompanyId;
use crate::domain::traits::TenantScoped;
use crate::domain::user::User;

use super::user_auth::RequireUser;

/// Extractor that requires an authenticated user with the ADMIN role
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub User);

impl RequireAdmin {
    pub fn company_id(&self) -> &CompanyId {
        self.0.company_id()
    }
}

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let RequireUser(user) = RequireUser::from_request_parts(parts, state).await?;

        if !user.is_admin() {
            warn!(user_id = %user.id(), role = %user.role(), "Admin access denied");
            return Err(ApiError::forbidden(
                "Se requieren permisos de administrador",
            ));
        }

        debug!(user_id = %user.id(), "Admin access granted");
        Ok(RequireAdmin(user))
    }
}
