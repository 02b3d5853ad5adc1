//! ISO Management API
//!
//! Multi-tenant backend for the records an ISO 9001 quality system keeps:
//! - Clients, suppliers and their evaluations
//! - Users, job profiles and training plans
//! - Equipment maintenance, quality objectives and meeting minutes

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use anyhow::Context;
use api::state::AppState;
use infrastructure::auth::{Argon2Hasher, JwtService};
use infrastructure::observability::init_metrics;
use infrastructure::storage::StorageFactory;
use tracing::{info, warn};

/// Create the application state with all services initialized
///
/// Opens the configured storage backend, installs the metrics recorder and
/// bootstraps the first administrator when configured.
pub async fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    config.auth.validate()?;
    if config.auth.uses_default_secret() {
        warn!("Using the default JWT secret; set APP__AUTH__JWT_SECRET in production");
    }

    let storage_config = config.storage.to_storage_config()?;
    info!(backend = %storage_config.storage_type(), "Opening storage backend");

    let storage = StorageFactory::connect(&storage_config)
        .await
        .context("Failed to open storage backend")?;

    let jwt_service = Arc::new(JwtService::new(config.auth.to_jwt_config()));
    let hasher = Arc::new(Argon2Hasher::new());

    let state = AppState::build(storage, jwt_service, hasher)
        .await?
        .with_metrics(init_metrics(config.metrics.enabled));

    if let Some(bootstrap) = &config.bootstrap {
        let company_id = bootstrap.company()?;
        let created = state
            .user_service
            .bootstrap_admin(
                &company_id,
                &bootstrap.admin_name,
                &bootstrap.admin_email,
                &bootstrap.admin_password,
            )
            .await?;

        if created.is_none() {
            info!(company_id = %company_id, "Bootstrap skipped, company already has users");
        }
    }

    Ok(state)
}
