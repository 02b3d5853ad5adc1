//! Tenant-scoped resource endpoints
//!
//! Every route here requires a bearer token; the company comes from its claims.

pub mod clients;
pub mod equipment;
pub mod job_profiles;
pub mod minutes;
pub mod objectives;
pub mod suppliers;
pub mod training_plans;
pub mod users;

use axum::{
    Router,
    routing::{delete, get, patch, post},
};

use super::state::AppState;

/// Create the resource router, mounted under `/api`
pub fn create_resources_router() -> Router<AppState> {
    Router::new()
        // Clients
        .route(
            "/clients",
            get(clients::list_clients).post(clients::create_client),
        )
        .route(
            "/clients/{id}",
            get(clients::get_client)
                .put(clients::update_client)
                .delete(clients::delete_client),
        )
        .route("/clients/{id}/status", patch(clients::change_client_status))
        // Users
        .route("/users", get(users::list_users).post(users::create_user))
        .route(
            "/users/{id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .route("/users/{id}/role", patch(users::assign_user_role))
        .route("/users/{id}/status", patch(users::change_user_status))
        .route(
            "/users/{id}/reset-password",
            post(users::reset_user_password),
        )
        // Equipment
        .route(
            "/equipment",
            get(equipment::list_equipment).post(equipment::create_equipment),
        )
        .route(
            "/equipment/{id}",
            get(equipment::get_equipment)
                .put(equipment::update_equipment)
                .delete(equipment::delete_equipment),
        )
        .route(
            "/equipment/{id}/status",
            patch(equipment::change_equipment_status),
        )
        .route(
            "/equipment/{id}/maintenance",
            post(equipment::record_equipment_maintenance),
        )
        // Job profiles
        .route(
            "/job-profiles",
            get(job_profiles::list_job_profiles).post(job_profiles::create_job_profile),
        )
        .route(
            "/job-profiles/{id}",
            get(job_profiles::get_job_profile)
                .put(job_profiles::update_job_profile)
                .delete(job_profiles::delete_job_profile),
        )
        .route(
            "/job-profiles/{id}/status",
            patch(job_profiles::change_job_profile_status),
        )
        // Minutes
        .route(
            "/minutes",
            get(minutes::list_minutes).post(minutes::create_minutes),
        )
        .route(
            "/minutes/{id}",
            get(minutes::get_minutes)
                .put(minutes::update_minutes)
                .delete(minutes::delete_minutes),
        )
        .route("/minutes/{id}/approve", post(minutes::approve_minutes))
        .route("/minutes/{id}/archive", post(minutes::archive_minutes))
        .route(
            "/minutes/{id}/agreements",
            post(minutes::add_minutes_agreement),
        )
        .route(
            "/minutes/{id}/agreements/{agreement_id}/complete",
            post(minutes::complete_minutes_agreement),
        )
        // Objectives
        .route(
            "/objectives",
            get(objectives::list_objectives).post(objectives::create_objective),
        )
        .route(
            "/objectives/{id}",
            get(objectives::get_objective)
                .put(objectives::update_objective)
                .delete(objectives::delete_objective),
        )
        .route(
            "/objectives/{id}/status",
            patch(objectives::change_objective_status),
        )
        .route(
            "/objectives/{id}/progress",
            post(objectives::record_objective_progress),
        )
        // Suppliers
        .route(
            "/suppliers",
            get(suppliers::list_suppliers).post(suppliers::create_supplier),
        )
        .route(
            "/suppliers/{id}",
            get(suppliers::get_supplier)
                .put(suppliers::update_supplier)
                .delete(suppliers::delete_supplier),
        )
        .route(
            "/suppliers/{id}/status",
            patch(suppliers::change_supplier_status),
        )
        .route(
            "/suppliers/{id}/evaluate",
            post(suppliers::evaluate_supplier),
        )
        // Training plans
        .route(
            "/training-plans",
            get(training_plans::list_training_plans).post(training_plans::create_training_plan),
        )
        .route(
            "/training-plans/{id}",
            get(training_plans::get_training_plan)
                .put(training_plans::update_training_plan)
                .delete(training_plans::delete_training_plan),
        )
        .route(
            "/training-plans/{id}/status",
            patch(training_plans::change_training_plan_status),
        )
        .route(
            "/training-plans/{id}/participants",
            post(training_plans::add_training_participant),
        )
        .route(
            "/training-plans/{id}/participants/{user_id}",
            delete(training_plans::remove_training_participant),
        )
}
