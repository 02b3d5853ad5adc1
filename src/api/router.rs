use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method, header},
    middleware,
    routing::get,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use super::auth;
use super::health;
use super::middleware::{
    MAX_BODY_SIZE, logging_middleware, metrics_middleware, security_headers_middleware,
};
use super::resources;
use super::state::AppState;
use super::types::ApiError;
use crate::infrastructure::observability::create_metrics_router;

/// Create the full router with application state
///
/// `/metrics` is merged only when the state carries a Prometheus handle.
pub fn create_router(state: AppState, cors_origins: &[String]) -> Router {
    let metrics = state.metrics.clone();

    let mut router = Router::new()
        // Health
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check))
        // Authentication (login is public)
        .nest("/api/auth", auth::create_auth_router())
        // Tenant resources
        .nest("/api", resources::create_resources_router())
        .fallback(route_not_found)
        .with_state(state);

    if let Some(m) = metrics {
        router = router.merge(create_metrics_router(m));
    }

    router
        .layer(DefaultBodyLimit::max(MAX_BODY_SIZE))
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(cors_origins))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

async fn route_not_found() -> ApiError {
    ApiError::not_found("Ruta no encontrada")
}

/// `*` allows any origin; an empty list allows none
fn cors_layer(origins: &[String]) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    if origins.iter().any(|o| o == "*") {
        return base.allow_origin(Any);
    }

    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    base.allow_origin(AllowOrigin::list(parsed))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::api::middleware::PASSWORD_CHANGE_REQUIRED;
    use crate::domain::CompanyId;
    use crate::infrastructure::auth::{Argon2Hasher, JwtConfig, JwtService};
    use crate::infrastructure::storage::StorageBackend;

    const ADMIN_EMAIL: &str = "admin@acme.com";
    const ADMIN_PASSWORD: &str = "password123";

    async fn test_state() -> AppState {
        let state = AppState::build(
            StorageBackend::InMemory,
            Arc::new(JwtService::new(JwtConfig::new("router-test-secret", 1))),
            Arc::new(Argon2Hasher::new()),
        )
        .await
        .unwrap();

        seed_admin(&state, "acme").await;
        state
    }

    /// Bootstrap an administrator that has already replaced its initial password
    async fn seed_admin(state: &AppState, company: &str) {
        let company = CompanyId::new(company).unwrap();
        let admin = state
            .user_service
            .bootstrap_admin(&company, "Admin", ADMIN_EMAIL, ADMIN_PASSWORD)
            .await
            .unwrap()
            .unwrap();
        state
            .user_service
            .change_own_password(&company, admin.id(), ADMIN_PASSWORD, ADMIN_PASSWORD)
            .await
            .unwrap();
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn get_request(uri: &str, token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn login(app: &Router, company: &str) -> String {
        login_as(app, company, ADMIN_EMAIL, ADMIN_PASSWORD).await
    }

    async fn login_as(app: &Router, company: &str, email: &str, password: &str) -> String {
        let (status, body) = send(
            app,
            json_request(
                "POST",
                "/api/auth/login",
                None,
                json!({ "company_id": company, "email": email, "password": password }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "login failed: {}", body);
        body["data"]["token"].as_str().unwrap().to_string()
    }

    /// POST a body and return the created id
    async fn create(app: &Router, token: &str, uri: &str, body: Value) -> String {
        let (status, body) = send(app, json_request("POST", uri, Some(token), body)).await;
        assert_eq!(status, StatusCode::CREATED, "create failed: {}", body);
        body["data"]["id"].as_str().unwrap().to_string()
    }

    async fn create_user(app: &Router, token: &str, name: &str, email: &str, role: &str) -> String {
        create(
            app,
            token,
            "/api/users",
            json!({ "name": name, "email": email, "password": "employee-pass", "role": role }),
        )
        .await
    }

    async fn total(app: &Router, token: &str, uri: &str) -> Value {
        let (status, body) = send(app, get_request(uri, Some(token))).await;
        assert_eq!(status, StatusCode::OK, "list failed: {}", body);
        body["data"]["total"].clone()
    }

    #[tokio::test]
    async fn test_health_endpoints() {
        let app = create_router(test_state().await, &[]);

        let (status, body) = send(&app, get_request("/health", None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");

        let (status, body) = send(&app, get_request("/ready", None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["checks"][0]["name"], "storage:memory");

        let (status, _) = send(&app, get_request("/live", None)).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_route_uses_error_envelope() {
        let app = create_router(test_state().await, &[]);

        let (status, body) = send(&app, get_request("/api/nothing-here", None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_resources_require_token() {
        let app = create_router(test_state().await, &[]);

        let (status, body) = send(&app, get_request("/api/clients", None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["success"], false);

        let (status, _) = send(&app, get_request("/api/clients", Some("garbage"))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_login_rejects_bad_credentials() {
        let app = create_router(test_state().await, &[]);

        let (status, _) = send(
            &app,
            json_request(
                "POST",
                "/api/auth/login",
                None,
                json!({ "company_id": "acme", "email": ADMIN_EMAIL, "password": "wrong-password" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = send(
            &app,
            json_request(
                "POST",
                "/api/auth/login",
                None,
                json!({ "company_id": "other", "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, body) = send(
            &app,
            json_request("POST", "/api/auth/login", None, json!({ "company_id": "acme" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_login_and_me() {
        let app = create_router(test_state().await, &[]);
        let token = login(&app, "acme").await;

        let (status, body) = send(&app, get_request("/api/auth/me", Some(&token))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["email"], ADMIN_EMAIL);
        assert_eq!(body["data"]["role"], "ADMIN");
        assert!(body["data"].get("password_hash").is_none());
    }

    #[tokio::test]
    async fn test_client_lifecycle() {
        let app = create_router(test_state().await, &[]);
        let token = login(&app, "acme").await;

        let (status, body) = send(
            &app,
            json_request(
                "POST",
                "/api/clients",
                Some(&token),
                json!({ "name": "Globex", "email": "info@globex.com", "client_type": "COMPANY" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let id = body["data"]["id"].as_str().unwrap().to_string();

        let (status, body) = send(&app, get_request("/api/clients?name=glob", Some(&token))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["total"], 1);

        let (status, body) = send(
            &app,
            json_request(
                "PATCH",
                &format!("/api/clients/{}/status", id),
                Some(&token),
                json!({ "status": "INACTIVE" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["status"], "INACTIVE");

        let (status, _) = send(
            &app,
            get_request(&format!("/api/clients/{}", uuid_like()), Some(&token)),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_validation_errors_are_reported() {
        let app = create_router(test_state().await, &[]);
        let token = login(&app, "acme").await;

        let (status, body) = send(
            &app,
            json_request(
                "POST",
                "/api/clients",
                Some(&token),
                json!({ "name": "G", "email": "not-an-email", "client_type": "COMPANY" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let message = body["message"].as_str().unwrap();
        assert!(message.contains("email"));
        assert!(message.contains("name"));

        let (status, _) = send(
            &app,
            get_request("/api/clients?page=0", Some(&token)),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_tenants_are_isolated() {
        let state = test_state().await;
        seed_admin(&state, "globex").await;
        let app = create_router(state, &[]);

        let acme = login(&app, "acme").await;
        let globex = login(&app, "globex").await;

        let (_, body) = send(
            &app,
            json_request(
                "POST",
                "/api/suppliers",
                Some(&acme),
                json!({ "name": "Steel Corp", "tax_id": "B-123", "category": "PRODUCT" }),
            ),
        )
        .await;
        let id = body["data"]["id"].as_str().unwrap().to_string();

        let (status, _) = send(
            &app,
            get_request(&format!("/api/suppliers/{}", id), Some(&globex)),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (_, body) = send(&app, get_request("/api/suppliers", Some(&globex))).await;
        assert_eq!(body["data"]["total"], 0);
    }

    #[tokio::test]
    async fn test_responses_carry_request_id_and_security_headers() {
        let app = create_router(test_state().await, &[]);

        let response = app.oneshot(get_request("/health", None)).await.unwrap();
        assert!(response.headers().contains_key("x-request-id"));
        assert_eq!(
            response.headers().get("x-content-type-options").unwrap(),
            "nosniff"
        );
    }

    #[tokio::test]
    async fn test_pending_password_change_blocks_resources() {
        let state = AppState::build(
            StorageBackend::InMemory,
            Arc::new(JwtService::new(JwtConfig::new("router-test-secret", 1))),
            Arc::new(Argon2Hasher::new()),
        )
        .await
        .unwrap();
        state
            .user_service
            .bootstrap_admin(
                &CompanyId::new("acme").unwrap(),
                "Admin",
                ADMIN_EMAIL,
                ADMIN_PASSWORD,
            )
            .await
            .unwrap();
        let app = create_router(state, &[]);
        let token = login(&app, "acme").await;

        let (status, body) = send(&app, get_request("/api/clients", Some(&token))).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["message"], PASSWORD_CHANGE_REQUIRED);

        let (status, body) = send(&app, get_request("/api/auth/me", Some(&token))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["must_change_password"], true);

        let (status, _) = send(
            &app,
            json_request(
                "POST",
                "/api/auth/change-password",
                Some(&token),
                json!({ "current_password": ADMIN_PASSWORD, "new_password": "a-new-password" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = send(&app, get_request("/api/clients", Some(&token))).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_user_administration_requires_admin() {
        let app = create_router(test_state().await, &[]);
        let admin = login(&app, "acme").await;
        let employee_id = create_user(&app, &admin, "Ana Pérez", "ana@acme.com", "EMPLOYEE").await;
        let employee = login_as(&app, "acme", "ana@acme.com", "employee-pass").await;

        let (status, _) = send(&app, get_request("/api/users", Some(&employee))).await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = send(
            &app,
            json_request(
                "POST",
                "/api/users",
                Some(&employee),
                json!({ "name": "Luis", "email": "luis@acme.com", "password": "luis-pass1", "role": "ADMIN" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = send(
            &app,
            json_request(
                "PATCH",
                &format!("/api/users/{}/role", employee_id),
                Some(&employee),
                json!({ "role": "ADMIN" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = send(
            &app,
            json_request(
                "POST",
                &format!("/api/users/{}/reset-password", employee_id),
                Some(&employee),
                json!({}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_admin_cannot_demote_itself() {
        let app = create_router(test_state().await, &[]);
        let token = login(&app, "acme").await;
        let (_, me) = send(&app, get_request("/api/auth/me", Some(&token))).await;
        let admin_id = me["data"]["id"].as_str().unwrap().to_string();

        let (status, _) = send(
            &app,
            json_request(
                "PATCH",
                &format!("/api/users/{}/role", admin_id),
                Some(&token),
                json!({ "role": "EMPLOYEE" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let other = create_user(&app, &token, "Ana Pérez", "ana@acme.com", "EMPLOYEE").await;
        let (status, body) = send(
            &app,
            json_request(
                "PATCH",
                &format!("/api/users/{}/role", other),
                Some(&token),
                json!({ "role": "MANAGER" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["role"], "MANAGER");
    }

    #[tokio::test]
    async fn test_user_filters() {
        let app = create_router(test_state().await, &[]);
        let token = login(&app, "acme").await;
        create_user(&app, &token, "Ana Pérez", "ana@acme.com", "EMPLOYEE").await;
        create_user(&app, &token, "Luis Gómez", "luis@acme.com", "AUDITOR").await;

        assert_eq!(total(&app, &token, "/api/users").await, 3);
        assert_eq!(total(&app, &token, "/api/users?role=employee").await, 1);
        assert_eq!(total(&app, &token, "/api/users?role=AUDITOR&status=ACTIVE").await, 1);

        let (status, _) = send(&app, get_request("/api/users?role=bogus", Some(&token))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_equipment_maintenance_filters() {
        let app = create_router(test_state().await, &[]);
        let token = login(&app, "acme").await;
        create(
            &app,
            &token,
            "/api/equipment",
            json!({ "name": "Balanza", "code": "EQ-1", "equipment_type": "Medición",
                    "next_maintenance_date": "2020-06-01T00:00:00Z" }),
        )
        .await;
        create(
            &app,
            &token,
            "/api/equipment",
            json!({ "name": "Horno", "code": "EQ-2", "equipment_type": "Producción",
                    "next_maintenance_date": "2999-01-01T00:00:00Z" }),
        )
        .await;

        assert_eq!(total(&app, &token, "/api/equipment?needs_maintenance=true").await, 1);
        assert_eq!(
            total(
                &app,
                &token,
                "/api/equipment?next_maintenance_from=2020-01-01T00:00:00Z&next_maintenance_to=2021-01-01T00:00:00Z"
            )
            .await,
            1
        );

        let (status, _) = send(
            &app,
            get_request(
                "/api/equipment?next_maintenance_from=2021-01-01T00:00:00Z&next_maintenance_to=2020-01-01T00:00:00Z",
                Some(&token),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_job_profile_hierarchy() {
        let app = create_router(test_state().await, &[]);
        let token = login(&app, "acme").await;
        let director = create(
            &app,
            &token,
            "/api/job-profiles",
            json!({ "title": "Director de calidad", "department": "Calidad" }),
        )
        .await;
        create(
            &app,
            &token,
            "/api/job-profiles",
            json!({ "title": "Técnico de calidad", "department": "Calidad", "reports_to": director }),
        )
        .await;

        assert_eq!(
            total(&app, &token, &format!("/api/job-profiles?reports_to={}", director)).await,
            1
        );

        let (status, _) = send(
            &app,
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/job-profiles/{}", director))
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_minutes_filters_and_approval() {
        let app = create_router(test_state().await, &[]);
        let token = login(&app, "acme").await;
        let review = create(
            &app,
            &token,
            "/api/minutes",
            json!({ "title": "Revisión por la dirección", "meeting_type": "MANAGEMENT_REVIEW",
                    "meeting_date": "2024-03-10T09:00:00Z", "attendees": ["Ana", "Luis"] }),
        )
        .await;
        create(
            &app,
            &token,
            "/api/minutes",
            json!({ "title": "Comité de calidad", "meeting_type": "QUALITY_COMMITTEE",
                    "meeting_date": "2024-07-02T09:00:00Z", "attendees": ["Luis"] }),
        )
        .await;

        assert_eq!(total(&app, &token, "/api/minutes?attendee=Ana").await, 1);
        assert_eq!(total(&app, &token, "/api/minutes?attendee=Luis").await, 2);
        assert_eq!(
            total(
                &app,
                &token,
                "/api/minutes?meeting_from=2024-06-01T00:00:00Z&meeting_to=2024-12-31T00:00:00Z"
            )
            .await,
            1
        );

        let (status, body) = send(
            &app,
            json_request(
                "POST",
                &format!("/api/minutes/{}/approve", review),
                Some(&token),
                json!({}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["status"], "APPROVED");
        assert_eq!(total(&app, &token, "/api/minutes?status=APPROVED").await, 1);

        let (status, _) = send(
            &app,
            json_request(
                "PUT",
                &format!("/api/minutes/{}", review),
                Some(&token),
                json!({ "title": "Revisión corregida" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_objective_filters_and_progress() {
        let app = create_router(test_state().await, &[]);
        let token = login(&app, "acme").await;
        create(
            &app,
            &token,
            "/api/objectives",
            json!({ "title": "Reducir reclamaciones", "indicator": "Reclamaciones",
                    "target_value": 10.0, "start_date": "2020-01-01T00:00:00Z",
                    "due_date": "2020-12-31T00:00:00Z" }),
        )
        .await;
        let current = create(
            &app,
            &token,
            "/api/objectives",
            json!({ "title": "Satisfacción del cliente", "indicator": "Encuestas",
                    "target_value": 80.0, "start_date": "2024-01-01T00:00:00Z",
                    "due_date": "2999-12-31T00:00:00Z" }),
        )
        .await;

        assert_eq!(total(&app, &token, "/api/objectives?overdue=true").await, 1);
        assert_eq!(
            total(&app, &token, "/api/objectives?due_from=2021-01-01T00:00:00Z").await,
            1
        );

        let (status, body) = send(
            &app,
            json_request(
                "POST",
                &format!("/api/objectives/{}/progress", current),
                Some(&token),
                json!({ "value": 40.0 }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["progress"], 50.0);
        assert_eq!(body["data"]["status"], "IN_PROGRESS");
    }

    #[tokio::test]
    async fn test_supplier_score_filters() {
        let app = create_router(test_state().await, &[]);
        let token = login(&app, "acme").await;
        let steel = create(
            &app,
            &token,
            "/api/suppliers",
            json!({ "name": "Steel Corp", "tax_id": "B-123", "category": "PRODUCT" }),
        )
        .await;
        let cleaning = create(
            &app,
            &token,
            "/api/suppliers",
            json!({ "name": "Limpiezas Sol", "tax_id": "B-456", "category": "SERVICE" }),
        )
        .await;

        for (id, score) in [(&steel, 90.0), (&cleaning, 50.0)] {
            let (status, _) = send(
                &app,
                json_request(
                    "POST",
                    &format!("/api/suppliers/{}/evaluate", id),
                    Some(&token),
                    json!({ "score": score }),
                ),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
        }

        assert_eq!(total(&app, &token, "/api/suppliers?min_score=80").await, 1);
        assert_eq!(total(&app, &token, "/api/suppliers?min_score=40&max_score=60").await, 1);
        assert_eq!(total(&app, &token, "/api/suppliers?status=APPROVED").await, 1);

        let (status, _) = send(
            &app,
            get_request("/api/suppliers?min_score=90&max_score=10", Some(&token)),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(
            &app,
            json_request(
                "POST",
                &format!("/api/suppliers/{}/evaluate", steel),
                Some(&token),
                json!({ "score": 150.0 }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_training_plan_filters() {
        let app = create_router(test_state().await, &[]);
        let token = login(&app, "acme").await;
        let ana = create_user(&app, &token, "Ana Pérez", "ana@acme.com", "EMPLOYEE").await;
        let induction = create(
            &app,
            &token,
            "/api/training-plans",
            json!({ "title": "Acogida", "modality": "IN_PERSON",
                    "start_date": "2024-02-01T09:00:00Z", "end_date": "2024-02-01T13:00:00Z",
                    "duration_hours": 4.0 }),
        )
        .await;
        create(
            &app,
            &token,
            "/api/training-plans",
            json!({ "title": "Auditor interno", "modality": "ONLINE",
                    "start_date": "2025-05-01T09:00:00Z", "end_date": "2025-05-03T13:00:00Z",
                    "duration_hours": 16.0 }),
        )
        .await;

        let (status, body) = send(
            &app,
            json_request(
                "POST",
                &format!("/api/training-plans/{}/participants", induction),
                Some(&token),
                json!({ "user_id": ana }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["participants"][0], ana.as_str());

        assert_eq!(
            total(&app, &token, &format!("/api/training-plans?participant={}", ana)).await,
            1
        );
        assert_eq!(total(&app, &token, "/api/training-plans?year=2025").await, 1);
        assert_eq!(total(&app, &token, "/api/training-plans?modality=online").await, 1);

        let (status, _) = send(
            &app,
            json_request(
                "POST",
                &format!("/api/training-plans/{}/participants", induction),
                Some(&token),
                json!({ "user_id": uuid_like() }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_list_parameters_are_validated() {
        let app = create_router(test_state().await, &[]);
        let token = login(&app, "acme").await;

        for uri in [
            "/api/suppliers?limit=0",
            "/api/suppliers?limit=500",
            "/api/suppliers?page=abc",
            "/api/users?sort_by=salary",
        ] {
            let (status, body) = send(&app, get_request(uri, Some(&token))).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{} returned {}", uri, body);
            assert_eq!(body["success"], false);
        }

        let (_, body) = send(
            &app,
            get_request("/api/suppliers?page=2&limit=5&sort_by=name&sort_order=desc", Some(&token)),
        )
        .await;
        assert_eq!(body["data"]["page"], 2);
        assert_eq!(body["data"]["limit"], 5);
    }

    fn uuid_like() -> String {
        uuid::Uuid::new_v4().to_string()
    }
}
