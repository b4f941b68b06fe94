//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use super::common::ApiResponse;
use super::middleware::{auth_middleware, AuthState};
use super::modules::metrics::{http_metrics_middleware, MetricsState};
use super::modules::request_id::request_id_middleware;
use super::modules::{auth, health, maintenances, metrics, motos, MOTOS_PATH};
use crate::application::{AuthService, MaintenanceService, MotoService};
use crate::config::AppConfig;
use crate::domain::RepositoryProvider;
use crate::shared::listing::Link;

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT from POST /api/v1/auth/login"))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        metrics::prometheus_metrics,
        // Auth
        auth::register,
        auth::login,
        auth::me,
        // Motos
        motos::list_motos,
        motos::get_moto,
        motos::create_moto,
        motos::update_moto,
        motos::delete_moto,
        motos::list_moto_maintenances,
        // Maintenances
        maintenances::list_maintenances,
        maintenances::get_maintenance,
        maintenances::create_maintenance,
        maintenances::update_maintenance,
        maintenances::delete_maintenance,
    ),
    components(
        schemas(
            ApiResponse<String>,
            Link,
            health::HealthResponse,
            health::ComponentHealth,
            auth::RegisterRequest,
            auth::LoginRequest,
            auth::LoginResponse,
            auth::UserInfo,
            motos::MotoRequest,
            motos::MotoResource,
            motos::MotoListResponse,
            crate::domain::MotoStatus,
            maintenances::MaintenanceRequest,
            maintenances::MaintenanceResource,
            crate::domain::MaintenanceStatus,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Service health check"),
        (name = "Monitoring", description = "Prometheus metrics"),
        (name = "Authentication", description = "Registration, JWT login and the current profile"),
        (name = "Motos", description = "Fleet management with filtering, sorting, paging and navigation links"),
        (name = "Maintenances", description = "Maintenance records of the fleet"),
    ),
    info(
        title = "Mottu API",
        version = "1.0.0",
        description = "REST API for motorcycle fleet and maintenance management",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(
    repos: Arc<dyn RepositoryProvider>,
    db: DatabaseConnection,
    config: &AppConfig,
    prometheus: PrometheusHandle,
) -> Router {
    let jwt_config = config.jwt_config();
    let auth_state = AuthState {
        jwt_config: jwt_config.clone(),
    };
    let protect = config.security.protect_resources;

    let maintenance_service = Arc::new(MaintenanceService::new(repos.clone()));
    let moto_state = motos::MotoHandlerState {
        motos: Arc::new(MotoService::new(
            repos.clone(),
            config.listing_config(MOTOS_PATH),
        )),
        maintenances: maintenance_service.clone(),
    };
    let maintenance_state = maintenances::MaintenanceHandlerState {
        service: maintenance_service,
    };
    let auth_handler_state = auth::AuthHandlerState {
        service: Arc::new(AuthService::new(
            repos,
            jwt_config,
            config.security.bcrypt_cost,
        )),
    };

    // Moto routes (protected when `security.protect_resources` is set)
    let mut moto_routes = Router::new()
        .route("/api/v1/motos", get(motos::list_motos).post(motos::create_moto))
        .route(
            "/api/v1/motos/{id}",
            get(motos::get_moto)
                .put(motos::update_moto)
                .delete(motos::delete_moto),
        )
        .route(
            "/api/v1/motos/{id}/maintenances",
            get(motos::list_moto_maintenances),
        );
    if protect {
        moto_routes = moto_routes.layer(middleware::from_fn_with_state(
            auth_state.clone(),
            auth_middleware,
        ));
    }
    let moto_routes = moto_routes.with_state(moto_state);

    // Maintenance routes (same rule)
    let mut maintenance_routes = Router::new()
        .route(
            "/api/v1/maintenances",
            get(maintenances::list_maintenances).post(maintenances::create_maintenance),
        )
        .route(
            "/api/v1/maintenances/{id}",
            get(maintenances::get_maintenance)
                .put(maintenances::update_maintenance)
                .delete(maintenances::delete_maintenance),
        );
    if protect {
        maintenance_routes = maintenance_routes.layer(middleware::from_fn_with_state(
            auth_state.clone(),
            auth_middleware,
        ));
    }
    let maintenance_routes = maintenance_routes.with_state(maintenance_state);

    // Auth routes (public)
    let auth_routes = Router::new()
        .route("/api/v1/auth/register", post(auth::register))
        .route("/api/v1/auth/login", post(auth::login))
        .with_state(auth_handler_state.clone());

    // Auth routes (protected)
    let auth_protected_routes = Router::new()
        .route("/api/v1/auth/me", get(auth::me))
        .layer(middleware::from_fn_with_state(auth_state, auth_middleware))
        .with_state(auth_handler_state);

    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .with_state(health::HealthState {
            db,
            started_at: Arc::new(Instant::now()),
        });

    let metrics_routes = Router::new()
        .route("/metrics", get(metrics::prometheus_metrics))
        .with_state(MetricsState { handle: prometheus });

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .expose_headers(Any);

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    Router::new()
        .merge(swagger_routes)
        .merge(health_routes)
        .merge(metrics_routes)
        .merge(auth_routes)
        .merge(auth_protected_routes)
        .merge(moto_routes)
        .merge(maintenance_routes)
        .layer(middleware::from_fn(http_metrics_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
