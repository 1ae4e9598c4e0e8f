use axum::{Router, extract::FromRef, http::HeaderName};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

// Login core: validation, authentication, routing.
pub mod dispatch;
pub mod error;
pub mod gateway;
pub mod inference;
pub mod login;
pub mod models;
pub mod router;
pub mod validation;

// Service plumbing.
pub mod config;
pub mod handlers;
pub mod repository;
pub mod routes;

use routes::public;

// --- Public Re-exports ---

pub use config::AppConfig;
pub use error::AuthError;
pub use gateway::AuthenticationGateway;
pub use login::LoginFlow;
pub use repository::{MockUserService, PostgresUserService, UserServiceState};
pub use router::{RoleDestinationMap, RoleRouter};

/// ApiDoc
///
/// OpenAPI document for every public endpoint, served at `/api-docs/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    paths(handlers::login, handlers::infer_role),
    components(
        schemas(
            models::Role, models::LoginRequest, models::LoginResponse,
            models::InferRoleRequest, models::InferRoleResponse, models::ErrorResponse,
        )
    ),
    tags(
        (name = "kucat-portal", description = "KUCAT login and role routing API")
    )
)]
struct ApiDoc;

/// AppState
///
/// The single shared container handed to the router. Built once in `main` (or a test) and
/// never mutated; handlers pull the pieces they need through `FromRef`.
#[derive(Clone)]
pub struct AppState {
    /// Login flow wired to the configured user service and destination table.
    pub login: LoginFlow,
    /// The loaded, immutable configuration.
    pub config: AppConfig,
}

impl AppState {
    /// Wires the login flow from configuration and a user service.
    pub fn new(config: AppConfig, users: UserServiceState) -> Self {
        let gateway = AuthenticationGateway::new(users, config.verify_timeout);
        let router = RoleRouter::new(config.destinations.clone());
        Self {
            login: LoginFlow::new(gateway, router),
            config,
        }
    }
}

impl FromRef<AppState> for LoginFlow {
    fn from_ref(app_state: &AppState) -> LoginFlow {
        app_state.login.clone()
    }
}

impl FromRef<AppState> for AppConfig {
    fn from_ref(app_state: &AppState) -> AppConfig {
        app_state.config.clone()
    }
}

/// create_router
///
/// Assembles the routes, applies the CORS, request id and tracing layers, and attaches
/// the application state.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    let x_request_id = HeaderName::from_static("x-request-id");

    let base_router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(public::public_routes())
        .with_state(state);

    base_router
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(trace_span_logger)
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .latency_unit(tower_http::LatencyUnit::Millis),
                        ),
                )
                .layer(PropagateRequestIdLayer::new(x_request_id)),
        )
        .layer(cors)
}

/// trace_span_logger
///
/// Builds the per-request span so every log line of a login attempt carries the same
/// request id.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %request_id,
    )
}
