use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, Bytes},
    http::{Request, StatusCode, header},
};
use kucat_portal::{
    AppConfig, AppState, create_router,
    error::ServiceError,
    models::{ErrorResponse, InferRoleResponse, LoginResponse, Role, VerifiedUser},
    repository::{MockAccount, MockUserService, UserService},
    validation::{MSG_EMPTY_FIELDS, MSG_TOO_SHORT},
};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tower::ServiceExt;

// --- Test Harness ---

fn app_with(users: Arc<dyn UserService>) -> Router {
    create_router(AppState::new(AppConfig::default(), users))
}

fn default_app() -> Router {
    app_with(Arc::new(
        MockUserService::with_demo_accounts().with_account(MockAccount::new(
            99, "rootuser", "rootpass", "Root", "Superuser",
        )),
    ))
}

async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> (StatusCode, Bytes) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, bytes)
}

fn parse<T: DeserializeOwned>(bytes: &[u8]) -> T {
    serde_json::from_slice(bytes).unwrap()
}

async fn login(app: Router, username: &str, password: &str) -> (StatusCode, Bytes) {
    post_json(
        app,
        "/login",
        serde_json::json!({ "username": username, "password": password }),
    )
    .await
}

// --- Login Endpoint ---

#[tokio::test]
async fn test_login_success_returns_destination() {
    let (status, body) = login(default_app(), "lecturer", "lecturer123").await;

    assert_eq!(status, StatusCode::OK);
    let body: LoginResponse = parse(&body);
    assert_eq!(body.user_id, 2);
    assert_eq!(body.role, Role::Lecturer);
    assert_eq!(body.destination, "lecturer-dashboard");
}

#[tokio::test]
async fn test_login_blank_fields_is_bad_request() {
    let (status, body) = login(default_app(), "   ", "").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(parse::<ErrorResponse>(&body).error, MSG_EMPTY_FIELDS);
}

#[tokio::test]
async fn test_login_short_fields_is_bad_request() {
    let (status, body) = login(default_app(), "abc", "validpass").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(parse::<ErrorResponse>(&body).error, MSG_TOO_SHORT);
}

#[tokio::test]
async fn test_login_wrong_password_is_unauthorized() {
    let (status, body) = login(default_app(), "admin", "admin999").await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(parse::<ErrorResponse>(&body).error, "Invalid username or password");
}

#[tokio::test]
async fn test_login_service_failure_is_unavailable() {
    let app = app_with(Arc::new(MockUserService::new_failing()));
    let (status, body) = login(app, "validuser", "validpass").await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    // Internal fault text stays in the logs.
    assert!(!parse::<ErrorResponse>(&body).error.contains("Simulation"));
}

#[tokio::test]
async fn test_login_unknown_role_is_server_error() {
    let (status, _) = login(default_app(), "rootuser", "rootpass").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

/// A user service that records whether it was ever contacted.
#[derive(Default)]
struct TripwireUserService {
    tripped: std::sync::atomic::AtomicBool,
}

#[async_trait]
impl UserService for TripwireUserService {
    async fn verify(
        &self,
        _username: &str,
        _password: &str,
        _role: Option<Role>,
    ) -> Result<Option<VerifiedUser>, ServiceError> {
        self.tripped.store(true, std::sync::atomic::Ordering::SeqCst);
        Ok(None)
    }
}

#[tokio::test]
async fn test_login_invalid_input_skips_user_service() {
    let tripwire = Arc::new(TripwireUserService::default());
    let (status, _) = login(app_with(tripwire.clone()), "abc", "validpass").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(!tripwire.tripped.load(std::sync::atomic::Ordering::SeqCst));
}

// --- Role Inference Endpoint ---

#[tokio::test]
async fn test_infer_role_endpoint() {
    let (status, body) = post_json(
        default_app(),
        "/roles/infer",
        serde_json::json!({ "email": "bob@faculty.university.edu" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse::<InferRoleResponse>(&body).role, Role::Lecturer);
}
