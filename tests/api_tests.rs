use kucat_portal::{
    AppConfig, AppState, MockUserService, create_router, models::LoginResponse,
};
use std::sync::Arc;
use tokio::net::TcpListener;

#[derive(Debug)]
pub struct TestApp {
    pub address: String,
}

async fn spawn_app() -> TestApp {
    let users = Arc::new(MockUserService::with_demo_accounts());
    let state = AppState::new(AppConfig::default(), users);
    let router = create_router(state);

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    TestApp { address }
}

#[tokio::test]
async fn test_health_check() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();
    let response = client
        .get(format!("{}/health", app.address))
        .send()
        .await
        .expect("req fail");
    assert!(response.status().is_success());
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn test_login_lifecycle() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    // Wrong password
    let denied = client
        .post(format!("{}/login", app.address))
        .json(&serde_json::json!({ "username": "student", "password": "guessing" }))
        .send()
        .await
        .unwrap();
    assert_eq!(denied.status(), 401);

    // Right password
    let response = client
        .post(format!("{}/login", app.address))
        .json(&serde_json::json!({ "username": "student", "password": "student123" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let body: LoginResponse = response.json().await.unwrap();
    assert_eq!(body.user_id, 1);
    assert_eq!(body.destination, "student-dashboard");
}

#[tokio::test]
async fn test_openapi_document_lists_login() {
    let app = spawn_app().await;
    let doc: serde_json::Value = reqwest::get(format!("{}/api-docs/openapi.json", app.address))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert!(doc["paths"]["/login"]["post"].is_object());
    assert!(doc["paths"]["/roles/infer"]["post"].is_object());
}
