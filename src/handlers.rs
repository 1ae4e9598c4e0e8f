use crate::{
    error::AuthError,
    inference,
    login::LoginFlow,
    models::{
        Credentials, ErrorResponse, InferRoleRequest, InferRoleResponse, LoginRequest,
        LoginResponse,
    },
};
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

// --- Error Mapping ---

/// Maps each login failure to a status code and a client-safe message.
/// Service faults and role violations are logged by `LoginFlow`; their internal detail is
/// not echoed to the client.
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AuthError::ValidationFailed(reason) => (StatusCode::BAD_REQUEST, reason.clone()),
            AuthError::InvalidCredentials => (StatusCode::UNAUTHORIZED, self.to_string()),
            AuthError::ServiceFailure(_) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "Login is temporarily unavailable, please try again".to_string(),
            ),
            AuthError::UnknownRole(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Your account is not configured correctly, contact an administrator".to_string(),
            ),
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

// --- Handlers ---

/// login
///
/// [Public Route] Authenticates a student, lecturer or admin through the single login form
/// and returns the dashboard the client should open.
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Authenticated", body = LoginResponse),
        (status = 400, description = "Malformed input", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 500, description = "Account role not recognised", body = ErrorResponse),
        (status = 503, description = "User service unavailable", body = ErrorResponse)
    )
)]
pub async fn login(
    State(flow): State<LoginFlow>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AuthError> {
    let Credentials { username, password } = payload.into();
    let outcome = flow.login(&username, &password).await?;
    Ok(Json(outcome.into()))
}

/// infer_role
///
/// [Public Route] Suggests a role for an email address. Used by registration screens as a
/// pre-fill; it grants nothing.
#[utoipa::path(
    post,
    path = "/roles/infer",
    request_body = InferRoleRequest,
    responses((status = 200, description = "Inferred role", body = InferRoleResponse))
)]
pub async fn infer_role(Json(payload): Json<InferRoleRequest>) -> Json<InferRoleResponse> {
    Json(InferRoleResponse {
        role: inference::infer_role(&payload.email),
    })
}
