use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;
use utoipa::ToSchema;

// --- Core Identity Types ---

/// Role
///
/// The closed set of user classes recognised by the portal. Every authenticated user
/// lands on exactly one dashboard, selected by this value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub enum Role {
    Student,
    Lecturer,
    Admin,
}

impl Role {
    /// All roles, in dashboard table order.
    pub const ALL: [Role; 3] = [Role::Student, Role::Lecturer, Role::Admin];

    /// from_name
    ///
    /// Parses a role name as stored by the user service. Matching ignores case and
    /// surrounding whitespace, so `"lecturer"` and `" Lecturer "` both resolve.
    /// Anything outside the closed set yields `None`.
    pub fn from_name(name: &str) -> Option<Role> {
        let name = name.trim();
        Role::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(name))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "Student",
            Role::Lecturer => "Lecturer",
            Role::Admin => "Admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Credentials
///
/// A single login attempt's input. Created per request and dropped once the attempt
/// resolves; it is never persisted.
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

// Password stays out of logs and panic messages.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// VerifiedUser
///
/// The record a `UserService` returns when credentials match. The role is kept as raw
/// text: the collaborator is not trusted to stay inside the closed role set.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct VerifiedUser {
    pub user_id: i64,
    pub display_name: String,
    pub role: String,
}

/// AuthenticatedIdentity
///
/// The resolved identity handed to the caller after a successful login. The caller owns
/// it for the rest of the session; nothing here keeps a copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedIdentity {
    pub user_id: i64,
    pub display_name: String,
    pub role: Role,
}

/// DestinationId
///
/// Opaque identifier of the screen or resource to activate after login.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DestinationId(String);

impl DestinationId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DestinationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// LoginOutcome
///
/// Everything the UI layer needs to finish a login: who signed in and where to send them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOutcome {
    pub identity: AuthenticatedIdentity,
    pub destination: DestinationId,
}

// --- Request Payloads (Input Schemas) ---

/// LoginRequest
///
/// Input payload for the login endpoint (POST /login). A single form serves every role,
/// so no role is submitted.
#[derive(Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct LoginRequest {
    #[schema(example = "jkamau")]
    pub username: String,
    #[schema(example = "secret123")]
    pub password: String,
}

impl From<LoginRequest> for Credentials {
    fn from(req: LoginRequest) -> Self {
        Credentials::new(req.username, req.password)
    }
}

/// InferRoleRequest
///
/// Input payload for the role classification helper (POST /roles/infer).
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct InferRoleRequest {
    #[schema(example = "jane@student.ku.ac.ke")]
    pub email: String,
}

// --- Response Payloads (Output Schemas) ---

/// LoginResponse
///
/// Output of a successful login: the identity plus the dashboard the client should open.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct LoginResponse {
    pub user_id: i64,
    pub display_name: String,
    pub role: Role,
    #[schema(example = "lecturer-dashboard")]
    pub destination: String,
}

impl From<LoginOutcome> for LoginResponse {
    fn from(outcome: LoginOutcome) -> Self {
        Self {
            user_id: outcome.identity.user_id,
            display_name: outcome.identity.display_name,
            role: outcome.identity.role,
            destination: outcome.destination.as_str().to_string(),
        }
    }
}

/// InferRoleResponse
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct InferRoleResponse {
    pub role: Role,
}

/// ErrorResponse
///
/// Body returned with every non-2xx status from the login endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct ErrorResponse {
    pub error: String,
}
