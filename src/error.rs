use thiserror::Error;

use crate::models::{DestinationId, Role};

/// AuthError
///
/// Every way a login attempt can end without an identity. The flow always returns one of
/// these or a success value; collaborator faults are folded in, never re-raised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Input failed the syntactic check. The reason is safe to show to the user.
    #[error("{0}")]
    ValidationFailed(String),

    /// No account matched. Deliberately silent about which field was wrong.
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// The user service failed, panicked or timed out.
    #[error("user service failure: {0}")]
    ServiceFailure(String),

    /// The user service returned a role outside the closed set.
    #[error("user service returned unknown role '{0}'")]
    UnknownRole(String),
}

/// RoutingError
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoutingError {
    #[error("no destination for unknown role '{0}'")]
    UnknownRole(String),

    /// Raised while building a destination table that does not cover every role.
    #[error("destination table has no entry for role {0}")]
    MissingDestination(Role),
}

/// DispatchError
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error("no view registered for destination '{0}'")]
    UnregisteredDestination(DestinationId),
}

/// ServiceError
///
/// Opaque fault reported by a `UserService` implementation (database down, bad row, ...).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ServiceError(pub String);

impl From<sqlx::Error> for ServiceError {
    fn from(err: sqlx::Error) -> Self {
        ServiceError(err.to_string())
    }
}

