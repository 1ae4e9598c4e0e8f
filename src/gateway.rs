use std::{sync::Arc, time::Duration};

use crate::{
    error::AuthError,
    models::{AuthenticatedIdentity, Role, VerifiedUser},
    repository::UserServiceState,
    validation::{self, ValidationOutcome},
};

/// AuthenticationGateway
///
/// Turns raw login input into an `AuthenticatedIdentity` by way of the external
/// `UserService`. Stateless between calls: no session cache, no attempt counting.
#[derive(Clone)]
pub struct AuthenticationGateway {
    users: UserServiceState,
    verify_timeout: Duration,
}

impl AuthenticationGateway {
    pub fn new(users: UserServiceState, verify_timeout: Duration) -> Self {
        Self {
            users,
            verify_timeout,
        }
    }

    /// login
    ///
    /// 1. Syntactic validation. Failures return before the user service is contacted.
    /// 2. Exactly one `verify` call with no role pre-selected, so one form serves every
    ///    user class.
    /// 3. No match maps to `InvalidCredentials`; a fault, panic or timeout maps to
    ///    `ServiceFailure`.
    /// 4. The returned role must be inside the closed set, otherwise `UnknownRole`.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<AuthenticatedIdentity, AuthError> {
        if let ValidationOutcome::Invalid(reason) = validation::validate(username, password) {
            return Err(AuthError::ValidationFailed(reason));
        }

        let user = self
            .verify(username, password)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let role = Role::from_name(&user.role).ok_or(AuthError::UnknownRole(user.role))?;

        Ok(AuthenticatedIdentity {
            user_id: user.user_id,
            display_name: user.display_name,
            role,
        })
    }

    /// Runs the verification on its own task so a panicking collaborator is contained,
    /// and bounds it with the configured timeout.
    async fn verify(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<VerifiedUser>, AuthError> {
        let users = Arc::clone(&self.users);
        let username = username.to_string();
        let password = password.to_string();

        let mut task =
            tokio::spawn(async move { users.verify(&username, &password, None).await });

        match tokio::time::timeout(self.verify_timeout, &mut task).await {
            Ok(Ok(Ok(found))) => Ok(found),
            Ok(Ok(Err(fault))) => Err(AuthError::ServiceFailure(fault.to_string())),
            Ok(Err(join_err)) if join_err.is_panic() => Err(AuthError::ServiceFailure(
                "user service panicked during verification".to_string(),
            )),
            Ok(Err(_)) => Err(AuthError::ServiceFailure(
                "verification task was cancelled".to_string(),
            )),
            Err(_) => {
                task.abort();
                Err(AuthError::ServiceFailure(format!(
                    "verification timed out after {}ms",
                    self.verify_timeout.as_millis()
                )))
            }
        }
    }
}
