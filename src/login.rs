use crate::{
    error::AuthError,
    gateway::AuthenticationGateway,
    models::LoginOutcome,
    router::RoleRouter,
};

/// LoginFlow
///
/// The single entry point a UI layer or HTTP handler calls. Composes authentication and
/// routing, and returns who signed in plus where they should land. Navigation itself is
/// left to the caller (see `dispatch::ViewDispatcher`).
#[derive(Clone)]
pub struct LoginFlow {
    gateway: AuthenticationGateway,
    router: RoleRouter,
}

impl LoginFlow {
    pub fn new(gateway: AuthenticationGateway, router: RoleRouter) -> Self {
        Self { gateway, router }
    }

    /// login
    ///
    /// Every attempt ends in exactly one log line at a level matching its severity.
    /// The password is never logged.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginOutcome, AuthError> {
        match self.gateway.login(username, password).await {
            Ok(identity) => {
                let destination = self.router.destination_for(identity.role).clone();
                tracing::info!(
                    user_id = identity.user_id,
                    role = %identity.role,
                    destination = %destination,
                    "login succeeded"
                );
                Ok(LoginOutcome {
                    identity,
                    destination,
                })
            }
            Err(err) => {
                match &err {
                    AuthError::ValidationFailed(reason) => {
                        tracing::debug!(username, reason = %reason, "login input rejected")
                    }
                    AuthError::InvalidCredentials => {
                        tracing::warn!(username, "login denied: invalid credentials")
                    }
                    AuthError::ServiceFailure(message) => {
                        tracing::warn!(username, error = %message, "login failed: user service fault")
                    }
                    AuthError::UnknownRole(role) => tracing::error!(
                        username,
                        role = %role,
                        "user service returned a role with no dashboard"
                    ),
                }
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::{DestinationId, Role},
        repository::{MockAccount, MockUserService},
        router::RoleDestinationMap,
    };
    use std::{sync::Arc, time::Duration};

    fn flow(service: MockUserService, router: RoleRouter) -> LoginFlow {
        let gateway = AuthenticationGateway::new(Arc::new(service), Duration::from_secs(2));
        LoginFlow::new(gateway, router)
    }

    #[tokio::test]
    async fn lecturer_lands_on_lecturer_destination() {
        let router = RoleRouter::default();
        let expected = router.destination_for(Role::Lecturer).clone();
        let flow = flow(
            MockUserService::new().with_account(MockAccount::new(
                1, "validuser", "validpass", "Dr. Wanjiru", "Lecturer",
            )),
            router,
        );

        let outcome = flow.login("validuser", "validpass").await.unwrap();

        assert_eq!(outcome.identity.user_id, 1);
        assert_eq!(outcome.identity.role, Role::Lecturer);
        assert_eq!(outcome.destination, expected);
    }

    #[tokio::test]
    async fn alternate_destination_table_is_honoured() {
        let table = RoleDestinationMap::new([
            (Role::Student, DestinationId::new("exam-hall")),
            (Role::Lecturer, DestinationId::new("report-browser")),
            (Role::Admin, DestinationId::new("control-room")),
        ])
        .unwrap();
        let flow = flow(
            MockUserService::with_demo_accounts(),
            RoleRouter::new(table),
        );

        let outcome = flow.login("admin", "admin123").await.unwrap();

        assert_eq!(outcome.destination.as_str(), "control-room");
    }

    #[tokio::test]
    async fn errors_pass_through_unchanged() {
        let flow = flow(MockUserService::with_demo_accounts(), RoleRouter::default());

        assert_eq!(
            flow.login("student", "not-the-password").await,
            Err(AuthError::InvalidCredentials)
        );
        assert!(matches!(
            flow.login("", "").await,
            Err(AuthError::ValidationFailed(_))
        ));
    }
}
