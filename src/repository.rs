use crate::{
    error::ServiceError,
    models::{Role, VerifiedUser},
};
use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::{Arc, Mutex};

/// UserService Trait
///
/// The outbound contract for credential verification. The login flow only depends on this
/// trait, so the Postgres adapter can be swapped for the in-memory mock in local runs and
/// tests.
///
/// `Ok(None)` means "no matching account"; `Err` is reserved for faults in the service
/// itself (connection lost, malformed row, ...).
#[async_trait]
pub trait UserService: Send + Sync {
    /// Verifies a username/password pair. When `role` is `None` an account of any role
    /// may match.
    async fn verify(
        &self,
        username: &str,
        password: &str,
        role: Option<Role>,
    ) -> Result<Option<VerifiedUser>, ServiceError>;
}

/// UserServiceState
///
/// The concrete type used to share the user service across the application state.
pub type UserServiceState = Arc<dyn UserService>;

/// PostgresUserService
///
/// `UserService` backed by the `users` table. Passwords are stored as pgcrypto
/// `crypt()` hashes and compared inside the database, so plaintext never leaves the query.
pub struct PostgresUserService {
    pool: PgPool,
}

impl PostgresUserService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserService for PostgresUserService {
    /// verify
    ///
    /// Usernames are expected to be unique across roles. `LIMIT 2` lets us notice when that
    /// assumption breaks without scanning further; the first row still wins.
    async fn verify(
        &self,
        username: &str,
        password: &str,
        role: Option<Role>,
    ) -> Result<Option<VerifiedUser>, ServiceError> {
        let rows = sqlx::query_as::<_, VerifiedUser>(
            r#"
            SELECT id AS user_id, display_name, role
            FROM users
            WHERE username = $1
              AND password_hash = crypt($2, password_hash)
              AND ($3::text IS NULL OR lower(role) = lower($3))
            ORDER BY id
            LIMIT 2
            "#,
        )
        .bind(username)
        .bind(password)
        .bind(role.map(|r| r.as_str()))
        .fetch_all(&self.pool)
        .await?;

        if rows.len() > 1 {
            tracing::warn!(
                username,
                "username matches accounts under more than one role; using the first"
            );
        }

        Ok(rows.into_iter().next())
    }
}

/// MockAccount
///
/// A single seeded account for `MockUserService`. The role is raw text so tests can
/// simulate a collaborator that returns roles outside the closed set.
#[derive(Debug, Clone)]
pub struct MockAccount {
    pub username: String,
    pub password: String,
    pub user: VerifiedUser,
}

impl MockAccount {
    pub fn new(user_id: i64, username: &str, password: &str, display_name: &str, role: &str) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
            user: VerifiedUser {
                user_id,
                display_name: display_name.to_string(),
                role: role.to_string(),
            },
        }
    }
}

/// MockUserService
///
/// In-memory `UserService` used for local development without a database and for tests.
/// Every `verify` call is recorded so tests can assert how the service was contacted.
#[derive(Default)]
pub struct MockUserService {
    accounts: Vec<MockAccount>,
    /// When true, every call returns a simulated fault.
    pub should_fail: bool,
    calls: Mutex<Vec<(String, Option<Role>)>>,
}

impl MockUserService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn new_failing() -> Self {
        Self {
            should_fail: true,
            ..Self::default()
        }
    }

    pub fn with_account(mut self, account: MockAccount) -> Self {
        self.accounts.push(account);
        self
    }

    /// One account per role, used by `main` when no database is configured.
    pub fn with_demo_accounts() -> Self {
        Self::new()
            .with_account(MockAccount::new(1, "student", "student123", "Demo Student", "Student"))
            .with_account(MockAccount::new(2, "lecturer", "lecturer123", "Demo Lecturer", "Lecturer"))
            .with_account(MockAccount::new(3, "admin", "admin123", "Demo Admin", "Admin"))
    }

    /// The `(username, role)` pairs passed to `verify`, oldest first.
    pub fn calls(&self) -> Vec<(String, Option<Role>)> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl UserService for MockUserService {
    async fn verify(
        &self,
        username: &str,
        password: &str,
        role: Option<Role>,
    ) -> Result<Option<VerifiedUser>, ServiceError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((username.to_string(), role));
        }

        if self.should_fail {
            return Err(ServiceError("Mock User Service Error: Simulation requested".to_string()));
        }

        Ok(self
            .accounts
            .iter()
            .find(|a| {
                a.username == username
                    && a.password == password
                    && role.is_none_or(|r| Role::from_name(&a.user.role) == Some(r))
            })
            .map(|a| a.user.clone()))
    }
}
