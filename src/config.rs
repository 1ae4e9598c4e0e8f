use std::{env, time::Duration};

use crate::{
    models::{DestinationId, Role},
    router::RoleDestinationMap,
};

/// Fallback for `VERIFY_TIMEOUT_MS` when it is unset or not a number.
pub const DEFAULT_VERIFY_TIMEOUT_MS: u64 = 5_000;

/// AppConfig
///
/// Holds the service's entire configuration. Loaded once at startup and shared, unchanged,
/// through `AppState` via `FromRef`.
#[derive(Clone, Debug)]
pub struct AppConfig {
    // Postgres connection string. `None` locally means "use the seeded mock user service".
    pub db_url: Option<String>,
    // Socket address the HTTP server binds to.
    pub bind_addr: String,
    // Upper bound on a single credential verification call.
    pub verify_timeout: Duration,
    // Role -> dashboard table handed to the router.
    pub destinations: RoleDestinationMap,
    // Runtime environment marker. Controls log format and fail-fast checks.
    pub env: Env,
}

/// Env
///
/// Runtime context: developer machine or deployed service.
#[derive(Clone, PartialEq, Debug)]
pub enum Env {
    Local,
    Production,
}

impl Default for AppConfig {
    /// Safe values for tests; no environment variables are read.
    fn default() -> Self {
        Self {
            db_url: None,
            bind_addr: "127.0.0.1:3000".to_string(),
            verify_timeout: Duration::from_millis(DEFAULT_VERIFY_TIMEOUT_MS),
            destinations: RoleDestinationMap::default(),
            env: Env::Local,
        }
    }
}

impl AppConfig {
    /// load
    ///
    /// Reads the configuration from environment variables (after `.env` has been applied).
    ///
    /// # Panics
    /// Panics in production when `DATABASE_URL` is missing, so the service never starts
    /// against the in-memory user store by accident.
    pub fn load() -> Self {
        let env = match env::var("APP_ENV").as_deref() {
            Ok("production") => Env::Production,
            _ => Env::Local,
        };

        let db_url = match env {
            Env::Production => Some(
                env::var("DATABASE_URL").expect("FATAL: DATABASE_URL required in production"),
            ),
            Env::Local => env::var("DATABASE_URL").ok(),
        };

        let verify_timeout = env::var("VERIFY_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.trim().parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or(Duration::from_millis(DEFAULT_VERIFY_TIMEOUT_MS));

        Self {
            db_url,
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
            verify_timeout,
            destinations: destinations_from_env(),
            env,
        }
    }
}

/// destinations_from_env
///
/// Starts from the default dashboard table and applies any `<ROLE>_DESTINATION` overrides.
fn destinations_from_env() -> RoleDestinationMap {
    let defaults = RoleDestinationMap::default();
    let pairs = Role::ALL.map(|role| {
        let var = format!("{}_DESTINATION", role.as_str().to_uppercase());
        let destination = env::var(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(DestinationId::new)
            .unwrap_or_else(|| defaults.get(role).clone());
        (role, destination)
    });

    // Every role is present in `pairs`, so this cannot fail; keep the defaults if it does.
    RoleDestinationMap::new(pairs).unwrap_or(defaults)
}
