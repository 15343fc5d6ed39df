//! Runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into
//! services. The intent is to avoid reading process-wide environment
//! variables during request handling, which can lead to inconsistent
//! behaviour in multi-threaded runtimes and test harnesses.
//!
//! Validation is not fail-fast: every missing or invalid value is collected
//! and reported in one aggregated error, so operators see the full
//! deficiency in a single read. On any failure the process must not start.

use std::collections::HashMap;

use chrono::Duration;
use nivaran_types::Secret;

/// Default cache connection string when `REDIS_URL` is unset.
pub const DEFAULT_REDIS_URL: &str = "redis://localhost:6379";
/// Default listen port when `PORT` is unset or not an integer.
pub const DEFAULT_PORT: u16 = 4000;
/// Operational default for the SLA approaching window, in hours.
pub const DEFAULT_SLA_APPROACHING_WINDOW_HOURS: i64 = 12;

/// Errors raised while validating the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// One or more environment values were missing or invalid.
    #[error("invalid environment configuration:\n{}", .0.join("\n"))]
    Invalid(Vec<String>),
}

/// Deployment environment, from `NODE_ENV`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
    Test,
}

/// Error returned when `NODE_ENV` names no known environment.
#[derive(Debug, thiserror::Error)]
#[error("unknown environment: {0}")]
pub struct ParseEnvironmentError(pub String);

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
            Environment::Test => "test",
        }
    }

    /// Whether error responses must be redacted for external callers.
    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Environment {
    type Err = ParseEnvironmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "development" => Ok(Environment::Development),
            "production" => Ok(Environment::Production),
            "test" => Ok(Environment::Test),
            other => Err(ParseEnvironmentError(other.to_string())),
        }
    }
}

/// Application configuration resolved at startup.
///
/// Immutable for the lifetime of the process; there is no hot-reload.
#[derive(Clone, Debug)]
pub struct AppConfig {
    database_url: Secret,
    jwt_access_secret: Secret,
    jwt_refresh_secret: Secret,
    redis_url: String,
    environment: Environment,
    port: u16,
    sentry_dsn: Option<String>,
    sla_approaching_window_hours: i64,
}

impl AppConfig {
    /// Validate a snapshot of environment values into a configuration.
    ///
    /// Required keys: `DATABASE_URL`, `JWT_ACCESS_SECRET`,
    /// `JWT_REFRESH_SECRET`. `NODE_ENV` must be one of
    /// `development|production|test` when present. `PORT` and
    /// `SLA_APPROACHING_WINDOW_HOURS` fall back to their defaults when unset
    /// or not parseable as integers.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] listing every failure found; the
    /// config is never partially constructed.
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let mut failures = Vec::new();

        let database_url = require_secret(vars, "DATABASE_URL", &mut failures);
        let jwt_access_secret = require_secret(vars, "JWT_ACCESS_SECRET", &mut failures);
        let jwt_refresh_secret = require_secret(vars, "JWT_REFRESH_SECRET", &mut failures);

        let environment = match vars.get("NODE_ENV") {
            None => Some(Environment::Development),
            Some(raw) => match raw.parse::<Environment>() {
                Ok(environment) => Some(environment),
                Err(_) => {
                    failures.push(format!(
                        "NODE_ENV must be one of development, production, test (got \"{raw}\")"
                    ));
                    None
                }
            },
        };

        let redis_url = vars
            .get("REDIS_URL")
            .cloned()
            .unwrap_or_else(|| DEFAULT_REDIS_URL.to_string());
        let port = vars
            .get("PORT")
            .and_then(|raw| raw.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);
        let sentry_dsn = vars
            .get("SENTRY_DSN")
            .filter(|value| !value.trim().is_empty())
            .cloned();
        let sla_approaching_window_hours = vars
            .get("SLA_APPROACHING_WINDOW_HOURS")
            .and_then(|raw| raw.parse::<i64>().ok())
            .unwrap_or(DEFAULT_SLA_APPROACHING_WINDOW_HOURS);

        // A missing value always records a failure above, so the wildcard
        // arm can only fire alongside a non-empty failure list.
        match (
            database_url,
            jwt_access_secret,
            jwt_refresh_secret,
            environment,
        ) {
            (
                Some(database_url),
                Some(jwt_access_secret),
                Some(jwt_refresh_secret),
                Some(environment),
            ) => Ok(Self {
                database_url,
                jwt_access_secret,
                jwt_refresh_secret,
                redis_url,
                environment,
                port,
                sentry_dsn,
                sla_approaching_window_hours,
            }),
            _ => Err(ConfigError::Invalid(failures)),
        }
    }

    /// Snapshot the process environment and validate it.
    ///
    /// Intended to be called exactly once, before request handling begins.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] listing every failure found.
    pub fn from_env() -> Result<Self, ConfigError> {
        let vars: HashMap<String, String> = std::env::vars().collect();
        Self::from_vars(&vars)
    }

    pub fn database_url(&self) -> &Secret {
        &self.database_url
    }

    pub fn jwt_access_secret(&self) -> &Secret {
        &self.jwt_access_secret
    }

    pub fn jwt_refresh_secret(&self) -> &Secret {
        &self.jwt_refresh_secret
    }

    pub fn redis_url(&self) -> &str {
        &self.redis_url
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn sentry_dsn(&self) -> Option<&str> {
        self.sentry_dsn.as_deref()
    }

    /// Escalation policy: how close to a deadline a resource may get before
    /// it is flagged as approaching.
    pub fn sla_approaching_window(&self) -> Duration {
        Duration::hours(self.sla_approaching_window_hours)
    }
}

fn require_secret(
    vars: &HashMap<String, String>,
    key: &str,
    failures: &mut Vec<String>,
) -> Option<Secret> {
    match vars.get(key) {
        None => {
            failures.push(format!("{key} is required"));
            None
        }
        Some(raw) => match Secret::new(raw) {
            Ok(secret) => Some(secret),
            Err(_) => {
                failures.push(format!("{key} must not be empty"));
                None
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_vars() -> HashMap<String, String> {
        HashMap::from([
            (
                "DATABASE_URL".to_string(),
                "postgres://localhost/nivaran".to_string(),
            ),
            ("JWT_ACCESS_SECRET".to_string(), "access".to_string()),
            ("JWT_REFRESH_SECRET".to_string(), "refresh".to_string()),
        ])
    }

    #[test]
    fn minimal_vars_resolve_with_defaults() {
        let config = AppConfig::from_vars(&minimal_vars()).expect("minimal vars should validate");
        assert_eq!(config.environment(), Environment::Development);
        assert_eq!(config.redis_url(), "redis://localhost:6379");
        assert_eq!(config.port(), 4000);
        assert_eq!(config.sentry_dsn(), None);
        assert_eq!(config.sla_approaching_window(), Duration::hours(12));
    }

    #[test]
    fn missing_database_url_is_reported_by_name() {
        let mut vars = minimal_vars();
        vars.remove("DATABASE_URL");

        let err = AppConfig::from_vars(&vars).expect_err("should fail validation");
        assert!(err.to_string().contains("DATABASE_URL"));
    }

    #[test]
    fn all_missing_required_keys_are_reported_together() {
        let err = AppConfig::from_vars(&HashMap::new()).expect_err("should fail validation");
        let message = err.to_string();
        assert!(message.contains("DATABASE_URL"));
        assert!(message.contains("JWT_ACCESS_SECRET"));
        assert!(message.contains("JWT_REFRESH_SECRET"));
    }

    #[test]
    fn unknown_node_env_is_rejected_and_echoed() {
        let mut vars = minimal_vars();
        vars.insert("NODE_ENV".to_string(), "staging".to_string());

        let err = AppConfig::from_vars(&vars).expect_err("should fail validation");
        let message = err.to_string();
        assert!(message.contains("NODE_ENV"));
        assert!(message.contains("staging"));
    }

    #[test]
    fn node_env_values_are_recognised() {
        for (raw, expected) in [
            ("development", Environment::Development),
            ("production", Environment::Production),
            ("test", Environment::Test),
        ] {
            let mut vars = minimal_vars();
            vars.insert("NODE_ENV".to_string(), raw.to_string());
            let config = AppConfig::from_vars(&vars).expect("should validate");
            assert_eq!(config.environment(), expected);
        }
    }

    #[test]
    fn non_numeric_port_falls_back_to_the_default() {
        let mut vars = minimal_vars();
        vars.insert("PORT".to_string(), "not-a-port".to_string());

        let config = AppConfig::from_vars(&vars).expect("should validate");
        assert_eq!(config.port(), 4000);
    }

    #[test]
    fn numeric_port_is_used() {
        let mut vars = minimal_vars();
        vars.insert("PORT".to_string(), "8080".to_string());

        let config = AppConfig::from_vars(&vars).expect("should validate");
        assert_eq!(config.port(), 8080);
    }

    #[test]
    fn blank_secrets_are_rejected() {
        let mut vars = minimal_vars();
        vars.insert("JWT_ACCESS_SECRET".to_string(), "   ".to_string());

        let err = AppConfig::from_vars(&vars).expect_err("should fail validation");
        assert!(err.to_string().contains("JWT_ACCESS_SECRET"));
    }

    #[test]
    fn failures_are_newline_separated() {
        let err = AppConfig::from_vars(&HashMap::new()).expect_err("should fail validation");
        assert_eq!(err.to_string().lines().count(), 4);
    }

    #[test]
    fn blank_sentry_dsn_is_treated_as_absent() {
        let mut vars = minimal_vars();
        vars.insert("SENTRY_DSN".to_string(), " ".to_string());

        let config = AppConfig::from_vars(&vars).expect("should validate");
        assert_eq!(config.sentry_dsn(), None);
    }
}
