//! Process configuration
//!
//! Read once at startup from the environment (after `.env` is loaded) and
//! handed to each crate explicitly.

use std::env;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use sqlx::postgres::PgConnectOptions;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000";

/// Where the database lives
#[derive(Clone)]
pub enum DatabaseTarget {
    /// Full DSN from `DATABASE_URL`
    Url(String),
    /// Cloud SQL unix socket under `/cloudsql/<instance>`
    CloudSql {
        user: String,
        password: String,
        database: String,
        instance: String,
    },
}

impl DatabaseTarget {
    pub fn connect_options(&self) -> Result<PgConnectOptions> {
        match self {
            DatabaseTarget::Url(url) => url.parse().context("DATABASE_URL is not a valid DSN"),
            DatabaseTarget::CloudSql {
                user,
                password,
                database,
                instance,
            } => Ok(PgConnectOptions::new()
                .socket(format!("/cloudsql/{instance}"))
                .username(user)
                .password(password)
                .database(database)),
        }
    }
}

impl std::fmt::Debug for DatabaseTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatabaseTarget::Url(_) => f.write_str("Url([REDACTED])"),
            DatabaseTarget::CloudSql {
                database, instance, ..
            } => f
                .debug_struct("CloudSql")
                .field("database", database)
                .field("instance", instance)
                .finish(),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub database: DatabaseTarget,
    /// Token signing key
    pub jwt_key: String,
    pub predict_api_url: String,
    pub port: u16,
    pub frontend_origins: Vec<String>,
    pub run_migrations: bool,
    /// Global per-request deadline
    pub request_timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| get(key).filter(|v| !v.trim().is_empty());
        let required = |key: &str| var(key).with_context(|| format!("{key} must be set"));

        let database = match var("DATABASE_URL") {
            Some(url) => DatabaseTarget::Url(url),
            None => DatabaseTarget::CloudSql {
                user: required("DB_USER")?,
                password: required("DB_PASSWORD")?,
                database: required("DB_NAME")?,
                instance: required("INSTANCE_CONNECTION_NAME")?,
            },
        };

        let port = match var("PORT") {
            Some(raw) => raw.trim().parse().context("PORT must be a port number")?,
            None => DEFAULT_PORT,
        };

        let frontend_origins = var("FRONTEND_ORIGINS")
            .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        let run_migrations = match var("RUN_MIGRATIONS").as_deref().map(str::trim) {
            None => true,
            Some("1" | "true" | "TRUE" | "yes") => true,
            Some("0" | "false" | "FALSE" | "no") => false,
            Some(other) => bail!("RUN_MIGRATIONS must be true or false, got {other:?}"),
        };

        let request_timeout = match var("REQUEST_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(
                raw.trim()
                    .parse()
                    .context("REQUEST_TIMEOUT_SECS must be a number of seconds")?,
            ),
            None => DEFAULT_REQUEST_TIMEOUT,
        };

        Ok(Self {
            database,
            jwt_key: required("JWT_KEY")?,
            predict_api_url: required("PREDICT_API_URL")?,
            port,
            frontend_origins,
            run_migrations,
            request_timeout,
        })
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("database", &self.database)
            .field("jwt_key", &"[REDACTED]")
            .field("predict_api_url", &self.predict_api_url)
            .field("port", &self.port)
            .field("frontend_origins", &self.frontend_origins)
            .field("run_migrations", &self.run_migrations)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}
