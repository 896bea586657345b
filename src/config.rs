//! Service configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `DATABASE_URL` - `PostgreSQL` connection string (only for the `postgres` store)
//!
//! ## Optional
//! - `CONTACTS_STORE` - `postgres` or `memory` (default: postgres)
//! - `CONTACTS_HOST` - Bind address (default: 0.0.0.0)
//! - `CONTACTS_PORT` - Listen port (default: 8080)
//! - `CONTACTS_DB_MAX_CONNECTIONS` - Pool size (default: 4 per CPU core)
//! - `CONTACTS_RUN_MIGRATIONS` - Apply migrations on startup (default: false)

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;

use secrecy::SecretString;
use thiserror::Error;

const CONNECTIONS_PER_CORE: u32 = 4;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Which [`ContactStore`](crate::store::ContactStore) backend to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Postgres,
    Memory,
}

impl FromStr for StoreKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "memory" => Ok(Self::Memory),
            other => Err(format!("unknown store kind `{other}`")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ContactsConfig {
    /// `PostgreSQL` connection URL (contains password)
    pub database_url: Option<SecretString>,
    pub store: StoreKind,
    pub host: IpAddr,
    pub port: u16,
    pub max_connections: u32,
    pub run_migrations: bool,
}

impl ContactsConfig {
    /// Load configuration from the process environment.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a required variable is missing or a value
    /// does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Same as [`ContactsConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let store: StoreKind = parse_or_default(&lookup, "CONTACTS_STORE", StoreKind::Postgres)?;
        let database_url = lookup("DATABASE_URL").map(SecretString::from);
        if store == StoreKind::Postgres && database_url.is_none() {
            return Err(ConfigError::MissingEnvVar("DATABASE_URL".to_string()));
        }

        let default_connections =
            u32::try_from(num_cpus::get()).unwrap_or(1).saturating_mul(CONNECTIONS_PER_CORE);

        Ok(Self {
            database_url,
            store,
            host: parse_or_default(&lookup, "CONTACTS_HOST", IpAddr::V4(Ipv4Addr::UNSPECIFIED))?,
            port: parse_or_default(&lookup, "CONTACTS_PORT", 8080)?,
            max_connections: parse_or_default(
                &lookup,
                "CONTACTS_DB_MAX_CONNECTIONS",
                default_connections,
            )?,
            run_migrations: parse_or_default(&lookup, "CONTACTS_RUN_MIGRATIONS", false)?,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_or_default<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
        None => Ok(default),
    }
}
