//! Configuration management for the schedule Lambda.

use std::env;
use std::time::Duration;

use crate::{Error, Result};

const DEFAULT_DB_NAME: &str = "schedule";
const DEFAULT_DB_PORT: u16 = 5432;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;

/// Where the Postgres connection string comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseSource {
    /// A complete connection string taken from `DATABASE_URL`
    Url(String),
    /// Credentials held in Secrets Manager, combined with host/port/name
    Secret {
        arn: String,
        host: String,
        port: u16,
        name: String,
    },
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// How to reach the database
    pub database: DatabaseSource,
    /// Upper bound on opening a connection
    pub connect_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable lookup.
    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let database = if let Some(url) = var("DATABASE_URL") {
            DatabaseSource::Url(url)
        } else if let Some(arn) = var("DB_SECRET_ARN") {
            let host = var("DB_HOST")
                .ok_or_else(|| Error::Config("DB_HOST not set".to_string()))?;
            let port = match var("DB_PORT") {
                Some(raw) => raw
                    .parse()
                    .map_err(|_| Error::Config(format!("DB_PORT is not a port number: {}", raw)))?,
                None => DEFAULT_DB_PORT,
            };
            DatabaseSource::Secret {
                arn,
                host,
                port,
                name: var("DB_NAME").unwrap_or_else(|| DEFAULT_DB_NAME.to_string()),
            }
        } else {
            return Err(Error::Config(
                "either DATABASE_URL or DB_SECRET_ARN must be set".to_string(),
            ));
        };

        let connect_timeout = match var("DB_CONNECT_TIMEOUT_SECS") {
            Some(raw) => raw.parse().map(Duration::from_secs).map_err(|_| {
                Error::Config(format!("DB_CONNECT_TIMEOUT_SECS is not a number: {}", raw))
            })?,
            None => Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
        };

        Ok(Self {
            database,
            connect_timeout,
        })
    }
}
