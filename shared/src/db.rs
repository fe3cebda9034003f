//! Database connection management.
//!
//! Every invocation opens its own connection; there is no pool.

use sqlx::postgres::{PgConnectOptions, PgConnection};
use sqlx::ConnectOptions;
use std::io;
use std::str::FromStr;
use std::time::Duration;

use crate::{Error, Result};

/// Parse a `postgres://` connection string.
pub fn parse_database_url(database_url: &str) -> Result<PgConnectOptions> {
    PgConnectOptions::from_str(database_url).map_err(Error::Database)
}

/// Open a single Postgres connection, giving up after `timeout`.
pub async fn connect(options: &PgConnectOptions, timeout: Duration) -> Result<PgConnection> {
    match tokio::time::timeout(timeout, options.connect()).await {
        Ok(conn) => conn.map_err(Error::Database),
        Err(_) => Err(Error::Database(sqlx::Error::Io(io::Error::new(
            io::ErrorKind::TimedOut,
            format!("connection not established within {:?}", timeout),
        )))),
    }
}
