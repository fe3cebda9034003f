//! Database credentials held in AWS Secrets Manager.

use aws_sdk_secretsmanager::Client as SecretsClient;
use serde::Deserialize;
use sqlx::postgres::PgConnectOptions;
use std::collections::HashMap;
use std::sync::OnceLock;
use tokio::sync::RwLock;

use crate::{Error, Result};

/// Raw secret strings keyed by ARN; warm invocations skip the network call.
static SECRET_STRINGS: OnceLock<RwLock<HashMap<String, String>>> = OnceLock::new();

/// Database credentials as stored in the secret JSON.
#[derive(Deserialize)]
pub struct DatabaseCredentials {
    pub username: String,
    pub password: String,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub dbname: Option<String>,
}

impl DatabaseCredentials {
    /// Connection options, preferring host/port/name stored in the secret.
    ///
    /// Built field by field so credentials never pass through a URL.
    pub fn connect_options(&self, host: &str, port: u16, name: &str) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(self.host.as_deref().unwrap_or(host))
            .port(self.port.unwrap_or(port))
            .username(&self.username)
            .password(&self.password)
            .database(self.dbname.as_deref().unwrap_or(name))
    }
}

/// Fetch a secret string, reusing the cached copy when present.
pub async fn get_secret(client: &SecretsClient, secret_arn: &str) -> Result<String> {
    let cache = SECRET_STRINGS.get_or_init(|| RwLock::new(HashMap::new()));

    if let Some(cached) = cache.read().await.get(secret_arn) {
        return Ok(cached.clone());
    }

    let secret = client
        .get_secret_value()
        .secret_id(secret_arn)
        .send()
        .await
        .map_err(|e| Error::Aws(format!("Failed to get secret {}: {}", secret_arn, e)))?
        .secret_string()
        .map(str::to_string)
        .ok_or_else(|| Error::Aws(format!("Secret {} has no string value", secret_arn)))?;

    cache
        .write()
        .await
        .insert(secret_arn.to_string(), secret.clone());

    Ok(secret)
}

/// Parse the credentials JSON stored in a secret.
pub fn parse_database_credentials(secret: &str) -> Result<DatabaseCredentials> {
    serde_json::from_str(secret)
        .map_err(|e| Error::Aws(format!("Failed to parse database credentials: {}", e)))
}

/// Fetch the database secret and turn it into connection options.
pub async fn database_connect_options(
    client: &SecretsClient,
    secret_arn: &str,
    host: &str,
    port: u16,
    name: &str,
) -> Result<PgConnectOptions> {
    let secret = get_secret(client, secret_arn).await?;
    let creds = parse_database_credentials(&secret)?;
    Ok(creds.connect_options(host, port, name))
}
