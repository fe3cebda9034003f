//! Schedule API Lambda - CRUD for schedule events and responsible persons.
//!
//! Endpoints (matched by path substring):
//! - OPTIONS * - CORS preflight
//! - GET .../events - List events
//! - GET .../persons - List persons
//! - POST .../events - Create an event
//! - PUT .../events - Update an event (id in body)
//! - DELETE .../events?id= - Delete an event
//! - POST .../persons - Create a person
//! - DELETE .../persons?id= - Delete a person

use lambda_http::{run, service_fn, Body, Error, Request, Response};
use shared::db::parse_database_url;
use shared::{
    database_connect_options, dispatch, Config, DatabaseSource, PgConnectOptions, PgConnector,
    ScheduleRequest,
};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Application state
struct AppState {
    connector: PgConnector,
}

impl AppState {
    async fn new() -> Result<Self, Error> {
        let config = Config::from_env()?;
        Self::from_config(config).await
    }

    async fn from_config(config: Config) -> Result<Self, Error> {
        let options = resolve_connect_options(&config.database).await?;
        Ok(Self {
            connector: PgConnector::new(options, config.connect_timeout),
        })
    }
}

/// Turn the configured source into connection options, fetching credentials if needed.
async fn resolve_connect_options(source: &DatabaseSource) -> Result<PgConnectOptions, Error> {
    match source {
        DatabaseSource::Url(url) => Ok(parse_database_url(url)?),
        DatabaseSource::Secret {
            arn,
            host,
            port,
            name,
        } => {
            let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
            let secrets_client = aws_sdk_secretsmanager::Client::new(&aws_config);

            let options = database_connect_options(&secrets_client, arn, host, *port, name).await?;
            info!(
                host = %options.get_host(),
                database = ?options.get_database(),
                "database credentials loaded from secret"
            );
            Ok(options)
        }
    }
}

async fn handler(state: Arc<AppState>, event: Request) -> Result<Response<Body>, Error> {
    let request = ScheduleRequest::from_lambda(&event);
    dispatch::handle(&state.connector, &request)
        .await
        .into_lambda()
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let state = Arc::new(AppState::new().await?);

    run(service_fn(move |event| {
        let state = state.clone();
        async move { handler(state, event).await }
    }))
    .await
}
