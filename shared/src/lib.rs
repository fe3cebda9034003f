//! Shared library for the schedule Lambda.
//!
//! Holds the request dispatcher, its route table, the datastore seam and the
//! HTTP/config/error plumbing the Lambda binary wires together.

pub mod config;
pub mod db;
pub mod dispatch;
pub mod error;
pub mod http;
pub mod models;
pub mod routes;
pub mod secrets;
pub mod store;

pub use config::{Config, DatabaseSource};
pub use dispatch::handle;
pub use error::{Error, Result};
pub use http::{ScheduleRequest, ScheduleResponse, CORS_HEADERS};
pub use models::{
    NewResponsiblePerson, NewScheduleEvent, ResponsiblePerson, ScheduleEvent, UpdateScheduleEvent,
};
pub use routes::Route;
pub use secrets::{database_connect_options, get_secret, DatabaseCredentials};
pub use sqlx::postgres::PgConnectOptions;
pub use store::{PgConnector, PgScheduleStore, ScheduleStore, StoreConnector};
