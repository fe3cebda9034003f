//! Request dispatcher: route, run one statement, serialize the result.

use serde_json::json;
use tracing::{error, info, warn};

use crate::http::{ScheduleRequest, ScheduleResponse};
use crate::models::{NewResponsiblePerson, NewScheduleEvent, UpdateScheduleEvent};
use crate::routes::Route;
use crate::store::{ScheduleStore, StoreConnector};
use crate::{Error, Result};

/// Handle one request. Failures become `{"error": ...}` responses.
pub async fn handle<C: StoreConnector>(connector: &C, request: &ScheduleRequest) -> ScheduleResponse {
    let route = Route::resolve(&request.method, &request.path);
    info!(method = %request.method, path = %request.path, ?route, "schedule request");

    let outcome = match route {
        Some(Route::Preflight) => Ok(ScheduleResponse::preflight()),
        Some(route) => execute(connector, route, request).await,
        None => Err(Error::EndpointNotFound),
    };

    outcome.unwrap_or_else(|e| {
        if e.status_code() == 404 {
            warn!(method = %request.method, path = %request.path, "no route matched");
        } else {
            error!(error = %e, ?route, "schedule request failed");
        }
        ScheduleResponse::from_error(&e)
    })
}

/// Open a store, run the route and close the store on every exit path.
async fn execute<C: StoreConnector>(
    connector: &C,
    route: Route,
    request: &ScheduleRequest,
) -> Result<ScheduleResponse> {
    let mut store = connector.connect().await?;
    let outcome = run_route(&mut store, route, request).await;

    if let Err(e) = store.close().await {
        warn!(error = %e, "failed to close datastore connection");
    }

    outcome
}

async fn run_route<S: ScheduleStore>(
    store: &mut S,
    route: Route,
    request: &ScheduleRequest,
) -> Result<ScheduleResponse> {
    match route {
        Route::ListEvents => {
            let events = store.list_events().await?;
            ScheduleResponse::json(200, &json!({ "events": events }))
        }

        Route::ListPersons => {
            let persons = store.list_persons().await?;
            ScheduleResponse::json(200, &json!({ "persons": persons }))
        }

        Route::CreateEvent => {
            let event: NewScheduleEvent = serde_json::from_str(request.body_or_empty_object()?)?;
            let id = store.create_event(&event).await?;
            info!(id, "event created");
            ScheduleResponse::json(201, &json!({ "id": id, "message": "Event created" }))
        }

        Route::UpdateEvent => {
            let update: UpdateScheduleEvent =
                serde_json::from_str(request.body_or_empty_object()?)?;
            store.update_event(update.id, &update.event).await?;
            ScheduleResponse::json(200, &json!({ "message": "Event updated" }))
        }

        Route::DeleteEvent => {
            let id = id_param(request)?;
            store.delete_event(id).await?;
            ScheduleResponse::json(200, &json!({ "message": "Event deleted" }))
        }

        Route::CreatePerson => {
            let person: NewResponsiblePerson =
                serde_json::from_str(request.body_or_empty_object()?)?;
            let id = store.create_person(&person).await?;
            info!(id, "person created");
            ScheduleResponse::json(201, &json!({ "id": id, "message": "Person created" }))
        }

        Route::DeletePerson => {
            let id = id_param(request)?;
            store.delete_person(id).await?;
            ScheduleResponse::json(200, &json!({ "message": "Person deleted" }))
        }

        Route::Preflight => Ok(ScheduleResponse::preflight()),
    }
}

/// The `id` query parameter; absent means "matches nothing".
fn id_param(request: &ScheduleRequest) -> Result<Option<i32>> {
    request
        .query_param("id")
        .map(|raw| {
            raw.trim()
                .parse::<i32>()
                .map_err(|_| Error::InvalidParameter(format!("id must be an integer, got {:?}", raw)))
        })
        .transpose()
}
