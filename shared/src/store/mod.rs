//! Datastore access for schedule events and responsible persons.
//!
//! The dispatcher only talks to these traits. A connector opens one store
//! per invocation and the store is closed before the response leaves.

mod postgres;

#[cfg(test)]
pub mod memory;

use async_trait::async_trait;

use crate::models::{NewResponsiblePerson, NewScheduleEvent, ResponsiblePerson, ScheduleEvent};
use crate::Result;

pub use postgres::{PgConnector, PgScheduleStore};

/// Operations a single datastore connection supports.
#[async_trait]
pub trait ScheduleStore: Send {
    /// All events, newest date first, then by start time.
    async fn list_events(&mut self) -> Result<Vec<ScheduleEvent>>;

    /// All persons ordered by name.
    async fn list_persons(&mut self) -> Result<Vec<ResponsiblePerson>>;

    /// Insert an event and return its assigned id.
    async fn create_event(&mut self, event: &NewScheduleEvent) -> Result<i32>;

    /// Replace every column of the event with the given id.
    ///
    /// An unknown or missing id is a no-op.
    async fn update_event(&mut self, id: Option<i32>, event: &NewScheduleEvent) -> Result<()>;

    /// Delete the event with the given id; an unknown or missing id is a no-op.
    async fn delete_event(&mut self, id: Option<i32>) -> Result<()>;

    /// Insert a person and return its assigned id.
    async fn create_person(&mut self, person: &NewResponsiblePerson) -> Result<i32>;

    /// Delete the person with the given id; an unknown or missing id is a no-op.
    async fn delete_person(&mut self, id: Option<i32>) -> Result<()>;

    /// Release the underlying connection.
    async fn close(self) -> Result<()>;
}

/// Opens a fresh store for one invocation.
#[async_trait]
pub trait StoreConnector: Send + Sync {
    type Store: ScheduleStore;

    async fn connect(&self) -> Result<Self::Store>;
}
