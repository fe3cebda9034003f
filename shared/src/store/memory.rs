//! In-memory store used by the dispatcher tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use super::{ScheduleStore, StoreConnector};
use crate::models::{NewResponsiblePerson, NewScheduleEvent, ResponsiblePerson, ScheduleEvent};
use crate::{Error, Result};

#[derive(Debug, Clone)]
pub struct StoredEvent {
    pub event: ScheduleEvent,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
pub struct MemoryDb {
    next_event_id: i32,
    next_person_id: i32,
    pub events: BTreeMap<i32, StoredEvent>,
    pub persons: BTreeMap<i32, ResponsiblePerson>,
    /// When set, every statement fails with a database error.
    pub fail_statements: bool,
}

impl MemoryDb {
    fn check(&self) -> Result<()> {
        if self.fail_statements {
            return Err(Error::Database(sqlx::Error::Protocol(
                "relation \"schedule_events\" is unavailable".to_string(),
            )));
        }
        Ok(())
    }
}

/// Connector handing out stores over one shared in-memory database.
#[derive(Default)]
pub struct MemoryConnector {
    pub db: Arc<Mutex<MemoryDb>>,
    connects: AtomicUsize,
    closes: Arc<AtomicUsize>,
}

impl MemoryConnector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn connects(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }

    pub fn closes(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }

    pub fn fail_statements(&self, fail: bool) {
        self.db.lock().unwrap().fail_statements = fail;
    }

    pub fn stored_event(&self, id: i32) -> Option<StoredEvent> {
        self.db.lock().unwrap().events.get(&id).cloned()
    }
}

#[async_trait]
impl StoreConnector for MemoryConnector {
    type Store = MemoryStore;

    async fn connect(&self) -> Result<MemoryStore> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        Ok(MemoryStore {
            db: Arc::clone(&self.db),
            closes: Arc::clone(&self.closes),
        })
    }
}

pub struct MemoryStore {
    db: Arc<Mutex<MemoryDb>>,
    closes: Arc<AtomicUsize>,
}

impl MemoryStore {
    fn db(&self) -> Result<std::sync::MutexGuard<'_, MemoryDb>> {
        let db = self
            .db
            .lock()
            .map_err(|_| Error::Internal("memory store poisoned".to_string()))?;
        db.check()?;
        Ok(db)
    }
}

#[async_trait]
impl ScheduleStore for MemoryStore {
    async fn list_events(&mut self) -> Result<Vec<ScheduleEvent>> {
        let db = self.db()?;
        let mut events: Vec<ScheduleEvent> =
            db.events.values().map(|stored| stored.event.clone()).collect();
        events.sort_by(|a, b| {
            b.date
                .cmp(&a.date)
                .then_with(|| a.time_start.cmp(&b.time_start))
        });
        Ok(events)
    }

    async fn list_persons(&mut self) -> Result<Vec<ResponsiblePerson>> {
        let db = self.db()?;
        let mut persons: Vec<ResponsiblePerson> = db.persons.values().cloned().collect();
        persons.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(persons)
    }

    async fn create_event(&mut self, event: &NewScheduleEvent) -> Result<i32> {
        let mut db = self.db()?;
        db.next_event_id += 1;
        let id = db.next_event_id;
        db.events.insert(
            id,
            StoredEvent {
                event: event.clone().with_id(id),
                updated_at: Utc::now(),
            },
        );
        Ok(id)
    }

    async fn update_event(&mut self, id: Option<i32>, event: &NewScheduleEvent) -> Result<()> {
        let mut db = self.db()?;
        if let Some(stored) = id.and_then(|id| db.events.get_mut(&id)) {
            stored.event = event.clone().with_id(stored.event.id);
            stored.updated_at = stored.updated_at.max(Utc::now());
        }
        Ok(())
    }

    async fn delete_event(&mut self, id: Option<i32>) -> Result<()> {
        let mut db = self.db()?;
        if let Some(id) = id {
            db.events.remove(&id);
        }
        Ok(())
    }

    async fn create_person(&mut self, person: &NewResponsiblePerson) -> Result<i32> {
        let mut db = self.db()?;
        db.next_person_id += 1;
        let id = db.next_person_id;
        db.persons.insert(id, person.clone().with_id(id));
        Ok(id)
    }

    async fn delete_person(&mut self, id: Option<i32>) -> Result<()> {
        let mut db = self.db()?;
        if let Some(id) = id {
            db.persons.remove(&id);
        }
        Ok(())
    }

    async fn close(self) -> Result<()> {
        self.closes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
