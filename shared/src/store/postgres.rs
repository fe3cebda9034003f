//! Postgres-backed store.

use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgConnection};
use sqlx::Connection;
use std::time::Duration;
use tracing::debug;

use super::{ScheduleStore, StoreConnector};
use crate::models::{
    NewResponsiblePerson, NewScheduleEvent, ResponsiblePerson, ResponsiblePersonRow,
    ScheduleEvent, ScheduleEventRow,
};
use crate::{db, Result};

/// One open connection to the schedule database.
pub struct PgScheduleStore {
    conn: PgConnection,
}

impl PgScheduleStore {
    pub fn new(conn: PgConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl ScheduleStore for PgScheduleStore {
    async fn list_events(&mut self) -> Result<Vec<ScheduleEvent>> {
        let rows: Vec<ScheduleEventRow> = sqlx::query_as(
            r#"
            SELECT id, date, time_start, time_end, title, type, location,
                   description, status, reminder, reminder_minutes, archived,
                   vcs_link, region_name, responsible_person_id
            FROM schedule_events
            ORDER BY date DESC, time_start ASC
            "#,
        )
        .fetch_all(&mut self.conn)
        .await?;

        Ok(rows.into_iter().map(ScheduleEvent::from).collect())
    }

    async fn list_persons(&mut self) -> Result<Vec<ResponsiblePerson>> {
        let rows: Vec<ResponsiblePersonRow> = sqlx::query_as(
            r#"
            SELECT id, name, position, phone, email
            FROM responsible_persons
            ORDER BY name ASC
            "#,
        )
        .fetch_all(&mut self.conn)
        .await?;

        Ok(rows.into_iter().map(ResponsiblePerson::from).collect())
    }

    async fn create_event(&mut self, event: &NewScheduleEvent) -> Result<i32> {
        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO schedule_events (
                date, time_start, time_end, title, type, location,
                description, status, reminder, reminder_minutes, archived,
                vcs_link, region_name, responsible_person_id
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING id
            "#,
        )
        .bind(&event.date)
        .bind(&event.time_start)
        .bind(&event.time_end)
        .bind(&event.title)
        .bind(&event.event_type)
        .bind(&event.location)
        .bind(&event.description)
        .bind(&event.status)
        .bind(event.reminder)
        .bind(event.reminder_minutes)
        .bind(event.archived)
        .bind(&event.vcs_link)
        .bind(&event.region_name)
        .bind(event.responsible_person_id)
        .fetch_one(&mut self.conn)
        .await?;

        Ok(id)
    }

    async fn update_event(&mut self, id: Option<i32>, event: &NewScheduleEvent) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE schedule_events SET
                date = $1, time_start = $2, time_end = $3, title = $4,
                type = $5, location = $6, description = $7, status = $8,
                reminder = $9, reminder_minutes = $10, archived = $11,
                vcs_link = $12, region_name = $13, responsible_person_id = $14,
                updated_at = CURRENT_TIMESTAMP
            WHERE id = $15
            "#,
        )
        .bind(&event.date)
        .bind(&event.time_start)
        .bind(&event.time_end)
        .bind(&event.title)
        .bind(&event.event_type)
        .bind(&event.location)
        .bind(&event.description)
        .bind(&event.status)
        .bind(event.reminder)
        .bind(event.reminder_minutes)
        .bind(event.archived)
        .bind(&event.vcs_link)
        .bind(&event.region_name)
        .bind(event.responsible_person_id)
        .bind(id)
        .execute(&mut self.conn)
        .await?;

        debug!(?id, rows = result.rows_affected(), "event update applied");
        Ok(())
    }

    async fn delete_event(&mut self, id: Option<i32>) -> Result<()> {
        let result = sqlx::query("DELETE FROM schedule_events WHERE id = $1")
            .bind(id)
            .execute(&mut self.conn)
            .await?;

        debug!(?id, rows = result.rows_affected(), "event delete applied");
        Ok(())
    }

    async fn create_person(&mut self, person: &NewResponsiblePerson) -> Result<i32> {
        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO responsible_persons (name, position, phone, email)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&person.name)
        .bind(&person.position)
        .bind(&person.phone)
        .bind(&person.email)
        .fetch_one(&mut self.conn)
        .await?;

        Ok(id)
    }

    async fn delete_person(&mut self, id: Option<i32>) -> Result<()> {
        let result = sqlx::query("DELETE FROM responsible_persons WHERE id = $1")
            .bind(id)
            .execute(&mut self.conn)
            .await?;

        debug!(?id, rows = result.rows_affected(), "person delete applied");
        Ok(())
    }

    async fn close(self) -> Result<()> {
        self.conn.close().await?;
        Ok(())
    }
}

/// Opens a new Postgres connection per invocation.
#[derive(Clone)]
pub struct PgConnector {
    options: PgConnectOptions,
    connect_timeout: Duration,
}

impl PgConnector {
    pub fn new(options: PgConnectOptions, connect_timeout: Duration) -> Self {
        Self {
            options,
            connect_timeout,
        }
    }
}

#[async_trait]
impl StoreConnector for PgConnector {
    type Store = PgScheduleStore;

    async fn connect(&self) -> Result<PgScheduleStore> {
        let conn = db::connect(&self.options, self.connect_timeout).await?;
        Ok(PgScheduleStore::new(conn))
    }
}
