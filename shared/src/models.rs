//! Schedule data models.
//!
//! Rows mirror the `schedule_events` and `responsible_persons` tables; the
//! API types are what clients see. Input DTOs carry the documented default
//! for every optional field, so nothing relies on the datastore to fill gaps.

use serde::{Deserialize, Deserializer, Serialize};

const DEFAULT_STATUS: &str = "scheduled";

fn default_status() -> String {
    DEFAULT_STATUS.to_string()
}

/// Treat an explicit JSON `null` the same as an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_default_status<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(default_status))
}

/// Schedule event row from database.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ScheduleEventRow {
    pub id: i32,
    pub date: String,
    pub time_start: String,
    pub time_end: String,
    pub title: String,
    #[sqlx(rename = "type")]
    pub event_type: String,
    pub location: Option<String>,
    pub description: Option<String>,
    pub status: String,
    pub reminder: Option<bool>,
    pub reminder_minutes: Option<i32>,
    pub archived: Option<bool>,
    pub vcs_link: Option<String>,
    pub region_name: Option<String>,
    pub responsible_person_id: Option<i32>,
}

/// Schedule event as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEvent {
    pub id: i32,
    pub date: String,
    pub time_start: String,
    pub time_end: String,
    pub title: String,
    #[serde(rename = "type")]
    pub event_type: String,
    pub location: String,
    pub description: String,
    pub status: String,
    pub reminder: bool,
    pub reminder_minutes: Option<i32>,
    pub archived: bool,
    pub vcs_link: String,
    pub region_name: String,
    pub responsible_person_id: Option<i32>,
}

impl From<ScheduleEventRow> for ScheduleEvent {
    fn from(row: ScheduleEventRow) -> Self {
        Self {
            id: row.id,
            date: row.date,
            time_start: row.time_start,
            time_end: row.time_end,
            title: row.title,
            event_type: row.event_type,
            location: row.location.unwrap_or_default(),
            description: row.description.unwrap_or_default(),
            status: row.status,
            reminder: row.reminder.unwrap_or(false),
            reminder_minutes: row.reminder_minutes,
            archived: row.archived.unwrap_or(false),
            vcs_link: row.vcs_link.unwrap_or_default(),
            region_name: row.region_name.unwrap_or_default(),
            responsible_person_id: row.responsible_person_id,
        }
    }
}

/// Create (and full-replace update) payload for a schedule event.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewScheduleEvent {
    pub date: String,
    pub time_start: String,
    pub time_end: String,
    pub title: String,
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub location: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    /// Defaults to "scheduled"
    #[serde(default = "default_status", deserialize_with = "null_as_default_status")]
    pub status: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub reminder: bool,
    #[serde(default)]
    pub reminder_minutes: Option<i32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub archived: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub vcs_link: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub region_name: String,
    #[serde(default)]
    pub responsible_person_id: Option<i32>,
}

impl NewScheduleEvent {
    /// Attach a datastore id.
    pub fn with_id(self, id: i32) -> ScheduleEvent {
        ScheduleEvent {
            id,
            date: self.date,
            time_start: self.time_start,
            time_end: self.time_end,
            title: self.title,
            event_type: self.event_type,
            location: self.location,
            description: self.description,
            status: self.status,
            reminder: self.reminder,
            reminder_minutes: self.reminder_minutes,
            archived: self.archived,
            vcs_link: self.vcs_link,
            region_name: self.region_name,
            responsible_person_id: self.responsible_person_id,
        }
    }
}

/// Update payload: the target id plus every event field.
///
/// A missing `id` matches no row.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UpdateScheduleEvent {
    #[serde(default)]
    pub id: Option<i32>,
    #[serde(flatten)]
    pub event: NewScheduleEvent,
}

/// Responsible person row from database.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ResponsiblePersonRow {
    pub id: i32,
    pub name: String,
    pub position: String,
    pub phone: Option<String>,
    pub email: Option<String>,
}

/// Responsible person as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponsiblePerson {
    pub id: i32,
    pub name: String,
    pub position: String,
    pub phone: String,
    pub email: String,
}

impl From<ResponsiblePersonRow> for ResponsiblePerson {
    fn from(row: ResponsiblePersonRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            position: row.position,
            phone: row.phone.unwrap_or_default(),
            email: row.email.unwrap_or_default(),
        }
    }
}

/// Create payload for a responsible person.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewResponsiblePerson {
    pub name: String,
    pub position: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub phone: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
}

impl NewResponsiblePerson {
    /// Attach a datastore id.
    pub fn with_id(self, id: i32) -> ResponsiblePerson {
        ResponsiblePerson {
            id,
            name: self.name,
            position: self.position,
            phone: self.phone,
            email: self.email,
        }
    }
}
