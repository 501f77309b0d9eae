use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Temporal status of an event, derived from its date on every read.
/// "ongoing" is reserved in the schema of the public API but never
/// produced by the deriver.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Upcoming,
    Ongoing,
    Completed,
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Event {
    pub id: String,
    pub title: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub time: String,
    pub venue: String,
    pub max_participants: i32,
    pub registered_count: i32,
    pub created_at: DateTime<Utc>,
}

pub struct NewEventParams {
    pub title: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub time: String,
    pub venue: String,
    pub max_participants: i32,
}

impl Event {
    pub fn new(params: NewEventParams) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: params.title,
            description: params.description,
            date: params.date,
            time: params.time,
            venue: params.venue,
            max_participants: params.max_participants,
            registered_count: 0,
            created_at: Utc::now(),
        }
    }

    pub fn is_full(&self) -> bool {
        self.registered_count >= self.max_participants
    }
}
