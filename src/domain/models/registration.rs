use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

pub const STATUS_REGISTERED: &str = "registered";
pub const STATUS_ATTENDED: &str = "attended";
pub const STATUS_ABSENT: &str = "absent";
pub const STATUS_CANCELLED: &str = "cancelled";

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Registration {
    pub id: String,
    pub user_id: String,
    pub event_id: String,
    pub name: String,
    pub mobile: String,
    pub attendance_status: String,
    pub registered_at: DateTime<Utc>,
}

impl Registration {
    pub fn new(user_id: String, event_id: String, name: String, mobile: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id,
            event_id,
            name,
            mobile,
            attendance_status: STATUS_REGISTERED.to_string(),
            registered_at: Utc::now(),
        }
    }
}

/// Row shape for a user's registrations joined with the owning event.
#[derive(Debug, FromRow, Clone)]
pub struct UserRegistrationRow {
    pub id: String,
    pub event_id: String,
    pub attendance_status: String,
    pub registered_at: DateTime<Utc>,
    pub event_title: String,
    pub event_date: DateTime<Utc>,
    pub event_time: String,
    pub event_venue: String,
}

/// Row shape for an event's registrations joined with user contact info.
#[derive(Debug, FromRow, Clone)]
pub struct EventRegistrationRow {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub mobile: String,
    pub attendance_status: String,
    pub registered_at: DateTime<Utc>,
    pub user_name: String,
    pub user_email: String,
}
