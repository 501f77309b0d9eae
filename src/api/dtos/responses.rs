use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::models::event::{Event, EventStatus};
use crate::domain::models::registration::{EventRegistrationRow, UserRegistrationRow};
use crate::domain::models::user::User;
use crate::domain::services::event_status::{derive_status, status_of};

#[derive(Serialize)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
        }
    }
}

#[derive(Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserProfile,
    pub registered_events: Vec<String>,
}

/// Event as exposed by the API: the stored record plus its derived status.
#[derive(Serialize)]
pub struct EventResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub time: String,
    pub venue: String,
    pub max_participants: i32,
    pub registered_count: i32,
    pub status: EventStatus,
    pub created_at: DateTime<Utc>,
}

impl From<Event> for EventResponse {
    fn from(event: Event) -> Self {
        let status = status_of(&event);
        Self {
            id: event.id,
            title: event.title,
            description: event.description,
            date: event.date,
            time: event.time,
            venue: event.venue,
            max_participants: event.max_participants,
            registered_count: event.registered_count,
            status,
            created_at: event.created_at,
        }
    }
}

#[derive(Serialize)]
pub struct EventSummary {
    pub id: String,
    pub title: String,
    pub date: DateTime<Utc>,
    pub time: String,
    pub venue: String,
    pub status: EventStatus,
}

/// A user's own registration with the event it belongs to.
#[derive(Serialize)]
pub struct UserRegistrationResponse {
    pub id: String,
    pub attendance_status: String,
    pub registered_at: DateTime<Utc>,
    pub event: EventSummary,
}

impl From<UserRegistrationRow> for UserRegistrationResponse {
    fn from(row: UserRegistrationRow) -> Self {
        let status = derive_status(row.event_date, Utc::now());
        Self {
            id: row.id,
            attendance_status: row.attendance_status,
            registered_at: row.registered_at,
            event: EventSummary {
                id: row.event_id,
                title: row.event_title,
                date: row.event_date,
                time: row.event_time,
                venue: row.event_venue,
                status,
            },
        }
    }
}

#[derive(Serialize)]
pub struct RegistrantContact {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// A registration on an event as shown to administrators, with the
/// registrant's account contact details alongside the form fields.
#[derive(Serialize)]
pub struct EventRegistrationResponse {
    pub id: String,
    pub name: String,
    pub mobile: String,
    pub attendance_status: String,
    pub registered_at: DateTime<Utc>,
    pub user: RegistrantContact,
}

impl From<EventRegistrationRow> for EventRegistrationResponse {
    fn from(row: EventRegistrationRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            mobile: row.mobile,
            attendance_status: row.attendance_status,
            registered_at: row.registered_at,
            user: RegistrantContact {
                id: row.user_id,
                name: row.user_name,
                email: row.user_email,
            },
        }
    }
}
