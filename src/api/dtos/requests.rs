use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct CreateEventRequest {
    pub title: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub time: String,
    pub venue: String,
    pub max_participants: i32,
}

#[derive(Deserialize)]
pub struct UpdateEventRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub time: Option<String>,
    pub venue: Option<String>,
    pub max_participants: Option<i32>,
}

#[derive(Deserialize)]
pub struct CreateRegistrationRequest {
    pub name: String,
    pub mobile: String,
}

#[derive(Deserialize)]
pub struct AttendanceRequest {
    pub status: String,
}
