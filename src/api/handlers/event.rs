use axum::{extract::{Path, State}, http::StatusCode, response::IntoResponse, Json};
use crate::api::dtos::requests::{CreateEventRequest, UpdateEventRequest};
use crate::api::dtos::responses::EventResponse;
use crate::api::extractors::auth::AdminUser;
use crate::domain::models::event::{Event, NewEventParams};
use crate::error::AppError;
use crate::state::AppState;
use std::sync::Arc;
use tracing::info;

pub async fn list_events(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let events = state.event_repo.list().await?;
    let responses: Vec<EventResponse> = events.into_iter().map(EventResponse::from).collect();
    Ok(Json(responses))
}

pub async fn get_event(
    State(state): State<Arc<AppState>>,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let event = state.event_repo.find_by_id(&event_id).await?
        .ok_or(AppError::NotFound("Event not found".into()))?;
    Ok(Json(EventResponse::from(event)))
}

pub async fn create_event(
    State(state): State<Arc<AppState>>,
    AdminUser(admin): AdminUser,
    Json(payload): Json<CreateEventRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.title.trim().is_empty() {
        return Err(AppError::Validation("Title is required".into()));
    }
    if payload.max_participants <= 0 {
        return Err(AppError::Validation("max_participants must be positive".into()));
    }

    let event = Event::new(NewEventParams {
        title: payload.title,
        description: payload.description,
        date: payload.date,
        time: payload.time,
        venue: payload.venue,
        max_participants: payload.max_participants,
    });

    let created = state.event_repo.create(&event).await?;
    info!("Event created: {} by admin {}", created.id, admin.id);

    Ok((StatusCode::CREATED, Json(EventResponse::from(created))))
}

pub async fn update_event(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(event_id): Path<String>,
    Json(payload): Json<UpdateEventRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut event = state.event_repo.find_by_id(&event_id).await?
        .ok_or(AppError::NotFound("Event not found".into()))?;

    if let Some(title) = payload.title { event.title = title; }
    if let Some(description) = payload.description { event.description = description; }
    if let Some(date) = payload.date { event.date = date; }
    if let Some(time) = payload.time { event.time = time; }
    if let Some(venue) = payload.venue { event.venue = venue; }

    if let Some(max_participants) = payload.max_participants {
        if max_participants <= 0 {
            return Err(AppError::Validation("max_participants must be positive".into()));
        }
        // Capacity can never drop below the seats already claimed.
        if max_participants < event.registered_count {
            return Err(AppError::Validation(format!(
                "max_participants cannot be lower than the current registration count ({})",
                event.registered_count
            )));
        }
        event.max_participants = max_participants;
    }

    let updated = state.event_repo.update(&event).await?;
    info!("Event updated: {}", updated.id);

    Ok(Json(EventResponse::from(updated)))
}

pub async fn delete_event(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.event_repo.delete(&event_id).await?;
    info!("Event deleted: {}", event_id);
    Ok(Json(serde_json::json!({ "message": "Event removed" })))
}
