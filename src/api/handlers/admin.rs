use axum::{extract::{Path, State}, response::IntoResponse, Json};
use crate::api::dtos::requests::AttendanceRequest;
use crate::api::dtos::responses::{EventRegistrationResponse, UserProfile};
use crate::api::extractors::auth::AdminUser;
use crate::domain::models::user::ROLE_USER;
use crate::error::AppError;
use crate::state::AppState;
use std::sync::Arc;
use tracing::info;

pub async fn list_event_registrations(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    if state.event_repo.find_by_id(&event_id).await?.is_none() {
        return Err(AppError::NotFound("Event not found".into()));
    }

    let rows = state.registration_repo.list_by_event(&event_id).await?;
    let responses: Vec<EventRegistrationResponse> =
        rows.into_iter().map(EventRegistrationResponse::from).collect();
    Ok(Json(responses))
}

pub async fn mark_attendance(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(registration_id): Path<String>,
    Json(payload): Json<AttendanceRequest>,
) -> Result<impl IntoResponse, AppError> {
    let updated = state
        .registration_service
        .mark_attendance(&registration_id, &payload.status)
        .await?;

    info!("Attendance marked {} for registration {}", updated.attendance_status, updated.id);
    Ok(Json(updated))
}

pub async fn list_users(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
) -> Result<impl IntoResponse, AppError> {
    let users = state.user_repo.list_by_role(ROLE_USER).await?;
    let profiles: Vec<UserProfile> = users.into_iter().map(UserProfile::from).collect();
    Ok(Json(profiles))
}
