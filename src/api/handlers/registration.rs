use axum::{extract::{Path, State}, http::StatusCode, response::IntoResponse, Json};
use crate::api::dtos::requests::CreateRegistrationRequest;
use crate::api::dtos::responses::UserRegistrationResponse;
use crate::api::extractors::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;
use std::sync::Arc;

pub async fn register_for_event(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(event_id): Path<String>,
    Json(payload): Json<CreateRegistrationRequest>,
) -> Result<impl IntoResponse, AppError> {
    let registration = state
        .registration_service
        .register(&event_id, &user.id, &payload.name, &payload.mobile)
        .await?;

    Ok((StatusCode::CREATED, Json(registration)))
}

pub async fn cancel_registration(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(registration_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state
        .registration_service
        .cancel(&registration_id, &user.id, user.is_admin())
        .await?;

    Ok(Json(serde_json::json!({ "message": "Registration cancelled" })))
}

pub async fn my_registrations(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let rows = state.registration_repo.list_by_user(&user.id).await?;
    let responses: Vec<UserRegistrationResponse> =
        rows.into_iter().map(UserRegistrationResponse::from).collect();
    Ok(Json(responses))
}
