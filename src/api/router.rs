use axum::{
    body::Body,
    extract::Request,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::api::handlers::{admin, auth, event, health, registration};
use crate::state::AppState;
use tower_http::{
    classify::ServerErrorsFailureClass,
    cors::CorsLayer,
    trace::TraceLayer,
};
use tracing::{error, info, info_span, Span};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Auth
        .route("/api/auth/register", post(auth::signup))
        .route("/api/auth/login", post(auth::login))

        // Events (public reads)
        .route("/api/events", get(event::list_events))
        .route("/api/events/{event_id}", get(event::get_event))

        // Registration. POST takes an event id, DELETE a registration id.
        .route("/api/register/user", get(registration::my_registrations))
        .route(
            "/api/register/{id}",
            post(registration::register_for_event).delete(registration::cancel_registration),
        )
        .route("/api/registrations/user", get(registration::my_registrations))

        // Admin - event management
        .route("/api/admin/events", post(event::create_event))
        .route("/api/admin/events/{event_id}", put(event::update_event).delete(event::delete_event))

        // Admin - registrations & attendance
        .route("/api/admin/events/{event_id}/registrations", get(admin::list_event_registrations))
        .route("/api/admin/registrations/{id}/attendance", put(admin::mark_attendance))
        .route("/api/admin/users", get(admin::list_users))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}
