mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use chrono::{Duration, Utc};
use common::TestApp;
use serde_json::{json, Value};
use tower::ServiceExt;

async fn parse_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_create_and_get_event() {
    let app = TestApp::new().await;
    let admin = app.seed_admin("admin@test.com", "secret123").await;
    let event_id = app.create_event(&admin, "Rust Meetup", Utc::now() + Duration::days(7), 25).await;

    let res = app.router.clone().oneshot(
        Request::builder()
            .method("GET")
            .uri(format!("/api/events/{}", event_id))
            .body(Body::empty())
            .unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body = parse_body(res).await;
    assert_eq!(body["title"], "Rust Meetup");
    assert_eq!(body["venue"], "Main Hall");
    assert_eq!(body["max_participants"], 25);
    assert_eq!(body["registered_count"], 0);
    assert_eq!(body["status"], "upcoming");
}

#[tokio::test]
async fn test_create_event_requires_admin() {
    let app = TestApp::new().await;
    let (token, _) = app.signup("Alice", "alice@test.com", "secret123").await;

    let res = app.router.clone().oneshot(
        Request::builder()
            .method("POST")
            .uri("/api/admin/events")
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({
                "title": "Sneaky", "description": ".", "date": (Utc::now() + Duration::days(1)).to_rfc3339(),
                "time": "18:00", "venue": "Hall", "max_participants": 5
            }).to_string()))
            .unwrap()
    ).await.unwrap();

    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_create_event_rejects_non_positive_capacity() {
    let app = TestApp::new().await;
    let admin = app.seed_admin("admin@test.com", "secret123").await;

    let res = app.router.clone().oneshot(
        Request::builder()
            .method("POST")
            .uri("/api/admin/events")
            .header(header::AUTHORIZATION, format!("Bearer {}", admin))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({
                "title": "Empty", "description": ".", "date": (Utc::now() + Duration::days(1)).to_rfc3339(),
                "time": "18:00", "venue": "Hall", "max_participants": 0
            }).to_string()))
            .unwrap()
    ).await.unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_events_sorted_with_derived_status() {
    let app = TestApp::new().await;
    let admin = app.seed_admin("admin@test.com", "secret123").await;
    app.create_event(&admin, "Future", Utc::now() + Duration::days(7), 10).await;
    app.create_event(&admin, "Past", Utc::now() - Duration::days(7), 10).await;

    let res = app.router.clone().oneshot(
        Request::builder()
            .method("GET")
            .uri("/api/events")
            .body(Body::empty())
            .unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let list = parse_body(res).await;
    let events = list.as_array().unwrap();
    assert_eq!(events.len(), 2);
    // Date ascending: past first.
    assert_eq!(events[0]["title"], "Past");
    assert_eq!(events[0]["status"], "completed");
    assert_eq!(events[1]["title"], "Future");
    assert_eq!(events[1]["status"], "upcoming");
}

#[tokio::test]
async fn test_update_event() {
    let app = TestApp::new().await;
    let admin = app.seed_admin("admin@test.com", "secret123").await;
    let event_id = app.create_event(&admin, "Old Title", Utc::now() + Duration::days(7), 10).await;

    let res = app.router.clone().oneshot(
        Request::builder()
            .method("PUT")
            .uri(format!("/api/admin/events/{}", event_id))
            .header(header::AUTHORIZATION, format!("Bearer {}", admin))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({ "title": "New Title", "max_participants": 50 }).to_string()))
            .unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body = parse_body(res).await;
    assert_eq!(body["title"], "New Title");
    assert_eq!(body["max_participants"], 50);
    assert_eq!(body["venue"], "Main Hall");
}

#[tokio::test]
async fn test_update_cannot_shrink_capacity_below_registrations() {
    let app = TestApp::new().await;
    let admin = app.seed_admin("admin@test.com", "secret123").await;
    let event_id = app.create_event(&admin, "Workshop", Utc::now() + Duration::days(7), 3).await;
    let (alice, _) = app.signup("Alice", "alice@test.com", "secret123").await;
    let (bob, _) = app.signup("Bob", "bob@test.com", "secret123").await;

    app.register(&alice, &event_id, "Alice", "9876543210").await;
    app.register(&bob, &event_id, "Bob", "9123456780").await;

    let res = app.router.clone().oneshot(
        Request::builder()
            .method("PUT")
            .uri(format!("/api/admin/events/{}", event_id))
            .header(header::AUTHORIZATION, format!("Bearer {}", admin))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({ "max_participants": 1 }).to_string()))
            .unwrap()
    ).await.unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(app.registered_count(&event_id).await, 2);
}

#[tokio::test]
async fn test_delete_event_blocked_while_registrations_active() {
    let app = TestApp::new().await;
    let admin = app.seed_admin("admin@test.com", "secret123").await;
    let event_id = app.create_event(&admin, "Guarded", Utc::now() + Duration::days(7), 10).await;
    let (token, _) = app.signup("Alice", "alice@test.com", "secret123").await;

    let res = app.register(&token, &event_id, "Alice", "9876543210").await;
    let registration_id = parse_body(res).await["id"].as_str().unwrap().to_string();

    let res = app.router.clone().oneshot(
        Request::builder()
            .method("DELETE")
            .uri(format!("/api/admin/events/{}", event_id))
            .header(header::AUTHORIZATION, format!("Bearer {}", admin))
            .body(Body::empty())
            .unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);

    // After the registration is cancelled the event can go.
    app.cancel(&token, &registration_id).await;

    let res = app.router.clone().oneshot(
        Request::builder()
            .method("DELETE")
            .uri(format!("/api/admin/events/{}", event_id))
            .header(header::AUTHORIZATION, format!("Bearer {}", admin))
            .body(Body::empty())
            .unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = app.router.clone().oneshot(
        Request::builder()
            .method("GET")
            .uri(format!("/api/events/{}", event_id))
            .body(Body::empty())
            .unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_unknown_event() {
    let app = TestApp::new().await;

    let res = app.router.clone().oneshot(
        Request::builder()
            .method("GET")
            .uri("/api/events/no-such-event")
            .body(Body::empty())
            .unwrap()
    ).await.unwrap();

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}
