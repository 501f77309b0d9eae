use eventhub_backend::{
    api::router::create_router,
    config::Config,
    domain::models::user::{User, ROLE_ADMIN},
    domain::services::registration::RegistrationService,
    infra::repositories::{
        sqlite_event_repo::SqliteEventRepo,
        sqlite_registration_repo::SqliteRegistrationRepo,
        sqlite_user_repo::SqliteUserRepo,
    },
    state::AppState,
};
use argon2::{password_hash::{PasswordHasher, SaltString}, Argon2};
use axum::{
    body::Body,
    http::{header, Request},
    Router,
};
use rand::rngs::OsRng;
use serde_json::Value;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
}

impl TestApp {
    pub async fn new() -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true)
            .busy_timeout(std::time::Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let config = Config {
            database_url: db_url.clone(),
            port: 0,
            jwt_secret: "test-secret".to_string(),
        };

        let event_repo = Arc::new(SqliteEventRepo::new(pool.clone()));
        let registration_repo = Arc::new(SqliteRegistrationRepo::new(pool.clone()));
        let registration_service = Arc::new(RegistrationService::new(
            event_repo.clone(),
            registration_repo.clone(),
        ));

        let state = Arc::new(AppState {
            config,
            user_repo: Arc::new(SqliteUserRepo::new(pool.clone())),
            event_repo,
            registration_repo,
            registration_service,
        });

        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
        }
    }

    /// Signs up a regular user through the API and returns (token, user id).
    #[allow(dead_code)]
    pub async fn signup(&self, name: &str, email: &str, password: &str) -> (String, String) {
        let payload = serde_json::json!({
            "name": name,
            "email": email,
            "password": password
        });

        let response = self.router.clone().oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/register")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap()
        ).await.unwrap();

        if !response.status().is_success() {
            panic!("Signup failed in test helper: status {}", response.status());
        }

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();

        (
            body["token"].as_str().expect("No token in signup response").to_string(),
            body["user"]["id"].as_str().expect("No user id in signup response").to_string(),
        )
    }

    /// Seeds an admin account directly through the user store (there is no
    /// admin signup endpoint) and logs in through the API.
    #[allow(dead_code)]
    pub async fn seed_admin(&self, email: &str, password: &str) -> String {
        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .unwrap()
            .to_string();

        let mut admin = User::new("Admin".to_string(), email.to_string(), password_hash);
        admin.role = ROLE_ADMIN.to_string();
        self.state.user_repo.create(&admin).await.expect("Failed to seed admin");

        let payload = serde_json::json!({ "email": email, "password": password });
        let response = self.router.clone().oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap()
        ).await.unwrap();

        if !response.status().is_success() {
            panic!("Admin login failed in test helper: status {}", response.status());
        }

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        body["token"].as_str().expect("No token in login response").to_string()
    }

    /// Creates an event through the admin API and returns its id.
    #[allow(dead_code)]
    pub async fn create_event(
        &self,
        admin_token: &str,
        title: &str,
        date: chrono::DateTime<chrono::Utc>,
        max_participants: i32,
    ) -> String {
        let payload = serde_json::json!({
            "title": title,
            "description": "Test event",
            "date": date.to_rfc3339(),
            "time": "18:00",
            "venue": "Main Hall",
            "max_participants": max_participants
        });

        let response = self.router.clone().oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/admin/events")
                .header(header::AUTHORIZATION, format!("Bearer {}", admin_token))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap()
        ).await.unwrap();

        if !response.status().is_success() {
            panic!("Event creation failed in test helper: status {}", response.status());
        }

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        body["id"].as_str().expect("No id in event response").to_string()
    }

    /// POST /api/register/{event_id} as the given user.
    #[allow(dead_code)]
    pub async fn register(
        &self,
        token: &str,
        event_id: &str,
        name: &str,
        mobile: &str,
    ) -> axum::response::Response {
        let payload = serde_json::json!({ "name": name, "mobile": mobile });

        self.router.clone().oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/api/register/{}", event_id))
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap()
        ).await.unwrap()
    }

    /// DELETE /api/register/{registration_id} as the given user.
    #[allow(dead_code)]
    pub async fn cancel(&self, token: &str, registration_id: &str) -> axum::response::Response {
        self.router.clone().oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/register/{}", registration_id))
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap()
        ).await.unwrap()
    }

    /// Current registered_count straight from the event store.
    #[allow(dead_code)]
    pub async fn registered_count(&self, event_id: &str) -> i32 {
        self.state.event_repo.find_by_id(event_id).await
            .unwrap()
            .expect("Event not found")
            .registered_count
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
        let _ = std::fs::remove_file(format!("{}-wal", self.db_filename));
        let _ = std::fs::remove_file(format!("{}-shm", self.db_filename));
    }
}
