use crate::domain::models::{
    event::Event,
    registration::{EventRegistrationRow, Registration, UserRegistrationRow},
    user::User,
};
use crate::error::AppError;
use async_trait::async_trait;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: &User) -> Result<User, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
    async fn list_by_role(&self, role: &str) -> Result<Vec<User>, AppError>;
}

#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn create(&self, event: &Event) -> Result<Event, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Event>, AppError>;
    async fn list(&self) -> Result<Vec<Event>, AppError>;
    async fn update(&self, event: &Event) -> Result<Event, AppError>;
    /// Refuses with Conflict while active registrations reference the event;
    /// sweeps remaining cancelled registrations in the same transaction.
    async fn delete(&self, id: &str) -> Result<(), AppError>;

    /// Atomically claims one slot: a single conditional update that only
    /// succeeds while registered_count < max_participants. Returns false
    /// when the event was full (or gone) at commit time.
    async fn reserve_slot(&self, id: &str) -> Result<bool, AppError>;
    /// Atomically releases one slot, flooring the counter at zero.
    async fn release_slot(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait RegistrationRepository: Send + Sync {
    /// Fails with DuplicateRegistration when an active registration for the
    /// same (user, event) pair already exists at commit time; the partial
    /// unique index is the authoritative check.
    async fn create(&self, registration: &Registration) -> Result<Registration, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Registration>, AppError>;
    async fn find_active(&self, user_id: &str, event_id: &str) -> Result<Option<Registration>, AppError>;
    /// Flips a non-cancelled registration to cancelled. Returns false when
    /// the row was already cancelled, so the caller can keep the counter
    /// decrement idempotent.
    async fn cancel(&self, id: &str) -> Result<bool, AppError>;
    /// Physical removal; only used as the compensating action when the
    /// counter increment fails after an insert.
    async fn delete(&self, id: &str) -> Result<(), AppError>;
    async fn set_attendance(&self, id: &str, status: &str) -> Result<Option<Registration>, AppError>;
    async fn count_active(&self, event_id: &str) -> Result<i64, AppError>;
    async fn active_event_ids(&self, user_id: &str) -> Result<Vec<String>, AppError>;
    async fn list_by_user(&self, user_id: &str) -> Result<Vec<UserRegistrationRow>, AppError>;
    async fn list_by_event(&self, event_id: &str) -> Result<Vec<EventRegistrationRow>, AppError>;
}
