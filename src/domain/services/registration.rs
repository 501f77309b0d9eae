use std::sync::Arc;
use tracing::{error, info, warn};

use crate::domain::models::event::EventStatus;
use crate::domain::models::registration::{Registration, STATUS_ABSENT, STATUS_ATTENDED};
use crate::domain::ports::{EventRepository, RegistrationRepository};
use crate::domain::services::event_status::status_of;
use crate::error::AppError;

/// Orchestrates register/cancel across the event and registration stores.
///
/// The two stores are written in sequence, so a failure between the writes
/// must either be compensated or surfaced as a PartialFailure for
/// reconciliation. The store-level guards (conditional counter update,
/// partial unique index) are the source of truth for capacity and
/// duplicates; the prechecks here only produce friendlier errors in the
/// common case.
pub struct RegistrationService {
    event_repo: Arc<dyn EventRepository>,
    registration_repo: Arc<dyn RegistrationRepository>,
}

impl RegistrationService {
    pub fn new(
        event_repo: Arc<dyn EventRepository>,
        registration_repo: Arc<dyn RegistrationRepository>,
    ) -> Self {
        Self { event_repo, registration_repo }
    }

    pub async fn register(
        &self,
        event_id: &str,
        user_id: &str,
        name: &str,
        mobile: &str,
    ) -> Result<Registration, AppError> {
        validate_contact(name, mobile)?;

        let event = self.event_repo.find_by_id(event_id).await?
            .ok_or(AppError::NotFound("Event not found".into()))?;

        if status_of(&event) != EventStatus::Upcoming {
            return Err(AppError::EventClosed);
        }
        if event.is_full() {
            return Err(AppError::EventFull);
        }
        if self.registration_repo.find_active(user_id, event_id).await?.is_some() {
            return Err(AppError::DuplicateRegistration);
        }

        let registration = Registration::new(
            user_id.to_string(),
            event_id.to_string(),
            name.to_string(),
            mobile.to_string(),
        );
        let created = self.registration_repo.create(&registration).await?;

        match self.event_repo.reserve_slot(event_id).await {
            Ok(true) => {
                info!("Registration confirmed: {} for event {}", created.id, event_id);
                Ok(created)
            }
            Ok(false) => {
                // Lost the capacity race after the precheck passed.
                warn!("Event {} filled up concurrently, rolling back registration {}", event_id, created.id);
                self.rollback_registration(&created.id).await?;
                Err(AppError::EventFull)
            }
            Err(e) => {
                error!("Slot reservation failed for event {}: {:?}", event_id, e);
                self.rollback_registration(&created.id).await?;
                Err(e)
            }
        }
    }

    /// Compensating delete of a registration whose counter increment never
    /// landed. An active registration without a claimed slot violates the
    /// counter invariant, so a failed rollback escalates.
    async fn rollback_registration(&self, registration_id: &str) -> Result<(), AppError> {
        if let Err(e) = self.registration_repo.delete(registration_id).await {
            error!(
                "Rollback failed, registration {} has no reserved slot: {:?}",
                registration_id, e
            );
            return Err(AppError::PartialFailure(format!(
                "registration {} inserted but slot reservation failed and rollback did not complete",
                registration_id
            )));
        }
        Ok(())
    }

    pub async fn cancel(
        &self,
        registration_id: &str,
        requester_id: &str,
        requester_is_admin: bool,
    ) -> Result<Registration, AppError> {
        let registration = self.registration_repo.find_by_id(registration_id).await?
            .ok_or(AppError::NotFound("Registration not found".into()))?;

        if registration.user_id != requester_id && !requester_is_admin {
            return Err(AppError::Unauthorized);
        }

        // The conditional flip reports whether this call performed the
        // transition; a registration cancelled concurrently (or repeatedly)
        // must not decrement the counter a second time.
        let transitioned = self.registration_repo.cancel(registration_id).await?;
        if !transitioned {
            info!("Registration {} was already cancelled", registration_id);
            return Ok(registration);
        }

        if let Err(e) = self.event_repo.release_slot(&registration.event_id).await {
            error!(
                "Slot release failed for event {} after cancelling registration {}: {:?}",
                registration.event_id, registration_id, e
            );
            return Err(AppError::PartialFailure(format!(
                "registration {} cancelled but slot release failed",
                registration_id
            )));
        }

        info!("Registration cancelled: {}", registration_id);
        self.registration_repo.find_by_id(registration_id).await?
            .ok_or(AppError::NotFound("Registration not found".into()))
    }

    pub async fn mark_attendance(
        &self,
        registration_id: &str,
        status: &str,
    ) -> Result<Registration, AppError> {
        if status != STATUS_ATTENDED && status != STATUS_ABSENT {
            return Err(AppError::Validation(
                "Attendance status must be 'attended' or 'absent'".into(),
            ));
        }

        self.registration_repo.set_attendance(registration_id, status).await?
            .ok_or(AppError::NotFound("Registration not found".into()))
    }
}

fn validate_contact(name: &str, mobile: &str) -> Result<(), AppError> {
    if name.trim().is_empty() {
        return Err(AppError::Validation("Name is required".into()));
    }
    if mobile.len() != 10 || !mobile.chars().all(|c| c.is_ascii_digit()) {
        return Err(AppError::Validation("Mobile number must be exactly 10 digits".into()));
    }
    Ok(())
}
