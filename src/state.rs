use std::sync::Arc;
use crate::config::Config;
use crate::domain::ports::{EventRepository, RegistrationRepository, UserRepository};
use crate::domain::services::registration::RegistrationService;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub user_repo: Arc<dyn UserRepository>,
    pub event_repo: Arc<dyn EventRepository>,
    pub registration_repo: Arc<dyn RegistrationRepository>,
    pub registration_service: Arc<RegistrationService>,
}
