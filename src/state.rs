use actix_web::cookie::Key;
use actix_web::web;
use std::sync::Arc;

use crate::directory::Directory;
use crate::session::SessionKey;
use crate::store::{AppointmentRepository, CareStore, InMemoryAppointments};
use crate::views::Views;

/// Shared data handed to every worker's `App`.
#[derive(Clone)]
pub struct AppState {
    directory: web::Data<Directory>,
    appointments: web::Data<dyn AppointmentRepository>,
    care: web::Data<CareStore>,
    views: web::Data<Views>,
    session_key: web::Data<SessionKey>,
}

impl AppState {
    pub fn new(session_key: Key, views: Views) -> Self {
        let appointments: Arc<dyn AppointmentRepository> = Arc::new(InMemoryAppointments::new());
        Self::with_repository(session_key, views, appointments)
    }

    pub fn with_repository(
        session_key: Key,
        views: Views,
        appointments: Arc<dyn AppointmentRepository>,
    ) -> Self {
        AppState {
            directory: web::Data::new(Directory::seeded()),
            appointments: web::Data::from(appointments),
            care: web::Data::new(CareStore::in_memory()),
            views: web::Data::new(views),
            session_key: web::Data::new(SessionKey::new(session_key)),
        }
    }

    /// Replaces the seeded therapist directory.
    #[cfg(test)]
    pub fn with_directory(mut self, directory: Directory) -> Self {
        self.directory = web::Data::new(directory);
        self
    }

    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(self.directory.clone())
            .app_data(self.appointments.clone())
            .app_data(self.care.clone())
            .app_data(self.views.clone())
            .app_data(self.session_key.clone());
    }
}
