use crate::directory::Directory;
use crate::error::AppError;
use crate::handlers::care::{self, CareRecords};
use crate::models::appointment::{Appointment, AppointmentStatus};
use crate::store::{AppointmentRepository, CareStore};
use crate::views::{AppointmentRow, Views};
use tracing::{debug, info};

/// Appointments booked with any therapist whose display name is `name`.
pub fn appointments_for(
    directory: &Directory,
    appointments: &dyn AppointmentRepository,
    name: &str,
) -> Result<Vec<Appointment>, AppError> {
    let ids = directory.ids_named(name);
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    appointments.list_for_therapists(&ids)
}

/// Care records of every patient who has booked with this therapist, in
/// order of their first booking.
pub fn caseload(booked: &[Appointment], care_store: &CareStore) -> Result<Vec<CareRecords>, AppError> {
    let mut patients: Vec<&str> = Vec::new();
    for apt in booked {
        if !patients.contains(&apt.patient.as_str()) {
            patients.push(&apt.patient);
        }
    }
    patients
        .into_iter()
        .map(|patient| care::records_for(care_store, patient))
        .collect()
}

pub fn dashboard(
    directory: &Directory,
    appointments: &dyn AppointmentRepository,
    care_store: &CareStore,
    views: &Views,
    therapist: &str,
) -> Result<String, AppError> {
    let booked = appointments_for(directory, appointments, therapist)?;
    let rows: Vec<_> = booked
        .iter()
        .map(|apt| AppointmentRow::resolve(apt, directory))
        .collect();
    let patients = caseload(&booked, care_store)?;

    views.therapist_dashboard(therapist, &rows, &patients)
}

/// Sets the status of appointment `id`. Unknown ids are ignored.
pub fn update_status(
    appointments: &dyn AppointmentRepository,
    id: u64,
    status: AppointmentStatus,
) -> Result<(), AppError> {
    let label = status.to_string();
    if appointments.update_status(id, status)? {
        info!("Appointment {} is now {}", id, label);
    } else {
        debug!("Ignoring status update for unknown appointment {}", id);
    }
    Ok(())
}
