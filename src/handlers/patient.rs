use crate::directory::Directory;
use crate::error::AppError;
use crate::handlers::care;
use crate::models::appointment::{Appointment, NewAppointment};
use crate::store::{AppointmentRepository, CareStore};
use crate::views::{AppointmentRow, Views};
use tracing::info;

pub fn dashboard(
    directory: &Directory,
    appointments: &dyn AppointmentRepository,
    care_store: &CareStore,
    views: &Views,
    patient: &str,
) -> Result<String, AppError> {
    let rows: Vec<_> = appointments
        .list_for_patient(patient)?
        .iter()
        .map(|apt| AppointmentRow::resolve(apt, directory))
        .collect();
    let records = care::records_for(care_store, patient)?;

    views.patient_dashboard(patient, directory.list(), &rows, &records)
}

/// Books `new` after checking the therapist exists.
pub fn book(
    directory: &Directory,
    appointments: &dyn AppointmentRepository,
    new: NewAppointment,
) -> Result<Appointment, AppError> {
    let therapist = directory
        .find_by_id(new.therapist_id)
        .ok_or(AppError::TherapistNotFound(new.therapist_id))?;

    let appointment = appointments.book(new)?;
    info!(
        "Booked appointment {} for {} with {} on {} at {}",
        appointment.id, appointment.patient, therapist.name, appointment.date, appointment.time
    );
    Ok(appointment)
}
