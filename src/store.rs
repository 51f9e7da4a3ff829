use chrono::Utc;
use std::sync::{Mutex, MutexGuard};

use crate::error::AppError;
use crate::models::appointment::{Appointment, AppointmentStatus, NewAppointment};

pub mod care;

pub use care::{
    CareStore, CheckInRepository, HomeworkRepository, InMemoryCheckIns, InMemoryHomework,
    InMemoryJournal, JournalRepository,
};

/// Locks a store's ledger, turning a poisoned lock into an `AppError`.
fn lock<T>(ledger: &Mutex<T>) -> Result<MutexGuard<'_, T>, AppError> {
    ledger.lock().map_err(|e| AppError::Store(e.to_string()))
}

/// Storage for booked appointments.
///
/// Handlers only see this trait so the in-memory ledger can be swapped for a
/// persistent backend.
pub trait AppointmentRepository: Send + Sync {
    /// Appends a new `scheduled` appointment and returns it with its id.
    fn book(&self, new: NewAppointment) -> Result<Appointment, AppError>;

    fn list_for_patient(&self, patient: &str) -> Result<Vec<Appointment>, AppError>;

    fn list_for_therapists(&self, therapist_ids: &[u32]) -> Result<Vec<Appointment>, AppError>;

    /// Returns `false` when no appointment has `id`; nothing is changed then.
    fn update_status(&self, id: u64, status: AppointmentStatus) -> Result<bool, AppError>;
}

#[derive(Debug)]
struct Ledger {
    next_id: u64,
    records: Vec<Appointment>,
}

/// Process-lifetime appointment list. Ids are handed out under the same lock
/// as the append, starting at 1.
#[derive(Debug)]
pub struct InMemoryAppointments {
    ledger: Mutex<Ledger>,
}

impl Default for InMemoryAppointments {
    fn default() -> Self {
        InMemoryAppointments {
            ledger: Mutex::new(Ledger {
                next_id: 1,
                records: Vec::new(),
            }),
        }
    }
}

impl InMemoryAppointments {
    pub fn new() -> Self {
        Self::default()
    }

    fn ledger(&self) -> Result<MutexGuard<'_, Ledger>, AppError> {
        lock(&self.ledger)
    }

    fn filtered<F>(&self, keep: F) -> Result<Vec<Appointment>, AppError>
    where
        F: Fn(&Appointment) -> bool,
    {
        let ledger = self.ledger()?;
        Ok(ledger.records.iter().filter(|a| keep(a)).cloned().collect())
    }
}

impl AppointmentRepository for InMemoryAppointments {
    fn book(&self, new: NewAppointment) -> Result<Appointment, AppError> {
        let mut ledger = self.ledger()?;
        let appointment = Appointment {
            id: ledger.next_id,
            patient: new.patient,
            therapist_id: new.therapist_id,
            date: new.date,
            time: new.time,
            status: AppointmentStatus::Scheduled,
            booked_at: Utc::now(),
        };
        ledger.next_id += 1;
        ledger.records.push(appointment.clone());
        Ok(appointment)
    }

    fn list_for_patient(&self, patient: &str) -> Result<Vec<Appointment>, AppError> {
        self.filtered(|a| a.patient == patient)
    }

    fn list_for_therapists(&self, therapist_ids: &[u32]) -> Result<Vec<Appointment>, AppError> {
        self.filtered(|a| therapist_ids.contains(&a.therapist_id))
    }

    fn update_status(&self, id: u64, status: AppointmentStatus) -> Result<bool, AppError> {
        let mut ledger = self.ledger()?;
        match ledger.records.iter_mut().find(|a| a.id == id) {
            Some(appointment) => {
                appointment.status = status;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
