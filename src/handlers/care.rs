use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::AppError;
use crate::models::checkin::{CheckIn, NewCheckIn};
use crate::models::homework::{Homework, NewHomework};
use crate::models::journal::JournalEntry;
use crate::store::{CareStore, CheckInRepository, HomeworkRepository, JournalRepository};

/// Everything a patient has recorded, as shown on the dashboards.
#[derive(Debug, Serialize)]
pub struct CareRecords {
    pub patient: String,
    pub check_ins: Vec<CheckIn>,
    pub homework: Vec<Homework>,
    pub journal: Vec<JournalEntry>,
}

pub fn records_for(care: &CareStore, patient: &str) -> Result<CareRecords, AppError> {
    Ok(CareRecords {
        patient: patient.to_string(),
        check_ins: care.check_ins.list_for_patient(patient)?,
        homework: care.homework.list_for_patient(patient)?,
        journal: care.journal.list_for_patient(patient)?,
    })
}

pub fn record_check_in(care: &CareStore, new: NewCheckIn) -> Result<CheckIn, AppError> {
    new.validate()?;
    let check_in = care.check_ins.record(new)?;
    info!("Check-in {} recorded for {}", check_in.id, check_in.patient);
    Ok(check_in)
}

/// Blank entries are dropped without an error.
pub fn write_journal(
    care: &CareStore,
    patient: &str,
    content: &str,
) -> Result<Option<JournalEntry>, AppError> {
    let content = content.trim();
    if content.is_empty() {
        debug!("Ignoring empty journal entry from {}", patient);
        return Ok(None);
    }
    let entry = care.journal.write(patient, content)?;
    info!("Journal entry {} written by {}", entry.id, patient);
    Ok(Some(entry))
}

pub fn toggle_homework(care: &CareStore, id: u64, patient: &str) -> Result<(), AppError> {
    match care.homework.toggle(id, patient)? {
        Some(completed) => info!("Homework {} marked completed={} by {}", id, completed, patient),
        None => debug!("Ignoring toggle of homework {} not assigned to {}", id, patient),
    }
    Ok(())
}

/// Parses the optional due date sent by the assignment form; an empty field
/// means no due date.
pub fn parse_due_date(raw: Option<&str>) -> Result<Option<NaiveDate>, AppError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        Some(value) => NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| AppError::InvalidInput(format!("due date must be YYYY-MM-DD, got {value:?}"))),
        None => Ok(None),
    }
}

pub fn assign_homework(care: &CareStore, new: NewHomework) -> Result<Homework, AppError> {
    if new.title.trim().is_empty() {
        return Err(AppError::InvalidInput("homework title is required".to_string()));
    }
    let homework = care.homework.assign(new)?;
    info!(
        "Homework {} assigned to {} by {}",
        homework.id, homework.patient, homework.assigned_by
    );
    Ok(homework)
}
