use chrono::Utc;
use std::sync::{Arc, Mutex};

use super::lock;
use crate::error::AppError;
use crate::models::checkin::{CheckIn, NewCheckIn};
use crate::models::homework::{Homework, NewHomework};
use crate::models::journal::JournalEntry;

pub trait CheckInRepository: Send + Sync {
    fn record(&self, new: NewCheckIn) -> Result<CheckIn, AppError>;

    /// Newest first.
    fn list_for_patient(&self, patient: &str) -> Result<Vec<CheckIn>, AppError>;
}

pub trait HomeworkRepository: Send + Sync {
    fn assign(&self, new: NewHomework) -> Result<Homework, AppError>;

    /// In assignment order.
    fn list_for_patient(&self, patient: &str) -> Result<Vec<Homework>, AppError>;

    /// Flips `completed` on homework `id` if it belongs to `patient` and
    /// returns the new value. `None` leaves everything untouched.
    fn toggle(&self, id: u64, patient: &str) -> Result<Option<bool>, AppError>;
}

pub trait JournalRepository: Send + Sync {
    fn write(&self, patient: &str, content: &str) -> Result<JournalEntry, AppError>;

    /// Newest first.
    fn list_for_patient(&self, patient: &str) -> Result<Vec<JournalEntry>, AppError>;
}

#[derive(Debug)]
struct Records<T> {
    next_id: u64,
    items: Vec<T>,
}

impl<T> Default for Records<T> {
    fn default() -> Self {
        Records {
            next_id: 1,
            items: Vec::new(),
        }
    }
}

impl<T> Records<T> {
    fn push_with(&mut self, build: impl FnOnce(u64) -> T) -> &T {
        let id = self.next_id;
        self.next_id += 1;
        self.items.push(build(id));
        &self.items[self.items.len() - 1]
    }
}

#[derive(Debug, Default)]
pub struct InMemoryCheckIns {
    records: Mutex<Records<CheckIn>>,
}

impl CheckInRepository for InMemoryCheckIns {
    fn record(&self, new: NewCheckIn) -> Result<CheckIn, AppError> {
        let mut records = lock(&self.records)?;
        let check_in = records.push_with(|id| CheckIn {
            id,
            patient: new.patient,
            mood: new.mood,
            stress: new.stress,
            sleep: new.sleep,
            notes: new.notes,
            recorded_at: Utc::now(),
        });
        Ok(check_in.clone())
    }

    fn list_for_patient(&self, patient: &str) -> Result<Vec<CheckIn>, AppError> {
        let records = lock(&self.records)?;
        Ok(records
            .items
            .iter()
            .rev()
            .filter(|c| c.patient == patient)
            .cloned()
            .collect())
    }
}

#[derive(Debug, Default)]
pub struct InMemoryHomework {
    records: Mutex<Records<Homework>>,
}

impl HomeworkRepository for InMemoryHomework {
    fn assign(&self, new: NewHomework) -> Result<Homework, AppError> {
        let mut records = lock(&self.records)?;
        let homework = records.push_with(|id| Homework {
            id,
            patient: new.patient,
            assigned_by: new.assigned_by,
            title: new.title,
            description: new.description,
            completed: false,
            assigned_on: Utc::now().date_naive(),
            due_on: new.due_on,
        });
        Ok(homework.clone())
    }

    fn list_for_patient(&self, patient: &str) -> Result<Vec<Homework>, AppError> {
        let records = lock(&self.records)?;
        Ok(records
            .items
            .iter()
            .filter(|h| h.patient == patient)
            .cloned()
            .collect())
    }

    fn toggle(&self, id: u64, patient: &str) -> Result<Option<bool>, AppError> {
        let mut records = lock(&self.records)?;
        Ok(records
            .items
            .iter_mut()
            .find(|h| h.id == id && h.patient == patient)
            .map(|h| {
                h.completed = !h.completed;
                h.completed
            }))
    }
}

#[derive(Debug, Default)]
pub struct InMemoryJournal {
    records: Mutex<Records<JournalEntry>>,
}

impl JournalRepository for InMemoryJournal {
    fn write(&self, patient: &str, content: &str) -> Result<JournalEntry, AppError> {
        let mut records = lock(&self.records)?;
        let entry = records.push_with(|id| JournalEntry {
            id,
            patient: patient.to_string(),
            content: content.to_string(),
            written_at: Utc::now(),
        });
        Ok(entry.clone())
    }

    fn list_for_patient(&self, patient: &str) -> Result<Vec<JournalEntry>, AppError> {
        let records = lock(&self.records)?;
        Ok(records
            .items
            .iter()
            .rev()
            .filter(|e| e.patient == patient)
            .cloned()
            .collect())
    }
}

/// The three patient-care stores, registered together as app data.
#[derive(Clone)]
pub struct CareStore {
    pub check_ins: Arc<dyn CheckInRepository>,
    pub homework: Arc<dyn HomeworkRepository>,
    pub journal: Arc<dyn JournalRepository>,
}

impl CareStore {
    pub fn in_memory() -> Self {
        CareStore {
            check_ins: Arc::new(InMemoryCheckIns::default()),
            homework: Arc::new(InMemoryHomework::default()),
            journal: Arc::new(InMemoryJournal::default()),
        }
    }
}
