use chrono::NaiveDate;
use serde::Serialize;

/// An exercise a therapist hands to a patient between sessions.
#[derive(Debug, Serialize, Clone)]
pub struct Homework {
    pub id: u64,
    pub patient: String,
    pub assigned_by: String,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub assigned_on: NaiveDate,
    pub due_on: Option<NaiveDate>,
}

#[derive(Debug, Clone)]
pub struct NewHomework {
    pub patient: String,
    pub assigned_by: String,
    pub title: String,
    pub description: String,
    pub due_on: Option<NaiveDate>,
}
