use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::AppError;

/// Self-reported scores run from 1 (lowest) to 5 (highest).
pub const SCORE_RANGE: std::ops::RangeInclusive<u8> = 1..=5;

/// A patient's periodic wellbeing check-in.
#[derive(Debug, Serialize, Clone)]
pub struct CheckIn {
    pub id: u64,
    pub patient: String,
    pub mood: u8,
    pub stress: u8,
    pub sleep: u8,
    pub notes: String,
    pub recorded_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewCheckIn {
    pub patient: String,
    pub mood: u8,
    pub stress: u8,
    pub sleep: u8,
    pub notes: String,
}

impl NewCheckIn {
    pub fn validate(&self) -> Result<(), AppError> {
        for (field, score) in [("mood", self.mood), ("stress", self.stress), ("sleep", self.sleep)] {
            if !SCORE_RANGE.contains(&score) {
                return Err(AppError::InvalidInput(format!(
                    "{field} must be between {} and {}, got {score}",
                    SCORE_RANGE.start(),
                    SCORE_RANGE.end()
                )));
            }
        }
        Ok(())
    }
}
