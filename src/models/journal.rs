use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Serialize, Clone)]
pub struct JournalEntry {
    pub id: u64,
    pub patient: String,
    pub content: String,
    pub written_at: DateTime<Utc>,
}
