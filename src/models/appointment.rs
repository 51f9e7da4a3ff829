use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of an appointment.
///
/// Therapists may submit any text as a status, so unknown values are kept
/// verbatim in `Other` instead of being rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AppointmentStatus {
    Scheduled,
    Confirmed,
    Cancelled,
    Completed,
    Other(String),
}

impl AppointmentStatus {
    /// Statuses offered in the therapist's update form.
    pub const KNOWN: [AppointmentStatus; 4] = [
        AppointmentStatus::Scheduled,
        AppointmentStatus::Confirmed,
        AppointmentStatus::Cancelled,
        AppointmentStatus::Completed,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            AppointmentStatus::Scheduled => "scheduled",
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::Cancelled => "cancelled",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Other(status) => status,
        }
    }
}

impl From<String> for AppointmentStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "scheduled" => AppointmentStatus::Scheduled,
            "confirmed" => AppointmentStatus::Confirmed,
            "cancelled" => AppointmentStatus::Cancelled,
            "completed" => AppointmentStatus::Completed,
            _ => AppointmentStatus::Other(value),
        }
    }
}

impl From<AppointmentStatus> for String {
    fn from(status: AppointmentStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Serialize, Clone)]
pub struct Appointment {
    pub id: u64,
    pub patient: String,
    pub therapist_id: u32,
    pub date: String,
    pub time: String,
    pub status: AppointmentStatus,
    pub booked_at: DateTime<Utc>,
}

/// Everything the caller supplies when booking; id, status and timestamp are
/// owned by the store.
#[derive(Debug, Clone)]
pub struct NewAppointment {
    pub patient: String,
    pub therapist_id: u32,
    pub date: String,
    pub time: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_statuses_parse_to_variants() {
        for status in AppointmentStatus::KNOWN {
            assert_eq!(AppointmentStatus::from(status.to_string()), status);
        }
    }

    #[test]
    fn free_text_status_is_kept_verbatim() {
        let status = AppointmentStatus::from("rescheduled by phone".to_string());
        assert_eq!(
            status,
            AppointmentStatus::Other("rescheduled by phone".to_string())
        );
        assert_eq!(status.as_str(), "rescheduled by phone");
    }

    #[test]
    fn status_serializes_as_plain_string() {
        let json = serde_json::to_string(&AppointmentStatus::Confirmed).unwrap();
        assert_eq!(json, "\"confirmed\"");
    }
}
