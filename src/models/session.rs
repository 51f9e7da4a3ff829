use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Longest display name accepted at login. The name travels in the session
/// cookie, which browsers drop silently past roughly 4 KB.
pub const MAX_NAME_CHARS: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Patient,
    Therapist,
}

impl Role {
    /// Parses the role picked on the landing page.
    ///
    /// Only `"patient"` selects the patient role; every other value,
    /// including an empty one, selects the therapist role.
    pub fn from_form(value: &str) -> Self {
        if value == "patient" {
            Role::Patient
        } else {
            Role::Therapist
        }
    }

    pub fn dashboard_path(self) -> &'static str {
        match self {
            Role::Patient => "/patient/dashboard",
            Role::Therapist => "/therapist/dashboard",
        }
    }
}

/// Identity carried by the session cookie.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionData {
    pub role: Role,
    pub name: String,
}

impl SessionData {
    pub fn new(role: Role, name: String) -> Result<Self, AppError> {
        let chars = name.chars().count();
        if chars > MAX_NAME_CHARS {
            return Err(AppError::InvalidInput(format!(
                "name must be at most {MAX_NAME_CHARS} characters, got {chars}"
            )));
        }
        Ok(SessionData { role, name })
    }
}
