use once_cell::sync::Lazy;
use std::sync::Arc;

use crate::models::therapist::Therapist;

static SEED: Lazy<Vec<Therapist>> = Lazy::new(|| {
    vec![
        Therapist::new(1, "Dr. Sarah Johnson", "Cognitive Behavioral Therapy"),
        Therapist::new(2, "Dr. Michael Chen", "Family Therapy"),
        Therapist::new(3, "Dr. Emily Rodriguez", "Trauma Therapy"),
    ]
});

/// Read-only list of therapists available for booking.
#[derive(Debug, Clone)]
pub struct Directory {
    therapists: Arc<Vec<Therapist>>,
}

impl Directory {
    pub fn new(therapists: Vec<Therapist>) -> Self {
        Directory {
            therapists: Arc::new(therapists),
        }
    }

    pub fn seeded() -> Self {
        Self::new(SEED.clone())
    }

    pub fn list(&self) -> &[Therapist] {
        &self.therapists
    }

    pub fn find_by_id(&self, id: u32) -> Option<&Therapist> {
        self.therapists.iter().find(|t| t.id == id)
    }

    /// Ids of every therapist whose display name is exactly `name`.
    pub fn ids_named(&self, name: &str) -> Vec<u32> {
        self.therapists
            .iter()
            .filter(|t| t.name == name)
            .map(|t| t.id)
            .collect()
    }
}
