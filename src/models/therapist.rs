use serde::Serialize;

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct Therapist {
    pub id: u32,
    pub name: String,
    pub specialty: String,
}

impl Therapist {
    pub fn new(id: u32, name: &str, specialty: &str) -> Self {
        Therapist {
            id,
            name: name.to_string(),
            specialty: specialty.to_string(),
        }
    }
}
