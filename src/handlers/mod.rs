pub mod care;
pub mod patient;
pub mod therapist;
