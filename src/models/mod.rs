pub mod appointment;
pub mod checkin;
pub mod homework;
pub mod journal;
pub mod session;
pub mod therapist;
