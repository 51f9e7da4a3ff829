use chrono::{DateTime, Utc};
use minijinja::{Environment, context};
use serde::Serialize;

use crate::directory::Directory;
use crate::error::AppError;
use crate::handlers::care::CareRecords;
use crate::models::appointment::{Appointment, AppointmentStatus};
use crate::models::therapist::Therapist;

const UNKNOWN_THERAPIST: &str = "Unknown therapist";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M UTC";

/// `when` template filter: renders a serialized UTC timestamp for people.
fn when(value: String) -> String {
    match value.parse::<DateTime<Utc>>() {
        Ok(at) => at.format(TIMESTAMP_FORMAT).to_string(),
        Err(_) => value,
    }
}

/// An appointment as shown on a dashboard, with the therapist resolved to a name.
#[derive(Debug, Serialize)]
pub struct AppointmentRow {
    pub id: u64,
    pub patient: String,
    pub therapist: String,
    pub date: String,
    pub time: String,
    pub status: String,
    pub booked_at: String,
}

impl AppointmentRow {
    pub fn resolve(appointment: &Appointment, directory: &Directory) -> Self {
        let therapist = directory
            .find_by_id(appointment.therapist_id)
            .map(|t| t.name.clone())
            .unwrap_or_else(|| UNKNOWN_THERAPIST.to_string());

        AppointmentRow {
            id: appointment.id,
            patient: appointment.patient.clone(),
            therapist,
            date: appointment.date.clone(),
            time: appointment.time.clone(),
            status: appointment.status.to_string(),
            booked_at: appointment.booked_at.format(TIMESTAMP_FORMAT).to_string(),
        }
    }
}

pub struct Views {
    env: Environment<'static>,
}

impl Views {
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.add_filter("when", when);
        env.add_template("base.html", include_str!("../templates/base.html"))?;
        env.add_template("index.html", include_str!("../templates/index.html"))?;
        env.add_template(
            "partials/care_records.html",
            include_str!("../templates/partials/care_records.html"),
        )?;
        env.add_template(
            "patient_dashboard.html",
            include_str!("../templates/patient_dashboard.html"),
        )?;
        env.add_template(
            "therapist_dashboard.html",
            include_str!("../templates/therapist_dashboard.html"),
        )?;
        Ok(Views { env })
    }

    pub fn landing(&self) -> Result<String, AppError> {
        Ok(self.env.get_template("index.html")?.render(context! {})?)
    }

    pub fn patient_dashboard(
        &self,
        name: &str,
        therapists: &[Therapist],
        appointments: &[AppointmentRow],
        records: &CareRecords,
    ) -> Result<String, AppError> {
        let page = self.env.get_template("patient_dashboard.html")?.render(context! {
            name,
            therapists,
            appointments,
            records,
        })?;
        Ok(page)
    }

    pub fn therapist_dashboard(
        &self,
        name: &str,
        appointments: &[AppointmentRow],
        patients: &[CareRecords],
    ) -> Result<String, AppError> {
        let statuses: Vec<&str> = AppointmentStatus::KNOWN.iter().map(|s| s.as_str()).collect();
        let page = self.env.get_template("therapist_dashboard.html")?.render(context! {
            name,
            appointments,
            statuses,
            patients,
        })?;
        Ok(page)
    }
}
