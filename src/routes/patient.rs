use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;

use super::{html, redirect};
use crate::directory::Directory;
use crate::error::AppError;
use crate::handlers::{care, patient};
use crate::models::appointment::NewAppointment;
use crate::models::checkin::NewCheckIn;
use crate::models::session::Role;
use crate::session::SessionContext;
use crate::store::{AppointmentRepository, CareStore};
use crate::views::Views;

#[derive(Debug, Deserialize)]
struct BookingForm {
    therapist_id: u32,
    date: String,
    time: String,
}

#[derive(Debug, Deserialize)]
struct CheckInForm {
    mood: u8,
    stress: u8,
    sleep: u8,
    #[serde(default)]
    notes: String,
}

#[derive(Debug, Deserialize)]
struct JournalForm {
    content: String,
}

#[get("/dashboard")]
async fn dashboard(
    session: SessionContext,
    directory: web::Data<Directory>,
    appointments: web::Data<dyn AppointmentRepository>,
    care_store: web::Data<CareStore>,
    views: web::Data<Views>,
) -> Result<HttpResponse, AppError> {
    let Some(name) = session.name_as(Role::Patient) else {
        return Ok(redirect("/"));
    };

    let page = patient::dashboard(
        &directory,
        appointments.get_ref(),
        &care_store,
        &views,
        name,
    )?;
    Ok(html(page))
}

#[post("/book")]
async fn book(
    session: SessionContext,
    form: web::Form<BookingForm>,
    directory: web::Data<Directory>,
    appointments: web::Data<dyn AppointmentRepository>,
) -> Result<HttpResponse, AppError> {
    // Any logged-in role may book; the session name is the patient.
    let Some(name) = session.name() else {
        return Ok(redirect("/"));
    };

    let BookingForm {
        therapist_id,
        date,
        time,
    } = form.into_inner();
    let new = NewAppointment {
        patient: name.to_string(),
        therapist_id,
        date,
        time,
    };

    patient::book(&directory, appointments.get_ref(), new)?;
    Ok(redirect(Role::Patient.dashboard_path()))
}

#[post("/checkin")]
async fn check_in(
    session: SessionContext,
    form: web::Form<CheckInForm>,
    care_store: web::Data<CareStore>,
) -> Result<HttpResponse, AppError> {
    let Some(name) = session.name_as(Role::Patient) else {
        return Ok(redirect("/"));
    };

    let CheckInForm {
        mood,
        stress,
        sleep,
        notes,
    } = form.into_inner();
    care::record_check_in(
        &care_store,
        NewCheckIn {
            patient: name.to_string(),
            mood,
            stress,
            sleep,
            notes,
        },
    )?;
    Ok(redirect(Role::Patient.dashboard_path()))
}

#[post("/journal")]
async fn journal(
    session: SessionContext,
    form: web::Form<JournalForm>,
    care_store: web::Data<CareStore>,
) -> Result<HttpResponse, AppError> {
    let Some(name) = session.name_as(Role::Patient) else {
        return Ok(redirect("/"));
    };

    care::write_journal(&care_store, name, &form.content)?;
    Ok(redirect(Role::Patient.dashboard_path()))
}

#[post("/homework/{homework_id}/toggle")]
async fn toggle_homework(
    session: SessionContext,
    path: web::Path<u64>,
    care_store: web::Data<CareStore>,
) -> Result<HttpResponse, AppError> {
    let Some(name) = session.name_as(Role::Patient) else {
        return Ok(redirect("/"));
    };

    care::toggle_homework(&care_store, path.into_inner(), name)?;
    Ok(redirect(Role::Patient.dashboard_path()))
}

pub fn init(cfg: &mut web::ServiceConfig) {
    cfg.service(dashboard)
        .service(book)
        .service(check_in)
        .service(journal)
        .service(toggle_homework);
}
