use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;

use super::{html, redirect};
use crate::directory::Directory;
use crate::error::AppError;
use crate::handlers::{care, therapist};
use crate::models::homework::NewHomework;
use crate::models::session::Role;
use crate::session::SessionContext;
use crate::store::{AppointmentRepository, CareStore};
use crate::views::Views;

#[derive(Debug, Deserialize)]
struct StatusForm {
    status: String,
}

#[derive(Debug, Deserialize)]
struct HomeworkForm {
    patient: String,
    title: String,
    #[serde(default)]
    description: String,
    due_date: Option<String>,
}

#[get("/dashboard")]
async fn dashboard(
    session: SessionContext,
    directory: web::Data<Directory>,
    appointments: web::Data<dyn AppointmentRepository>,
    care_store: web::Data<CareStore>,
    views: web::Data<Views>,
) -> Result<HttpResponse, AppError> {
    let Some(name) = session.name_as(Role::Therapist) else {
        return Ok(redirect("/"));
    };

    let page = therapist::dashboard(
        &directory,
        appointments.get_ref(),
        &care_store,
        &views,
        name,
    )?;
    Ok(html(page))
}

#[post("/update/{apt_id}")]
async fn update(
    path: web::Path<u64>,
    form: web::Form<StatusForm>,
    appointments: web::Data<dyn AppointmentRepository>,
) -> Result<HttpResponse, AppError> {
    let apt_id = path.into_inner();
    therapist::update_status(appointments.get_ref(), apt_id, form.into_inner().status.into())?;
    Ok(redirect(Role::Therapist.dashboard_path()))
}

#[post("/homework")]
async fn assign_homework(
    session: SessionContext,
    form: web::Form<HomeworkForm>,
    care_store: web::Data<CareStore>,
) -> Result<HttpResponse, AppError> {
    let Some(name) = session.name_as(Role::Therapist) else {
        return Ok(redirect("/"));
    };

    let HomeworkForm {
        patient,
        title,
        description,
        due_date,
    } = form.into_inner();
    let due_on = care::parse_due_date(due_date.as_deref())?;
    care::assign_homework(
        &care_store,
        NewHomework {
            patient,
            assigned_by: name.to_string(),
            title,
            description,
            due_on,
        },
    )?;
    Ok(redirect(Role::Therapist.dashboard_path()))
}

pub fn init(cfg: &mut web::ServiceConfig) {
    cfg.service(dashboard).service(update).service(assign_homework);
}
