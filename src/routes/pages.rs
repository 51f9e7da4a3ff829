use actix_web::http::header;
use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;
use tracing::info;

use super::{html, redirect_to};
use crate::error::AppError;
use crate::models::session::{Role, SessionData};
use crate::session::{SessionKey, login_cookie, logout_cookie};
use crate::views::Views;

#[derive(Debug, Deserialize)]
struct LoginForm {
    role: String,
    name: String,
}

#[get("/")]
async fn index(views: web::Data<Views>) -> Result<HttpResponse, AppError> {
    Ok(html(views.landing()?))
}

#[post("/login")]
async fn login(
    form: web::Form<LoginForm>,
    key: web::Data<SessionKey>,
) -> Result<HttpResponse, AppError> {
    let LoginForm { role, name } = form.into_inner();
    let role = Role::from_form(&role);
    let cookie = login_cookie(&key, &SessionData::new(role, name)?)?;

    info!("Session started as {:?}", role);
    // Percent-encoded so names containing `;` survive the Cookie header.
    Ok(redirect_to(role.dashboard_path())
        .append_header((header::SET_COOKIE, cookie.encoded().to_string()))
        .finish())
}

#[get("/logout")]
async fn logout() -> HttpResponse {
    redirect_to("/").cookie(logout_cookie()).finish()
}

pub fn init(cfg: &mut web::ServiceConfig) {
    cfg.service(index).service(login).service(logout);
}
