pub mod health;
pub mod pages;
pub mod patient;
pub mod therapist;

#[cfg(test)]
mod tests;

use actix_web::http::header;
use actix_web::{HttpResponse, HttpResponseBuilder, web};

pub fn init(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/health").configure(health::init))
        .service(web::scope("/patient").configure(patient::init))
        .service(web::scope("/therapist").configure(therapist::init));
    pages::init(cfg);
}

/// 302 response pointing the browser at `location`.
fn redirect_to(location: &str) -> HttpResponseBuilder {
    let mut builder = HttpResponse::Found();
    builder.insert_header((header::LOCATION, location.to_string()));
    builder
}

fn redirect(location: &str) -> HttpResponse {
    redirect_to(location).finish()
}

fn html(page: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(page)
}
