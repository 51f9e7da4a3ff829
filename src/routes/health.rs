use actix_web::{HttpResponse, Responder, get, web};
use serde_json::json;

use crate::directory::Directory;

#[get("/ping")]
async fn ping() -> impl Responder {
    HttpResponse::Ok().body("pong")
}

/// Ready once the therapist directory is loaded and non-empty.
#[get("/ready")]
async fn ready(directory: web::Data<Directory>) -> impl Responder {
    let therapists = directory.list().len();
    if therapists == 0 {
        HttpResponse::ServiceUnavailable().json(json!({ "ready": false, "therapists": 0 }))
    } else {
        HttpResponse::Ok().json(json!({ "ready": true, "therapists": therapists }))
    }
}

pub fn init(cfg: &mut web::ServiceConfig) {
    cfg.service(ping).service(ready);
}
