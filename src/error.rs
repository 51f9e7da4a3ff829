use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("therapist {0} not found")]
    TherapistNotFound(u32),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("record store unavailable: {0}")]
    Store(String),

    #[error("failed to render page: {0}")]
    Render(#[from] minijinja::Error),

    #[error("failed to build session cookie: {0}")]
    Session(String),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::TherapistNotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if self.status_code().is_server_error() {
            tracing::error!("{}", self);
            HttpResponse::build(self.status_code()).body("Internal server error")
        } else {
            HttpResponse::build(self.status_code()).body(self.to_string())
        }
    }
}
