mod config;
mod directory;
mod error;
mod handlers;
mod models;
mod routes;
mod session;
mod state;
mod store;
mod views;

use actix_web::middleware::Logger;
use actix_web::{App, HttpServer};
use anyhow::Context;
use dotenv::dotenv;
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;
use crate::state::AppState;
use crate::views::Views;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let env_file = dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    if let Err(e) = env_file {
        tracing::debug!("No .env file loaded: {}", e);
    }

    let config = AppConfig::from_env().context("invalid configuration")?;
    if config.uses_default_secret() {
        tracing::warn!("SECRET_KEY not set, signing sessions with the built-in development key");
    }

    let views = Views::new().context("failed to load page templates")?;
    let state = AppState::new(config.session_key(), views);

    tracing::info!("Listening on 0.0.0.0:{}", config.port);
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .configure(|cfg| state.configure(cfg))
            .configure(routes::init)
    })
    .bind(("0.0.0.0", config.port))?
    .run()
    .await?;

    Ok(())
}
