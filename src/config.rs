use actix_web::cookie::Key;
use std::env;
use thiserror::Error;

pub const DEFAULT_SECRET_KEY: &str = "dev-secret-key-change-in-production";
pub const DEFAULT_PORT: u16 = 5000;

// Key::derive_from panics on shorter master keys; checked here first.
const MIN_SECRET_KEY_BYTES: usize = 32;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("PORT must be a port number, got {0:?}")]
    InvalidPort(String),

    #[error("SECRET_KEY must be at least 32 bytes long, got {0}")]
    SecretKeyTooShort(usize),
}

pub struct AppConfig {
    pub secret_key: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret_key = lookup("SECRET_KEY").unwrap_or_else(|| DEFAULT_SECRET_KEY.to_string());
        if secret_key.len() < MIN_SECRET_KEY_BYTES {
            return Err(ConfigError::SecretKeyTooShort(secret_key.len()));
        }

        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };

        Ok(AppConfig { secret_key, port })
    }

    pub fn uses_default_secret(&self) -> bool {
        self.secret_key == DEFAULT_SECRET_KEY
    }

    /// Signing key for session cookies.
    pub fn session_key(&self) -> Key {
        Key::derive_from(self.secret_key.as_bytes())
    }
}
