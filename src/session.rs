use actix_web::cookie::{Cookie, CookieJar, Key, SameSite};
use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest, web};
use std::future::{Ready, ready};

use crate::error::AppError;
use crate::models::session::{Role, SessionData};

pub const SESSION_COOKIE: &str = "session";

/// Key used to sign and verify the session cookie.
#[derive(Clone)]
pub struct SessionKey(Key);

impl SessionKey {
    pub fn new(key: Key) -> Self {
        SessionKey(key)
    }
}

/// The caller's session, read from the signed cookie on every request.
///
/// Missing, unsigned or unreadable cookies all yield an empty session.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    data: Option<SessionData>,
}

impl SessionContext {
    pub fn current(&self) -> Option<&SessionData> {
        self.data.as_ref()
    }

    pub fn name(&self) -> Option<&str> {
        self.current().map(|data| data.name.as_str())
    }

    /// Name of the session holder if they are logged in as `role`.
    pub fn name_as(&self, role: Role) -> Option<&str> {
        self.current()
            .filter(|data| data.role == role)
            .map(|data| data.name.as_str())
    }

    fn read(req: &HttpRequest, key: &SessionKey) -> Self {
        let mut jar = CookieJar::new();
        if let Some(cookie) = req.cookie(SESSION_COOKIE) {
            jar.add_original(cookie);
        }

        let data = jar
            .signed(&key.0)
            .get(SESSION_COOKIE)
            .and_then(|cookie| serde_json::from_str::<SessionData>(cookie.value()).ok());

        SessionContext { data }
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let session = match req.app_data::<web::Data<SessionKey>>() {
            Some(key) => SessionContext::read(req, key),
            None => {
                tracing::warn!("session key not configured, treating request as anonymous");
                SessionContext::default()
            }
        };
        ready(Ok(session))
    }
}

/// Builds the signed cookie that establishes `data` as the session.
pub fn login_cookie(key: &SessionKey, data: &SessionData) -> Result<Cookie<'static>, AppError> {
    let payload = serde_json::to_string(data).map_err(|e| AppError::Session(e.to_string()))?;
    let cookie = Cookie::build(SESSION_COOKIE, payload)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .finish();

    let mut jar = CookieJar::new();
    jar.signed_mut(&key.0).add(cookie);
    jar.get(SESSION_COOKIE)
        .cloned()
        .ok_or_else(|| AppError::Session("signed cookie missing from jar".to_string()))
}

/// Cookie that clears the session in the browser.
pub fn logout_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::build(SESSION_COOKIE, "").path("/").finish();
    cookie.make_removal();
    cookie
}
