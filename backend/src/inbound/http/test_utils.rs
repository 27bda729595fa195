//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use mockable::DefaultClock;

use crate::domain::ports::{GeocodingQuery, PasswordHashError, PasswordHasher};
use crate::domain::{AccountService, ParcelService};
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::{InMemoryParcelRepository, InMemoryUserRepository};

pub const SESSION_COOKIE: &str = "session";

/// Session middleware with a fresh key and the `Secure` flag off.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name(SESSION_COOKIE.to_owned())
        .cookie_secure(false)
        .build()
}

/// Reversible stand-in for Argon2 so handler tests stay fast.
#[derive(Debug, Default)]
pub struct PlainPasswordHasher;

impl PasswordHasher for PlainPasswordHasher {
    fn hash(&self, password: &str) -> Result<String, PasswordHashError> {
        Ok(format!("plain:{password}"))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordHashError> {
        match hash.strip_prefix("plain:") {
            Some(stored) => Ok(stored == password),
            None => Err(PasswordHashError::malformed_hash("missing plain: prefix")),
        }
    }
}

/// Handler state over fresh in-memory stores and the given geocoder.
pub fn in_memory_state(geocoding: Arc<dyn GeocodingQuery>) -> HttpState {
    let accounts = Arc::new(AccountService::new(
        Arc::new(InMemoryUserRepository::new()),
        Arc::new(PlainPasswordHasher),
    ));
    let parcels = Arc::new(ParcelService::new(
        Arc::new(InMemoryParcelRepository::new()),
        Arc::new(DefaultClock),
    ));
    HttpState {
        login: accounts.clone(),
        registration: accounts.clone(),
        profile: accounts,
        parcels: parcels.clone(),
        parcels_query: parcels,
        geocoding,
    }
}

/// Application wired like production, minus tracing and metrics.
pub fn test_app(
    state: HttpState,
) -> actix_web::App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    actix_web::App::new()
        .app_data(actix_web::web::Data::new(state))
        .app_data(crate::inbound::http::validation::json_config())
        .service(crate::inbound::http::api_scope().wrap(test_session_middleware()))
}

/// The session cookie set by `res`, if any.
pub fn session_cookie(
    res: &actix_web::dev::ServiceResponse,
) -> Option<actix_web::cookie::Cookie<'static>> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE)
        .map(|cookie| cookie.into_owned())
}
