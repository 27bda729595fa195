//! HTTP inbound adapter exposing the REST endpoints.

pub mod error;
pub mod geocode;
pub mod health;
pub mod parcels;
pub mod parcels_dto;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

use actix_web::{Scope, web};

pub use error::ApiResult;

/// The `/api/v1` scope with every versioned endpoint registered.
///
/// Callers wrap it with their session middleware.
pub fn api_scope() -> Scope {
    web::scope("/api/v1")
        .service(users::register)
        .service(users::login)
        .service(users::logout)
        .service(users::current_user)
        .service(parcels::list_parcels)
        .service(parcels::create_parcel)
        .service(parcels::get_parcel)
        .service(parcels::update_parcel)
        .service(parcels::delete_parcel)
        .service(geocode::geocode)
}
