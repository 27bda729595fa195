//! Domain primitives, aggregates and services.
//!
//! Purpose: define strongly typed domain entities used by the API and
//! persistence layers, and the services that implement the driving ports.
//! Adapters depend on this module; it depends on none of them.
//!
//! Public surface:
//! - Error / ErrorCode: API error payload and stable identifier.
//! - TraceId: per-request correlation id.
//! - parcel: coordinate normalisation, polygon validation, the parcel
//!   aggregate.
//! - User and the login/registration value types.
//! - ParcelService, AccountService, GeocodingService.

mod account_service;
pub mod auth;
pub mod error;
pub mod geocoding;
mod geocoding_service;
pub mod parcel;
mod parcel_service;
pub mod ports;
pub mod trace_id;
pub mod user;

pub use self::account_service::AccountService;
pub use self::auth::{
    LoginCredentials, LoginValidationError, PASSWORD_MIN, RegistrationDetails,
    RegistrationValidationError,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::geocoding::{GeocodeCandidate, GeocodeQuery};
pub use self::geocoding_service::GeocodingService;
pub use self::parcel_service::ParcelService;
pub use self::trace_id::TraceId;
pub use self::user::{EmailAddress, User, UserId, UserValidationError, Username};
