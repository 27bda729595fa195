//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod geocoding_query;
mod geocoding_source;
mod login_service;
mod parcel_command;
mod parcel_query;
mod parcel_repository;
mod password_hasher;
mod registration_service;
mod user_profile_query;
mod user_repository;

pub use geocoding_query::GeocodingQuery;
#[cfg(test)]
pub use geocoding_query::MockGeocodingQuery;
pub use geocoding_source::{GeocodingSource, GeocodingSourceError};
#[cfg(test)]
pub use geocoding_source::MockGeocodingSource;
pub use login_service::LoginService;
#[cfg(test)]
pub use login_service::MockLoginService;
pub use parcel_command::ParcelCommand;
#[cfg(test)]
pub use parcel_command::MockParcelCommand;
pub use parcel_query::ParcelQuery;
#[cfg(test)]
pub use parcel_query::MockParcelQuery;
#[cfg(test)]
pub use parcel_repository::MockParcelRepository;
pub use parcel_repository::{ParcelRepository, ParcelRepositoryError};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use registration_service::MockRegistrationService;
pub use registration_service::RegistrationService;
#[cfg(test)]
pub use user_profile_query::MockUserProfileQuery;
pub use user_profile_query::UserProfileQuery;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{StoredCredentials, UserPersistenceError, UserRepository};
