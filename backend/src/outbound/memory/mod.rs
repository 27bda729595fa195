//! Process-local adapters used when no database is configured.
//!
//! State lives behind a mutex and is lost on restart. Suitable for local
//! development and handler tests only.

mod parcel_repository;
mod user_repository;

pub use parcel_repository::InMemoryParcelRepository;
pub use user_repository::InMemoryUserRepository;
