//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repository implementations only translate between Diesel rows and domain
//! types. Row structs (`models.rs`) and table definitions (`schema.rs`) stay
//! private to this module.
//!
//! # Example
//!
//! ```ignore
//! use parcel_backend::outbound::persistence::{DbPool, DieselParcelRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/parcels")).await?;
//! let repo = DieselParcelRepository::new(pool);
//! ```

mod diesel_basic_error_mapping;
mod diesel_parcel_repository;
mod diesel_user_repository;
mod geometry;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_parcel_repository::DieselParcelRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use geometry::GeometryError;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
