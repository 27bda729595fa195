//! Parcel backend library.
//!
//! Hexagonal layout: [`domain`] holds the parcel geometry rules and services,
//! [`inbound`] adapts HTTP onto the domain ports, and [`outbound`] implements
//! the driven ports (PostgreSQL, in-memory stores, Argon2, Nominatim).

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
