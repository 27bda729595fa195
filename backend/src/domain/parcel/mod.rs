//! Parcel geometry and the parcel aggregate.
//!
//! Clients exchange open rings of latitude-first points. Everything stored
//! is a closed, longitude-first ring. [`coordinates`] converts between the
//! two and [`validation`] guards every write.

pub mod coordinates;
mod entity;
pub mod validation;

pub use coordinates::{GeoPoint, Position, is_closed, to_closed_ring, to_open_points};
pub use entity::{Parcel, ParcelContent, ParcelDraft, ParcelId, ParcelInput, PolygonRing};
pub use validation::{
    MIN_VERTICES, NAME_MAX, ParcelValidationError, validate_name, validate_points,
};

#[cfg(test)]
mod tests;
