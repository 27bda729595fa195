//! Nominatim outbound adapters.
//!
//! A thin HTTP implementation of the `GeocodingSource` port.

mod dto;
mod http_source;

pub use http_source::{NominatimHttpSource, NominatimIdentity, NominatimQueryOptions};
