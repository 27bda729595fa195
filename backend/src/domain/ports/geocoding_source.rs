//! Driven port for an external address search service.

use async_trait::async_trait;

use crate::domain::{GeocodeCandidate, GeocodeQuery};

use super::define_port_error;

define_port_error! {
    /// Errors surfaced while calling the geocoding service.
    pub enum GeocodingSourceError {
        /// Network transport failed before receiving a response.
        Transport { message: String } =>
            "geocoding transport failed: {message}",
        /// The call exceeded the configured timeout.
        Timeout { message: String } =>
            "geocoding timeout: {message}",
        /// Upstream answered with a non-success status.
        UpstreamStatus { status: u16, message: String } =>
            "geocoding upstream returned {status}: {message}",
        /// Upstream response could not be decoded.
        Decode { message: String } =>
            "geocoding response decode failed: {message}",
    }
}

/// Port for resolving free text into candidate places.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GeocodingSource: Send + Sync {
    /// Search for places matching a non-blank query.
    async fn search(
        &self,
        query: &GeocodeQuery,
    ) -> Result<Vec<GeocodeCandidate>, GeocodingSourceError>;
}
