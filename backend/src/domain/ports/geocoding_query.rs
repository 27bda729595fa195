//! Driving port for address search.

use async_trait::async_trait;

use crate::domain::{Error, GeocodeCandidate, GeocodeQuery};

/// Use-case port consumed by the geocode HTTP handler.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GeocodingQuery: Send + Sync {
    /// Resolve a query. Blank queries return no candidates; upstream
    /// failures are reported as errors, never as an empty result.
    async fn search(&self, query: &GeocodeQuery) -> Result<Vec<GeocodeCandidate>, Error>;
}
