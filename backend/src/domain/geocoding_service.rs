//! Geocoding domain service.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::warn;

use crate::domain::ports::{GeocodingQuery, GeocodingSource, GeocodingSourceError};
use crate::domain::{Error, GeocodeCandidate, GeocodeQuery};

fn map_source_error(error: GeocodingSourceError) -> Error {
    warn!(error = %error, "geocoding lookup failed");
    let details = match &error {
        GeocodingSourceError::UpstreamStatus { status, .. } => {
            json!({ "upstreamStatus": status, "code": "upstream_status" })
        }
        GeocodingSourceError::Timeout { .. } => json!({ "code": "upstream_timeout" }),
        GeocodingSourceError::Transport { message } => {
            json!({ "code": "upstream_transport", "reason": message })
        }
        GeocodingSourceError::Decode { message } => {
            json!({ "code": "upstream_decode", "reason": message })
        }
    };
    let message = match &error {
        GeocodingSourceError::UpstreamStatus { status, .. } => format!("geocoding upstream: {status}"),
        _ => "geocoding upstream unavailable".to_owned(),
    };
    Error::upstream_failure(message).with_details(details)
}

/// Geocoding service implementing [`GeocodingQuery`].
#[derive(Clone)]
pub struct GeocodingService<S> {
    source: Arc<S>,
}

impl<S> GeocodingService<S> {
    /// Create a new service over a geocoding source.
    pub fn new(source: Arc<S>) -> Self {
        Self { source }
    }
}

#[async_trait]
impl<S> GeocodingQuery for GeocodingService<S>
where
    S: GeocodingSource,
{
    async fn search(&self, query: &GeocodeQuery) -> Result<Vec<GeocodeCandidate>, Error> {
        if query.is_blank() {
            return Ok(Vec::new());
        }
        self.source.search(query).await.map_err(map_source_error)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::MockGeocodingSource;
    use rstest::rstest;

    fn make_service(source: MockGeocodingSource) -> GeocodingService<MockGeocodingSource> {
        GeocodingService::new(Arc::new(source))
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[tokio::test]
    async fn blank_query_skips_upstream(#[case] raw: &str) {
        let mut source = MockGeocodingSource::new();
        source.expect_search().times(0);

        let results = make_service(source)
            .search(&GeocodeQuery::new(raw))
            .await
            .expect("blank query succeeds");

        assert!(results.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn candidates_are_passed_through() {
        let mut source = MockGeocodingSource::new();
        source
            .expect_search()
            .times(1)
            .withf(|query| query.as_str() == "Kadikoy")
            .returning(|_| {
                Ok(vec![GeocodeCandidate {
                    place_id: 1,
                    display_name: "Kadikoy, Istanbul".to_owned(),
                    lat: 40.99,
                    lon: 29.03,
                    ..GeocodeCandidate::default()
                }])
            });

        let results = make_service(source)
            .search(&GeocodeQuery::new(" Kadikoy "))
            .await
            .expect("search succeeds");

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].display_name, "Kadikoy, Istanbul");
    }

    #[rstest]
    #[tokio::test]
    async fn upstream_status_is_a_failure_not_an_empty_result() {
        let mut source = MockGeocodingSource::new();
        source
            .expect_search()
            .times(1)
            .returning(|_| Err(GeocodingSourceError::upstream_status(503_u16, "busy")));

        let err = make_service(source)
            .search(&GeocodeQuery::new("Ankara"))
            .await
            .expect_err("upstream failure");

        assert_eq!(err.code(), ErrorCode::UpstreamFailure);
        assert_eq!(err.message(), "geocoding upstream: 503");
        assert_eq!(err.details().expect("details")["upstreamStatus"], 503);
    }

    #[rstest]
    #[case(GeocodingSourceError::timeout("20s elapsed"), "upstream_timeout")]
    #[case(GeocodingSourceError::transport("connection refused"), "upstream_transport")]
    #[case(GeocodingSourceError::decode("expected array"), "upstream_decode")]
    #[tokio::test]
    async fn other_failures_carry_a_reason_code(
        #[case] failure: GeocodingSourceError,
        #[case] code: &str,
    ) {
        let mut source = MockGeocodingSource::new();
        source
            .expect_search()
            .times(1)
            .return_once(move |_| Err(failure));

        let err = make_service(source)
            .search(&GeocodeQuery::new("Izmir"))
            .await
            .expect_err("upstream failure");

        assert_eq!(err.code(), ErrorCode::UpstreamFailure);
        assert_eq!(err.details().expect("details")["code"], code);
    }
}
