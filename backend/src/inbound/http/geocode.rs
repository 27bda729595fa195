//! Address search proxy.
//!
//! ```text
//! GET /api/v1/geocode?q=Kadikoy
//! ```
//!
//! Public endpoint. A blank query answers `[]` straight away; any upstream
//! failure surfaces as `502 upstream_failure`.

use std::collections::BTreeMap;

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{GeocodeCandidate, GeocodeQuery};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Query string for `GET /api/v1/geocode`.
#[derive(Debug, Deserialize, IntoParams)]
pub struct GeocodeParams {
    /// Free-text address; missing or blank yields an empty list.
    #[serde(default)]
    pub q: String,
}

/// One address candidate.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GeocodeCandidateResponse {
    pub place_id: i64,
    #[schema(example = "Kadıköy, İstanbul, Türkiye")]
    pub display_name: String,
    pub lat: f64,
    pub lon: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub importance: Option<f64>,
    /// `[south, north, west, east]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Vec<f64>>, min_items = 4, max_items = 4)]
    pub bounding_box: Option<[f64; 4]>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub address: BTreeMap<String, String>,
}

impl From<GeocodeCandidate> for GeocodeCandidateResponse {
    fn from(candidate: GeocodeCandidate) -> Self {
        Self {
            place_id: candidate.place_id,
            display_name: candidate.display_name,
            lat: candidate.lat,
            lon: candidate.lon,
            category: candidate.category,
            kind: candidate.kind,
            importance: candidate.importance,
            bounding_box: candidate.bounding_box,
            address: candidate.address,
        }
    }
}

/// Search addresses through the configured geocoder.
#[utoipa::path(
    get,
    path = "/api/v1/geocode",
    params(GeocodeParams),
    responses(
        (status = 200, description = "Candidates, possibly empty", body = [GeocodeCandidateResponse]),
        (status = 502, description = "Geocoder failed or timed out", body = ErrorSchema)
    ),
    tags = ["geocode"],
    operation_id = "geocode"
)]
#[get("/geocode")]
pub async fn geocode(
    state: web::Data<HttpState>,
    params: web::Query<GeocodeParams>,
) -> ApiResult<web::Json<Vec<GeocodeCandidateResponse>>> {
    let query = GeocodeQuery::new(&params.q);
    let candidates = state.geocoding.search(&query).await?;
    Ok(web::Json(
        candidates
            .into_iter()
            .map(GeocodeCandidateResponse::from)
            .collect(),
    ))
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::rstest;
    use serde_json::{Value, json};

    use super::*;
    use crate::domain::Error;
    use crate::domain::ports::MockGeocodingQuery;
    use crate::inbound::http::test_utils::{in_memory_state, test_app};

    fn kadikoy() -> GeocodeCandidate {
        GeocodeCandidate {
            place_id: 42,
            display_name: "Kadıköy".into(),
            lat: 40.99,
            lon: 29.02,
            kind: Some("suburb".into()),
            bounding_box: Some([40.9, 41.0, 29.0, 29.1]),
            ..GeocodeCandidate::default()
        }
    }

    #[actix_web::test]
    async fn returns_candidates_in_camel_case() {
        let mut geocoding = MockGeocodingQuery::new();
        geocoding
            .expect_search()
            .withf(|query| query.as_str() == "Kadikoy")
            .times(1)
            .returning(|_| Ok(vec![kadikoy()]));
        let app = actix_test::init_service(test_app(in_memory_state(Arc::new(geocoding)))).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/geocode?q=%20Kadikoy%20")
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body.pointer("/0/placeId"), Some(&json!(42)));
        assert_eq!(body.pointer("/0/type"), Some(&json!("suburb")));
        assert_eq!(
            body.pointer("/0/boundingBox"),
            Some(&json!([40.9, 41.0, 29.0, 29.1]))
        );
        assert!(body.pointer("/0/category").is_none());
    }

    #[rstest]
    #[case("/api/v1/geocode")]
    #[case("/api/v1/geocode?q=")]
    #[actix_web::test]
    async fn missing_query_reaches_service_as_blank(#[case] uri: &str) {
        let mut geocoding = MockGeocodingQuery::new();
        geocoding
            .expect_search()
            .withf(|query| query.is_blank())
            .returning(|_| Ok(Vec::new()));
        let app = actix_test::init_service(test_app(in_memory_state(Arc::new(geocoding)))).await;

        let res =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri(uri).to_request())
                .await;

        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body, json!([]));
    }

    #[actix_web::test]
    async fn upstream_failure_is_bad_gateway() {
        let mut geocoding = MockGeocodingQuery::new();
        geocoding.expect_search().returning(|_| {
            Err(Error::upstream_failure("geocoding upstream: 503")
                .with_details(json!({ "upstreamStatus": 503, "code": "upstream_status" })))
        });
        let app = actix_test::init_service(test_app(in_memory_state(Arc::new(geocoding)))).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/geocode?q=Ankara")
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::BAD_GATEWAY);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body.get("code"), Some(&json!("upstream_failure")));
        assert_eq!(body.pointer("/details/upstreamStatus"), Some(&json!(503)));
    }
}
