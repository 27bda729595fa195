//! OpenAPI schema definitions for domain types.
//!
//! Domain types do not derive `ToSchema`; these wrappers mirror their wire
//! shape and register under the domain type's path.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Authentication failed or is missing.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    #[schema(rename = "forbidden")]
    Forbidden,
    /// The parcel does not exist or belongs to another user.
    #[schema(rename = "not_found")]
    NotFound,
    /// Username or email already registered.
    #[schema(rename = "conflict")]
    Conflict,
    /// The geocoding service failed, timed out or answered garbage.
    #[schema(rename = "upstream_failure")]
    UpstreamFailure,
    /// The database is unreachable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "not_found")]
    code: ErrorCodeSchema,
    /// Human-readable message.
    #[schema(example = "parcel not found")]
    message: String,
    /// Correlation identifier echoed in the `trace-id` header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Field-level context such as `field`, `code` or `upstreamStatus`.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::parcel::GeoPoint`].
#[derive(ToSchema)]
#[schema(as = crate::domain::parcel::GeoPoint)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct GeoPointSchema {
    /// Latitude in decimal degrees, within [-90, 90].
    #[schema(example = 41.0)]
    lat: f64,
    /// Longitude in decimal degrees, within [-180, 180].
    #[schema(example = 29.0)]
    lon: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::PartialSchema;

    fn schema_to_json<T: PartialSchema>() -> String {
        serde_json::to_string(&T::schema()).expect("schema serialises to JSON")
    }

    #[rstest]
    #[case("invalid_request")]
    #[case("unauthorized")]
    #[case("not_found")]
    #[case("conflict")]
    #[case("upstream_failure")]
    #[case("service_unavailable")]
    #[case("internal_error")]
    fn error_code_schema_lists_variant(#[case] variant: &str) {
        assert!(schema_to_json::<ErrorCodeSchema>().contains(variant));
    }

    #[test]
    fn error_schema_uses_camel_case_trace_id() {
        let schema_json = schema_to_json::<ErrorSchema>();
        assert_eq!(ErrorSchema::name(), "crate.domain.Error");
        assert!(schema_json.contains("traceId"));
        assert!(!schema_json.contains("trace_id"));
    }

    #[test]
    fn geo_point_schema_is_latitude_first() {
        let schema_json = schema_to_json::<GeoPointSchema>();
        assert_eq!(GeoPointSchema::name(), "crate.domain.parcel.GeoPoint");
        assert!(schema_json.contains("lat"));
        assert!(schema_json.contains("lon"));
    }
}
