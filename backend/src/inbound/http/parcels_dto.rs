//! Parcel request and response bodies.
//!
//! Coordinates travel latitude-first as an open ring. Closing and reordering
//! into storage positions happens in the domain.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::parcel::{GeoPoint, Parcel, ParcelInput};
use crate::inbound::http::schemas::GeoPointSchema;

/// Request payload for creating or replacing a parcel.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ParcelRequestBody {
    #[schema(example = "North field")]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Open ring of at least four distinct points.
    #[schema(value_type = Vec<GeoPointSchema>, min_items = 4)]
    pub coordinates: Vec<GeoPoint>,
}

impl From<ParcelRequestBody> for ParcelInput {
    fn from(body: ParcelRequestBody) -> Self {
        Self {
            name: body.name,
            description: body.description,
            points: body.coordinates,
        }
    }
}

/// Response payload for a stored parcel.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ParcelResponse {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Points in submission order without the closing repeat.
    #[schema(value_type = Vec<GeoPointSchema>)]
    pub coordinates: Vec<GeoPoint>,
    /// RFC 3339 timestamp.
    pub created_at: String,
    /// RFC 3339 timestamp.
    pub updated_at: String,
}

impl From<&Parcel> for ParcelResponse {
    fn from(parcel: &Parcel) -> Self {
        Self {
            id: parcel.id().value(),
            name: parcel.name().to_owned(),
            description: parcel.description().map(str::to_owned),
            coordinates: parcel.open_points(),
            created_at: parcel.created_at().to_rfc3339(),
            updated_at: parcel.updated_at().to_rfc3339(),
        }
    }
}
