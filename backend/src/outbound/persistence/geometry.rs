//! GeoJSON encoding for the `parcels.geometry` column.
//!
//! Rings are stored as an RFC 7946 `Polygon` with a single exterior ring:
//! `{"type":"Polygon","coordinates":[[[lon, lat], ...]]}`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::parcel::{PolygonRing, Position};

const POLYGON: &str = "Polygon";

/// Failures while decoding a stored geometry.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryError {
    #[error("geometry is not valid GeoJSON: {0}")]
    Malformed(String),
    #[error("expected a Polygon geometry, found {0}")]
    WrongType(String),
    #[error("polygon has no exterior ring")]
    MissingRing,
    #[error("position {index} must have at least two coordinates")]
    ShortPosition { index: usize },
}

#[derive(Debug, Serialize, Deserialize)]
struct PolygonGeometry {
    #[serde(rename = "type")]
    kind: String,
    coordinates: Vec<Vec<Vec<f64>>>,
}

/// Encode a ring as a GeoJSON polygon value.
pub(crate) fn encode_ring(ring: &PolygonRing) -> Value {
    let exterior: Vec<Value> = ring
        .positions()
        .iter()
        .map(|position| serde_json::json!([position.lon, position.lat]))
        .collect();
    serde_json::json!({
        "type": POLYGON,
        "coordinates": [exterior],
    })
}

/// Decode a stored GeoJSON polygon into its exterior ring.
///
/// Extra ordinates (such as altitude) are ignored. The ring is returned as
/// stored, closed or not.
pub(crate) fn decode_ring(value: Value) -> Result<PolygonRing, GeometryError> {
    let geometry: PolygonGeometry =
        serde_json::from_value(value).map_err(|err| GeometryError::Malformed(err.to_string()))?;
    if geometry.kind != POLYGON {
        return Err(GeometryError::WrongType(geometry.kind));
    }
    let exterior = geometry
        .coordinates
        .into_iter()
        .next()
        .ok_or(GeometryError::MissingRing)?;
    let positions = exterior
        .into_iter()
        .enumerate()
        .map(|(index, ordinates)| match ordinates.as_slice() {
            [lon, lat, ..] => Ok(Position::new(*lon, *lat)),
            _ => Err(GeometryError::ShortPosition { index }),
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(PolygonRing::from_stored(positions))
}
