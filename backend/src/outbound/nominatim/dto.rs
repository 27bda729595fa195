//! DTOs for decoding Nominatim `format=json` search results.
//!
//! Nominatim encodes coordinates and bounding boxes as strings. They are
//! parsed here so the domain only sees numbers.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::domain::GeocodeCandidate;

#[derive(Debug, Deserialize)]
pub(super) struct PlaceDto {
    pub(super) place_id: i64,
    pub(super) display_name: String,
    pub(super) lat: String,
    pub(super) lon: String,
    #[serde(default, rename = "class")]
    pub(super) category: Option<String>,
    #[serde(default, rename = "type")]
    pub(super) kind: Option<String>,
    #[serde(default)]
    pub(super) importance: Option<f64>,
    #[serde(default, rename = "boundingbox")]
    pub(super) bounding_box: Option<Vec<String>>,
    #[serde(default)]
    pub(super) address: BTreeMap<String, String>,
}

fn parse_coordinate(place_id: i64, field: &str, raw: &str) -> Result<f64, String> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| format!("place {place_id} has invalid {field} {raw:?}"))
}

impl PlaceDto {
    pub(super) fn into_domain(self) -> Result<GeocodeCandidate, String> {
        let lat = parse_coordinate(self.place_id, "lat", &self.lat)?;
        let lon = parse_coordinate(self.place_id, "lon", &self.lon)?;
        let bounding_box = match self.bounding_box {
            Some(parts) if parts.len() == 4 => {
                let mut values = [0.0_f64; 4];
                for (slot, raw) in values.iter_mut().zip(&parts) {
                    *slot = parse_coordinate(self.place_id, "boundingbox", raw)?;
                }
                Some(values)
            }
            _ => None,
        };

        Ok(GeocodeCandidate {
            place_id: self.place_id,
            display_name: self.display_name,
            lat,
            lon,
            category: self.category,
            kind: self.kind,
            importance: self.importance,
            bounding_box,
            address: self.address,
        })
    }
}

pub(super) fn into_domain_candidates(
    places: Vec<PlaceDto>,
) -> Result<Vec<GeocodeCandidate>, String> {
    places.into_iter().map(PlaceDto::into_domain).collect()
}
