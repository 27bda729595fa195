//! Address search types shared by the geocoding port and its adapters.

use std::collections::BTreeMap;

/// Free-text address query.
///
/// The text is trimmed on construction; a blank query is representable so
/// callers can short-circuit without calling upstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeocodeQuery(String);

impl GeocodeQuery {
    /// Build a query from raw user input.
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().to_owned())
    }

    /// Whether there is nothing to search for.
    pub fn is_blank(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// One place returned by the geocoding service.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GeocodeCandidate {
    /// Upstream place identifier.
    pub place_id: i64,
    /// Human-readable label.
    pub display_name: String,
    /// Latitude in WGS84.
    pub lat: f64,
    /// Longitude in WGS84.
    pub lon: f64,
    /// Upstream category (for example `boundary` or `place`).
    pub category: Option<String>,
    /// Upstream type within the category.
    pub kind: Option<String>,
    /// Relevance score reported upstream.
    pub importance: Option<f64>,
    /// Bounding box as `[south, north, west, east]`.
    pub bounding_box: Option<[f64; 4]>,
    /// Structured address parts keyed by upstream field name.
    pub address: BTreeMap<String, String>,
}
