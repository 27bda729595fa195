//! Conversion between client points and stored polygon rings.
//!
//! Clients speak latitude-first and send an open ring. Storage follows
//! GeoJSON: longitude-first with the first position repeated at the end.
//! Both conversions are pure and return fresh vectors.

use serde::{Deserialize, Serialize};

/// A WGS84 point in client order (latitude, longitude).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in decimal degrees.
    pub lat: f64,
    /// Longitude in decimal degrees.
    pub lon: f64,
}

impl GeoPoint {
    /// Construct a point from latitude and longitude.
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// A WGS84 position in storage order (longitude, latitude).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    /// Longitude in decimal degrees.
    pub lon: f64,
    /// Latitude in decimal degrees.
    pub lat: f64,
}

impl Position {
    /// Construct a position from longitude and latitude.
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

impl From<GeoPoint> for Position {
    fn from(point: GeoPoint) -> Self {
        Self::new(point.lon, point.lat)
    }
}

impl From<Position> for GeoPoint {
    fn from(position: Position) -> Self {
        Self::new(position.lat, position.lon)
    }
}

/// Reorder client points into storage positions and close the ring.
///
/// The first position is appended only when the last one is not already
/// equal to it. Equality is exact on both components.
///
/// # Examples
/// ```
/// use parcel_backend::domain::parcel::{GeoPoint, Position, to_closed_ring};
///
/// let ring = to_closed_ring(&[
///     GeoPoint::new(41.0, 29.0),
///     GeoPoint::new(41.0, 29.1),
///     GeoPoint::new(41.1, 29.1),
///     GeoPoint::new(41.1, 29.0),
/// ]);
/// assert_eq!(ring.len(), 5);
/// assert_eq!(ring.last(), Some(&Position::new(29.0, 41.0)));
/// ```
pub fn to_closed_ring(points: &[GeoPoint]) -> Vec<Position> {
    let mut ring: Vec<Position> = points.iter().copied().map(Position::from).collect();
    match (ring.first().copied(), ring.last().copied()) {
        (Some(first), Some(last)) if first != last => ring.push(first),
        _ => {}
    }
    ring
}

/// Reorder stored positions back into client points, dropping the closure.
///
/// The final position is dropped only when it equals the first, so an
/// unclosed legacy ring comes back complete.
pub fn to_open_points(ring: &[Position]) -> Vec<GeoPoint> {
    let keep = if is_closed(ring) {
        ring.len().saturating_sub(1)
    } else {
        ring.len()
    };
    ring.iter().take(keep).copied().map(GeoPoint::from).collect()
}

/// Whether a ring of at least two positions ends where it starts.
pub fn is_closed(ring: &[Position]) -> bool {
    match (ring.first(), ring.last()) {
        (Some(first), Some(last)) => ring.len() > 1 && first == last,
        _ => false,
    }
}
