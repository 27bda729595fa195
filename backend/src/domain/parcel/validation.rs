//! Structural checks applied to parcel input before it is stored.

use super::coordinates::GeoPoint;

/// Minimum number of distinct vertices a parcel outline must have.
pub const MIN_VERTICES: usize = 4;
/// Maximum parcel name length in characters.
pub const NAME_MAX: usize = 200;

/// Reasons a parcel write is rejected.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParcelValidationError {
    /// Fewer than [`MIN_VERTICES`] distinct vertices were supplied.
    #[error("at least {min} coordinates are required, got {actual}")]
    TooFewPoints { min: usize, actual: usize },
    /// A latitude or longitude was NaN or infinite.
    #[error("coordinate {index} must contain finite numbers")]
    NonFiniteCoordinate { index: usize },
    /// Latitude outside [-90, 90].
    #[error("coordinate {index} latitude {value} is outside [-90, 90]")]
    LatitudeOutOfRange { index: usize, value: f64 },
    /// Longitude outside [-180, 180].
    #[error("coordinate {index} longitude {value} is outside [-180, 180]")]
    LongitudeOutOfRange { index: usize, value: f64 },
    /// Name was blank once trimmed.
    #[error("parcel name must not be empty")]
    EmptyName,
    /// Name longer than [`NAME_MAX`].
    #[error("parcel name must be at most {max} characters")]
    NameTooLong { max: usize },
}

/// Check a client-supplied open ring.
///
/// Only distinct positions count toward the minimum, compared exactly. A
/// trailing point equal to the first is the closure and adds nothing; a
/// repeated point anywhere else adds nothing either. Self-intersection and
/// winding order are not checked.
///
/// # Examples
/// ```
/// use parcel_backend::domain::parcel::{GeoPoint, ParcelValidationError, validate_points};
///
/// let triangle = [
///     GeoPoint::new(41.0, 29.0),
///     GeoPoint::new(41.0, 29.1),
///     GeoPoint::new(41.1, 29.1),
/// ];
/// assert_eq!(
///     validate_points(&triangle),
///     Err(ParcelValidationError::TooFewPoints { min: 4, actual: 3 })
/// );
/// ```
pub fn validate_points(points: &[GeoPoint]) -> Result<(), ParcelValidationError> {
    let vertices = distinct_vertex_count(points);
    if vertices < MIN_VERTICES {
        return Err(ParcelValidationError::TooFewPoints {
            min: MIN_VERTICES,
            actual: vertices,
        });
    }

    for (index, point) in points.iter().enumerate() {
        if !point.lat.is_finite() || !point.lon.is_finite() {
            return Err(ParcelValidationError::NonFiniteCoordinate { index });
        }
        if !(-90.0..=90.0).contains(&point.lat) {
            return Err(ParcelValidationError::LatitudeOutOfRange {
                index,
                value: point.lat,
            });
        }
        if !(-180.0..=180.0).contains(&point.lon) {
            return Err(ParcelValidationError::LongitudeOutOfRange {
                index,
                value: point.lon,
            });
        }
    }
    Ok(())
}

fn distinct_vertex_count(points: &[GeoPoint]) -> usize {
    let mut seen: Vec<GeoPoint> = Vec::with_capacity(points.len());
    for point in points {
        if !seen.contains(point) {
            seen.push(*point);
        }
    }
    seen.len()
}

/// Trim and check a parcel name.
pub fn validate_name(raw: &str) -> Result<String, ParcelValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ParcelValidationError::EmptyName);
    }
    if trimmed.chars().count() > NAME_MAX {
        return Err(ParcelValidationError::NameTooLong { max: NAME_MAX });
    }
    Ok(trimmed.to_owned())
}
