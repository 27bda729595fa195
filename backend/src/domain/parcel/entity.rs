//! Parcel aggregate and its validated building blocks.

use std::fmt;

use chrono::{DateTime, Utc};

use super::coordinates::{GeoPoint, Position, is_closed, to_closed_ring, to_open_points};
use super::validation::{ParcelValidationError, validate_name, validate_points};
use crate::domain::UserId;

/// Store-assigned parcel identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParcelId(i64);

impl ParcelId {
    /// Wrap a raw identifier.
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Raw identifier value.
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for ParcelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Closed exterior ring in storage order.
///
/// ## Invariants
/// - Rings built from client input are closed and carry at least four
///   distinct vertices.
/// - Rings loaded from storage are taken as stored; a legacy ring that was
///   never closed stays unclosed so it can be returned in full.
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonRing(Vec<Position>);

impl PolygonRing {
    /// Validate client points and close them into a ring.
    pub fn from_points(points: &[GeoPoint]) -> Result<Self, ParcelValidationError> {
        validate_points(points)?;
        Ok(Self(to_closed_ring(points)))
    }

    /// Wrap positions read back from storage.
    pub fn from_stored(positions: Vec<Position>) -> Self {
        Self(positions)
    }

    /// Positions in storage order, closing position included.
    pub fn positions(&self) -> &[Position] {
        &self.0
    }

    /// Client points in their original order, closing position dropped.
    pub fn open_points(&self) -> Vec<GeoPoint> {
        to_open_points(&self.0)
    }

    /// Whether the ring ends where it starts.
    pub fn is_closed(&self) -> bool {
        is_closed(&self.0)
    }
}

/// Unvalidated parcel fields as received from a client.
#[derive(Debug, Clone, PartialEq)]
pub struct ParcelInput {
    /// Display name.
    pub name: String,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Open ring in client order.
    pub points: Vec<GeoPoint>,
}

/// Validated parcel fields ready to be written.
///
/// # Examples
/// ```
/// use parcel_backend::domain::parcel::{GeoPoint, ParcelContent, ParcelInput};
///
/// let content = ParcelContent::try_from(ParcelInput {
///     name: " Field ".into(),
///     description: Some("   ".into()),
///     points: vec![
///         GeoPoint::new(41.0, 29.0),
///         GeoPoint::new(41.0, 29.1),
///         GeoPoint::new(41.1, 29.1),
///         GeoPoint::new(41.1, 29.0),
///     ],
/// })
/// .unwrap();
/// assert_eq!(content.name(), "Field");
/// assert_eq!(content.description(), None);
/// assert_eq!(content.ring().positions().len(), 5);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ParcelContent {
    name: String,
    description: Option<String>,
    ring: PolygonRing,
}

impl ParcelContent {
    /// Validate the name and points, then close the ring.
    pub fn new(
        name: &str,
        description: Option<&str>,
        points: &[GeoPoint],
    ) -> Result<Self, ParcelValidationError> {
        let ring = PolygonRing::from_points(points)?;
        let name = validate_name(name)?;
        let description = description
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_owned);
        Ok(Self {
            name,
            description,
            ring,
        })
    }

    /// Trimmed display name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Description, if one was given.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Closed ring to persist.
    pub fn ring(&self) -> &PolygonRing {
        &self.ring
    }
}

impl TryFrom<ParcelInput> for ParcelContent {
    type Error = ParcelValidationError;

    fn try_from(input: ParcelInput) -> Result<Self, Self::Error> {
        Self::new(&input.name, input.description.as_deref(), &input.points)
    }
}

/// Plain field bundle used to assemble a [`Parcel`] from storage.
#[derive(Debug, Clone)]
pub struct ParcelDraft {
    /// Store-assigned identifier.
    pub id: ParcelId,
    /// Owning user.
    pub owner: UserId,
    /// Display name as stored.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Ring as read from storage.
    pub ring: PolygonRing,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Time of the last successful update.
    pub updated_at: DateTime<Utc>,
}

/// A persisted parcel owned by one user.
#[derive(Debug, Clone, PartialEq)]
pub struct Parcel {
    id: ParcelId,
    owner: UserId,
    name: String,
    description: Option<String>,
    ring: PolygonRing,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Parcel {
    /// Identifier assigned by the store.
    pub fn id(&self) -> ParcelId {
        self.id
    }

    /// Owning user.
    pub fn owner(&self) -> &UserId {
        &self.owner
    }

    /// Trimmed display name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Description, if one was given.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Stored ring in storage order.
    pub fn ring(&self) -> &PolygonRing {
        &self.ring
    }

    /// Client points with the closing position removed.
    pub fn open_points(&self) -> Vec<GeoPoint> {
        self.ring.open_points()
    }

    /// When the parcel was first stored.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// When the parcel was last replaced; equals `created_at` until then.
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

impl From<ParcelDraft> for Parcel {
    fn from(draft: ParcelDraft) -> Self {
        let ParcelDraft {
            id,
            owner,
            name,
            description,
            ring,
            created_at,
            updated_at,
        } = draft;
        Self {
            id,
            owner,
            name,
            description,
            ring,
            created_at,
            updated_at,
        }
    }
}
