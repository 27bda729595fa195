//! Driving port for parcel writes.

use async_trait::async_trait;

use crate::domain::parcel::{Parcel, ParcelId, ParcelInput};
use crate::domain::{Error, UserId};

/// Use-case port for creating, replacing and deleting parcels.
///
/// Implementations validate the input before touching storage, so a rejected
/// request never produces a write.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ParcelCommand: Send + Sync {
    /// Validate and store a new parcel for `owner`.
    async fn create(&self, owner: &UserId, input: ParcelInput) -> Result<Parcel, Error>;

    /// Validate and replace an existing parcel owned by `owner`.
    async fn update(&self, owner: &UserId, id: ParcelId, input: ParcelInput)
    -> Result<Parcel, Error>;

    /// Delete a parcel owned by `owner`.
    async fn delete(&self, owner: &UserId, id: ParcelId) -> Result<(), Error>;
}
