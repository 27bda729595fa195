//! Driving port for parcel reads.

use async_trait::async_trait;

use crate::domain::parcel::{Parcel, ParcelId};
use crate::domain::{Error, UserId};

/// Use-case port for reading the caller's parcels.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ParcelQuery: Send + Sync {
    /// Every parcel owned by `owner`.
    async fn list(&self, owner: &UserId) -> Result<Vec<Parcel>, Error>;

    /// One parcel owned by `owner`; other owners' parcels are not found.
    async fn get(&self, owner: &UserId, id: ParcelId) -> Result<Parcel, Error>;
}
