//! Driven port for owner-scoped parcel storage.
//!
//! Every call carries the owner explicitly. Adapters must filter on both the
//! parcel id and the owner so that a foreign parcel is indistinguishable from
//! a missing one.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::UserId;
use crate::domain::parcel::{Parcel, ParcelContent, ParcelId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by parcel repository adapters.
    pub enum ParcelRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "parcel repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "parcel repository query failed: {message}",
    }
}

/// Port for reading and writing parcels.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ParcelRepository: Send + Sync {
    /// Insert a parcel. The store assigns the id and both timestamps are set
    /// to `now`.
    async fn create(
        &self,
        owner: &UserId,
        content: &ParcelContent,
        now: DateTime<Utc>,
    ) -> Result<Parcel, ParcelRepositoryError>;

    /// Fetch one parcel belonging to `owner`.
    async fn find(
        &self,
        owner: &UserId,
        id: ParcelId,
    ) -> Result<Option<Parcel>, ParcelRepositoryError>;

    /// All parcels belonging to `owner`, ordered by id.
    async fn list(&self, owner: &UserId) -> Result<Vec<Parcel>, ParcelRepositoryError>;

    /// Replace name, description and geometry, refreshing `updated_at`.
    ///
    /// Returns `None` when no parcel with this id belongs to `owner`.
    async fn update(
        &self,
        owner: &UserId,
        id: ParcelId,
        content: &ParcelContent,
        now: DateTime<Utc>,
    ) -> Result<Option<Parcel>, ParcelRepositoryError>;

    /// Remove a parcel. Returns whether a row was deleted.
    async fn delete(&self, owner: &UserId, id: ParcelId) -> Result<bool, ParcelRepositoryError>;
}
