//! Parcel domain service.
//!
//! Implements the parcel driving ports on top of a [`ParcelRepository`].
//! Input is validated and closed into a ring before the repository is
//! called, so rejected writes never reach storage.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::{Map, Value, json};
use tracing::debug;

use crate::domain::parcel::{
    Parcel, ParcelContent, ParcelId, ParcelInput, ParcelValidationError,
};
use crate::domain::ports::{ParcelCommand, ParcelQuery, ParcelRepository, ParcelRepositoryError};
use crate::domain::{Error, UserId};

const NOT_FOUND_MESSAGE: &str = "parcel not found";

fn map_repository_error(error: ParcelRepositoryError) -> Error {
    match error {
        ParcelRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("parcel repository unavailable: {message}"))
        }
        ParcelRepositoryError::Query { message } => {
            Error::internal(format!("parcel repository error: {message}"))
        }
    }
}

fn map_validation_error(error: ParcelValidationError) -> Error {
    let mut details = Map::new();
    let (field, code) = match &error {
        ParcelValidationError::TooFewPoints { min, actual } => {
            details.insert("min".into(), json!(min));
            details.insert("actual".into(), json!(actual));
            ("coordinates", "too_few_points")
        }
        ParcelValidationError::NonFiniteCoordinate { index } => {
            details.insert("index".into(), json!(index));
            ("coordinates", "non_finite_coordinate")
        }
        ParcelValidationError::LatitudeOutOfRange { index, .. } => {
            details.insert("index".into(), json!(index));
            ("coordinates", "latitude_out_of_range")
        }
        ParcelValidationError::LongitudeOutOfRange { index, .. } => {
            details.insert("index".into(), json!(index));
            ("coordinates", "longitude_out_of_range")
        }
        ParcelValidationError::EmptyName => ("name", "empty_name"),
        ParcelValidationError::NameTooLong { max } => {
            details.insert("max".into(), json!(max));
            ("name", "name_too_long")
        }
    };
    details.insert("field".into(), json!(field));
    details.insert("code".into(), json!(code));
    Error::invalid_request(error.to_string()).with_details(Value::Object(details))
}

fn not_found() -> Error {
    Error::not_found(NOT_FOUND_MESSAGE)
}

/// Parcel service implementing [`ParcelCommand`] and [`ParcelQuery`].
#[derive(Clone)]
pub struct ParcelService<R> {
    parcel_repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> ParcelService<R> {
    /// Create a service over a repository and a clock used for timestamps.
    pub fn new(parcel_repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { parcel_repo, clock }
    }
}

impl<R> ParcelService<R> {
    fn validate(input: ParcelInput) -> Result<ParcelContent, Error> {
        ParcelContent::try_from(input).map_err(|err| {
            debug!(error = %err, "rejected parcel input");
            map_validation_error(err)
        })
    }
}

#[async_trait]
impl<R> ParcelCommand for ParcelService<R>
where
    R: ParcelRepository,
{
    async fn create(&self, owner: &UserId, input: ParcelInput) -> Result<Parcel, Error> {
        let content = Self::validate(input)?;
        self.parcel_repo
            .create(owner, &content, self.clock.utc())
            .await
            .map_err(map_repository_error)
    }

    async fn update(
        &self,
        owner: &UserId,
        id: ParcelId,
        input: ParcelInput,
    ) -> Result<Parcel, Error> {
        let content = Self::validate(input)?;
        self.parcel_repo
            .update(owner, id, &content, self.clock.utc())
            .await
            .map_err(map_repository_error)?
            .ok_or_else(not_found)
    }

    async fn delete(&self, owner: &UserId, id: ParcelId) -> Result<(), Error> {
        let removed = self
            .parcel_repo
            .delete(owner, id)
            .await
            .map_err(map_repository_error)?;
        if removed { Ok(()) } else { Err(not_found()) }
    }
}

#[async_trait]
impl<R> ParcelQuery for ParcelService<R>
where
    R: ParcelRepository,
{
    async fn list(&self, owner: &UserId) -> Result<Vec<Parcel>, Error> {
        self.parcel_repo
            .list(owner)
            .await
            .map_err(map_repository_error)
    }

    async fn get(&self, owner: &UserId, id: ParcelId) -> Result<Parcel, Error> {
        self.parcel_repo
            .find(owner, id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(not_found)
    }
}

#[cfg(test)]
#[path = "parcel_service_tests.rs"]
mod tests;
