//! PostgreSQL-backed `ParcelRepository` implementation using Diesel ORM.
//!
//! Every statement filters on both `id` and `owner_user_id`, so a parcel
//! owned by someone else behaves exactly like a missing one.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::UserId;
use crate::domain::parcel::{Parcel, ParcelContent, ParcelDraft, ParcelId};
use crate::domain::ports::{ParcelRepository, ParcelRepositoryError};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::geometry::{decode_ring, encode_ring};
use super::models::{NewParcelRow, ParcelRow, ParcelUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::parcels;

/// Diesel-backed implementation of the parcel repository port.
#[derive(Clone)]
pub struct DieselParcelRepository {
    pool: DbPool,
}

impl DieselParcelRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ParcelRepositoryError {
    map_basic_pool_error(error, ParcelRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> ParcelRepositoryError {
    map_basic_diesel_error(
        error,
        ParcelRepositoryError::query,
        ParcelRepositoryError::connection,
    )
}

/// Convert a database row into a domain parcel.
fn row_to_parcel(row: ParcelRow) -> Result<Parcel, ParcelRepositoryError> {
    let ParcelRow {
        id,
        owner_user_id,
        name,
        description,
        geometry,
        created_at,
        updated_at,
    } = row;

    let ring = decode_ring(geometry)
        .map_err(|err| ParcelRepositoryError::query(format!("parcel {id}: {err}")))?;
    Ok(Parcel::from(ParcelDraft {
        id: ParcelId::new(id),
        owner: UserId::from_uuid(owner_user_id),
        name,
        description,
        ring,
        created_at,
        updated_at,
    }))
}

#[async_trait]
impl ParcelRepository for DieselParcelRepository {
    async fn create(
        &self,
        owner: &UserId,
        content: &ParcelContent,
        now: DateTime<Utc>,
    ) -> Result<Parcel, ParcelRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let geometry = encode_ring(content.ring());
        let new_row = NewParcelRow {
            owner_user_id: *owner.as_uuid(),
            name: content.name(),
            description: content.description(),
            geometry: &geometry,
            created_at: now,
            updated_at: now,
        };

        let row: ParcelRow = diesel::insert_into(parcels::table)
            .values(&new_row)
            .returning(ParcelRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        row_to_parcel(row)
    }

    async fn find(
        &self,
        owner: &UserId,
        id: ParcelId,
    ) -> Result<Option<Parcel>, ParcelRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<ParcelRow> = parcels::table
            .filter(parcels::id.eq(id.value()))
            .filter(parcels::owner_user_id.eq(*owner.as_uuid()))
            .select(ParcelRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_parcel).transpose()
    }

    async fn list(&self, owner: &UserId) -> Result<Vec<Parcel>, ParcelRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<ParcelRow> = parcels::table
            .filter(parcels::owner_user_id.eq(*owner.as_uuid()))
            .order(parcels::id.asc())
            .select(ParcelRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_parcel).collect()
    }

    async fn update(
        &self,
        owner: &UserId,
        id: ParcelId,
        content: &ParcelContent,
        now: DateTime<Utc>,
    ) -> Result<Option<Parcel>, ParcelRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let geometry = encode_ring(content.ring());
        let changes = ParcelUpdate {
            name: content.name(),
            description: content.description(),
            geometry: &geometry,
            updated_at: now,
        };

        let row: Option<ParcelRow> = diesel::update(
            parcels::table
                .filter(parcels::id.eq(id.value()))
                .filter(parcels::owner_user_id.eq(*owner.as_uuid())),
        )
        .set(&changes)
        .returning(ParcelRow::as_returning())
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(map_diesel_error)?;
        row.map(row_to_parcel).transpose()
    }

    async fn delete(&self, owner: &UserId, id: ParcelId) -> Result<bool, ParcelRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let removed = diesel::delete(
            parcels::table
                .filter(parcels::id.eq(id.value()))
                .filter(parcels::owner_user_id.eq(*owner.as_uuid())),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;
        Ok(removed > 0)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::parcel::GeoPoint;
    use chrono::TimeZone;
    use rstest::rstest;
    use serde_json::json;
    use uuid::Uuid;

    fn row(geometry: serde_json::Value) -> ParcelRow {
        let at = Utc
            .with_ymd_and_hms(2024, 6, 1, 8, 0, 0)
            .single()
            .expect("timestamp");
        ParcelRow {
            id: 12,
            owner_user_id: Uuid::nil(),
            name: "Vineyard".to_owned(),
            description: Some("south slope".to_owned()),
            geometry,
            created_at: at,
            updated_at: at,
        }
    }

    #[rstest]
    fn row_maps_to_domain_parcel() {
        let parcel = row_to_parcel(row(json!({
            "type": "Polygon",
            "coordinates": [[[29.0, 41.0], [29.1, 41.0], [29.1, 41.1], [29.0, 41.1], [29.0, 41.0]]],
        })))
        .expect("row converts");

        assert_eq!(parcel.id(), ParcelId::new(12));
        assert_eq!(parcel.owner().as_uuid(), &Uuid::nil());
        assert_eq!(parcel.description(), Some("south slope"));
        assert_eq!(
            parcel.open_points().into_iter().next(),
            Some(GeoPoint::new(41.0, 29.0))
        );
        assert_eq!(parcel.open_points().len(), 4);
    }

    #[rstest]
    fn corrupt_geometry_is_a_query_error() {
        let err = row_to_parcel(row(json!({"type": "LineString"}))).expect_err("bad geometry");
        assert!(matches!(err, ParcelRepositoryError::Query { .. }));
        assert!(err.to_string().contains("parcel 12"));
    }

    #[rstest]
    fn closed_connection_maps_to_connection_error() {
        use diesel::result::{DatabaseErrorKind, Error as DieselError};

        let err = map_diesel_error(DieselError::DatabaseError(
            DatabaseErrorKind::ClosedConnection,
            Box::new("gone".to_owned()),
        ));
        assert!(matches!(err, ParcelRepositoryError::Connection { .. }));
    }
}
