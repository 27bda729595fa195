//! In-memory `ParcelRepository`.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::UserId;
use crate::domain::parcel::{Parcel, ParcelContent, ParcelDraft, ParcelId};
use crate::domain::ports::{ParcelRepository, ParcelRepositoryError};

#[derive(Debug, Default)]
struct Store {
    next_id: i64,
    parcels: BTreeMap<ParcelId, Parcel>,
}

/// Parcel store keyed by id, with ids assigned from a counter.
#[derive(Debug, Default)]
pub struct InMemoryParcelRepository {
    store: Mutex<Store>,
}

impl InMemoryParcelRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Store>, ParcelRepositoryError> {
        self.store
            .lock()
            .map_err(|_| ParcelRepositoryError::query("parcel store lock poisoned"))
    }
}

fn build(
    id: ParcelId,
    owner: &UserId,
    content: &ParcelContent,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
) -> Parcel {
    Parcel::from(ParcelDraft {
        id,
        owner: owner.clone(),
        name: content.name().to_owned(),
        description: content.description().map(str::to_owned),
        ring: content.ring().clone(),
        created_at,
        updated_at,
    })
}

#[async_trait]
impl ParcelRepository for InMemoryParcelRepository {
    async fn create(
        &self,
        owner: &UserId,
        content: &ParcelContent,
        now: DateTime<Utc>,
    ) -> Result<Parcel, ParcelRepositoryError> {
        let mut store = self.lock()?;
        store.next_id += 1;
        let parcel = build(ParcelId::new(store.next_id), owner, content, now, now);
        store.parcels.insert(parcel.id(), parcel.clone());
        Ok(parcel)
    }

    async fn find(
        &self,
        owner: &UserId,
        id: ParcelId,
    ) -> Result<Option<Parcel>, ParcelRepositoryError> {
        let store = self.lock()?;
        Ok(store
            .parcels
            .get(&id)
            .filter(|parcel| parcel.owner() == owner)
            .cloned())
    }

    async fn list(&self, owner: &UserId) -> Result<Vec<Parcel>, ParcelRepositoryError> {
        let store = self.lock()?;
        Ok(store
            .parcels
            .values()
            .filter(|parcel| parcel.owner() == owner)
            .cloned()
            .collect())
    }

    async fn update(
        &self,
        owner: &UserId,
        id: ParcelId,
        content: &ParcelContent,
        now: DateTime<Utc>,
    ) -> Result<Option<Parcel>, ParcelRepositoryError> {
        let mut store = self.lock()?;
        let Some(existing) = store
            .parcels
            .get_mut(&id)
            .filter(|parcel| parcel.owner() == owner)
        else {
            return Ok(None);
        };
        *existing = build(id, owner, content, existing.created_at(), now);
        Ok(Some(existing.clone()))
    }

    async fn delete(&self, owner: &UserId, id: ParcelId) -> Result<bool, ParcelRepositoryError> {
        let mut store = self.lock()?;
        let owned = store
            .parcels
            .get(&id)
            .is_some_and(|parcel| parcel.owner() == owner);
        if owned {
            store.parcels.remove(&id);
        }
        Ok(owned)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::parcel::GeoPoint;
    use chrono::{Duration, TimeZone};
    use rstest::{fixture, rstest};

    #[fixture]
    fn content() -> ParcelContent {
        ParcelContent::new(
            "Meadow",
            None,
            &[
                GeoPoint::new(41.0, 29.0),
                GeoPoint::new(41.0, 29.1),
                GeoPoint::new(41.1, 29.1),
                GeoPoint::new(41.1, 29.0),
            ],
        )
        .expect("valid content")
    }

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, hour, 0, 0)
            .single()
            .expect("timestamp")
    }

    #[rstest]
    #[tokio::test]
    async fn ids_increase_and_list_is_ordered(content: ParcelContent) {
        let repo = InMemoryParcelRepository::new();
        let owner = UserId::random();

        let first = repo.create(&owner, &content, at(1)).await.expect("create");
        let second = repo.create(&owner, &content, at(2)).await.expect("create");
        let listed = repo.list(&owner).await.expect("list");

        assert!(first.id() < second.id());
        let ids: Vec<_> = listed.iter().map(Parcel::id).collect();
        assert_eq!(ids, vec![first.id(), second.id()]);
    }

    #[rstest]
    #[tokio::test]
    async fn foreign_owner_sees_nothing(content: ParcelContent) {
        let repo = InMemoryParcelRepository::new();
        let owner = UserId::random();
        let intruder = UserId::random();
        let parcel = repo.create(&owner, &content, at(1)).await.expect("create");

        assert_eq!(repo.find(&intruder, parcel.id()).await.expect("find"), None);
        assert!(repo.list(&intruder).await.expect("list").is_empty());
        assert_eq!(
            repo.update(&intruder, parcel.id(), &content, at(2))
                .await
                .expect("update"),
            None
        );
        assert!(!repo.delete(&intruder, parcel.id()).await.expect("delete"));
        assert_eq!(
            repo.find(&owner, parcel.id()).await.expect("find"),
            Some(parcel)
        );
    }

    #[rstest]
    #[tokio::test]
    async fn update_keeps_created_at(content: ParcelContent) {
        let repo = InMemoryParcelRepository::new();
        let owner = UserId::random();
        let parcel = repo.create(&owner, &content, at(1)).await.expect("create");

        let updated = repo
            .update(&owner, parcel.id(), &content, at(1) + Duration::hours(3))
            .await
            .expect("update")
            .expect("owned parcel");

        assert_eq!(updated.created_at(), at(1));
        assert_eq!(updated.updated_at(), at(4));
    }
}
