//! Internal Diesel row structs for database operations.
//!
//! These types never leave the persistence layer.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{parcels, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub username: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
}

/// Row struct for reading from the parcels table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = parcels)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ParcelRow {
    pub id: i64,
    pub owner_user_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub geometry: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating new parcels. The id is assigned by the
/// sequence.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = parcels)]
pub(crate) struct NewParcelRow<'a> {
    pub owner_user_id: Uuid,
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub geometry: &'a serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Changeset applied by owner-scoped updates.
///
/// `treat_none_as_null` so clearing a description is persisted.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = parcels)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct ParcelUpdate<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub geometry: &'a serde_json::Value,
    pub updated_at: DateTime<Utc>,
}
