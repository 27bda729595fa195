//! Diesel table definitions.
//!
//! Keep in sync with `backend/migrations`.

diesel::table! {
    /// Registered accounts.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Unique login name (max 64 characters).
        username -> Varchar,
        /// Unique contact email (max 254 characters).
        email -> Varchar,
        /// Argon2id PHC string.
        password_hash -> Text,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Parcels drawn by users.
    ///
    /// `geometry` holds a GeoJSON `Polygon` whose single ring is closed and
    /// longitude-first.
    parcels (id) {
        /// Store-assigned identifier.
        id -> Int8,
        /// Owning user; cascades on account deletion.
        owner_user_id -> Uuid,
        /// Display name (max 200 characters).
        name -> Varchar,
        description -> Nullable<Text>,
        geometry -> Jsonb,
        created_at -> Timestamptz,
        /// Refreshed on every update.
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(parcels -> users (owner_user_id));
diesel::allow_tables_to_appear_in_same_query!(parcels, users);
