use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::trip::{NewTrip, Trip, TripUpdate};

/// CRUD over the trips collection.
///
/// Every operation is a single store round trip. A missing document is a
/// plain `None` outcome, not an error, so handlers can map it to the 404
/// policy deterministically.
#[async_trait]
pub trait TripRepository: Send + Sync {
    /// Insert the payload tagged with its owner and return the full stored
    /// document, including the store-assigned identifier.
    async fn create(&self, payload: NewTrip, owner: &str) -> Result<Trip, DatabaseError>;

    /// Exact-id lookup.
    async fn get(&self, id: Uuid) -> Result<Option<Trip>, DatabaseError>;

    /// All trips whose owner matches, in insertion order.
    async fn list(&self, owner: &str) -> Result<Vec<Trip>, DatabaseError>;

    /// Merge only the fields present in `changes` into the existing
    /// document; unspecified fields are untouched. Returns the post-merge
    /// document, or `None` when the id matches nothing.
    async fn update(&self, id: Uuid, changes: TripUpdate) -> Result<Option<Trip>, DatabaseError>;

    /// Remove the document, returning it when it existed.
    async fn delete(&self, id: Uuid) -> Result<Option<Trip>, DatabaseError>;
}

/// Postgres-backed trip store.
pub struct PgTripRepository {
    pool: PgPool,
}

impl PgTripRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TripRepository for PgTripRepository {
    async fn create(&self, payload: NewTrip, owner: &str) -> Result<Trip, DatabaseError> {
        let trip = sqlx::query_as::<_, Trip>(
            "INSERT INTO trips (name, waypoints, owner)
             VALUES ($1, $2, $3)
             RETURNING id, name, waypoints, owner, created_at, updated_at",
        )
        .bind(&payload.name)
        .bind(&payload.waypoints)
        .bind(owner)
        .fetch_one(&self.pool)
        .await?;

        Ok(trip)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Trip>, DatabaseError> {
        let trip = sqlx::query_as::<_, Trip>(
            "SELECT id, name, waypoints, owner, created_at, updated_at
             FROM trips
             WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(trip)
    }

    async fn list(&self, owner: &str) -> Result<Vec<Trip>, DatabaseError> {
        let trips = sqlx::query_as::<_, Trip>(
            "SELECT id, name, waypoints, owner, created_at, updated_at
             FROM trips
             WHERE owner = $1
             ORDER BY created_at",
        )
        .bind(owner)
        .fetch_all(&self.pool)
        .await?;

        Ok(trips)
    }

    async fn update(&self, id: Uuid, changes: TripUpdate) -> Result<Option<Trip>, DatabaseError> {
        // COALESCE keeps any field the client did not send; owner is never
        // part of the SET list
        let trip = sqlx::query_as::<_, Trip>(
            "UPDATE trips
             SET name = COALESCE($2, name),
                 waypoints = COALESCE($3, waypoints),
                 updated_at = now()
             WHERE id = $1
             RETURNING id, name, waypoints, owner, created_at, updated_at",
        )
        .bind(id)
        .bind(changes.name)
        .bind(changes.waypoints)
        .fetch_optional(&self.pool)
        .await?;

        Ok(trip)
    }

    async fn delete(&self, id: Uuid) -> Result<Option<Trip>, DatabaseError> {
        let trip = sqlx::query_as::<_, Trip>(
            "DELETE FROM trips
             WHERE id = $1
             RETURNING id, name, waypoints, owner, created_at, updated_at",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(trip)
    }
}
