use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A stored trip document.
///
/// `waypoints` is an ordered sequence; insertion/update order round-trips
/// exactly. `owner` is the username of the creating user, set once at create
/// and never changed by update.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Trip {
    pub id: Uuid,
    pub name: String,
    pub waypoints: Vec<String>,
    pub owner: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Client payload for trip creation.
#[derive(Debug, Clone, Deserialize)]
pub struct NewTrip {
    pub name: String,
    #[serde(default)]
    pub waypoints: Vec<String>,
}

/// Field-level partial update; absent fields keep their prior value.
/// There is intentionally no `owner` field here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TripUpdate {
    pub name: Option<String>,
    pub waypoints: Option<Vec<String>>,
}
