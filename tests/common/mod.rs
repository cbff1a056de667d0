use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::Utc;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use trip_api::auth::PasswordHasher;
use trip_api::database::manager::DatabaseError;
use trip_api::database::models::trip::{NewTrip, Trip, TripUpdate};
use trip_api::database::models::user::User;
use trip_api::database::trips::TripRepository;
use trip_api::database::users::UserRepository;
use trip_api::{app, AppState};

/// In-memory trip store mirroring the Postgres adapter's contract.
#[derive(Default)]
pub struct MemoryTripRepository {
    trips: Mutex<Vec<Trip>>,
}

#[async_trait]
impl TripRepository for MemoryTripRepository {
    async fn create(&self, payload: NewTrip, owner: &str) -> Result<Trip, DatabaseError> {
        let now = Utc::now();
        let trip = Trip {
            id: Uuid::new_v4(),
            name: payload.name,
            waypoints: payload.waypoints,
            owner: Some(owner.to_string()),
            created_at: now,
            updated_at: now,
        };
        self.trips.lock().unwrap().push(trip.clone());
        Ok(trip)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Trip>, DatabaseError> {
        Ok(self
            .trips
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.id == id)
            .cloned())
    }

    async fn list(&self, owner: &str) -> Result<Vec<Trip>, DatabaseError> {
        Ok(self
            .trips
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.owner.as_deref() == Some(owner))
            .cloned()
            .collect())
    }

    async fn update(&self, id: Uuid, changes: TripUpdate) -> Result<Option<Trip>, DatabaseError> {
        let mut trips = self.trips.lock().unwrap();
        let Some(trip) = trips.iter_mut().find(|t| t.id == id) else {
            return Ok(None);
        };
        if let Some(name) = changes.name {
            trip.name = name;
        }
        if let Some(waypoints) = changes.waypoints {
            trip.waypoints = waypoints;
        }
        trip.updated_at = Utc::now();
        Ok(Some(trip.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<Option<Trip>, DatabaseError> {
        let mut trips = self.trips.lock().unwrap();
        let position = trips.iter().position(|t| t.id == id);
        Ok(position.map(|p| trips.remove(p)))
    }
}

/// In-memory credential store with the same duplicate-username contract as
/// the Postgres adapter.
#[derive(Default)]
pub struct MemoryUserRepository {
    users: Mutex<HashMap<String, User>>,
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DatabaseError> {
        Ok(self.users.lock().unwrap().get(username).cloned())
    }

    async fn create(&self, username: &str, password_hash: &str) -> Result<User, DatabaseError> {
        let mut users = self.users.lock().unwrap();
        if users.contains_key(username) {
            return Err(DatabaseError::Conflict(format!(
                "username '{}' is already taken",
                username
            )));
        }
        let user = User {
            id: Uuid::new_v4(),
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            created_at: Utc::now(),
        };
        users.insert(username.to_string(), user.clone());
        Ok(user)
    }
}

/// Router wired to fresh in-memory stores. Minimum bcrypt cost keeps the
/// hashing rounds fast under test.
pub fn test_app() -> Router {
    app(AppState {
        trips: Arc::new(MemoryTripRepository::default()),
        users: Arc::new(MemoryUserRepository::default()),
        hasher: PasswordHasher::new(4),
    })
}

pub fn basic_auth(username: &str, password: &str) -> String {
    format!(
        "Basic {}",
        STANDARD.encode(format!("{}:{}", username, password))
    )
}

pub fn json_request(method: &str, uri: &str, auth: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(auth) = auth {
        builder = builder.header(header::AUTHORIZATION, auth);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn empty_request(method: &str, uri: &str, auth: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(auth) = auth {
        builder = builder.header(header::AUTHORIZATION, auth);
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Register an account through the public endpoint, asserting success.
pub async fn register(app: &Router, username: &str, password: &str) {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/users/",
            None,
            &json!({ "username": username, "password": password }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK, "registration failed");
}
