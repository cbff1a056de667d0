//! Trip API - a small REST service exposing CRUD over trips (a name plus an
//! ordered list of waypoints) and users (username/password credentials),
//! with HTTP Basic Authentication gating everything except registration.
//!
//! The crate is usable two ways: the `trip-api-rust` binary runs the server
//! against Postgres, and [`app`] builds the router from an [`AppState`] so
//! tests can wire in-memory stores instead.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;

use auth::PasswordHasher;
use database::trips::TripRepository;
use database::users::UserRepository;

/// Shared application state threaded through every handler.
///
/// Repositories are trait objects so tests can substitute in-memory stores
/// for the Postgres-backed ones without touching the router.
#[derive(Clone)]
pub struct AppState {
    pub trips: Arc<dyn TripRepository>,
    pub users: Arc<dyn UserRepository>,
    pub hasher: PasswordHasher,
}

pub fn app(state: AppState) -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        // Registration is deliberately unauthenticated; the user listing is not
        .route(
            "/users/",
            post(handlers::users::register).get(handlers::users::whoami),
        )
        // Trip resource - every verb sits behind the basic-auth gate, which
        // runs as the AuthUser extractor before any handler body
        .route(
            "/trips/",
            get(handlers::trips::list).post(handlers::trips::create),
        )
        .route(
            "/trips/:id",
            get(handlers::trips::get)
                .put(handlers::trips::update)
                .delete(handlers::trips::delete),
        )
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "success": true,
        "data": {
            "name": "Trip API (Rust)",
            "version": version,
            "description": "Trip and waypoint CRUD with HTTP Basic Auth",
            "endpoints": {
                "home": "/ (public)",
                "health": "/health (public)",
                "register": "POST /users/ (public)",
                "whoami": "GET /users/ (basic auth)",
                "trips": "/trips/[:id] (basic auth)",
            }
        }
    }))
}

/// Process liveness only. Store faults surface per-request as 5xx responses;
/// there is no retry layer that a readiness probe would need to observe.
async fn health() -> axum::response::Json<Value> {
    axum::response::Json(json!({
        "success": true,
        "data": {
            "status": "ok",
            "timestamp": chrono::Utc::now(),
        }
    }))
}
