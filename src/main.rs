use std::sync::Arc;

use trip_api::auth::PasswordHasher;
use trip_api::database::manager;
use trip_api::database::trips::PgTripRepository;
use trip_api::database::users::PgUserRepository;
use trip_api::{app, AppState};

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = trip_api::config::config();
    tracing::info!("Starting Trip API in {:?} mode", config.environment);

    let pool = manager::connect()
        .await
        .unwrap_or_else(|e| panic!("failed to connect to database: {}", e));

    manager::ensure_schema(&pool)
        .await
        .unwrap_or_else(|e| panic!("failed to bootstrap schema: {}", e));

    let state = AppState {
        trips: Arc::new(PgTripRepository::new(pool.clone())),
        users: Arc::new(PgUserRepository::new(pool)),
        hasher: PasswordHasher::from_config(),
    };

    let app = app(state);

    // Allow tests or deployments to override port via env
    let port = std::env::var("TRIP_API_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(config.server.port);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("Trip API listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}
