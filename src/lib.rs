pub mod config;
pub mod controllers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod storage;
pub mod utils;

use axum::{routing::get, Router};

use middleware::cors::cors_middleware;
use state::AppState;

/// Crear el router completo de la API con el estado compartido
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(health))
        .nest("/api/tasks", routes::task_routes::create_task_router())
        .nest("/api/drivers", routes::driver_routes::create_driver_router())
        .nest("/api/vehicles", routes::vehicle_routes::create_vehicle_router())
        .nest("/api/points", routes::point_routes::create_point_router())
        .nest("/api/locations", routes::point_routes::create_location_router())
        .nest("/api/positions", routes::position_routes::create_position_router())
        .layer(cors_middleware())
        .with_state(state)
}

/// Endpoint de prueba simple
async fn health() -> &'static str {
    "✅ FleetPro server running"
}
