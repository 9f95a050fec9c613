use axum::{extract::State, routing::get, Json, Router};
use serde_json::Value;
use tracing::warn;

use crate::services::telemetry_service::TelemetryService;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_position_router() -> Router<AppState> {
    Router::new().route("/", get(get_positions))
}

/// Snapshot en vivo de la flota. Sin credenciales configuradas degrada a
/// lista vacía; un fallo del proveedor se devuelve como error 500 con detalle.
async fn get_positions(State(state): State<AppState>) -> Result<Json<Vec<Value>>, AppError> {
    let Some(service) = TelemetryService::from_config(&state.config) else {
        warn!("⚠️ Missing AUTOTRAK credentials — returning empty list");
        return Ok(Json(Vec::new()));
    };

    let positions = service.fetch_positions().await?;
    Ok(Json(positions))
}
