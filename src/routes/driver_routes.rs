use axum::{
    extract::{Path, State},
    routing::{delete, get, post, put},
    Json, Router,
};

use crate::controllers::driver_controller::DriverController;
use crate::models::driver::{CreateDriverRequest, Driver, UpdateDriverRequest};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_driver_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_drivers))
        .route("/", post(create_driver))
        .route("/:id", put(update_driver))
        .route("/:id", delete(delete_driver))
}

async fn list_drivers(State(state): State<AppState>) -> Result<Json<Vec<Driver>>, AppError> {
    let controller = DriverController::new(state.store.clone());
    let drivers = controller.list().await?;
    Ok(Json(drivers))
}

async fn create_driver(
    State(state): State<AppState>,
    Json(request): Json<CreateDriverRequest>,
) -> Result<Json<Driver>, AppError> {
    let controller = DriverController::new(state.store.clone());
    let driver = controller.create(request).await?;
    Ok(Json(driver))
}

async fn update_driver(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<UpdateDriverRequest>,
) -> Result<Json<Driver>, AppError> {
    let controller = DriverController::new(state.store.clone());
    let driver = controller.update(id, patch).await?;
    Ok(Json(driver))
}

async fn delete_driver(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Driver>, AppError> {
    let controller = DriverController::new(state.store.clone());
    let driver = controller.remove(id).await?;
    Ok(Json(driver))
}
