use axum::{
    extract::{Path, State},
    routing::{delete, get, post, put},
    Json, Router,
};

use crate::controllers::point_controller::PointController;
use crate::models::location::{CreateLocationRequest, Location, UpdatePointRequest};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_point_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_points))
        .route("/", post(create_point))
        .route("/:id", put(update_point))
        .route("/:id", delete(delete_point))
}

pub fn create_location_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_locations))
        .route("/", post(create_location))
}

async fn list_points(State(state): State<AppState>) -> Result<Json<Vec<Location>>, AppError> {
    let controller = PointController::new(state.store.clone());
    let points = controller.list_points().await?;
    Ok(Json(points))
}

async fn create_point(
    State(state): State<AppState>,
    Json(request): Json<CreateLocationRequest>,
) -> Result<Json<Location>, AppError> {
    let controller = PointController::new(state.store.clone());
    let point = controller.create_point(request).await?;
    Ok(Json(point))
}

async fn update_point(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<UpdatePointRequest>,
) -> Result<Json<Location>, AppError> {
    let controller = PointController::new(state.store.clone());
    let point = controller.update_point(id, patch).await?;
    Ok(Json(point))
}

async fn delete_point(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Location>, AppError> {
    let controller = PointController::new(state.store.clone());
    let point = controller.remove_point(id).await?;
    Ok(Json(point))
}

async fn list_locations(State(state): State<AppState>) -> Result<Json<Vec<Location>>, AppError> {
    let controller = PointController::new(state.store.clone());
    let locations = controller.list_locations().await?;
    Ok(Json(locations))
}

async fn create_location(
    State(state): State<AppState>,
    Json(request): Json<CreateLocationRequest>,
) -> Result<Json<Location>, AppError> {
    let controller = PointController::new(state.store.clone());
    let location = controller.create_location(request).await?;
    Ok(Json(location))
}
