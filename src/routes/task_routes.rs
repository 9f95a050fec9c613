use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::Deserialize;

use crate::controllers::task_controller::TaskController;
use crate::models::task::{CreateTaskRequest, Task, TaskBoard, UpdateTaskRequest};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_task_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_tasks))
        .route("/", post(create_task))
        .route("/board", get(task_board))
        .route("/:id", put(update_task))
        .route("/:id", delete(delete_task))
}

#[derive(Debug, Deserialize)]
struct BoardQuery {
    #[serde(default)]
    date: String,
}

async fn list_tasks(State(state): State<AppState>) -> Result<Json<Vec<Task>>, AppError> {
    let controller = TaskController::new(state.store.clone());
    let tasks = controller.list().await?;
    Ok(Json(tasks))
}

async fn create_task(
    State(state): State<AppState>,
    Json(request): Json<CreateTaskRequest>,
) -> Result<Json<Task>, AppError> {
    let controller = TaskController::new(state.store.clone());
    let task = controller.create(request).await?;
    Ok(Json(task))
}

async fn task_board(
    State(state): State<AppState>,
    Query(query): Query<BoardQuery>,
) -> Result<Json<TaskBoard>, AppError> {
    let controller = TaskController::new(state.store.clone());
    let board = controller.board(&query.date).await?;
    Ok(Json(board))
}

async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<UpdateTaskRequest>,
) -> Result<Json<Task>, AppError> {
    let controller = TaskController::new(state.store.clone());
    let task = controller.update(id, patch).await?;
    Ok(Json(task))
}

async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Task>, AppError> {
    let controller = TaskController::new(state.store.clone());
    let task = controller.remove(id).await?;
    Ok(Json(task))
}
