//! Controller de tareas
//!
//! Mantiene el estado de workflow de cada tarea consistente con la asignación
//! de conductor (vía `derive_status`) y sirve la agrupación por fecha para el
//! tablero.

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::models::task::{
    derive_status, has_driver, normalize_driver_id, CreateTaskRequest, Task, TaskBoard,
    TaskStatus, UpdateTaskRequest,
};
use crate::storage::{Collection, JsonStore};
use crate::utils::errors::{not_found_error, AppResult};

pub struct TaskController {
    store: JsonStore,
}

impl TaskController {
    pub fn new(store: JsonStore) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> AppResult<Vec<Task>> {
        Ok(self.store.read_all(Collection::Tasks).await)
    }

    pub async fn create(&self, request: CreateTaskRequest) -> AppResult<Task> {
        let driver_id = normalize_driver_id(request.driver_id.as_deref());
        let status = derive_status(&driver_id, TaskStatus::Unassigned);
        let now = Utc::now();

        let task = Task {
            id: Uuid::new_v4().to_string(),
            title: request.title.unwrap_or_default(),
            load_location: request.load_location.unwrap_or_default(),
            dropoff_location: request.dropoff_location.unwrap_or_default(),
            extra_dropoff: request.extra_dropoff.unwrap_or_default(),
            order_number: request.order_number.unwrap_or_default(),
            driver_id,
            vehicle_id: request.vehicle_id.unwrap_or_default(),
            date: request.date.unwrap_or_default(),
            time: request.time.unwrap_or_default(),
            description: request.description.unwrap_or_default(),
            status,
            created_at: now,
            updated_at: now,
        };

        let created = task.clone();
        self.store
            .mutate::<Task, _, _>(Collection::Tasks, move |tasks| {
                tasks.push(task);
                Ok(())
            })
            .await?;

        info!(
            "🟢 Created new task \"{}\" → {:?}",
            if created.title.is_empty() { &created.id } else { &created.title },
            created.status
        );
        Ok(created)
    }

    pub async fn update(&self, id: String, patch: UpdateTaskRequest) -> AppResult<Task> {
        self.store
            .mutate::<Task, _, _>(Collection::Tasks, move |tasks| {
                let task = tasks
                    .iter_mut()
                    .find(|t| t.id == id)
                    .ok_or_else(|| not_found_error("Task", &id))?;

                if let Some(title) = patch.title {
                    task.title = title;
                }
                if let Some(load_location) = patch.load_location {
                    task.load_location = load_location;
                }
                if let Some(dropoff_location) = patch.dropoff_location {
                    task.dropoff_location = dropoff_location;
                }
                if let Some(extra_dropoff) = patch.extra_dropoff {
                    task.extra_dropoff = extra_dropoff;
                }
                if let Some(order_number) = patch.order_number {
                    task.order_number = order_number;
                }
                if let Some(vehicle_id) = patch.vehicle_id {
                    task.vehicle_id = vehicle_id;
                }
                if let Some(date) = patch.date {
                    task.date = date;
                }
                if let Some(time) = patch.time {
                    task.time = time;
                }
                if let Some(description) = patch.description {
                    task.description = description;
                }

                // El driverId del patch manda; si el patch lo omite se
                // re-normaliza el existente. Un driver vacío fuerza
                // unassigned aunque el cliente haya enviado otro estado.
                let driver_id = match patch.driver_id {
                    Some(raw) => normalize_driver_id(Some(&raw)),
                    None => normalize_driver_id(Some(&task.driver_id)),
                };
                let requested = patch.status.unwrap_or(task.status);

                task.status = derive_status(&driver_id, requested);
                task.driver_id = if has_driver(&driver_id) { driver_id } else { String::new() };
                task.updated_at = Utc::now();

                Ok(task.clone())
            })
            .await
    }

    pub async fn remove(&self, id: String) -> AppResult<Task> {
        self.store
            .mutate::<Task, _, _>(Collection::Tasks, move |tasks| {
                let index = tasks
                    .iter()
                    .position(|t| t.id == id)
                    .ok_or_else(|| not_found_error("Task", &id))?;
                Ok(tasks.remove(index))
            })
            .await
    }

    /// Particionar las tareas de un día en los cuatro grupos del tablero,
    /// preservando el orden de inserción dentro de cada grupo. Las tareas de
    /// otras fechas quedan fuera.
    pub async fn board(&self, date: &str) -> AppResult<TaskBoard> {
        let tasks: Vec<Task> = self.store.read_all(Collection::Tasks).await;

        let mut board = TaskBoard::default();
        for task in tasks.into_iter().filter(|t| t.date == date) {
            match task.status {
                TaskStatus::Unassigned => board.unassigned.push(task),
                TaskStatus::Todo => board.todo.push(task),
                TaskStatus::InProgress => board.inprogress.push(task),
                TaskStatus::Completed => board.completed.push(task),
            }
        }

        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn controller() -> (TaskController, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::open(dir.path()).await.unwrap();
        (TaskController::new(store), dir)
    }

    fn create_request(title: &str, driver_id: &str, date: &str) -> CreateTaskRequest {
        CreateTaskRequest {
            title: Some(title.to_string()),
            driver_id: Some(driver_id.to_string()),
            date: Some(date.to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn assignment_scenario_drives_status() {
        let (controller, _dir) = controller().await;

        // Sin conductor → unassigned
        let task = controller
            .create(create_request("Load A", "", "2025-10-01"))
            .await
            .unwrap();
        assert_eq!(task.status, TaskStatus::Unassigned);

        // Asignar conductor → todo
        let task = controller
            .update(
                task.id.clone(),
                UpdateTaskRequest {
                    driver_id: Some("5".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(task.status, TaskStatus::Todo);
        assert_eq!(task.driver_id, "5");

        // Quitar conductor → unassigned, aunque el cliente mande otro estado
        let task = controller
            .update(
                task.id.clone(),
                UpdateTaskRequest {
                    driver_id: Some("".to_string()),
                    status: Some(TaskStatus::Completed),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(task.status, TaskStatus::Unassigned);
        assert_eq!(task.driver_id, "");
    }

    #[tokio::test]
    async fn progress_states_accepted_only_with_driver() {
        let (controller, _dir) = controller().await;

        let task = controller
            .create(create_request("Load B", "7", "2025-10-01"))
            .await
            .unwrap();
        assert_eq!(task.status, TaskStatus::Todo);

        let task = controller
            .update(
                task.id.clone(),
                UpdateTaskRequest {
                    status: Some(TaskStatus::InProgress),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(task.status, TaskStatus::InProgress);

        // Un patch sin status conserva el estado en curso
        let task = controller
            .update(
                task.id.clone(),
                UpdateTaskRequest {
                    title: Some("Load B bis".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(task.status, TaskStatus::InProgress);
        assert_eq!(task.title, "Load B bis");
    }

    #[tokio::test]
    async fn literal_null_driver_is_unassigned() {
        let (controller, _dir) = controller().await;

        let task = controller
            .create(create_request("Load C", "null", "2025-10-01"))
            .await
            .unwrap();
        assert_eq!(task.status, TaskStatus::Unassigned);
        assert_eq!(task.driver_id, "");
    }

    #[tokio::test]
    async fn update_and_remove_missing_task_return_not_found() {
        let (controller, _dir) = controller().await;

        controller
            .create(create_request("Load D", "", "2025-10-01"))
            .await
            .unwrap();

        assert!(controller
            .update("missing".to_string(), UpdateTaskRequest::default())
            .await
            .is_err());
        assert!(controller.remove("missing".to_string()).await.is_err());

        // La colección no cambia de tamaño
        assert_eq!(controller.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn partial_patch_leaves_other_fields_unchanged() {
        let (controller, _dir) = controller().await;

        let task = controller
            .create(CreateTaskRequest {
                title: Some("Load E".to_string()),
                load_location: Some("Depot 1".to_string()),
                order_number: Some("ORD-9".to_string()),
                driver_id: Some("3".to_string()),
                date: Some("2025-10-02".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        let updated = controller
            .update(
                task.id.clone(),
                UpdateTaskRequest {
                    description: Some("urgent".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.title, "Load E");
        assert_eq!(updated.load_location, "Depot 1");
        assert_eq!(updated.order_number, "ORD-9");
        assert_eq!(updated.driver_id, "3");
        assert_eq!(updated.description, "urgent");
        assert_eq!(updated.created_at, task.created_at);
    }

    #[tokio::test]
    async fn board_partitions_by_date_preserving_insertion_order() {
        let (controller, _dir) = controller().await;

        let a = controller.create(create_request("A", "", "2025-10-01")).await.unwrap();
        let b = controller.create(create_request("B", "1", "2025-10-01")).await.unwrap();
        let c = controller.create(create_request("C", "", "2025-10-01")).await.unwrap();
        let _other = controller.create(create_request("D", "", "2025-10-02")).await.unwrap();

        let done = controller.create(create_request("E", "2", "2025-10-01")).await.unwrap();
        controller
            .update(
                done.id.clone(),
                UpdateTaskRequest {
                    status: Some(TaskStatus::Completed),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let board = controller.board("2025-10-01").await.unwrap();

        let unassigned: Vec<&str> = board.unassigned.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(unassigned, vec!["A", "C"]);
        assert_eq!(board.todo.len(), 1);
        assert_eq!(board.todo[0].id, b.id);
        assert!(board.inprogress.is_empty());
        assert_eq!(board.completed.len(), 1);

        // Los grupos son disjuntos y cubren exactamente las tareas del día
        let total = board.unassigned.len() + board.todo.len() + board.inprogress.len() + board.completed.len();
        assert_eq!(total, 4);
        let _ = a;
    }
}
