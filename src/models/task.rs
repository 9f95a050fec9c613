//! Modelo de Task
//!
//! Este módulo contiene el struct Task, el estado de workflow derivado de la
//! asignación de conductor y las funciones puras que lo gobiernan:
//!
//! - `normalize_driver_id`: limpia el driverId enviado por el cliente.
//! - `derive_status`: única fuente de verdad del estado. Sin conductor el
//!   estado es siempre `unassigned`; con conductor se respeta un
//!   `inprogress`/`completed` pedido por el cliente y todo lo demás cae a
//!   `todo`. El store no valida orden alguno entre los estados asignados.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Estado de workflow de una tarea
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Unassigned,
    Todo,
    InProgress,
    Completed,
}

/// Task principal - registro de despacho persistido en tasks.json
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub load_location: String,
    #[serde(default)]
    pub dropoff_location: String,
    #[serde(default)]
    pub extra_dropoff: String,
    #[serde(default)]
    pub order_number: String,
    #[serde(default)]
    pub driver_id: String,
    #[serde(default)]
    pub vehicle_id: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub description: String,
    pub status: TaskStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request para crear una nueva tarea
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    pub title: Option<String>,
    pub load_location: Option<String>,
    pub dropoff_location: Option<String>,
    pub extra_dropoff: Option<String>,
    pub order_number: Option<String>,
    pub driver_id: Option<String>,
    pub vehicle_id: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub description: Option<String>,
}

/// Request para actualizar una tarea existente (merge parcial sobre una
/// whitelist explícita de campos mutables)
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    pub load_location: Option<String>,
    pub dropoff_location: Option<String>,
    pub extra_dropoff: Option<String>,
    pub order_number: Option<String>,
    pub driver_id: Option<String>,
    pub vehicle_id: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
}

/// Tablero de tareas agrupado por estado para una fecha dada
#[derive(Debug, Default, Serialize)]
pub struct TaskBoard {
    pub unassigned: Vec<Task>,
    pub todo: Vec<Task>,
    pub inprogress: Vec<Task>,
    pub completed: Vec<Task>,
}

/// Normalizar el driverId enviado por el cliente. Trim; los valores ausentes
/// y los literales "null"/"undefined" (en cualquier caja) se tratan como
/// "sin conductor" y normalizan a cadena vacía. Idempotente.
pub fn normalize_driver_id(value: Option<&str>) -> String {
    let Some(value) = value else {
        return String::new();
    };

    let trimmed = value.trim();
    if trimmed.is_empty()
        || trimmed.eq_ignore_ascii_case("null")
        || trimmed.eq_ignore_ascii_case("undefined")
    {
        return String::new();
    }

    trimmed.to_string()
}

/// Verificar si un driverId ya normalizado representa un conductor asignado
pub fn has_driver(driver_id: &str) -> bool {
    !driver_id.is_empty()
}

/// Derivar el estado de una tarea a partir del driverId normalizado y del
/// estado pedido por el cliente. driverId vacío fuerza `unassigned` sin
/// importar lo pedido; con conductor, `inprogress`/`completed` se respetan
/// tal cual y cualquier otro valor cae a `todo`.
pub fn derive_status(driver_id: &str, requested: TaskStatus) -> TaskStatus {
    if !has_driver(driver_id) {
        return TaskStatus::Unassigned;
    }

    match requested {
        TaskStatus::InProgress => TaskStatus::InProgress,
        TaskStatus::Completed => TaskStatus::Completed,
        TaskStatus::Unassigned | TaskStatus::Todo => TaskStatus::Todo,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_maps_empty_like_values_to_empty() {
        assert_eq!(normalize_driver_id(None), "");
        assert_eq!(normalize_driver_id(Some("")), "");
        assert_eq!(normalize_driver_id(Some("   ")), "");
        assert_eq!(normalize_driver_id(Some("null")), "");
        assert_eq!(normalize_driver_id(Some("NULL")), "");
        assert_eq!(normalize_driver_id(Some("undefined")), "");
        assert_eq!(normalize_driver_id(Some(" Undefined ")), "");
    }

    #[test]
    fn normalize_trims_and_keeps_real_ids() {
        assert_eq!(normalize_driver_id(Some(" 5 ")), "5");
        assert_eq!(normalize_driver_id(Some("driver-42")), "driver-42");
    }

    #[test]
    fn normalize_is_idempotent() {
        for raw in ["", "  ", "null", "UNDEFINED", " 5 ", "driver-42"] {
            let once = normalize_driver_id(Some(raw));
            let twice = normalize_driver_id(Some(&once));
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn status_without_driver_is_always_unassigned() {
        for requested in [
            TaskStatus::Unassigned,
            TaskStatus::Todo,
            TaskStatus::InProgress,
            TaskStatus::Completed,
        ] {
            assert_eq!(derive_status("", requested), TaskStatus::Unassigned);
        }
    }

    #[test]
    fn status_with_driver_keeps_progress_and_falls_back_to_todo() {
        assert_eq!(derive_status("5", TaskStatus::Unassigned), TaskStatus::Todo);
        assert_eq!(derive_status("5", TaskStatus::Todo), TaskStatus::Todo);
        assert_eq!(derive_status("5", TaskStatus::InProgress), TaskStatus::InProgress);
        assert_eq!(derive_status("5", TaskStatus::Completed), TaskStatus::Completed);
    }

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&TaskStatus::InProgress).unwrap(),
            "\"inprogress\""
        );
        assert_eq!(
            serde_json::from_str::<TaskStatus>("\"unassigned\"").unwrap(),
            TaskStatus::Unassigned
        );
    }
}
