//! Modelo de Vehicle

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Vehicle principal - persistido en vehicles.json. La matrícula (`reg`) es
/// la clave de cara al usuario y se almacena siempre en mayúsculas; el id es
/// opaco.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: String,
    #[serde(default)]
    pub reg: String,
    #[serde(default)]
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request para crear un nuevo vehículo
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVehicleRequest {
    pub reg: Option<String>,
    pub description: Option<String>,
}
