//! Modelo de Driver

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Driver principal - persistido en drivers.json. El teléfono hace también de
/// credencial de login en el sistema más amplio; la autenticación queda fuera
/// de este servicio.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Driver {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request para crear un nuevo conductor
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDriverRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
}

/// Request para actualizar un conductor existente
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDriverRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
}
