//! Modelo de Location/Point
//!
//! Los puntos de carga y descarga y las ubicaciones genéricas comparten una
//! única colección persistida (locations.json); `/api/points` es una vista
//! filtrada por tipo sobre ella.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Radio por defecto (metros) para el círculo del punto en el mapa
pub const DEFAULT_RADIUS_METERS: f64 = 1000.0;

/// Tipo de punto - los valores reconocidos por la vista `/api/points`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointType {
    Loading,
    Dropoff,
}

impl PointType {
    /// Parsear el tipo enviado por el cliente, sin distinguir mayúsculas
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "loading" => Some(PointType::Loading),
            "dropoff" => Some(PointType::Dropoff),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PointType::Loading => "loading",
            PointType::Dropoff => "dropoff",
        }
    }
}

/// Location principal - persistida en locations.json. `type` queda como
/// cadena libre porque la colección también guarda ubicaciones genéricas;
/// solo la vista de puntos exige loading/dropoff.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
    #[serde(default = "default_radius")]
    pub radius: f64,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub link: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_radius() -> f64 {
    DEFAULT_RADIUS_METERS
}

impl Location {
    /// Verificar si la ubicación cuenta como punto de carga/descarga
    pub fn is_point(&self) -> bool {
        PointType::parse(&self.kind).is_some()
    }
}

/// Request para crear una ubicación o un punto. La vista de puntos exige
/// `title` y `type`; la colección cruda de locations acepta ambos vacíos.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLocationRequest {
    pub title: Option<String>,
    pub address: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub radius: Option<f64>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub link: Option<String>,
}

/// Request para actualizar un punto existente
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePointRequest {
    pub title: Option<String>,
    pub address: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub radius: Option<f64>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub link: Option<String>,
}

/// Normalizar el radio: ausente, no finito o no positivo → radio por defecto
pub fn normalize_radius(radius: Option<f64>) -> f64 {
    match radius {
        Some(r) if r.is_finite() && r > 0.0 => r,
        _ => DEFAULT_RADIUS_METERS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn radius_defaults_when_absent_or_invalid() {
        assert_eq!(normalize_radius(None), 1000.0);
        assert_eq!(normalize_radius(Some(0.0)), 1000.0);
        assert_eq!(normalize_radius(Some(-250.0)), 1000.0);
        assert_eq!(normalize_radius(Some(f64::NAN)), 1000.0);
        assert_eq!(normalize_radius(Some(f64::INFINITY)), 1000.0);
    }

    #[test]
    fn radius_keeps_valid_values() {
        assert_eq!(normalize_radius(Some(500.0)), 500.0);
        assert_eq!(normalize_radius(Some(2500.5)), 2500.5);
    }

    #[test]
    fn point_type_parses_case_insensitively() {
        assert_eq!(PointType::parse("loading"), Some(PointType::Loading));
        assert_eq!(PointType::parse(" Dropoff "), Some(PointType::Dropoff));
        assert_eq!(PointType::parse("warehouse"), None);
        assert_eq!(PointType::parse(""), None);
    }
}
