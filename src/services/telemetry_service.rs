//! Servicio de telemetría Autotrak
//!
//! Obtiene una foto en vivo de las posiciones de la flota configurada.
//! Sin caché de token ni refresh: cada fetch hace login de nuevo. Tampoco hay
//! reintentos del lado del servidor; el polling periódico del cliente es el
//! único mecanismo de reintento.

use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::config::environment::EnvironmentConfig;
use crate::utils::errors::{AppError, AppResult};

/// Timeout fijo para las llamadas al proveedor
const PROVIDER_TIMEOUT_SECS: u64 = 20;

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

pub struct TelemetryService {
    client: reqwest::Client,
    base_url: String,
    username: String,
    password: String,
    product_id: String,
    registrations: String,
}

impl TelemetryService {
    /// Construir el servicio desde la configuración. Devuelve None cuando no
    /// hay credenciales: el endpoint de posiciones degrada a lista vacía en
    /// lugar de fallar.
    pub fn from_config(config: &EnvironmentConfig) -> Option<Self> {
        let username = config.autotrak_username.clone()?;
        let password = config.autotrak_password.clone()?;

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(PROVIDER_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client");

        Some(Self {
            client,
            base_url: config.autotrak_base_url.clone(),
            username,
            password,
            product_id: config.autotrak_product_id.clone(),
            registrations: config.autotrak_registrations.clone(),
        })
    }

    /// Login contra el proveedor. Cada llamada re-autentica; el token no se
    /// cachea.
    async fn login(&self) -> AppResult<String> {
        let url = format!("{}/api/Login", self.base_url);
        info!("🔐 Logging into Autotrak: {}", url);

        let response = self
            .client
            .post(&url)
            .json(&LoginRequest {
                username: &self.username,
                password: &self.password,
            })
            .send()
            .await
            .map_err(|e| AppError::TelemetryAuth(format!("Login request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::TelemetryAuth(format!(
                "Login failed with status {}",
                status
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| AppError::TelemetryAuth(format!("Invalid login response: {}", e)))?;

        match body.get("token").and_then(Value::as_str) {
            Some(token) => {
                info!("✅ Login success – token received");
                Ok(token.to_string())
            }
            None => Err(AppError::TelemetryAuth(
                "Login succeeded but no token returned".to_string(),
            )),
        }
    }

    /// Obtener las posiciones en vivo de la flota configurada. Los registros
    /// del proveedor se devuelven tal cual.
    pub async fn fetch_positions(&self) -> AppResult<Vec<Value>> {
        let token = self.login().await?;

        let url = format!(
            "{}/api/vehicleposition/GetVehiclePositionsByRegistration/{}?productId={}",
            self.base_url, self.registrations, self.product_id
        );
        info!("🚚 Fetching live data from Autotrak: {}", url);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&token)
            .header("Content-Type", "application/json")
            .send()
            .await
            .map_err(|e| AppError::TelemetryFetch(format!("Position request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::TelemetryFetch(format!(
                "Position fetch failed with status {}",
                status
            )));
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| AppError::TelemetryFetch(format!("Invalid position response: {}", e)))?;

        let positions = unwrap_positions_payload(payload);
        if positions.is_empty() {
            warn!("⚠️ No vehicle data returned");
        } else {
            info!("✅ Received {} vehicles", positions.len());
        }

        Ok(positions)
    }
}

/// Normalizar el payload del proveedor: un array se devuelve tal cual, un
/// objeto con `.result` array se desenvuelve, y cualquier otra forma da lista
/// vacía en vez de un error de shape.
pub fn unwrap_positions_payload(payload: Value) -> Vec<Value> {
    match payload {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("result") {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn array_payload_passes_through_verbatim() {
        let payload = json!([
            {"registration": "JY75LVGP", "latitude": -26.1, "longitude": 28.0, "speed": 62},
            {"registration": "LF08SCGP", "latitude": -26.2, "longitude": 28.1, "speed": 0}
        ]);
        let positions = unwrap_positions_payload(payload.clone());
        assert_eq!(positions.len(), 2);
        assert_eq!(positions[0]["registration"], "JY75LVGP");
    }

    #[test]
    fn result_wrapper_is_unwrapped() {
        let payload = json!({"result": [{"registration": "MJ26FSGP"}]});
        let positions = unwrap_positions_payload(payload);
        assert_eq!(positions.len(), 1);
        assert_eq!(positions[0]["registration"], "MJ26FSGP");
    }

    #[test]
    fn non_array_payloads_yield_empty_list() {
        assert!(unwrap_positions_payload(json!({})).is_empty());
        assert!(unwrap_positions_payload(json!({"result": "nope"})).is_empty());
        assert!(unwrap_positions_payload(json!("unexpected")).is_empty());
        assert!(unwrap_positions_payload(Value::Null).is_empty());
    }

    #[test]
    fn service_requires_credentials() {
        let config = EnvironmentConfig {
            port: 5000,
            host: "0.0.0.0".to_string(),
            data_dir: "data".to_string(),
            autotrak_base_url: "https://api.autotraklive.com".to_string(),
            autotrak_username: None,
            autotrak_password: None,
            autotrak_product_id: "51".to_string(),
            autotrak_registrations: "JY75LVGP".to_string(),
        };
        assert!(TelemetryService::from_config(&config).is_none());
    }
}
