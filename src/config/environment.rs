//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.
//! Las credenciales de Autotrak son opcionales: sin ellas el endpoint de
//! posiciones responde con una lista vacía en lugar de fallar.

use std::env;

/// Matrículas por defecto de la flota monitoreada
pub const DEFAULT_REGISTRATIONS: &str =
    "JY75LVGP,LF08SCGP,MF15BDGP,JR33VNGP,JP79CRGP,JN67NSGP,JN76PHGP,MJ26FSGP,JN67MXGP";

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub port: u16,
    pub host: String,
    pub data_dir: String,
    // Telemetría Autotrak
    pub autotrak_base_url: String,
    pub autotrak_username: Option<String>,
    pub autotrak_password: Option<String>,
    pub autotrak_product_id: String,
    pub autotrak_registrations: String,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            data_dir: env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string()),
            autotrak_base_url: env::var("AUTOTRAK_BASE_URL")
                .unwrap_or_else(|_| "https://api.autotraklive.com".to_string()),
            autotrak_username: env::var("AUTOTRAK_USERNAME").ok(),
            autotrak_password: env::var("AUTOTRAK_PASSWORD").ok(),
            autotrak_product_id: env::var("AUTOTRAK_PRODUCT_ID")
                .unwrap_or_else(|_| "51".to_string()),
            autotrak_registrations: env::var("AUTOTRAK_REGISTRATIONS")
                .unwrap_or_else(|_| DEFAULT_REGISTRATIONS.to_string()),
        }
    }
}

impl EnvironmentConfig {
    /// Verificar si hay credenciales de Autotrak configuradas
    pub fn has_autotrak_credentials(&self) -> bool {
        self.autotrak_username.is_some() && self.autotrak_password.is_some()
    }

    /// Obtener la URL del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
