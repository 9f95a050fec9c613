//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use crate::config::environment::EnvironmentConfig;
use crate::storage::JsonStore;

#[derive(Clone)]
pub struct AppState {
    pub store: JsonStore,
    pub config: EnvironmentConfig,
}

impl AppState {
    pub fn new(store: JsonStore, config: EnvironmentConfig) -> Self {
        Self { store, config }
    }
}
