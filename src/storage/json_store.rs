//! Almacenamiento de colecciones en archivos JSON
//!
//! Cada colección persiste como un único archivo JSON (array) dentro del
//! directorio de datos. Toda mutación es read-modify-write del archivo
//! completo, serializada por un mutex por colección para que dos escrituras
//! concurrentes sobre la misma colección no se pisen entre sí.
//!
//! Un archivo ilegible o corrupto se registra y se trata como colección
//! vacía; la petición continúa. Los errores de escritura sí se propagan.

use std::path::PathBuf;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{error, warn};

use crate::utils::errors::{AppError, AppResult};

/// Colecciones persistidas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Tasks,
    Drivers,
    Locations,
    Vehicles,
}

impl Collection {
    pub fn file_name(&self) -> &'static str {
        match self {
            Collection::Tasks => "tasks.json",
            Collection::Drivers => "drivers.json",
            Collection::Locations => "locations.json",
            Collection::Vehicles => "vehicles.json",
        }
    }

    fn index(&self) -> usize {
        match self {
            Collection::Tasks => 0,
            Collection::Drivers => 1,
            Collection::Locations => 2,
            Collection::Vehicles => 3,
        }
    }
}

// Archivos heredados del layout original: se crean vacíos por compatibilidad
// pero nunca se leen ni se escriben. La fuente canónica de los puntos es la
// colección de locations filtrada por tipo.
const LEGACY_FILES: [&str; 3] = ["points.json", "loadingPoints.json", "dropoffPoints.json"];

/// Store de colecciones JSON con un lock por colección
#[derive(Clone)]
pub struct JsonStore {
    data_dir: PathBuf,
    locks: Arc<[Mutex<()>; 4]>,
}

impl JsonStore {
    /// Abrir el store, creando el directorio de datos y los archivos
    /// de colección vacíos en el primer arranque.
    pub async fn open(data_dir: impl Into<PathBuf>) -> AppResult<Self> {
        let data_dir = data_dir.into();

        tokio::fs::create_dir_all(&data_dir)
            .await
            .map_err(|e| AppError::Storage(format!("Error creating data dir: {}", e)))?;

        let all_files = [
            Collection::Tasks.file_name(),
            Collection::Drivers.file_name(),
            Collection::Locations.file_name(),
            Collection::Vehicles.file_name(),
            LEGACY_FILES[0],
            LEGACY_FILES[1],
            LEGACY_FILES[2],
        ];

        for name in all_files {
            let path = data_dir.join(name);
            if tokio::fs::try_exists(&path)
                .await
                .map_err(|e| AppError::Storage(format!("Error checking {}: {}", name, e)))?
            {
                continue;
            }
            tokio::fs::write(&path, "[]")
                .await
                .map_err(|e| AppError::Storage(format!("Error creating {}: {}", name, e)))?;
        }

        Ok(Self {
            data_dir,
            locks: Arc::new([
                Mutex::new(()),
                Mutex::new(()),
                Mutex::new(()),
                Mutex::new(()),
            ]),
        })
    }

    /// Leer una colección completa. Archivo ausente o corrupto → colección vacía.
    pub async fn read_all<T: DeserializeOwned>(&self, collection: Collection) -> Vec<T> {
        let _guard = self.locks[collection.index()].lock().await;
        self.read_unlocked(collection).await
    }

    /// Aplicar una mutación read-modify-write sobre una colección, con el
    /// lock de la colección sostenido durante toda la operación. Si el
    /// closure falla, la colección no se reescribe.
    pub async fn mutate<T, R, F>(&self, collection: Collection, apply: F) -> AppResult<R>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce(&mut Vec<T>) -> AppResult<R>,
    {
        let _guard = self.locks[collection.index()].lock().await;

        let mut items: Vec<T> = self.read_unlocked(collection).await;
        let result = apply(&mut items)?;
        self.write_unlocked(collection, &items).await?;

        Ok(result)
    }

    async fn read_unlocked<T: DeserializeOwned>(&self, collection: Collection) -> Vec<T> {
        let path = self.data_dir.join(collection.file_name());

        let raw = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!("⚠️ Failed to read {}: {} — treating as empty", collection.file_name(), e);
                return Vec::new();
            }
        };

        if raw.trim().is_empty() {
            return Vec::new();
        }

        match serde_json::from_str(&raw) {
            Ok(items) => items,
            Err(e) => {
                error!("❌ Corrupt collection {}: {} — treating as empty", collection.file_name(), e);
                Vec::new()
            }
        }
    }

    async fn write_unlocked<T: Serialize>(&self, collection: Collection, items: &[T]) -> AppResult<()> {
        let path = self.data_dir.join(collection.file_name());

        let raw = serde_json::to_string_pretty(items)
            .map_err(|e| AppError::Storage(format!("Error serializing {}: {}", collection.file_name(), e)))?;

        tokio::fs::write(&path, raw)
            .await
            .map_err(|e| AppError::Storage(format!("Error writing {}: {}", collection.file_name(), e)))?;

        Ok(())
    }
}
