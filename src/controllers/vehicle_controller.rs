//! Controller de vehículos

use chrono::Utc;
use uuid::Uuid;

use crate::models::vehicle::{CreateVehicleRequest, Vehicle};
use crate::storage::{Collection, JsonStore};
use crate::utils::errors::AppResult;

pub struct VehicleController {
    store: JsonStore,
}

impl VehicleController {
    pub fn new(store: JsonStore) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> AppResult<Vec<Vehicle>> {
        Ok(self.store.read_all(Collection::Vehicles).await)
    }

    pub async fn create(&self, request: CreateVehicleRequest) -> AppResult<Vehicle> {
        let now = Utc::now();
        let vehicle = Vehicle {
            id: Uuid::new_v4().to_string(),
            // La matrícula se almacena en mayúsculas sin importar la caja enviada
            reg: request.reg.unwrap_or_default().trim().to_uppercase(),
            description: request.description.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        };

        let created = vehicle.clone();
        self.store
            .mutate::<Vehicle, _, _>(Collection::Vehicles, move |vehicles| {
                vehicles.push(vehicle);
                Ok(())
            })
            .await?;

        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn registration_is_stored_uppercase() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::open(dir.path()).await.unwrap();
        let controller = VehicleController::new(store);

        let vehicle = controller
            .create(CreateVehicleRequest {
                reg: Some(" jy75lvgp ".to_string()),
                description: Some("Box truck".to_string()),
            })
            .await
            .unwrap();

        assert_eq!(vehicle.reg, "JY75LVGP");
        assert_eq!(controller.list().await.unwrap().len(), 1);
    }
}
