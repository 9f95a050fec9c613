//! Controller de conductores

use chrono::Utc;
use uuid::Uuid;

use crate::models::driver::{CreateDriverRequest, Driver, UpdateDriverRequest};
use crate::storage::{Collection, JsonStore};
use crate::utils::errors::{not_found_error, AppResult};

pub struct DriverController {
    store: JsonStore,
}

impl DriverController {
    pub fn new(store: JsonStore) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> AppResult<Vec<Driver>> {
        Ok(self.store.read_all(Collection::Drivers).await)
    }

    pub async fn create(&self, request: CreateDriverRequest) -> AppResult<Driver> {
        let now = Utc::now();
        let driver = Driver {
            id: Uuid::new_v4().to_string(),
            name: request.name.unwrap_or_default(),
            phone: request.phone.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        };

        let created = driver.clone();
        self.store
            .mutate::<Driver, _, _>(Collection::Drivers, move |drivers| {
                drivers.push(driver);
                Ok(())
            })
            .await?;

        Ok(created)
    }

    pub async fn update(&self, id: String, patch: UpdateDriverRequest) -> AppResult<Driver> {
        self.store
            .mutate::<Driver, _, _>(Collection::Drivers, move |drivers| {
                let driver = drivers
                    .iter_mut()
                    .find(|d| d.id == id)
                    .ok_or_else(|| not_found_error("Driver", &id))?;

                if let Some(name) = patch.name {
                    driver.name = name;
                }
                if let Some(phone) = patch.phone {
                    driver.phone = phone;
                }
                driver.updated_at = Utc::now();

                Ok(driver.clone())
            })
            .await
    }

    /// Borrado inmediato, sin tombstone. Las tareas que referencien al
    /// conductor quedan con el driverId colgando; el cliente lo tolera.
    pub async fn remove(&self, id: String) -> AppResult<Driver> {
        self.store
            .mutate::<Driver, _, _>(Collection::Drivers, move |drivers| {
                let index = drivers
                    .iter()
                    .position(|d| d.id == id)
                    .ok_or_else(|| not_found_error("Driver", &id))?;
                Ok(drivers.remove(index))
            })
            .await
    }
}
