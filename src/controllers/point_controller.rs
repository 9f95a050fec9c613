//! Controller de locations y puntos de carga/descarga
//!
//! Ambas superficies operan sobre la misma colección persistida
//! (locations.json). `/api/points` es la vista filtrada a los tipos
//! loading/dropoff; `/api/locations` expone la colección cruda.

use chrono::Utc;
use uuid::Uuid;

use crate::models::location::{
    normalize_radius, CreateLocationRequest, Location, PointType, UpdatePointRequest,
};
use crate::storage::{Collection, JsonStore};
use crate::utils::errors::{not_found_error, AppError, AppResult};

pub struct PointController {
    store: JsonStore,
}

impl PointController {
    pub fn new(store: JsonStore) -> Self {
        Self { store }
    }

    pub async fn list_locations(&self) -> AppResult<Vec<Location>> {
        Ok(self.store.read_all(Collection::Locations).await)
    }

    /// Listar solo las ubicaciones que son puntos de carga o descarga
    pub async fn list_points(&self) -> AppResult<Vec<Location>> {
        let locations: Vec<Location> = self.store.read_all(Collection::Locations).await;
        Ok(locations.into_iter().filter(|l| l.is_point()).collect())
    }

    /// Crear una ubicación genérica (sin exigir title/type)
    pub async fn create_location(&self, request: CreateLocationRequest) -> AppResult<Location> {
        let location = Self::build_location(request, None);
        self.persist_new(location).await
    }

    /// Crear un punto de carga o descarga. title y type son obligatorios y
    /// el type debe ser loading o dropoff.
    pub async fn create_point(&self, request: CreateLocationRequest) -> AppResult<Location> {
        let title_missing = request
            .title
            .as_deref()
            .map(|t| t.trim().is_empty())
            .unwrap_or(true);
        if title_missing {
            return Err(AppError::Validation("title and type required".to_string()));
        }

        let point_type = request
            .kind
            .as_deref()
            .and_then(PointType::parse)
            .ok_or_else(|| AppError::Validation("title and type required".to_string()))?;

        let location = Self::build_location(request, Some(point_type));
        self.persist_new(location).await
    }

    pub async fn update_point(&self, id: String, patch: UpdatePointRequest) -> AppResult<Location> {
        self.store
            .mutate::<Location, _, _>(Collection::Locations, move |locations| {
                let location = locations
                    .iter_mut()
                    .find(|l| l.id == id)
                    .ok_or_else(|| not_found_error("Point", &id))?;

                if let Some(title) = patch.title {
                    location.title = title;
                }
                if let Some(address) = patch.address {
                    location.address = address;
                }
                if let Some(lat) = patch.lat {
                    location.lat = Some(lat);
                }
                if let Some(lon) = patch.lon {
                    location.lon = Some(lon);
                }
                if patch.radius.is_some() {
                    location.radius = normalize_radius(patch.radius);
                }
                if let Some(kind) = patch.kind {
                    location.kind = kind.trim().to_lowercase();
                }
                if let Some(link) = patch.link {
                    location.link = link;
                }
                location.updated_at = Utc::now();

                Ok(location.clone())
            })
            .await
    }

    pub async fn remove_point(&self, id: String) -> AppResult<Location> {
        self.store
            .mutate::<Location, _, _>(Collection::Locations, move |locations| {
                let index = locations
                    .iter()
                    .position(|l| l.id == id)
                    .ok_or_else(|| not_found_error("Point", &id))?;
                Ok(locations.remove(index))
            })
            .await
    }

    fn build_location(request: CreateLocationRequest, point_type: Option<PointType>) -> Location {
        let now = Utc::now();
        let kind = match point_type {
            Some(pt) => pt.as_str().to_string(),
            None => request
                .kind
                .map(|k| k.trim().to_lowercase())
                .unwrap_or_default(),
        };

        Location {
            id: Uuid::new_v4().to_string(),
            title: request.title.unwrap_or_default(),
            address: request.address.unwrap_or_default(),
            lat: request.lat,
            lon: request.lon,
            radius: normalize_radius(request.radius),
            kind,
            link: request.link.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        }
    }

    async fn persist_new(&self, location: Location) -> AppResult<Location> {
        let created = location.clone();
        self.store
            .mutate::<Location, _, _>(Collection::Locations, move |locations| {
                locations.push(location);
                Ok(())
            })
            .await?;
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn controller() -> (PointController, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::open(dir.path()).await.unwrap();
        (PointController::new(store), dir)
    }

    fn point_request(title: &str, kind: &str) -> CreateLocationRequest {
        CreateLocationRequest {
            title: Some(title.to_string()),
            kind: Some(kind.to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn create_point_requires_title_and_type() {
        let (controller, _dir) = controller().await;

        assert!(controller.create_point(point_request("", "loading")).await.is_err());
        assert!(controller
            .create_point(CreateLocationRequest {
                title: Some("Depot".to_string()),
                ..Default::default()
            })
            .await
            .is_err());
        assert!(controller.create_point(point_request("Depot", "warehouse")).await.is_err());

        // Una creación rechazada no muta la colección
        assert!(controller.list_locations().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn points_view_filters_generic_locations() {
        let (controller, _dir) = controller().await;

        controller.create_point(point_request("Quarry", "Loading")).await.unwrap();
        controller.create_point(point_request("Site 4", "dropoff")).await.unwrap();
        controller
            .create_location(CreateLocationRequest {
                title: Some("Office".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        let points = controller.list_points().await.unwrap();
        assert_eq!(points.len(), 2);
        assert!(points.iter().all(|p| p.is_point()));

        let locations = controller.list_locations().await.unwrap();
        assert_eq!(locations.len(), 3);
    }

    #[tokio::test]
    async fn invalid_radius_falls_back_to_default() {
        let (controller, _dir) = controller().await;

        let point = controller
            .create_point(CreateLocationRequest {
                title: Some("Depot".to_string()),
                kind: Some("loading".to_string()),
                radius: Some(-5.0),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(point.radius, 1000.0);

        let updated = controller
            .update_point(
                point.id.clone(),
                UpdatePointRequest {
                    radius: Some(350.0),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.radius, 350.0);
    }

    #[tokio::test]
    async fn update_and_remove_missing_point_return_not_found() {
        let (controller, _dir) = controller().await;

        assert!(controller
            .update_point("missing".to_string(), UpdatePointRequest::default())
            .await
            .is_err());
        assert!(controller.remove_point("missing".to_string()).await.is_err());
    }
}
