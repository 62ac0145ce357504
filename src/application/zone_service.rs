// Zone service - Use case for listing parking zones
use crate::application::parking_api::{ApiError, ParkingApi};
use crate::domain::zone::{Zone, reference_zones};
use std::sync::Arc;

#[derive(Clone)]
pub struct ZoneService {
    api: Arc<dyn ParkingApi>,
}

impl ZoneService {
    pub fn new(api: Arc<dyn ParkingApi>) -> Self {
        Self { api }
    }

    /// Zones shown on the map and in the picker
    pub fn reference_zones(&self) -> Vec<Zone> {
        reference_zones()
    }

    pub async fn remote_zones(&self) -> Result<Vec<Zone>, ApiError> {
        let zones = self.api.list_zones().await?;
        tracing::debug!("Backend reports {} zones", zones.len());
        Ok(zones)
    }
}
