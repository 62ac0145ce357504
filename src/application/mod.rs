// Application layer - Use cases orchestrating the parking backend
pub mod auth_service;
pub mod event_service;
pub mod forecast_service;
pub mod parking_api;
pub mod prediction_service;
pub mod session_store;
pub mod zone_map_service;
pub mod zone_service;

#[cfg(test)]
pub mod testing;
