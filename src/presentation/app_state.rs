// Application state for HTTP handlers
use crate::application::auth_service::AuthService;
use crate::application::event_service::EventService;
use crate::application::forecast_service::ZoneInsightService;
use crate::application::prediction_service::PredictionOrchestrator;
use crate::application::zone_map_service::ZoneMapService;
use crate::application::zone_service::ZoneService;

#[derive(Clone)]
pub struct AppState {
    pub zone_service: ZoneService,
    pub prediction_service: PredictionOrchestrator,
    pub insight_service: ZoneInsightService,
    pub zone_map_service: ZoneMapService,
    pub event_service: EventService,
    pub auth_service: AuthService,
}
