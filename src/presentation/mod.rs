// Presentation layer - HTTP surface exposing dashboard view state
pub mod app_state;
pub mod handlers;
pub mod http_error;
pub mod routes;
