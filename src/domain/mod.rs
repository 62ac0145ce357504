// Domain layer - View-state models for the parking dashboard
pub mod calendar;
pub mod event;
pub mod format;
pub mod prediction;
pub mod recommendation;
pub mod session;
pub mod zone;
