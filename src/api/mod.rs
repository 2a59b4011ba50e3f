//! HTTP API module for the Ferie Engine.
//!
//! This module provides the REST endpoints for calculating vacation-pay
//! entitlements and managing the stored worker collection.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{CalculationRequest, FleetRequest};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
