//! HTTP request handlers for the Ferie Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{calculate_entitlement, calculate_fleet};
use crate::error::EngineError;
use crate::models::{NewWorker, Worker, WorkerConfig};

use super::request::{CalculationRequest, FleetRequest};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate", post(calculate_handler))
        .route("/fleet", post(fleet_handler))
        .route(
            "/workers",
            get(list_workers_handler).post(create_worker_handler),
        )
        .route(
            "/workers/:id",
            get(get_worker_handler)
                .put(replace_worker_handler)
                .delete(delete_worker_handler),
        )
        .route(
            "/workers/:id/config",
            get(get_config_handler).put(put_config_handler),
        )
        .route("/workers/:id/entitlement", get(entitlement_handler))
        .route("/dashboard", get(dashboard_handler))
        .route("/profiles", get(profiles_handler))
        .with_state(state)
}

/// Serializes a body with an explicit JSON content type.
fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

/// Converts an engine error into its API response, logging it.
fn engine_error_response(correlation_id: Uuid, err: EngineError) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Request failed"
    );
    let api_error: ApiErrorResponse = err.into();
    json_response(api_error.status, api_error.error)
}

/// Converts a JSON body rejection into a 400 response.
fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries the detailed serde error
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    json_response(StatusCode::BAD_REQUEST, error)
}

/// Handler for POST /calculate.
///
/// Calculates the entitlement of a worker posted in the request body,
/// without touching the store.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> Response {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let config = request
        .config
        .unwrap_or_else(|| state.config().default_worker_config());

    let start_time = Instant::now();
    let entitlement = calculate_entitlement(&request.worker, &config);
    info!(
        correlation_id = %correlation_id,
        worker_id = request.worker.id,
        months = request.worker.months.len(),
        net_owed = %entitlement.totals.net_owed,
        duration_us = start_time.elapsed().as_micros(),
        "Calculation completed successfully"
    );

    json_response(StatusCode::OK, entitlement)
}

/// Handler for POST /fleet.
async fn fleet_handler(
    State(state): State<AppState>,
    payload: Result<Json<FleetRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing fleet request");

    let mut request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let defaults = state.config().default_worker_config();
    for worker in &request.workers {
        request.configs.entry(worker.id).or_insert(defaults);
    }

    let start_time = Instant::now();
    let summary = calculate_fleet(&request.workers, &request.configs);
    info!(
        correlation_id = %correlation_id,
        workers = summary.worker_count,
        net_owed = %summary.totals.net_owed,
        duration_us = start_time.elapsed().as_micros(),
        "Fleet calculation completed"
    );

    json_response(StatusCode::OK, summary)
}

/// Handler for GET /workers.
async fn list_workers_handler(State(state): State<AppState>) -> Response {
    let correlation_id = Uuid::new_v4();
    match state.registry().list_workers() {
        Ok(workers) => {
            info!(correlation_id = %correlation_id, count = workers.len(), "Listed workers");
            json_response(StatusCode::OK, workers)
        }
        Err(err) => engine_error_response(correlation_id, err),
    }
}

/// Handler for POST /workers.
///
/// Creates a worker from identity fields; responds 201 with the full
/// record including its blank month template.
async fn create_worker_handler(
    State(state): State<AppState>,
    payload: Result<Json<NewWorker>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let new_worker = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    match state.registry().create_worker(new_worker) {
        Ok(worker) => {
            info!(correlation_id = %correlation_id, worker_id = worker.id, "Worker created");
            json_response(StatusCode::CREATED, worker)
        }
        Err(err) => engine_error_response(correlation_id, err),
    }
}

/// Handler for GET /workers/:id.
async fn get_worker_handler(State(state): State<AppState>, Path(id): Path<u64>) -> Response {
    let correlation_id = Uuid::new_v4();
    match state.registry().get_worker(id) {
        Ok(worker) => json_response(StatusCode::OK, worker),
        Err(err) => engine_error_response(correlation_id, err),
    }
}

/// Handler for PUT /workers/:id.
async fn replace_worker_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    payload: Result<Json<Worker>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let worker = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    match state.registry().replace_worker(id, worker) {
        Ok(worker) => {
            info!(correlation_id = %correlation_id, worker_id = id, "Worker replaced");
            json_response(StatusCode::OK, worker)
        }
        Err(err) => engine_error_response(correlation_id, err),
    }
}

/// Handler for DELETE /workers/:id.
async fn delete_worker_handler(State(state): State<AppState>, Path(id): Path<u64>) -> Response {
    let correlation_id = Uuid::new_v4();
    match state.registry().delete_worker(id) {
        Ok(()) => {
            info!(correlation_id = %correlation_id, worker_id = id, "Worker deleted");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(err) => engine_error_response(correlation_id, err),
    }
}

/// Handler for GET /workers/:id/config.
async fn get_config_handler(State(state): State<AppState>, Path(id): Path<u64>) -> Response {
    let correlation_id = Uuid::new_v4();
    let registry = state.registry();
    match registry.get_worker(id).and_then(|_| registry.get_config(id)) {
        Ok(config) => json_response(StatusCode::OK, config),
        Err(err) => engine_error_response(correlation_id, err),
    }
}

/// Handler for PUT /workers/:id/config.
async fn put_config_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    payload: Result<Json<WorkerConfig>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let config = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    match state.registry().set_config(id, config) {
        Ok(config) => json_response(StatusCode::OK, config),
        Err(err) => engine_error_response(correlation_id, err),
    }
}

/// Handler for GET /workers/:id/entitlement.
async fn entitlement_handler(State(state): State<AppState>, Path(id): Path<u64>) -> Response {
    let correlation_id = Uuid::new_v4();
    let start_time = Instant::now();
    match state.registry().entitlement(id) {
        Ok(entitlement) => {
            info!(
                correlation_id = %correlation_id,
                worker_id = id,
                net_owed = %entitlement.totals.net_owed,
                duration_us = start_time.elapsed().as_micros(),
                "Entitlement calculated"
            );
            json_response(StatusCode::OK, entitlement)
        }
        Err(err) => engine_error_response(correlation_id, err),
    }
}

/// Handler for GET /dashboard.
async fn dashboard_handler(State(state): State<AppState>) -> Response {
    let correlation_id = Uuid::new_v4();
    let start_time = Instant::now();
    match state.registry().dashboard() {
        Ok(summary) => {
            info!(
                correlation_id = %correlation_id,
                workers = summary.worker_count,
                net_owed = %summary.totals.net_owed,
                duration_us = start_time.elapsed().as_micros(),
                "Dashboard calculated"
            );
            json_response(StatusCode::OK, summary)
        }
        Err(err) => engine_error_response(correlation_id, err),
    }
}

/// Handler for GET /profiles.
async fn profiles_handler(State(state): State<AppState>) -> Response {
    json_response(StatusCode::OK, state.config().profiles())
}
