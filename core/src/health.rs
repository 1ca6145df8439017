//! Health-check reduction.
//!
//! # Design
//! `/health` failures of every kind (transport, status, payload) collapse to
//! "down". That collapsing lives here, in `reduce_health`, and nowhere else:
//! `convert` keeps the full error taxonomy and must never route through it.

use serde_json::Value;
use tracing::{debug, warn};

use crate::http::{HttpResponse, TransportError};

/// Whether the service reported itself up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthStatus {
    pub is_up: bool,
}

impl HealthStatus {
    pub const UP: HealthStatus = HealthStatus { is_up: true };
    pub const DOWN: HealthStatus = HealthStatus { is_up: false };
}

/// Reduce the outcome of a `/health` round-trip to a `HealthStatus`.
pub fn reduce_health(outcome: Result<HttpResponse, TransportError>) -> HealthStatus {
    let mut response = match outcome {
        Ok(response) => response,
        Err(err) => {
            warn!("health check request failed: {err}");
            return HealthStatus::DOWN;
        }
    };

    if response.status != 200 {
        debug!("health check returned status {}", response.status);
        return HealthStatus::DOWN;
    }

    let body = match response.body.read_to_string_lossy() {
        Ok(body) => body,
        Err(err) => {
            warn!("failed to read health check body: {err}");
            return HealthStatus::DOWN;
        }
    };

    // Expected shape: {"status": "up"}; other fields are ignored.
    let payload = match serde_json::from_str::<Value>(&body) {
        Ok(Value::Object(payload)) => payload,
        Ok(other) => {
            debug!("health check body is not an object: {other}");
            return HealthStatus::DOWN;
        }
        Err(err) => {
            debug!("health check body is not JSON: {err}");
            return HealthStatus::DOWN;
        }
    };

    match payload.get("status") {
        Some(Value::String(status)) if status == "up" => HealthStatus::UP,
        status => {
            debug!("service reported status {status:?}");
            HealthStatus::DOWN
        }
    }
}
