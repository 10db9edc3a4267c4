//! Route handler functions for all API endpoints.
//!
//! Each handler extracts parameters via axum extractors, reads snapshots
//! from AppState services, and returns JSON (CSV for the alert export).

use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use aerogrid_core::types::{Alert, GridZone};

use crate::error::ApiError;
use crate::state::AppState;

// =============================================================================
// Request / response types
// =============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AssistRequest {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AssistResponse {
    pub reply: String,
}

// =============================================================================
// Handler functions
// =============================================================================

/// GET /health - liveness probe with version and uptime.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}

/// GET /pm25-data - current readings for every grid zone.
pub async fn pm25_data(State(state): State<AppState>) -> Result<Json<Vec<GridZone>>, ApiError> {
    let zones = state.monitor.zones()?;
    Ok(Json(zones))
}

/// GET /hotspots - persistently polluted zones, ranked.
pub async fn hotspots(State(state): State<AppState>) -> Result<Json<Vec<GridZone>>, ApiError> {
    let hotspots = state.monitor.hotspots()?;
    Ok(Json(hotspots))
}

/// GET /alerts - active alerts, newest first.
pub async fn alerts(State(state): State<AppState>) -> Result<Json<Vec<Alert>>, ApiError> {
    let alerts = state.monitor.alerts()?;
    Ok(Json(alerts))
}

/// GET /alerts/export - active alerts as a downloadable CSV report.
pub async fn alerts_export(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let alerts = state.monitor.alerts()?;

    let mut csv = String::from("Date & Time,Grid / Location,PM2.5 value (mcg/m3),Severity level\n");
    for alert in &alerts {
        csv.push_str(&format!(
            "{},{},{},{}\n",
            alert.timestamp.format("%Y-%m-%dT%H:%M:%S"),
            alert.grid_name,
            alert.pm25_value,
            alert.severity.label(),
        ));
    }

    let filename = format!(
        "PM25_Alert_Report_{}_{}.csv",
        state.config.general.city,
        chrono::Utc::now().format("%Y-%m-%d"),
    );

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={filename}"),
            ),
        ],
        csv,
    ))
}

/// POST /assist - resolve a free-text question against the knowledge base.
///
/// Boundary validation only: the engine itself never fails, but the API
/// rejects empty and oversized messages before resolution.
pub async fn assist(
    State(state): State<AppState>,
    Json(request): Json<AssistRequest>,
) -> Result<Json<AssistResponse>, ApiError> {
    if !state.config.assist.enabled {
        return Err(ApiError::ServiceUnavailable(
            "assistant is disabled".to_string(),
        ));
    }
    if request.message.trim().is_empty() {
        return Err(ApiError::BadRequest("message cannot be empty".to_string()));
    }
    let max_chars = state.config.assist.max_message_chars;
    if request.message.chars().count() > max_chars {
        return Err(ApiError::BadRequest(format!(
            "message exceeds maximum length of {max_chars} characters"
        )));
    }

    let reply = state.assist.resolve(&request.message).to_string();
    tracing::debug!(chars = request.message.len(), "Assist query resolved");
    Ok(Json(AssistResponse { reply }))
}
