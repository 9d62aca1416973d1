//! Request handlers for the station endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};

use super::AppState;
use super::error::ApiError;
use super::types::{
    ChargeRequest, ChargeResponse, DischargeRequest, DischargeResponse, InfoResponse, LogQuery,
    MessageResponse, OverrideRequest, OverrideResponse,
};
use crate::sim::event_log::LogEntry;
use crate::sim::types::{ChargeIntent, OverrideMode};

/// Entries returned by `GET /log` when no limit is given.
const DEFAULT_LOG_LIMIT: usize = 50;

/// `GET /` → stored energy (kWh)
pub async fn get_energy(State(state): State<Arc<AppState>>) -> Json<f64> {
    Json(state.station.snapshot().soc_kwh)
}

/// `GET /info` → full station snapshot
pub async fn get_info(State(state): State<Arc<AppState>>) -> Json<InfoResponse> {
    Json(InfoResponse::from(&state.station.snapshot()))
}

/// `GET /charge` → SoC percent
pub async fn get_charge(State(state): State<Arc<AppState>>) -> Json<f64> {
    Json(state.station.snapshot().soc_percent)
}

/// Submits a charge intent.
///
/// `POST /charge {"charging": "on"}` → 200 + `ChargeResponse`
/// `POST /charge {"charging": "maybe"}` → 400, state unchanged
///
/// While an override is active the command is ignored and the response
/// reports the current state with `applied: false`.
pub async fn post_charge(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ChargeRequest>, JsonRejection>,
) -> Result<Json<ChargeResponse>, ApiError> {
    let Json(req) = payload?;
    let intent: ChargeIntent = req.charging.as_deref().unwrap_or_default().parse()?;
    let outcome = state.station.set_charge_intent(intent);
    Ok(Json(ChargeResponse::from(outcome)))
}

/// `GET /discharge` → usage hint
pub async fn get_discharge() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Use POST to reset battery.",
    })
}

/// Resets the station.
///
/// `POST /discharge {"discharging": "on"}` → 200 `{"discharging": "on"}`
/// Any other value → 400, state unchanged
pub async fn post_discharge(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<DischargeRequest>, JsonRejection>,
) -> Result<Json<DischargeResponse>, ApiError> {
    let Json(req) = payload?;
    match req.discharging.as_deref() {
        Some("on") => {
            state.station.reset();
            Ok(Json(DischargeResponse { discharging: "on" }))
        }
        other => Err(ApiError::BadRequest(format!(
            "invalid command \"{}\", expected \"on\"",
            other.unwrap_or_default()
        ))),
    }
}

/// `GET /override` → current override and charging flag
pub async fn get_override(State(state): State<Arc<AppState>>) -> Json<OverrideResponse> {
    Json(OverrideResponse::from(state.station.override_status()))
}

/// Sets the user override.
///
/// `POST /override {"mode": "force_on"}` → 200 + `OverrideResponse`
/// Unknown mode → 400, state unchanged
pub async fn post_override(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<OverrideRequest>, JsonRejection>,
) -> Result<Json<OverrideResponse>, ApiError> {
    let Json(req) = payload?;
    let mode: OverrideMode = req.mode.as_deref().unwrap_or_default().parse()?;
    let status = state.station.set_override(mode);
    Ok(Json(OverrideResponse::from(status)))
}

/// `GET /priceperhour` → 24 hourly prices
pub async fn get_prices(State(state): State<Arc<AppState>>) -> Json<Vec<f64>> {
    Json(state.station.price_table().to_vec())
}

/// `GET /baseload` → 24 hourly base loads (kW)
pub async fn get_baseload(State(state): State<Arc<AppState>>) -> Json<Vec<f64>> {
    Json(state.station.base_load_table().to_vec())
}

/// `GET /log?limit=N` → most recent log entries, oldest first
pub async fn get_log(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LogQuery>,
) -> Json<Vec<LogEntry>> {
    let limit = query.limit.unwrap_or(DEFAULT_LOG_LIMIT);
    Json(state.station.log_entries(limit))
}
