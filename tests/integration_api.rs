//! Integration tests for the HTTP API feature.

#![cfg(feature = "api")]

mod common;

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum::response::Response;
use tower::util::ServiceExt;

use common::fast_params;
use ev_charge_sim::api::{AppState, router};
use ev_charge_sim::sim::SharedStation;

fn build_app() -> (Router, SharedStation) {
    let station = SharedStation::new(fast_params());
    let app = router(Arc::new(AppState {
        station: station.clone(),
    }));
    (app, station)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json(resp: Response) -> serde_json::Value {
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn info_after_one_charging_tick() {
    let (app, station) = build_app();

    let resp = app
        .clone()
        .oneshot(post("/charge", r#"{"charging":"on"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    station.advance();

    let resp = app.oneshot(get("/info")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let info = json(resp).await;
    assert_eq!(info["sim_time_hour"], 0);
    assert_eq!(info["sim_time_min"], 0);
    assert_eq!(info["battery_capacity_kWh"], 11.11);
    assert_eq!(info["battery_percent"], 24.0);
    assert_eq!(info["base_current_load"], 8.28);
    assert_eq!(info["battery_max_capacity_kWh"], 46.3);
    assert_eq!(info["ev_battery_charge_start_stopp"], true);
    assert_eq!(info["user_override"], "auto");
}

#[tokio::test]
async fn force_off_then_charge_on_is_ignored() {
    let (app, station) = build_app();

    let resp = app
        .clone()
        .oneshot(post("/override", r#"{"mode":"force_off"}"#))
        .await
        .unwrap();
    let body = json(resp).await;
    assert_eq!(body["override"], "force_off");
    assert_eq!(body["charging"], false);

    let resp = app
        .clone()
        .oneshot(post("/charge", r#"{"charging":"on"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json(resp).await;
    assert_eq!(body["charging"], "off");
    assert_eq!(body["override"], "force_off");
    assert_eq!(body["applied"], false);

    let s = station.snapshot();
    assert!(!s.charge_requested);

    let body = json(app.oneshot(get("/override")).await.unwrap()).await;
    assert_eq!(body["override"], "force_off");
}

#[tokio::test]
async fn discharge_resets_station() {
    let (app, station) = build_app();
    station.set_charge_intent(ev_charge_sim::sim::types::ChargeIntent::On);
    for _ in 0..6 {
        station.advance();
    }

    let resp = app
        .clone()
        .oneshot(post("/discharge", r#"{"discharging":"on"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json(resp).await["discharging"], "on");

    let body = json(app.clone().oneshot(get("/charge")).await.unwrap()).await;
    assert_eq!(body, 20.0);

    let resp = app
        .oneshot(post("/discharge", r#"{"discharging":"off"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(station.snapshot().sim_hour, 0);
}

#[tokio::test]
async fn static_tables_have_24_entries() {
    let (app, _) = build_app();

    let prices = json(app.clone().oneshot(get("/priceperhour")).await.unwrap()).await;
    let prices = prices.as_array().unwrap();
    assert_eq!(prices.len(), 24);
    assert_eq!(prices[22], 32.0);

    let loads = json(app.oneshot(get("/baseload")).await.unwrap()).await;
    let loads = loads.as_array().unwrap();
    assert_eq!(loads.len(), 24);
    assert_eq!(loads[17], 11.0);
}

#[tokio::test]
async fn log_endpoint_lists_commands() {
    let (app, _) = build_app();
    app.clone()
        .oneshot(post("/override", r#"{"mode":"force_on"}"#))
        .await
        .unwrap();

    let entries = json(app.oneshot(get("/log")).await.unwrap()).await;
    let entries = entries.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["message"], "override set to force_on (charging=true)");
}

#[tokio::test]
async fn cors_allows_any_origin() {
    let (app, _) = build_app();
    let req = Request::builder()
        .uri("/info")
        .header(header::ORIGIN, "http://dashboard.example")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(
        resp.headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .map(|v| v.as_bytes()),
        Some(&b"*"[..])
    );
}
