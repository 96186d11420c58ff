//! REST API integration tests for agri-ledger.
//!
//! Drives the full router in-process with `tower::ServiceExt::oneshot`, plus
//! one test against a real listener through `reqwest`.

#![allow(clippy::panic, clippy::indexing_slicing)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use agri_ledger::api::{self, caller::CALLER_HEADER};
use agri_ledger::app_state::AppState;
use agri_ledger::domain::{Identity, Ledger, Roles};
use agri_ledger::service::LedgerService;

// ============================================================================
// Test Helpers
// ============================================================================

const DEPLOYER: &str = "ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM";
const FARMER: &str = "ST2CY5V39NHDPWSXMW9QDT3HC3GD6Q6XX4CFRK9AG";
const STRANGER: &str = "ST2JHG361ZXG51QTKY2NQCVBPPRRE2KZB1HR05NNC";
const ORACLE: &str = "ST3ORACLE";

fn create_test_router(genesis: u64) -> Router {
    let ledger = Ledger::new(Roles::single(&Identity::from(DEPLOYER)), genesis);
    let state = AppState {
        ledger_service: Arc::new(LedgerService::new(ledger)),
    };
    api::build_router().with_state(state)
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    caller: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(caller) = caller {
        builder = builder.header(CALLER_HEADER, caller);
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    };
    let Ok(request) = request else {
        panic!("failed to build request for {uri}");
    };

    let response = match app.clone().oneshot(request).await {
        Ok(response) => response,
        Err(infallible) => match infallible {},
    };
    let status = response.status();
    let Ok(collected) = response.into_body().collect().await else {
        panic!("failed to read body of {uri}");
    };
    let bytes = collected.to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        match serde_json::from_slice(&bytes) {
            Ok(value) => value,
            Err(e) => panic!("non-JSON body from {uri}: {e}"),
        }
    };
    (status, value)
}

async fn register_farm(app: &Router, owner: &str, area_size: i64) -> (StatusCode, Value) {
    send(
        app,
        Method::POST,
        "/api/v1/farms",
        Some(owner),
        Some(json!({
            "location": "Farm Location",
            "crop_type": "Corn",
            "area_size": area_size,
        })),
    )
    .await
}

fn assert_error(body: &Value, registry: &str, code: u64) {
    assert_eq!(body["error"]["registry"], registry, "body: {body}");
    assert_eq!(body["error"]["code"], code, "body: {body}");
}

// ============================================================================
// Farm Registry
// ============================================================================

#[tokio::test]
async fn farm_ids_are_sequential_from_one() {
    let app = create_test_router(0);

    let (status, body) = register_farm(&app, FARMER, 100).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["farm_id"], 1);

    let (_, body) = register_farm(&app, STRANGER, 50).await;
    assert_eq!(body["farm_id"], 2);
}

#[tokio::test]
async fn non_positive_area_is_rejected_without_consuming_an_id() {
    let app = create_test_router(0);

    for area_size in [0, -1, -4] {
        let (status, body) = register_farm(&app, FARMER, area_size).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_error(&body, "farm", 1);
    }

    let (_, body) = register_farm(&app, FARMER, 10).await;
    assert_eq!(body["farm_id"], 1);
    let (_, body) = send(&app, Method::GET, "/health", None, None).await;
    assert_eq!(body["height"], 1);
}

#[tokio::test]
async fn update_with_non_positive_area_leaves_farm_unchanged() {
    let app = create_test_router(0);
    register_farm(&app, FARMER, 100).await;

    for area_size in [0, -1] {
        let (status, body) = send(
            &app,
            Method::PUT,
            "/api/v1/farms/1",
            Some(FARMER),
            Some(json!({ "location": "North Field", "crop_type": "Wheat", "area_size": area_size })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_error(&body, "farm", 1);
    }

    let (_, body) = send(&app, Method::GET, "/api/v1/farms/1", None, None).await;
    assert_eq!(body["location"], "Farm Location");
    assert_eq!(body["area_size"], 100);
}

#[tokio::test]
async fn farm_lookup_returns_record_or_null() {
    let app = create_test_router(100);
    register_farm(&app, FARMER, 100).await;

    let (status, body) = send(&app, Method::GET, "/api/v1/farms/1", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["owner"], FARMER);
    assert_eq!(body["crop_type"], "Corn");
    assert_eq!(body["registered_at"], 101);
    assert_eq!(body["active"], true);

    let (status, body) = send(&app, Method::GET, "/api/v1/farms/99", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_null());
}

#[tokio::test]
async fn only_owner_updates_and_admin_may_deactivate() {
    let app = create_test_router(0);
    register_farm(&app, FARMER, 100).await;
    let details = json!({ "location": "North Field", "crop_type": "Wheat", "area_size": 120 });

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/v1/farms/1",
        Some(STRANGER),
        Some(details.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_error(&body, "farm", 3);

    let (status, body) =
        send(&app, Method::PUT, "/api/v1/farms/1", Some(FARMER), Some(details)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/farms/1/deactivate",
        Some(STRANGER),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/farms/1/deactivate",
        Some(DEPLOYER),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, Method::GET, "/api/v1/farms/1", None, None).await;
    assert_eq!(body["location"], "North Field");
    assert_eq!(body["area_size"], 120);
    assert_eq!(body["active"], false);
}

#[tokio::test]
async fn updating_a_missing_farm_is_not_found() {
    let app = create_test_router(0);
    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/v1/farms/7",
        Some(FARMER),
        Some(json!({ "location": "x", "crop_type": "y", "area_size": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_error(&body, "farm", 2);
}

// ============================================================================
// Weather Registry
// ============================================================================

#[tokio::test]
async fn oracle_submits_observations_after_role_transfer() {
    let app = create_test_router(0);
    let observation = json!({
        "location": "Iowa",
        "timestamp": 1_700_000_000u64,
        "temperature": -5,
        "rainfall": 12,
        "humidity": 80,
        "wind_speed": 7,
    });

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/weather/observations",
        Some(ORACLE),
        Some(observation.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_error(&body, "weather", 1);

    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/v1/admin/weather/oracle",
        Some(DEPLOYER),
        Some(json!({ "identity": ORACLE })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/weather/observations",
        Some(ORACLE),
        Some(observation),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/v1/weather/observations/Iowa/1700000000",
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["temperature"], -5);
    assert_eq!(body["reported_by"], ORACLE);

    let (_, body) = send(
        &app,
        Method::GET,
        "/api/v1/weather/observations/Iowa/1",
        None,
        None,
    )
    .await;
    assert!(body.is_null());
}

#[tokio::test]
async fn weather_event_validation_order() {
    let app = create_test_router(0);
    let event = |severity: u64, start: u64, end: u64| {
        json!({
            "location": "Iowa",
            "event_type": "hail",
            "severity": severity,
            "start_time": start,
            "end_time": end,
        })
    };

    // Authorization is checked before the payload.
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/weather/events",
        Some(STRANGER),
        Some(event(11, 10, 5)),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_error(&body, "weather", 1);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/weather/events",
        Some(DEPLOYER),
        Some(event(11, 10, 5)),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error(&body, "weather", 2);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/weather/events",
        Some(DEPLOYER),
        Some(event(10, 10, 10)),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error(&body, "weather", 3);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/weather/events",
        Some(DEPLOYER),
        Some(event(10, 10, 11)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["event_id"], 1);

    let (_, body) = send(
        &app,
        Method::GET,
        "/api/v1/weather/events/Iowa/1",
        None,
        None,
    )
    .await;
    assert_eq!(body["event_type"], "hail");
    assert_eq!(body["confirmed"], true);

    let (_, body) = send(
        &app,
        Method::GET,
        "/api/v1/weather/events/Kansas/1",
        None,
        None,
    )
    .await;
    assert!(body.is_null());
}

// ============================================================================
// Yield Registry
// ============================================================================

#[tokio::test]
async fn full_yield_loss_flow() {
    let app = create_test_router(0);

    let (_, body) = register_farm(&app, FARMER, 100).await;
    assert_eq!(body["farm_id"], 1);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/yields",
        Some(FARMER),
        Some(json!({ "farm_id": 1, "season": "2024-spring", "expected_yield": 5000 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["ok"], true);

    // Not yet verified.
    let (status, body) = send(
        &app,
        Method::GET,
        "/api/v1/yields/1/2024-spring/loss",
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_error(&body, "yield", 5);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/yields/1/2024-spring/verify",
        Some(FARMER),
        Some(json!({ "actual_yield": 4000 })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_error(&body, "yield", 4);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/yields/1/2024-spring/verify",
        Some(DEPLOYER),
        Some(json!({ "actual_yield": 4000 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, Method::GET, "/api/v1/yields/1/2024-spring", None, None).await;
    assert_eq!(body["verified"], true);
    assert_eq!(body["actual_yield"], 4000);
    assert_eq!(body["verified_by"], DEPLOYER);
    assert_eq!(body["verification_date"], 3);

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/v1/yields/1/2024-spring/loss",
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["loss_percent"], 20);
}

#[tokio::test]
async fn expected_yield_needs_existing_farm_and_owner() {
    let app = create_test_router(0);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/yields",
        Some(FARMER),
        Some(json!({ "farm_id": 1, "season": "2024", "expected_yield": 10 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_error(&body, "yield", 1);

    register_farm(&app, FARMER, 100).await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/yields",
        Some(STRANGER),
        Some(json!({ "farm_id": 1, "season": "2024", "expected_yield": 10 })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_error(&body, "yield", 2);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/yields/1/2025/verify",
        Some(DEPLOYER),
        Some(json!({ "actual_yield": 10 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_error(&body, "yield", 3);

    let (_, body) = send(&app, Method::GET, "/api/v1/yields/1/2025", None, None).await;
    assert!(body.is_null());
}

#[tokio::test]
async fn non_positive_expected_yield_cannot_produce_a_loss() {
    let app = create_test_router(0);
    register_farm(&app, FARMER, 100).await;

    for (season, expected_yield) in [("fallow", 0), ("flooded", -250)] {
        let (status, _) = send(
            &app,
            Method::POST,
            "/api/v1/yields",
            Some(FARMER),
            Some(json!({ "farm_id": 1, "season": season, "expected_yield": expected_yield })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, _) = send(
            &app,
            Method::POST,
            &format!("/api/v1/yields/1/{season}/verify"),
            Some(DEPLOYER),
            Some(json!({ "actual_yield": 0 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (_, body) = send(&app, Method::GET, &format!("/api/v1/yields/1/{season}"), None, None).await;
        assert_eq!(body["expected_yield"], expected_yield);

        let (status, body) = send(
            &app,
            Method::GET,
            &format!("/api/v1/yields/1/{season}/loss"),
            None,
            None,
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_error(&body, "yield", 6);
    }
}

#[tokio::test]
async fn verifier_role_can_be_reassigned_only_by_admin() {
    let app = create_test_router(0);

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/v1/admin/yield/verifier",
        Some(STRANGER),
        Some(json!({ "identity": STRANGER })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_error(&body, "yield", 4);

    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/v1/admin/yield/verifier",
        Some(DEPLOYER),
        Some(json!({ "identity": STRANGER })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    register_farm(&app, FARMER, 100).await;
    send(
        &app,
        Method::POST,
        "/api/v1/yields",
        Some(FARMER),
        Some(json!({ "farm_id": 1, "season": "s1", "expected_yield": 3 })),
    )
    .await;

    // The former verifier has lost the role.
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/yields/1/s1/verify",
        Some(DEPLOYER),
        Some(json!({ "actual_yield": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/yields/1/s1/verify",
        Some(STRANGER),
        Some(json!({ "actual_yield": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, Method::GET, "/api/v1/yields/1/s1/loss", None, None).await;
    assert_eq!(body["loss_percent"], 66);
}

// ============================================================================
// Gateway behaviour
// ============================================================================

#[tokio::test]
async fn mutation_without_caller_is_rejected() {
    let app = create_test_router(0);
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/farms",
        None,
        Some(json!({ "location": "x", "crop_type": "y", "area_size": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error(&body, "gateway", 1001);
}

#[tokio::test]
async fn malformed_input_uses_error_envelope() {
    let app = create_test_router(0);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/farms",
        Some(FARMER),
        Some(json!({ "location": "x", "crop_type": "y", "area_size": "wide" })),
    )
    .await;
    assert!(status.is_client_error());
    assert_error(&body, "gateway", 1002);

    let (status, body) = send(&app, Method::GET, "/api/v1/farms/abc", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error(&body, "gateway", 1002);
}

#[tokio::test]
async fn health_reports_chain_tip() {
    let app = create_test_router(41);
    register_farm(&app, FARMER, 1).await;
    register_farm(&app, FARMER, 0).await;

    let (status, body) = send(&app, Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["height"], 42);
}

#[tokio::test]
async fn serves_over_tcp() {
    let app = create_test_router(0);
    let Ok(listener) = tokio::net::TcpListener::bind("127.0.0.1:0").await else {
        panic!("failed to bind test listener");
    };
    let Ok(addr) = listener.local_addr() else {
        panic!("listener has no address");
    };
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    let client = reqwest::Client::new();
    let Ok(response) = client
        .post(format!("http://{addr}/api/v1/farms"))
        .header(CALLER_HEADER, FARMER)
        .json(&json!({ "location": "Farm Location", "crop_type": "Corn", "area_size": 100 }))
        .send()
        .await
    else {
        panic!("request failed");
    };
    assert_eq!(response.status().as_u16(), 201);
    let Ok(body) = response.json::<Value>().await else {
        panic!("invalid JSON");
    };
    assert_eq!(body["farm_id"], 1);
}
