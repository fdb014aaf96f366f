//! Integration tests for the REST client against a fake tracking server
//!
//! These tests verify:
//! - Statistics query encoding and lenient record decoding
//! - The geofence + permission sequence, including a failed grant
//! - Device removal followed by a list refresh
//! - Backend error bodies surfacing as error text

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use chrono::{TimeZone, Utc};
use serde_json::{json, Value};

use tracker_desk::api::{ApiClient, Position, TrackerApi};
use tracker_desk::config::ServerConfig;
use tracker_desk::error::ApiError;
use tracker_desk::statistics::{Period, StatisticsReport};
use tracker_desk::status::{create_geofence_for_position, remove_device, GeofenceError, OrphanPolicy};
use tracker_desk::store::Store;

#[derive(Default)]
struct Backend {
    calls: Mutex<Vec<String>>,
    devices: Mutex<Vec<Value>>,
    deny_permissions: bool,
}

type Shared = Arc<Backend>;

impl Backend {
    fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

async fn statistics(
    State(backend): State<Shared>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Json<Value> {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    backend.record(format!("statistics {} {} {}", query["from"], query["to"], auth));
    Json(json!([
        { "id": 1, "captureTime": "2024-05-01T10:00:00Z", "activeUsers": 3, "brandNewCounter": 9 },
        { "id": 2, "captureTime": "2024-05-01T11:00:00Z", "requests": 120 }
    ]))
}

async fn create_geofence(State(backend): State<Shared>, Json(body): Json<Value>) -> Json<Value> {
    backend.record(format!("geofence {}", body["area"].as_str().unwrap_or_default()));
    Json(json!({ "id": 55, "name": body["name"], "area": body["area"] }))
}

async fn delete_geofence(State(backend): State<Shared>, Path(id): Path<i64>) -> StatusCode {
    backend.record(format!("delete geofence {}", id));
    StatusCode::NO_CONTENT
}

async fn create_permission(State(backend): State<Shared>, Json(body): Json<Value>) -> Response {
    backend.record(format!("permission {} {}", body["deviceId"], body["geofenceId"]));
    if backend.deny_permissions {
        (StatusCode::BAD_REQUEST, "Manager access required").into_response()
    } else {
        StatusCode::NO_CONTENT.into_response()
    }
}

async fn devices(State(backend): State<Shared>) -> Json<Value> {
    backend.record("devices");
    Json(Value::Array(backend.devices.lock().unwrap().clone()))
}

async fn delete_device(State(backend): State<Shared>, Path(id): Path<i64>) -> StatusCode {
    backend.record(format!("delete device {}", id));
    backend.devices.lock().unwrap().retain(|d| d["id"] != json!(id));
    StatusCode::NO_CONTENT
}

async fn session() -> Response {
    (StatusCode::UNAUTHORIZED, "Session expired").into_response()
}

/// Starts the fake server on an ephemeral port and returns a client for it
async fn start(backend: Shared) -> ApiClient {
    let app = Router::new()
        .route("/api/statistics", get(statistics))
        .route("/api/geofences", post(create_geofence))
        .route("/api/geofences/{id}", delete(delete_geofence))
        .route("/api/permissions", post(create_permission))
        .route("/api/devices", get(devices))
        .route("/api/devices/{id}", delete(delete_device))
        .route("/api/session", get(session))
        .with_state(backend);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let address = listener.local_addr().expect("No local address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Fake server failed");
    });

    let config = ServerConfig {
        base_url: format!("http://{}", address),
        token: Some("secret".to_string()),
        ..ServerConfig::default()
    };
    ApiClient::new(&config).expect("Failed to build client")
}

fn position() -> Position {
    Position::new(900, 7, 48.8584, 2.2945)
}

#[tokio::test]
async fn test_statistics_round_trip() {
    let backend = Shared::default();
    let client = start(backend.clone()).await;

    let now = Utc.with_ymd_and_hms(2024, 5, 1, 15, 0, 0).unwrap();
    let (from, to) = Period::Today.resolve(&now).unwrap();

    let mut report = StatisticsReport::new();
    assert_eq!(report.load(&client, from, to).await, None);

    assert_eq!(report.items().len(), 2);
    assert_eq!(report.items()[0].active_users, Some(json!(3)));
    assert_eq!(report.items()[1].requests, Some(json!(120)));
    assert_eq!(report.items()[1].active_users, None);

    assert_eq!(
        backend.calls(),
        vec!["statistics 2024-05-01T00:00:00.000Z 2024-05-01T23:59:59.999Z Bearer secret".to_string()]
    );
}

#[tokio::test]
async fn test_geofence_then_permission() {
    let backend = Shared::default();
    let client = start(backend.clone()).await;

    let geofence = create_geofence_for_position(&client, "Geofence", &position(), OrphanPolicy::Keep)
        .await
        .expect("Geofence creation failed");

    assert_eq!(geofence.id, 55);
    assert_eq!(
        backend.calls(),
        vec![
            "geofence CIRCLE (48.8584 2.2945, 50)".to_string(),
            "permission 7 55".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_denied_permission_keeps_geofence() {
    let backend = Arc::new(Backend {
        deny_permissions: true,
        ..Backend::default()
    });
    let client = start(backend.clone()).await;

    let err = create_geofence_for_position(&client, "Geofence", &position(), OrphanPolicy::Keep)
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Manager access required");
    assert!(matches!(err, GeofenceError::Permission { ref geofence, .. } if geofence.id == 55));
    assert!(!backend.calls().iter().any(|c| c.starts_with("delete geofence")));
}

#[tokio::test]
async fn test_denied_permission_with_compensation() {
    let backend = Arc::new(Backend {
        deny_permissions: true,
        ..Backend::default()
    });
    let client = start(backend.clone()).await;

    let _ = create_geofence_for_position(&client, "Geofence", &position(), OrphanPolicy::Delete).await;

    assert_eq!(backend.calls().last().map(String::as_str), Some("delete geofence 55"));
}

#[tokio::test]
async fn test_remove_device_refreshes_list() {
    let backend = Shared::default();
    *backend.devices.lock().unwrap() = vec![
        json!({ "id": 1, "name": "Truck", "uniqueId": "111" }),
        json!({ "id": 2, "name": "Van", "uniqueId": "222" }),
    ];
    let client = start(backend.clone()).await;
    let mut store = Store::new();

    remove_device(&client, 1, &store.sender()).await.expect("Removal failed");
    store.drain();

    let snapshot = store.snapshot();
    assert_eq!(snapshot.devices.len(), 1);
    assert_eq!(snapshot.device(2).map(|d| d.name.as_str()), Some("Van"));
    assert_eq!(backend.calls(), vec!["delete device 1".to_string(), "devices".to_string()]);
}

#[tokio::test]
async fn test_error_body_is_error_text() {
    let client = start(Shared::default()).await;

    let err = client.session().await.unwrap_err();
    assert_eq!(err.to_string(), "Session expired");
    assert!(matches!(err, ApiError::Status { status: 401, .. }));
}
