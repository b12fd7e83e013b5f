//! Shared test fixtures: in-process mock implementations of both scanner
//! backend variants and of the hospital biometrics REST surface.
#![allow(dead_code)] // each test binary uses a different subset

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use biogate::transport::endpoint::{BackendKind, EndpointDescriptor};

/// Bind an ephemeral port, serve the router in the background, and return
/// the base URL.
pub async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

pub fn native_endpoint(base_url: &str) -> EndpointDescriptor {
    EndpointDescriptor {
        name: "native",
        kind: BackendKind::Native,
        base_url: base_url.to_string(),
        health_path: "/health",
    }
}

pub fn webapi_endpoint(base_url: &str) -> EndpointDescriptor {
    EndpointDescriptor {
        name: "webapi",
        kind: BackendKind::WebApi,
        base_url: base_url.to_string(),
        health_path: "/api/ping",
    }
}

/// An endpoint nobody listens on; probes fail with connection refused.
pub fn dead_endpoint(kind: BackendKind) -> EndpointDescriptor {
    match kind {
        BackendKind::Native => native_endpoint("http://127.0.0.1:1"),
        BackendKind::WebApi => webapi_endpoint("http://127.0.0.1:1"),
    }
}

// ============================================================================
// VARIANT A MOCK (project fingerprint service)
// ============================================================================

pub struct NativeMock {
    pub health_hits: AtomicUsize,
    pub connected: bool,
    pub mock_mode: bool,
    /// Quality of the sample the fake sensor "reads"; captures asking for
    /// more than this fail the same way the real service fails them.
    pub sample_quality: u64,
    pub template: String,
    pub match_matched: bool,
    pub last_security_level: Mutex<Option<u64>>,
}

impl Default for NativeMock {
    fn default() -> Self {
        Self {
            health_hits: AtomicUsize::new(0),
            connected: true,
            mock_mode: true,
            sample_quality: 70,
            template: "TEMPLATE-A".to_string(),
            match_matched: true,
            last_security_level: Mutex::new(None),
        }
    }
}

pub async fn spawn_native(mock: Arc<NativeMock>) -> String {
    let router = Router::new()
        .route("/health", get(native_health))
        .route("/status", get(native_status))
        .route("/capture", post(native_capture))
        .route("/match", post(native_match))
        .with_state(mock);
    spawn(router).await
}

async fn native_health(State(mock): State<Arc<NativeMock>>) -> StatusCode {
    mock.health_hits.fetch_add(1, Ordering::SeqCst);
    StatusCode::OK
}

async fn native_status(State(mock): State<Arc<NativeMock>>) -> Json<Value> {
    Json(json!({ "connected": mock.connected, "mock_mode": mock.mock_mode }))
}

async fn native_capture(
    State(mock): State<Arc<NativeMock>>,
    Json(body): Json<Value>,
) -> Json<Value> {
    let requested = body["quality"].as_u64().unwrap_or(0);
    if mock.sample_quality < requested {
        Json(json!({
            "success": false,
            "error": "Invalid quality - please press finger firmly",
        }))
    } else {
        Json(json!({
            "success": true,
            "template": mock.template,
            "quality": mock.sample_quality,
        }))
    }
}

async fn native_match(
    State(mock): State<Arc<NativeMock>>,
    Json(body): Json<Value>,
) -> Json<Value> {
    *mock.last_security_level.lock().unwrap() = body["securityLevel"].as_u64();
    Json(json!({ "matched": mock.match_matched }))
}

// ============================================================================
// VARIANT B MOCK (vendor-style WebAPI)
// ============================================================================

pub struct WebApiMock {
    pub ping_hits: AtomicUsize,
    pub device_error_code: i64,
    pub capture_error_code: i64,
    pub capture_template: String,
    pub capture_quality: u64,
    pub match_score: u64,
}

impl Default for WebApiMock {
    fn default() -> Self {
        Self {
            ping_hits: AtomicUsize::new(0),
            device_error_code: 0,
            capture_error_code: 0,
            capture_template: "TEMPLATE-B".to_string(),
            capture_quality: 65,
            match_score: 81,
        }
    }
}

pub async fn spawn_webapi(mock: Arc<WebApiMock>) -> String {
    let router = Router::new()
        .route("/api/ping", get(webapi_ping))
        .route("/api/DeviceInfo", get(webapi_device_info))
        .route("/api/Capture", post(webapi_capture))
        .route("/api/Match", post(webapi_match))
        .with_state(mock);
    spawn(router).await
}

async fn webapi_ping(State(mock): State<Arc<WebApiMock>>) -> StatusCode {
    mock.ping_hits.fetch_add(1, Ordering::SeqCst);
    StatusCode::OK
}

async fn webapi_device_info(State(mock): State<Arc<WebApiMock>>) -> Json<Value> {
    if mock.device_error_code == 0 {
        Json(json!({
            "ErrorCode": 0,
            "DeviceName": "Vendor Scanner U20",
            "SerialNumber": "SN-0042",
            "FirmwareVersion": "1.9",
            "ImageWidth": 300,
            "ImageHeight": 400,
        }))
    } else {
        Json(json!({
            "ErrorCode": mock.device_error_code,
            "ErrorMessage": "Device not connected",
        }))
    }
}

async fn webapi_capture(State(mock): State<Arc<WebApiMock>>) -> Json<Value> {
    if mock.capture_error_code == 0 {
        Json(json!({
            "ErrorCode": 0,
            "TemplateData": mock.capture_template,
            "Quality": mock.capture_quality,
        }))
    } else {
        Json(json!({ "ErrorCode": mock.capture_error_code }))
    }
}

async fn webapi_match(State(mock): State<Arc<WebApiMock>>) -> Json<Value> {
    Json(json!({ "ErrorCode": 0, "MatchingScore": mock.match_score }))
}

// ============================================================================
// HOSPITAL BIOMETRICS API MOCK
// ============================================================================

pub struct EnrollmentMock {
    pub enrolled: bool,
    /// (finger wire name, base64 template payload)
    pub templates: Vec<(&'static str, &'static str)>,
    pub coverage: Value,
    pub register_hits: Mutex<Vec<Value>>,
    pub verify_hits: Mutex<Vec<Value>>,
}

impl Default for EnrollmentMock {
    fn default() -> Self {
        Self {
            enrolled: false,
            templates: Vec::new(),
            coverage: json!({ "hasSubject": false }),
            register_hits: Mutex::new(Vec::new()),
            verify_hits: Mutex::new(Vec::new()),
        }
    }
}

pub async fn spawn_enrollment(mock: Arc<EnrollmentMock>) -> String {
    let router = Router::new()
        .route("/biometrics/check/:subject_id", get(enrollment_check))
        .route("/biometrics/templates/:subject_id", get(enrollment_templates))
        .route("/biometrics/register", post(enrollment_register))
        .route("/biometrics/verify", post(enrollment_verify))
        .route(
            "/biometrics/staff-coverage/:subject_id",
            get(enrollment_coverage),
        )
        .with_state(mock);
    spawn(router).await
}

async fn enrollment_check(
    State(mock): State<Arc<EnrollmentMock>>,
    Path(_subject_id): Path<String>,
) -> Json<Value> {
    let fingers: Vec<&str> = mock.templates.iter().map(|(f, _)| *f).collect();
    Json(json!({ "enrolled": mock.enrolled, "fingers": fingers }))
}

async fn enrollment_templates(
    State(mock): State<Arc<EnrollmentMock>>,
    Path(_subject_id): Path<String>,
) -> Json<Value> {
    let templates: Vec<Value> = mock
        .templates
        .iter()
        .map(|(finger, data)| json!({ "fingerIndex": finger, "templateData": data }))
        .collect();
    Json(json!({ "templates": templates }))
}

async fn enrollment_register(
    State(mock): State<Arc<EnrollmentMock>>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    mock.register_hits.lock().unwrap().push(body);
    (StatusCode::CREATED, Json(json!({ "status": "created" })))
}

async fn enrollment_verify(
    State(mock): State<Arc<EnrollmentMock>>,
    Json(body): Json<Value>,
) -> Json<Value> {
    mock.verify_hits.lock().unwrap().push(body);
    Json(json!({ "status": "recorded" }))
}

async fn enrollment_coverage(
    State(mock): State<Arc<EnrollmentMock>>,
    Path(_subject_id): Path<String>,
) -> Json<Value> {
    Json(mock.coverage.clone())
}
