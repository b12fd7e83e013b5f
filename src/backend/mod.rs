//! # Backend Adapters
//!
//! One adapter per backend family, both exposing the same capability set
//! behind [`ScannerBackend`]. The adapter is selected once, at discovery
//! time, from the bound endpoint's kind; nothing above this module ever
//! branches on which backend is in use.
//!
//! Both adapters follow the same error posture: transport failures and
//! malformed responses are caught here and surfaced as failed result
//! objects with normalized, human-readable reasons. They are never
//! propagated as raw errors.

pub mod native;
pub mod webapi;

use async_trait::async_trait;

use crate::common::types::{CaptureResult, DeviceInfo, MatchResult};
use crate::transport::endpoint::{BackendKind, BoundEndpoint};

/// The uniform operation set every backend must provide.
#[async_trait]
pub trait ScannerBackend: Send + Sync {
    /// Lightweight reachability check (same route discovery probes).
    async fn health_check(&self) -> bool;

    /// Current hardware state. Recomputed on every call.
    async fn device_info(&self) -> DeviceInfo;

    /// Trigger one physical fingerprint read.
    ///
    /// # Arguments
    /// - `timeout_secs`: How long the device waits for a finger
    /// - `min_quality`: Quality floor 0-100; reads below it are rejected
    ///   by the backend itself, not re-validated here
    ///
    /// Not idempotent: each call produces a new physical read.
    async fn capture(&self, timeout_secs: u64, min_quality: u8) -> CaptureResult;

    /// Compare two base64 templates against an acceptance threshold 0-100.
    ///
    /// Stateless and cheap to re-issue; no retries happen at this layer.
    async fn match_templates(&self, template_a: &str, template_b: &str, threshold: u8)
        -> MatchResult;
}

/// Build the adapter for a bound endpoint.
pub fn backend_for(endpoint: &BoundEndpoint, http: reqwest::Client) -> Box<dyn ScannerBackend> {
    match endpoint.kind {
        BackendKind::Native => Box::new(native::NativeBackend::new(
            endpoint.base_url.clone(),
            http,
        )),
        BackendKind::WebApi => Box::new(webapi::WebApiBackend::new(
            endpoint.base_url.clone(),
            http,
        )),
    }
}
