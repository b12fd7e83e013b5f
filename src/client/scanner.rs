//! The uniform capture/match/status surface over the bound backend.

use async_trait::async_trait;
use log::debug;

use crate::backend::{backend_for, ScannerBackend};
use crate::client::matching::TemplateMatcher;
use crate::common::config::BiogateConfig;
use crate::common::error::ScanError;
use crate::common::types::{CaptureResult, DeviceInfo, MatchResult};
use crate::transport::endpoint::{default_endpoints, EndpointDescriptor};
use crate::transport::TransportDiscovery;

/// Client for the local fingerprint hardware service.
///
/// Owns the discovery session and hands every operation to the adapter for
/// whichever backend the session bound to. All failures — including the
/// no-backend-found case — come back as failed result objects so callers
/// can render device UI instead of handling errors; the only hard errors
/// this type produces are from [`resolve`](Self::resolve) itself.
pub struct ScannerClient {
    discovery: TransportDiscovery,
    http: reqwest::Client,
}

impl ScannerClient {
    /// Build a client from workstation configuration.
    ///
    /// The vendor WebAPI lives behind a self-signed certificate on a
    /// loopback HTTPS port, so certificate validation is disabled for this
    /// client. Both candidate URLs are loopback-only by contract.
    pub fn new(config: &BiogateConfig) -> Result<Self, ScanError> {
        let http = reqwest::Client::builder()
            .danger_accept_invalid_certs(true)
            .build()?;
        Ok(Self::with_endpoints(http, default_endpoints(&config.scanner)))
    }

    /// Build a client over an explicit candidate list (used by tests and
    /// by deployments with non-default ports).
    pub fn with_endpoints(http: reqwest::Client, endpoints: Vec<EndpointDescriptor>) -> Self {
        let discovery = TransportDiscovery::new(http.clone(), endpoints);
        Self { discovery, http }
    }

    /// The discovery session, exposed for binding checks.
    pub fn discovery(&self) -> &TransportDiscovery {
        &self.discovery
    }

    /// Force re-discovery on the next operation.
    pub async fn reset(&self) {
        self.discovery.reset().await;
    }

    async fn backend(&self) -> Result<Box<dyn ScannerBackend>, ScanError> {
        let endpoint = self.discovery.resolve().await?;
        Ok(backend_for(&endpoint, self.http.clone()))
    }

    /// Current hardware state. An unreachable backend is reported as a
    /// disconnected snapshot, never an error.
    pub async fn device_info(&self) -> DeviceInfo {
        match self.backend().await {
            Ok(backend) => backend.device_info().await,
            Err(e) => DeviceInfo::disconnected(e.to_string()),
        }
    }

    /// Trigger one physical fingerprint read.
    ///
    /// # Arguments
    /// - `timeout_secs`: How long the device waits for a finger
    /// - `min_quality`: Quality floor 0-100, enforced by the backend
    ///
    /// Each call produces a new physical read; the state machine above
    /// this layer guarantees at most one capture is outstanding.
    pub async fn capture(&self, timeout_secs: u64, min_quality: u8) -> CaptureResult {
        let backend = match self.backend().await {
            Ok(b) => b,
            Err(e) => return CaptureResult::failure(e.to_string()),
        };

        debug!(
            "capture: timeout={}s min_quality={}",
            timeout_secs, min_quality
        );
        backend.capture(timeout_secs, min_quality).await
    }

    /// Compare two base64 templates against a 0-100 threshold.
    pub async fn match_templates(
        &self,
        template_a: &str,
        template_b: &str,
        threshold: u8,
    ) -> MatchResult {
        let backend = match self.backend().await {
            Ok(b) => b,
            Err(e) => return MatchResult::failure(e.to_string()),
        };

        backend.match_templates(template_a, template_b, threshold).await
    }
}

#[async_trait]
impl TemplateMatcher for ScannerClient {
    async fn match_templates(&self, probe: &str, candidate: &str, threshold: u8) -> MatchResult {
        ScannerClient::match_templates(self, probe, candidate, threshold).await
    }
}
