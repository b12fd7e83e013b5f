//! Adapter for the project-owned fingerprint service.
//!
//! Routes: `GET /health`, `GET /status`, `POST /capture`, `POST /match`.
//! The match route takes a discrete security level 0-9 and answers with a
//! bare boolean, so scores are synthesized (100 on match, 0 otherwise).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::backend::ScannerBackend;
use crate::common::error::ScanError;
use crate::common::types::{CaptureResult, DeviceInfo, MatchResult};

#[derive(Debug, Deserialize)]
struct StatusResponse {
    connected: bool,
    #[serde(default)]
    mock_mode: bool,
}

#[derive(Debug, Serialize)]
struct CaptureRequest {
    timeout_ms: u64,
    quality: u8,
}

#[derive(Debug, Deserialize)]
struct CaptureResponse {
    success: bool,
    template: Option<String>,
    quality: Option<u8>,
    error: Option<String>,
}

#[derive(Debug, Serialize)]
struct MatchRequest<'a> {
    template1: &'a str,
    template2: &'a str,
    #[serde(rename = "securityLevel")]
    security_level: u8,
}

#[derive(Debug, Deserialize)]
struct MatchResponse {
    matched: bool,
}

/// Variant A: the fingerprint service this project ships on Linux
/// workstations.
pub struct NativeBackend {
    base_url: String,
    http: reqwest::Client,
}

impl NativeBackend {
    pub fn new(base_url: String, http: reqwest::Client) -> Self {
        Self { base_url, http }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl ScannerBackend for NativeBackend {
    async fn health_check(&self) -> bool {
        match self.http.get(self.url("/health")).send().await {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }

    async fn device_info(&self) -> DeviceInfo {
        let response = match self.http.get(self.url("/status")).send().await {
            Ok(r) => r,
            Err(_) => return DeviceInfo::disconnected(ScanError::DeviceUnavailable.to_string()),
        };

        if !response.status().is_success() {
            return DeviceInfo::disconnected("Failed to get device info");
        }

        match response.json::<StatusResponse>().await {
            Ok(status) => DeviceInfo {
                connected: status.connected,
                device_name: Some(if status.mock_mode {
                    "Mock Scanner (Testing)".to_string()
                } else {
                    "Fingerprint Scanner".to_string()
                }),
                error: if status.connected {
                    None
                } else {
                    Some("Device not connected".to_string())
                },
                ..DeviceInfo::default()
            },
            Err(_) => DeviceInfo::disconnected("Failed to get device info"),
        }
    }

    async fn capture(&self, timeout_secs: u64, min_quality: u8) -> CaptureResult {
        let body = CaptureRequest {
            timeout_ms: timeout_secs * 1000,
            quality: min_quality,
        };

        let response = match self
            .http
            .post(self.url("/capture"))
            .json(&body)
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => return CaptureResult::failure(ScanError::from(e).to_string()),
        };

        if !response.status().is_success() {
            return CaptureResult::failure("Capture failed");
        }

        match response.json::<CaptureResponse>().await {
            Ok(data) if data.success => CaptureResult {
                success: true,
                template_data: data.template,
                quality: data.quality,
                ..CaptureResult::default()
            },
            Ok(data) => {
                CaptureResult::failure(data.error.unwrap_or_else(|| "Capture failed".to_string()))
            }
            Err(_) => CaptureResult::failure("Capture failed"),
        }
    }

    async fn match_templates(
        &self,
        template_a: &str,
        template_b: &str,
        threshold: u8,
    ) -> MatchResult {
        // The service works on a 0-9 security level scale; map the uniform
        // 0-100 threshold onto it by integer division, capped at 9.
        let body = MatchRequest {
            template1: template_a,
            template2: template_b,
            security_level: (threshold / 10).min(9),
        };

        let response = match self.http.post(self.url("/match")).json(&body).send().await {
            Ok(r) => r,
            Err(e) => return MatchResult::failure(ScanError::from(e).to_string()),
        };

        if !response.status().is_success() {
            return MatchResult::failure("Match request failed");
        }

        match response.json::<MatchResponse>().await {
            Ok(data) => MatchResult {
                matched: data.matched,
                // Boolean-only backend: synthesize the score
                score: Some(if data.matched { 100 } else { 0 }),
                error: None,
            },
            Err(_) => MatchResult::failure("Match request failed"),
        }
    }
}
