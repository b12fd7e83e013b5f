//! Adapter for the vendor-style WebAPI.
//!
//! Routes: `GET /api/ping`, `GET /api/DeviceInfo`, `POST /api/Capture`,
//! `POST /api/Match`. Every response carries a numeric `ErrorCode` (0 is
//! success); capture failure codes are normalized into the crate's stable
//! error copy. Field names drift between service builds
//! (`TemplateData`/`Template`, `Quality`/`ImageQuality`,
//! `MatchingScore`/`Score`), handled with serde aliases.
//!
//! This backend returns a continuous matching score, so the threshold
//! comparison happens here on the client side.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::backend::ScannerBackend;
use crate::common::error::ScanError;
use crate::common::types::{CaptureResult, DeviceInfo, MatchResult};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct DeviceInfoResponse {
    error_code: i64,
    device_name: Option<String>,
    serial_number: Option<String>,
    firmware_version: Option<String>,
    image_width: Option<u32>,
    image_height: Option<u32>,
    error_message: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct CaptureRequest {
    timeout: u64,
    quality: u8,
    template_format: &'static str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct CaptureResponse {
    error_code: i64,
    image_data: Option<String>,
    #[serde(alias = "Template")]
    template_data: Option<String>,
    #[serde(alias = "ImageQuality")]
    quality: Option<u8>,
    error_message: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct MatchRequest<'a> {
    template1: &'a str,
    template2: &'a str,
    template_format: &'static str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct MatchResponse {
    error_code: i64,
    #[serde(alias = "Score")]
    matching_score: Option<u8>,
    error_message: Option<String>,
}

/// Variant B: the vendor WebAPI on its loopback HTTPS port.
pub struct WebApiBackend {
    base_url: String,
    http: reqwest::Client,
}

impl WebApiBackend {
    pub fn new(base_url: String, http: reqwest::Client) -> Self {
        Self { base_url, http }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl ScannerBackend for WebApiBackend {
    async fn health_check(&self) -> bool {
        match self.http.get(self.url("/api/ping")).send().await {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }

    async fn device_info(&self) -> DeviceInfo {
        let response = match self.http.get(self.url("/api/DeviceInfo")).send().await {
            Ok(r) => r,
            Err(_) => return DeviceInfo::disconnected(ScanError::DeviceUnavailable.to_string()),
        };

        if !response.status().is_success() {
            return DeviceInfo::disconnected("Failed to get device info");
        }

        match response.json::<DeviceInfoResponse>().await {
            Ok(data) if data.error_code == 0 => DeviceInfo {
                connected: true,
                device_name: Some(
                    data.device_name
                        .unwrap_or_else(|| "Fingerprint Scanner".to_string()),
                ),
                serial_number: data.serial_number,
                firmware_version: data.firmware_version,
                image_width: data.image_width,
                image_height: data.image_height,
                error: None,
            },
            Ok(data) => DeviceInfo::disconnected(
                data.error_message
                    .unwrap_or_else(|| "Device not connected".to_string()),
            ),
            Err(_) => DeviceInfo::disconnected("Failed to get device info"),
        }
    }

    async fn capture(&self, timeout_secs: u64, min_quality: u8) -> CaptureResult {
        let body = CaptureRequest {
            timeout: timeout_secs * 1000,
            quality: min_quality,
            template_format: "ISO",
        };

        let response = match self
            .http
            .post(self.url("/api/Capture"))
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
            Ok(data) if data.error_code == 0 => CaptureResult {
                success: true,
                image_data: data.image_data,
                template_data: data.template_data,
                quality: data.quality,
                error: None,
            },
            Ok(data) => CaptureResult::failure(ScanError::from_capture_code(
                data.error_code,
                data.error_message.as_deref(),
            )),
            Err(_) => CaptureResult::failure("Capture failed"),
        }
    }

    async fn match_templates(
        &self,
        template_a: &str,
        template_b: &str,
        threshold: u8,
    ) -> MatchResult {
        let body = MatchRequest {
            template1: template_a,
            template2: template_b,
            template_format: "ISO",
        };

        let response = match self
            .http
            .post(self.url("/api/Match"))
            .json(&body)
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => return MatchResult::failure(ScanError::from(e).to_string()),
        };

        if !response.status().is_success() {
            return MatchResult::failure("Match request failed");
        }

        match response.json::<MatchResponse>().await {
            Ok(data) if data.error_code == 0 => {
                let score = data.matching_score.unwrap_or(0);
                MatchResult {
                    matched: score >= threshold,
                    score: Some(score),
                    error: None,
                }
            }
            Ok(data) => MatchResult::failure(
                data.error_message
                    .unwrap_or_else(|| "Match failed".to_string()),
            ),
            Err(_) => MatchResult::failure("Match request failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_response_accepts_field_aliases() {
        // Older service builds use `Template` and `ImageQuality`.
        let old: CaptureResponse = serde_json::from_str(
            r#"{"ErrorCode": 0, "Template": "QUJD", "ImageQuality": 77}"#,
        )
        .unwrap();
        assert_eq!(old.template_data.as_deref(), Some("QUJD"));
        assert_eq!(old.quality, Some(77));

        let new: CaptureResponse = serde_json::from_str(
            r#"{"ErrorCode": 0, "TemplateData": "REVG", "Quality": 61}"#,
        )
        .unwrap();
        assert_eq!(new.template_data.as_deref(), Some("REVG"));
        assert_eq!(new.quality, Some(61));
    }

    #[test]
    fn match_response_accepts_score_alias() {
        let old: MatchResponse =
            serde_json::from_str(r#"{"ErrorCode": 0, "Score": 81}"#).unwrap();
        assert_eq!(old.matching_score, Some(81));

        let new: MatchResponse =
            serde_json::from_str(r#"{"ErrorCode": 0, "MatchingScore": 42}"#).unwrap();
        assert_eq!(new.matching_score, Some(42));
    }
}
