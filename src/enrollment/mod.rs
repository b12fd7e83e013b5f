//! # Enrollment Collaborator
//!
//! The persistence side of biometrics lives in the hospital REST API;
//! this module owns only the contract. [`EnrollmentStore`] is the seam the
//! workflow depends on, and [`HttpEnrollmentStore`] is the one production
//! implementation, speaking to the `/biometrics/*` resource family:
//!
//! - `GET  /biometrics/check/{subjectId}` — enrollment status
//! - `GET  /biometrics/templates/{subjectId}` — enrolled template set
//! - `POST /biometrics/register` — store a new template
//! - `POST /biometrics/verify` — audit a successful verification
//! - `GET  /biometrics/staff-coverage/{subjectId}` — coverage eligibility

use async_trait::async_trait;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::common::config::ApiSettings;
use crate::common::error::ScanError;
use crate::common::types::{CoverageEligibility, EnrolledTemplate, FingerIndex};

/// Whether a subject has any stored templates, and for which fingers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrollmentStatus {
    pub enrolled: bool,
    #[serde(default)]
    pub fingers: Vec<FingerIndex>,
}

/// Payload for storing a newly captured template.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequest {
    pub subject_id: String,
    pub finger_index: FingerIndex,
    /// Base64 template payload
    pub template_data: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality_score: Option<u8>,
}

/// Persistence operations the verification workflow depends on.
#[async_trait]
pub trait EnrollmentStore: Send + Sync {
    /// Is this subject enrolled at all, and with which fingers?
    async fn check_enrollment(&self, subject_id: &str) -> Result<EnrollmentStatus, ScanError>;

    /// The subject's enrolled templates, as a read-only sequence.
    async fn get_templates(&self, subject_id: &str) -> Result<Vec<EnrolledTemplate>, ScanError>;

    /// Store a new template. The server enforces one template per finger
    /// per subject.
    async fn register(&self, request: &RegistrationRequest) -> Result<(), ScanError>;

    /// Audit a successful verification event.
    async fn record_verification(
        &self,
        subject_id: &str,
        finger_index: FingerIndex,
    ) -> Result<(), ScanError>;

    /// Coverage eligibility for the staff-benefit payment flow.
    async fn staff_coverage(&self, subject_id: &str) -> Result<CoverageEligibility, ScanError>;
}

#[derive(Debug, Deserialize)]
struct TemplatesResponse {
    templates: Vec<EnrolledTemplate>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VerificationAudit<'a> {
    subject_id: &'a str,
    finger_index: FingerIndex,
}

/// REST implementation against the hospital API.
pub struct HttpEnrollmentStore {
    base_url: String,
    http: reqwest::Client,
}

impl HttpEnrollmentStore {
    pub fn new(settings: &ApiSettings) -> Result<Self, ScanError> {
        Ok(Self {
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::builder().build()?,
        })
    }

    /// Build against an explicit base URL (tests, alternate deployments).
    pub fn with_base_url(base_url: impl Into<String>, http: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn check_status(path: &str, status: reqwest::StatusCode) -> Result<(), ScanError> {
        if status.is_success() {
            Ok(())
        } else {
            Err(ScanError::Persistence(format!(
                "{} returned {}",
                path, status
            )))
        }
    }
}

#[async_trait]
impl EnrollmentStore for HttpEnrollmentStore {
    async fn check_enrollment(&self, subject_id: &str) -> Result<EnrollmentStatus, ScanError> {
        let path = format!("/biometrics/check/{}", subject_id);
        let response = self.http.get(self.url(&path)).send().await?;
        Self::check_status(&path, response.status())?;
        Ok(response.json().await?)
    }

    async fn get_templates(&self, subject_id: &str) -> Result<Vec<EnrolledTemplate>, ScanError> {
        let path = format!("/biometrics/templates/{}", subject_id);
        let response = self.http.get(self.url(&path)).send().await?;
        Self::check_status(&path, response.status())?;
        let body: TemplatesResponse = response.json().await?;
        Ok(body.templates)
    }

    async fn register(&self, request: &RegistrationRequest) -> Result<(), ScanError> {
        // Reject garbage before it reaches the server; templates are
        // opaque but always base64.
        if base64::engine::general_purpose::STANDARD
            .decode(&request.template_data)
            .is_err()
        {
            return Err(ScanError::InvalidTemplate);
        }

        let path = "/biometrics/register";
        let response = self.http.post(self.url(path)).json(request).send().await?;
        Self::check_status(path, response.status())
    }

    async fn record_verification(
        &self,
        subject_id: &str,
        finger_index: FingerIndex,
    ) -> Result<(), ScanError> {
        let path = "/biometrics/verify";
        let body = VerificationAudit {
            subject_id,
            finger_index,
        };
        let response = self.http.post(self.url(path)).json(&body).send().await?;
        Self::check_status(path, response.status())
    }

    async fn staff_coverage(&self, subject_id: &str) -> Result<CoverageEligibility, ScanError> {
        let path = format!("/biometrics/staff-coverage/{}", subject_id);
        let response = self.http.get(self.url(&path)).send().await?;
        Self::check_status(&path, response.status())?;
        Ok(response.json().await?)
    }
}
