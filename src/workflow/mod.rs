//! # Verification Workflow
//!
//! The UI-facing state machine that sequences device check -> enrollment
//! lookup -> (register | verify) -> capture -> match/save -> terminal
//! state, incorporating the staff coverage gate where the payment context
//! requires it.
//!
//! ## Sub-mode selection
//!
//! Happens once, on entry: a subject with stored templates verifies; a
//! subject without any is put in register sub-mode with a non-blocking
//! advisory. The UI cannot override this — an un-enrolled subject can
//! never be asked to verify.
//!
//! ## Error posture
//!
//! This is the single place that turns the error taxonomy into
//! user-facing copy. Operational failures land the machine in `Failed`
//! (or keep it in `Ready` for coverage denials) with the copy in
//! [`last_error`](VerificationWorkflow::last_error); the only `Err` this
//! type returns is an illegal transition, which indicates a driver bug.
//!
//! ## Cancellation
//!
//! `cancel` resets to `Idle` immediately. In-flight capture/match calls
//! are not forcibly aborted; a driver that drops the future tears the
//! underlying request down at the next await point, and a result that
//! settles for a cancelled attempt is simply discarded.

pub mod state;

use async_trait::async_trait;
use log::{info, warn};
use uuid::Uuid;

use crate::client::matching::{MultiTemplateMatcher, TemplateMatcher};
use crate::client::ScannerClient;
use crate::common::config::{CaptureSettings, MatchSettings};
use crate::common::error::{CoverageDenial, ScanError};
use crate::common::types::{CaptureResult, CoverageEligibility, DeviceInfo, FingerIndex};
use crate::enrollment::{EnrollmentStore, RegistrationRequest};

pub use state::ScanState;

/// Which flow the workflow selected on entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Capture and store a new template for the selected finger
    Register,
    /// Capture and match against the enrolled set
    Verify,
}

/// What a successful attempt hands to the caller.
///
/// Template data is only present in register sub-mode; a failed attempt
/// never surfaces partial template data.
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    pub finger_index: FingerIndex,
    pub template_data: Option<String>,
    pub quality: Option<u8>,
    pub score: Option<u8>,
}

/// The scanner operations the workflow needs, abstracted so tests can
/// drive the machine with scripted hardware.
#[async_trait]
pub trait ScannerGateway: TemplateMatcher {
    async fn device_info(&self) -> DeviceInfo;
    async fn capture(&self, timeout_secs: u64, min_quality: u8) -> CaptureResult;
    /// Force transport re-discovery (device unplugged/replugged).
    async fn reset(&self);
}

#[async_trait]
impl ScannerGateway for ScannerClient {
    async fn device_info(&self) -> DeviceInfo {
        ScannerClient::device_info(self).await
    }

    async fn capture(&self, timeout_secs: u64, min_quality: u8) -> CaptureResult {
        ScannerClient::capture(self, timeout_secs, min_quality).await
    }

    async fn reset(&self) {
        ScannerClient::reset(self).await;
    }
}

/// Register/verify state machine for one subject.
///
/// Drives the scanner and the enrollment collaborator strictly
/// sequentially; the state machine never issues a second capture while
/// one is outstanding.
pub struct VerificationWorkflow<S: ScannerGateway, E: EnrollmentStore> {
    subject_id: String,
    /// Whether the payment context requires the staff coverage gate
    coverage_gated: bool,
    scanner: S,
    store: E,
    capture_settings: CaptureSettings,
    match_settings: MatchSettings,

    state: ScanState,
    mode: Mode,
    device: Option<DeviceInfo>,
    enrolled_fingers: Vec<FingerIndex>,
    advisory: Option<String>,
    last_error: Option<String>,
    outcome: Option<ScanOutcome>,
}

impl<S: ScannerGateway, E: EnrollmentStore> VerificationWorkflow<S, E> {
    /// Create an idle workflow for one subject.
    ///
    /// # Arguments
    /// - `subject_id`: The user being registered or verified
    /// - `coverage_gated`: True for payment types that require the staff
    ///   coverage gate (e.g. the staff-benefit flow)
    pub fn new(subject_id: impl Into<String>, coverage_gated: bool, scanner: S, store: E) -> Self {
        Self {
            subject_id: subject_id.into(),
            coverage_gated,
            scanner,
            store,
            capture_settings: CaptureSettings::default(),
            match_settings: MatchSettings::default(),
            state: ScanState::Idle,
            mode: Mode::Verify,
            device: None,
            enrolled_fingers: Vec::new(),
            advisory: None,
            last_error: None,
            outcome: None,
        }
    }

    /// Override the capture/match defaults from workstation configuration.
    pub fn with_settings(mut self, capture: CaptureSettings, matching: MatchSettings) -> Self {
        self.capture_settings = capture;
        self.match_settings = matching;
        self
    }

    // ------------------------------------------------------------------
    // Read-side accessors for the UI
    // ------------------------------------------------------------------

    pub fn state(&self) -> ScanState {
        self.state
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Last device snapshot, for rendering name/serial under the scanner.
    pub fn device(&self) -> Option<&DeviceInfo> {
        self.device.as_ref()
    }

    pub fn enrolled_fingers(&self) -> &[FingerIndex] {
        &self.enrolled_fingers
    }

    /// Non-blocking advisory shown when register sub-mode was forced.
    pub fn advisory(&self) -> Option<&str> {
        self.advisory.as_deref()
    }

    /// User-facing copy for the most recent failure or blocked gate.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// The terminal result of a successful attempt.
    pub fn outcome(&self) -> Option<&ScanOutcome> {
        self.outcome.as_ref()
    }

    // ------------------------------------------------------------------
    // Transitions
    // ------------------------------------------------------------------

    /// Enter the workflow: device check, then sub-mode selection.
    ///
    /// # Returns
    /// The resulting state, `Ready` or `NoDevice`.
    pub async fn start(&mut self) -> Result<ScanState, ScanError> {
        if !self.state.can_start() {
            return Err(self.illegal("start"));
        }

        self.check_device().await;
        self.select_mode().await;
        Ok(self.state)
    }

    /// Re-run the device check after `NoDevice`, forcing transport
    /// re-discovery first so an unplugged/replugged scanner is found.
    pub async fn retry_device(&mut self) -> Result<ScanState, ScanError> {
        if !self.state.can_retry_device() {
            return Err(self.illegal("retry device check"));
        }

        self.scanner.reset().await;
        self.check_device().await;
        Ok(self.state)
    }

    /// Run one scan attempt for the given finger.
    ///
    /// In verify sub-mode the finger argument is advisory only — the match
    /// decides which enrolled finger was presented. Re-entry from `Failed`
    /// is legal and preserves the selected finger and sub-mode.
    ///
    /// # Returns
    /// The resulting state: `Success`, `Failed`, or `Ready` if the
    /// coverage gate blocked the attempt.
    pub async fn begin_scan(&mut self, finger: FingerIndex) -> Result<ScanState, ScanError> {
        if !self.state.can_begin_scan() {
            return Err(self.illegal("begin scan"));
        }

        // Coverage gate: resolved before the machine ever enters Scanning,
        // so a blocked attempt leaves the scan button available once the
        // underlying condition is fixed.
        if self.coverage_gated {
            if let Err(copy) = self.resolve_coverage().await {
                self.state = ScanState::Ready;
                self.last_error = Some(copy);
                return Ok(self.state);
            }
        }

        let attempt = Uuid::new_v4();
        self.state = ScanState::Scanning;
        self.last_error = None;
        self.outcome = None;
        info!(
            "[{}] scanning: subject={} mode={:?} finger={}",
            attempt, self.subject_id, self.mode, finger
        );

        let capture = self
            .scanner
            .capture(
                self.capture_settings.timeout_secs,
                self.capture_settings.min_quality,
            )
            .await;

        if !capture.success {
            let copy = capture
                .error
                .unwrap_or_else(|| "Capture failed".to_string());
            return Ok(self.fail(copy));
        }
        let Some(template) = capture.template_data else {
            return Ok(self.fail("Capture failed"));
        };

        match self.mode {
            Mode::Register => self.finish_register(finger, template, capture.quality).await,
            Mode::Verify => self.finish_verify(template).await,
        }

        Ok(self.state)
    }

    /// Abandon the flow and return to `Idle` immediately.
    ///
    /// Legal from every state. Any in-flight result belonging to the
    /// abandoned attempt is discarded, not awaited.
    pub fn cancel(&mut self) {
        info!("workflow cancelled: subject={}", self.subject_id);
        self.state = ScanState::Idle;
        self.last_error = None;
        self.outcome = None;
        self.advisory = None;
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    async fn check_device(&mut self) {
        self.state = ScanState::CheckingDevice;
        self.last_error = None;

        let info = self.scanner.device_info().await;
        if info.connected {
            self.state = ScanState::Ready;
        } else {
            self.state = ScanState::NoDevice;
            self.last_error = Some(
                info.error
                    .clone()
                    .unwrap_or_else(|| "Scanner not connected".to_string()),
            );
        }
        self.device = Some(info);
    }

    /// One-shot sub-mode selection from the enrollment lookup. A subject
    /// with zero templates is forced into register sub-mode regardless of
    /// what the UI asked for.
    async fn select_mode(&mut self) {
        match self.store.check_enrollment(&self.subject_id).await {
            Ok(status) if status.enrolled => {
                self.mode = Mode::Verify;
                self.enrolled_fingers = status.fingers;
            }
            Ok(_) => {
                self.mode = Mode::Register;
                self.enrolled_fingers.clear();
                self.advisory = Some(
                    "No fingerprints enrolled for this user - registration is required before verification"
                        .to_string(),
                );
            }
            Err(e) => {
                // Lookup failure is non-fatal for entry; fall back to
                // register sub-mode so no one is asked to verify against
                // an unknown enrolled set.
                warn!("enrollment lookup failed for {}: {}", self.subject_id, e);
                self.mode = Mode::Register;
                self.enrolled_fingers.clear();
                self.advisory =
                    Some("Could not confirm enrollment - defaulting to registration".to_string());
            }
        }
    }

    /// Resolve the coverage gate. `Err` carries the user-facing copy.
    async fn resolve_coverage(&mut self) -> Result<(), String> {
        let eligibility = match self.store.staff_coverage(&self.subject_id).await {
            Ok(e) => e,
            Err(err) => {
                warn!("coverage lookup failed for {}: {}", self.subject_id, err);
                return Err("Could not verify staff coverage. Please try again.".to_string());
            }
        };

        match evaluate_coverage(&eligibility) {
            Ok(()) => Ok(()),
            Err(denial) => {
                info!(
                    "coverage gate blocked subject {}: {}",
                    self.subject_id, denial
                );
                Err(ScanError::CoverageIneligible(denial).to_string())
            }
        }
    }

    async fn finish_register(
        &mut self,
        finger: FingerIndex,
        template: String,
        quality: Option<u8>,
    ) {
        let request = RegistrationRequest {
            subject_id: self.subject_id.clone(),
            finger_index: finger,
            template_data: template.clone(),
            quality_score: quality,
        };

        match self.store.register(&request).await {
            Ok(()) => {
                info!("✅ {} registered for subject {}", finger, self.subject_id);
                self.state = ScanState::Success;
                self.outcome = Some(ScanOutcome {
                    finger_index: finger,
                    template_data: Some(template),
                    quality,
                    score: None,
                });
            }
            Err(e) => {
                warn!("template save failed for {}: {}", self.subject_id, e);
                self.fail("Failed to save fingerprint. Please try again.");
            }
        }
    }

    async fn finish_verify(&mut self, template: String) {
        let templates = match self.store.get_templates(&self.subject_id).await {
            Ok(t) => t,
            Err(e) => {
                warn!("template fetch failed for {}: {}", self.subject_id, e);
                self.fail("Verification failed. User may not have registered fingerprints.");
                return;
            }
        };

        if templates.is_empty() {
            self.fail(ScanError::EnrollmentMissing.to_string());
            return;
        }

        let matched = {
            let matcher = MultiTemplateMatcher::new(&self.scanner);
            matcher
                .match_against_many(&template, &templates, self.match_settings.threshold)
                .await
        };

        let Some(finger) = matched.finger_index.filter(|_| matched.matched) else {
            self.fail("Fingerprint does not match. Please try again.");
            return;
        };

        match self.store.record_verification(&self.subject_id, finger).await {
            Ok(()) => {
                info!(
                    "✅ identity verified: subject={} finger={} score={:?}",
                    self.subject_id, finger, matched.score
                );
                self.state = ScanState::Success;
                // No template data on the verify path, only the finger.
                self.outcome = Some(ScanOutcome {
                    finger_index: finger,
                    template_data: None,
                    quality: None,
                    score: matched.score,
                });
            }
            Err(e) => {
                warn!("verification audit failed for {}: {}", self.subject_id, e);
                self.fail("Verification failed. Please try again.");
            }
        }
    }

    fn fail(&mut self, copy: impl Into<String>) -> ScanState {
        self.state = ScanState::Failed;
        self.last_error = Some(copy.into());
        self.outcome = None;
        self.state
    }

    fn illegal(&self, action: &'static str) -> ScanError {
        ScanError::IllegalTransition {
            from: self.state.name(),
            action,
        }
    }
}

/// Pure coverage-gate decision, split out so the denial matrix is
/// testable without a workflow.
fn evaluate_coverage(eligibility: &CoverageEligibility) -> Result<(), CoverageDenial> {
    if !eligibility.has_subject {
        return Err(CoverageDenial::NoLinkedRecord);
    }
    match &eligibility.coverage {
        None => Err(CoverageDenial::NoLinkedRecord),
        Some(coverage) if !coverage.enabled => Err(CoverageDenial::Disabled),
        Some(coverage) if coverage.expired => Err(CoverageDenial::Expired),
        Some(_) => Ok(()),
    }
}
