//! # Core Data Model
//!
//! Defines the canonical types shared by the scanner client, the matcher
//! and the verification workflow:
//! - Finger identification ([`FingerIndex`])
//! - Device status snapshots ([`DeviceInfo`])
//! - Capture and match results normalized across backend variants
//! - Enrollment and coverage records read from the hospital REST API
//!
//! All REST-facing shapes serialize as camelCase to match the hospital
//! API; `FingerIndex` serializes as snake_case (`right_index`, ...) because
//! that is the stable key format stored alongside templates.

use serde::{Deserialize, Serialize};

// ============================================================================
// FINGER IDENTIFICATION
// ============================================================================

/// Enumerated identifier for one of the ten human digits.
///
/// Used as the stable key correlating a stored template to a physical
/// finger. No two enrolled templates may share a `FingerIndex` for the
/// same subject; the hospital API enforces that constraint on write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FingerIndex {
    RightThumb,
    RightIndex,
    RightMiddle,
    RightRing,
    RightLittle,
    LeftThumb,
    LeftIndex,
    LeftMiddle,
    LeftRing,
    LeftLittle,
}

impl FingerIndex {
    /// All ten fingers in display order (right hand first, thumb to little).
    pub const ALL: [FingerIndex; 10] = [
        FingerIndex::RightThumb,
        FingerIndex::RightIndex,
        FingerIndex::RightMiddle,
        FingerIndex::RightRing,
        FingerIndex::RightLittle,
        FingerIndex::LeftThumb,
        FingerIndex::LeftIndex,
        FingerIndex::LeftMiddle,
        FingerIndex::LeftRing,
        FingerIndex::LeftLittle,
    ];

    /// Human-readable name for UI copy (e.g. "Right Index").
    pub fn display_name(self) -> &'static str {
        match self {
            FingerIndex::RightThumb => "Right Thumb",
            FingerIndex::RightIndex => "Right Index",
            FingerIndex::RightMiddle => "Right Middle",
            FingerIndex::RightRing => "Right Ring",
            FingerIndex::RightLittle => "Right Little",
            FingerIndex::LeftThumb => "Left Thumb",
            FingerIndex::LeftIndex => "Left Index",
            FingerIndex::LeftMiddle => "Left Middle",
            FingerIndex::LeftRing => "Left Ring",
            FingerIndex::LeftLittle => "Left Little",
        }
    }
}

impl std::fmt::Display for FingerIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

// ============================================================================
// DEVICE AND OPERATION RESULTS
// ============================================================================

/// Immutable snapshot of the scanner hardware state.
///
/// Recomputed on every device check (initial entry and the retry button);
/// never cached across checks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceInfo {
    /// Whether a scanner is attached and ready
    pub connected: bool,
    /// Model/product name reported by the backend
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firmware_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_height: Option<u32>,
    /// Populated when `connected` is false
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DeviceInfo {
    /// A disconnected snapshot carrying an explanation for the UI.
    pub fn disconnected(error: impl Into<String>) -> Self {
        Self {
            connected: false,
            error: Some(error.into()),
            ..Self::default()
        }
    }
}

/// Outcome of one physical fingerprint read.
///
/// `template_data` is present if and only if `success` is true. Both image
/// and template payloads are base64 strings produced by the backend; the
/// core never decodes the image.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptureResult {
    pub success: bool,
    /// Base64 fingerprint image (only some backends produce one)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_data: Option<String>,
    /// Base64 template usable for matching
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_data: Option<String>,
    /// Quality score 0-100 as reported by the device
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CaptureResult {
    /// A failed capture with a normalized, human-readable reason.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            ..Self::default()
        }
    }
}

/// Outcome of one pairwise template comparison.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchResult {
    pub matched: bool,
    /// Score 0-100 when the backend reports one (synthesized as 100/0 for
    /// the boolean-only backend)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl MatchResult {
    /// A failed comparison with a normalized reason.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            matched: false,
            score: None,
            error: Some(error.into()),
        }
    }
}

// ============================================================================
// ENROLLMENT AND COVERAGE RECORDS
// ============================================================================

/// One stored template, owned by the hospital API and passed into the
/// matcher as a read-only sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrolledTemplate {
    pub finger_index: FingerIndex,
    /// Base64 template payload
    pub template_data: String,
}

/// Coverage eligibility for the staff-benefit payment flow.
///
/// Supplied by the hospital API; the workflow only reads it. A subject with
/// no linked staff record has `has_subject == false` and no coverage block.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageEligibility {
    pub has_subject: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coverage: Option<CoverageStatus>,
}

/// Benefit plan state for one covered subject.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageStatus {
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub used: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remaining: Option<u64>,
    #[serde(default)]
    pub expired: bool,
}
