//! # Error Taxonomy
//!
//! Every failure class the capture/verification core can produce. Device,
//! capture, match and transport failures are caught at the component
//! boundary and converted into result-object error strings; the variants
//! here are what the workflow (the single place allowed to produce
//! user-facing copy) matches on.
//!
//! Nothing in this crate retries automatically: every retry is a discrete
//! user action that re-enters a known workflow state.

use thiserror::Error;

/// Reason a coverage-gated scan was blocked.
///
/// Each denial carries a distinct, stable message so the UI can key off it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CoverageDenial {
    #[error("No staff benefit record is linked to this user")]
    NoLinkedRecord,
    #[error("Staff coverage is disabled for this user")]
    Disabled,
    #[error("Staff coverage has expired")]
    Expired,
}

/// Failure classes for the biometric core.
#[derive(Debug, Error)]
pub enum ScanError {
    /// No backend answered a health probe within its timeout.
    #[error("Fingerprint service not available. Please ensure it is installed and running.")]
    DeviceUnavailable,

    /// Device-reported capture failures, normalized from backend codes.
    #[error("Timeout - no finger detected")]
    CaptureTimeout,
    #[error("Device busy")]
    CaptureBusy,
    #[error("Device not found")]
    CaptureDeviceNotFound,
    #[error("Invalid quality - please press finger firmly")]
    CaptureLowQuality,
    #[error("Capture cancelled")]
    CaptureCancelled,

    /// No enrolled template exceeded the threshold.
    #[error("Fingerprint does not match any registered finger")]
    MatchFailed,

    /// Verification attempted with zero enrolled templates.
    #[error("No fingerprints are registered for this user")]
    EnrollmentMissing,

    /// Coverage gate blocked the scan.
    #[error("{0}")]
    CoverageIneligible(CoverageDenial),

    /// Template payload was not decodable base64.
    #[error("Template data is not valid base64")]
    InvalidTemplate,

    /// The hospital API rejected a save/verify call.
    #[error("Persistence call failed: {0}")]
    Persistence(String),

    /// Network failure talking to a local backend or the hospital API.
    #[error("Failed to communicate with scanner. Please check connection.")]
    Transport(#[source] reqwest::Error),

    /// A caller drove the state machine through a move its current state
    /// does not allow (e.g. starting a scan while one is outstanding).
    #[error("Illegal workflow transition: cannot {action} from {from}")]
    IllegalTransition {
        from: &'static str,
        action: &'static str,
    },
}

impl From<reqwest::Error> for ScanError {
    fn from(e: reqwest::Error) -> Self {
        ScanError::Transport(e)
    }
}

impl ScanError {
    /// Normalize a vendor WebAPI capture error code into the taxonomy.
    ///
    /// Codes observed from the vendor service: 1 timeout, 2 busy, 3 device
    /// not found, 4 quality too low, 5 cancelled. Unknown codes fall back
    /// to the message supplied by the backend, if any.
    pub fn from_capture_code(code: i64, backend_message: Option<&str>) -> String {
        match code {
            1 => ScanError::CaptureTimeout.to_string(),
            2 => ScanError::CaptureBusy.to_string(),
            3 => ScanError::CaptureDeviceNotFound.to_string(),
            4 => ScanError::CaptureLowQuality.to_string(),
            5 => ScanError::CaptureCancelled.to_string(),
            _ => backend_message
                .unwrap_or("Capture failed")
                .to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_codes_map_to_stable_messages() {
        assert_eq!(
            ScanError::from_capture_code(1, None),
            "Timeout - no finger detected"
        );
        assert_eq!(ScanError::from_capture_code(2, None), "Device busy");
        assert_eq!(ScanError::from_capture_code(3, None), "Device not found");
        assert_eq!(
            ScanError::from_capture_code(4, None),
            "Invalid quality - please press finger firmly"
        );
        assert_eq!(ScanError::from_capture_code(5, None), "Capture cancelled");
        assert_eq!(
            ScanError::from_capture_code(99, Some("sensor fault")),
            "sensor fault"
        );
        assert_eq!(ScanError::from_capture_code(99, None), "Capture failed");
    }

    #[test]
    fn coverage_denials_are_distinct() {
        let msgs = [
            CoverageDenial::NoLinkedRecord.to_string(),
            CoverageDenial::Disabled.to_string(),
            CoverageDenial::Expired.to_string(),
        ];
        assert_ne!(msgs[0], msgs[1]);
        assert_ne!(msgs[1], msgs[2]);
        assert_ne!(msgs[0], msgs[2]);
    }
}
