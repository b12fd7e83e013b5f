//! Enumerated scan states and the legal-transition table.

/// Where the verification workflow currently is.
///
/// ```text
/// Idle -> CheckingDevice -> { Ready | NoDevice }
/// Ready|Failed -> Scanning -> { Success | Failed }
/// NoDevice -> CheckingDevice   (explicit retry)
/// any -> Idle                  (cancel)
/// ```
///
/// The predicates below are the only transition authority; the workflow
/// refuses any move its current state does not allow, which is how
/// `Scanning -> Scanning` (a second capture against exclusive hardware)
/// is kept unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    Idle,
    CheckingDevice,
    Ready,
    NoDevice,
    Scanning,
    Success,
    Failed,
}

impl ScanState {
    pub fn name(self) -> &'static str {
        match self {
            ScanState::Idle => "idle",
            ScanState::CheckingDevice => "checking_device",
            ScanState::Ready => "ready",
            ScanState::NoDevice => "no_device",
            ScanState::Scanning => "scanning",
            ScanState::Success => "success",
            ScanState::Failed => "failed",
        }
    }

    /// `start` is only legal from a fresh or cancelled workflow.
    pub fn can_start(self) -> bool {
        matches!(self, ScanState::Idle)
    }

    /// The retry button re-enters the device check.
    pub fn can_retry_device(self) -> bool {
        matches!(self, ScanState::NoDevice)
    }

    /// Scanning starts on explicit user action from `Ready`, or re-enters
    /// from `Failed` (retry preserves finger and sub-mode).
    pub fn can_begin_scan(self) -> bool {
        matches!(self, ScanState::Ready | ScanState::Failed)
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, ScanState::Success | ScanState::Failed)
    }
}

impl std::fmt::Display for ScanState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scanning_cannot_reenter_scanning() {
        assert!(!ScanState::Scanning.can_begin_scan());
    }

    #[test]
    fn failed_is_reenterable() {
        assert!(ScanState::Failed.can_begin_scan());
        assert!(ScanState::Failed.is_terminal());
    }

    #[test]
    fn only_no_device_allows_device_retry() {
        for state in [
            ScanState::Idle,
            ScanState::CheckingDevice,
            ScanState::Ready,
            ScanState::Scanning,
            ScanState::Success,
            ScanState::Failed,
        ] {
            assert!(!state.can_retry_device());
        }
        assert!(ScanState::NoDevice.can_retry_device());
    }
}
