//! # Biogate
//!
//! Biometric capture and identity-verification core for the hospital
//! management system. This crate owns the one genuinely tricky corner of
//! that system: talking to whichever local fingerprint backend happens to
//! be installed at a workstation, and deciding whether a user may register
//! or verify before a scheme/staff payment is authorized.
//!
//! ## Components
//!
//! - [`transport`] — probes the fixed, ordered list of candidate local
//!   services and binds the session to the first one that answers.
//! - [`backend`] — one adapter per backend family (the project-owned
//!   fingerprint service and the vendor-style WebAPI), both exposing the
//!   same capability set behind the [`backend::ScannerBackend`] trait.
//! - [`client`] — the uniform capture/match surface plus the best-match
//!   selection across a set of enrolled templates.
//! - [`enrollment`] — the REST collaborator that stores templates and
//!   coverage records (contract only; the server lives elsewhere).
//! - [`workflow`] — the register/verify state machine driven by the UI.

pub mod backend;
pub mod client;
pub mod common;
pub mod enrollment;
pub mod transport;
pub mod workflow;

pub use client::{MultiTemplateMatcher, ScannerClient};
pub use common::config::BiogateConfig;
pub use common::error::ScanError;
pub use common::types::{CaptureResult, DeviceInfo, EnrolledTemplate, FingerIndex, MatchResult};
pub use transport::TransportDiscovery;
pub use workflow::VerificationWorkflow;
