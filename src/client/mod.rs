//! # Scanner Client Components
//!
//! The client side is split into two components:
//!
//! ## Scanner Client ([`scanner`])
//! The uniform capture/match/status surface. Resolves the transport
//! binding lazily (and memoized) through [`crate::transport`], then
//! delegates to whichever backend adapter the session bound to.
//!
//! ## Multi-Template Matching ([`matching`])
//! Runs the pairwise matcher against an enrolled template set and selects
//! the best passing match, with a deterministic first-maximum tie break.

pub mod matching;
pub mod scanner;

pub use matching::{MultiMatchOutcome, MultiTemplateMatcher, TemplateMatcher};
pub use scanner::ScannerClient;
