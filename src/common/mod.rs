//! # Shared Components
//!
//! Data types, configuration and the error taxonomy used by every other
//! module in the crate.

pub mod config;
pub mod error;
pub mod types;
