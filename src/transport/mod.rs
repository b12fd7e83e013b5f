//! # Transport Discovery
//!
//! Two incompatible fingerprint backends exist in the field: the
//! project-owned fingerprint service on one loopback port and a
//! vendor-style WebAPI on another. Which one is installed varies per
//! workstation, so the session probes a fixed, ordered candidate list and
//! binds to the first endpoint that answers a health check.
//!
//! The binding is an immutable [`BoundEndpoint`] value resolved once and
//! cached for the session; [`TransportDiscovery::reset`] forces a fresh
//! round of probes after failure recovery (device unplugged/replugged).

pub mod discovery;
pub mod endpoint;

pub use discovery::TransportDiscovery;
pub use endpoint::{default_endpoints, BackendKind, BoundEndpoint, EndpointDescriptor};
