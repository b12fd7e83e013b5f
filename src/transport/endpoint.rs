//! Candidate endpoint descriptors and the bound-endpoint value.

use serde::{Deserialize, Serialize};

use crate::common::config::ScannerSettings;

/// Which backend family an endpoint speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    /// Project-owned fingerprint service (`/health`, `/status`, ...)
    Native,
    /// Vendor-style WebAPI (`/api/ping`, `/api/DeviceInfo`, ...)
    WebApi,
}

/// One candidate in the fixed, ordered discovery list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointDescriptor {
    /// Short name used in log lines ("native", "webapi")
    pub name: &'static str,
    pub kind: BackendKind,
    pub base_url: String,
    /// Path of the backend's health probe (relative, leading slash)
    pub health_path: &'static str,
}

impl EndpointDescriptor {
    /// Full URL of the health probe.
    pub fn health_url(&self) -> String {
        format!("{}{}", self.base_url, self.health_path)
    }
}

/// The endpoint a session is bound to, produced by discovery.
///
/// Deliberately an immutable value rather than mutable fields on a
/// long-lived service object: every later operation receives the binding
/// it was resolved against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundEndpoint {
    pub kind: BackendKind,
    pub base_url: String,
}

impl BoundEndpoint {
    fn from_descriptor(d: &EndpointDescriptor) -> Self {
        Self {
            kind: d.kind,
            base_url: d.base_url.clone(),
        }
    }
}

impl From<&EndpointDescriptor> for BoundEndpoint {
    fn from(d: &EndpointDescriptor) -> Self {
        Self::from_descriptor(d)
    }
}

/// The fixed discovery order: native service first (more likely in this
/// deployment), then the vendor WebAPI.
pub fn default_endpoints(settings: &ScannerSettings) -> Vec<EndpointDescriptor> {
    vec![
        EndpointDescriptor {
            name: "native",
            kind: BackendKind::Native,
            base_url: settings.native_url.clone(),
            health_path: "/health",
        },
        EndpointDescriptor {
            name: "webapi",
            kind: BackendKind::WebApi,
            base_url: settings.webapi_url.clone(),
            health_path: "/api/ping",
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_order_is_native_then_webapi() {
        let endpoints = default_endpoints(&ScannerSettings::default());
        assert_eq!(endpoints.len(), 2);
        assert_eq!(endpoints[0].kind, BackendKind::Native);
        assert_eq!(endpoints[0].health_url(), "http://localhost:8444/health");
        assert_eq!(endpoints[1].kind, BackendKind::WebApi);
        assert_eq!(endpoints[1].health_url(), "https://localhost:8443/api/ping");
    }
}
