//! Sequential health-probe discovery with a memoized binding.

use std::time::Duration;

use log::{info, warn};
use tokio::sync::RwLock;

use crate::common::error::ScanError;
use crate::transport::endpoint::{BoundEndpoint, EndpointDescriptor};

/// Per-candidate health probe timeout. Probes run sequentially, not
/// concurrently, so two backends never race for the same hardware claim.
const PROBE_TIMEOUT_SECS: u64 = 2;

/// Result of the last probe round.
#[derive(Debug, Clone)]
enum BindState {
    /// No probe round has run yet (initial state, or after `reset`)
    Unprobed,
    /// A full round ran and nobody answered
    Unavailable,
    /// Bound for the rest of the session
    Bound(BoundEndpoint),
}

/// Probes the fixed candidate list in priority order and binds the session
/// to the first endpoint whose health check succeeds within its timeout.
///
/// # Idempotence
///
/// The outcome of a probe round is memoized, including the unavailable
/// outcome: calling [`resolve`](Self::resolve) twice without an intervening
/// [`reset`](Self::reset) issues at most one round of health probes. Retry
/// after failure is always an explicit user action, which goes through
/// `reset` first.
pub struct TransportDiscovery {
    http: reqwest::Client,
    candidates: Vec<EndpointDescriptor>,
    state: RwLock<BindState>,
}

impl TransportDiscovery {
    /// Create a discovery session over the given ordered candidate list.
    ///
    /// The caller supplies the HTTP client so the scanner client and the
    /// discovery probes share one connection pool (the vendor WebAPI needs
    /// a client that accepts its self-signed loopback certificate).
    pub fn new(http: reqwest::Client, candidates: Vec<EndpointDescriptor>) -> Self {
        Self {
            http,
            candidates,
            state: RwLock::new(BindState::Unprobed),
        }
    }

    /// Resolve the session binding, probing the candidates on first use.
    ///
    /// # Returns
    /// - `Ok(BoundEndpoint)`: First candidate that answered its health check
    /// - `Err(ScanError::DeviceUnavailable)`: No candidate answered
    ///
    /// Never panics; no backend responding is an expected condition the
    /// caller renders as device-not-found UI.
    pub async fn resolve(&self) -> Result<BoundEndpoint, ScanError> {
        // Write lock held across the whole round so concurrent callers
        // cannot trigger a second round.
        let mut state = self.state.write().await;

        match &*state {
            BindState::Bound(endpoint) => return Ok(endpoint.clone()),
            BindState::Unavailable => return Err(ScanError::DeviceUnavailable),
            BindState::Unprobed => {}
        }

        for candidate in &self.candidates {
            if self.probe(candidate).await {
                let endpoint = BoundEndpoint::from(candidate);
                info!(
                    "Using {} fingerprint backend at {}",
                    candidate.name, candidate.base_url
                );
                *state = BindState::Bound(endpoint.clone());
                return Ok(endpoint);
            }
        }

        warn!("No fingerprint service available");
        *state = BindState::Unavailable;
        Err(ScanError::DeviceUnavailable)
    }

    /// Drop the binding so the next `resolve` re-probes.
    ///
    /// Invoked on user-initiated retry after failure (e.g. the scanner was
    /// unplugged and plugged back in).
    pub async fn reset(&self) {
        *self.state.write().await = BindState::Unprobed;
    }

    /// Whether the session currently holds a binding.
    pub async fn is_bound(&self) -> bool {
        matches!(&*self.state.read().await, BindState::Bound(_))
    }

    /// One health probe with a short timeout. Any transport error or
    /// non-success status counts as "not reachable" and moves on to the
    /// next candidate.
    async fn probe(&self, candidate: &EndpointDescriptor) -> bool {
        let request = self.http.get(candidate.health_url()).send();

        match tokio::time::timeout(Duration::from_secs(PROBE_TIMEOUT_SECS), request).await {
            Ok(Ok(response)) => response.status().is_success(),
            Ok(Err(_)) => false,
            Err(_) => false, // probe timed out
        }
    }
}
