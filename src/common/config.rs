//! # Configuration Utilities
//!
//! Shared configuration structures and parsing utilities for the scanner
//! client, the workflow defaults and the hospital API base URL.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;

/// Load a TOML configuration file and deserialize it into the specified type.
///
/// # Arguments
/// - `path`: Path to the TOML configuration file
///
/// # Returns
/// - `Ok(T)`: Successfully loaded and parsed configuration
/// - `Err`: File I/O or parsing error
///
/// # Example
/// ```ignore
/// let config: BiogateConfig = load_config("config/workstation.toml")?;
/// ```
pub fn load_config<T>(path: &str) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    let content = fs::read_to_string(path)?;
    let config: T = toml::from_str(&content)?;
    Ok(config)
}

/// Complete configuration for one workstation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BiogateConfig {
    /// Local backend endpoint overrides
    #[serde(default)]
    pub scanner: ScannerSettings,
    /// Capture defaults used by the workflow
    #[serde(default)]
    pub capture: CaptureSettings,
    /// Template matching defaults
    #[serde(default)]
    pub matching: MatchSettings,
    /// Hospital REST API settings
    #[serde(default)]
    pub api: ApiSettings,
}

/// Base URLs of the two candidate local backends.
///
/// The native service is tried first (more likely in this deployment);
/// the vendor WebAPI sits on a loopback HTTPS port with a self-signed
/// certificate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScannerSettings {
    #[serde(default = "default_native_url")]
    pub native_url: String,
    #[serde(default = "default_webapi_url")]
    pub webapi_url: String,
}

/// Capture timeout and quality floor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureSettings {
    /// How long the device waits for a finger (seconds)
    #[serde(default = "default_capture_timeout")]
    pub timeout_secs: u64,
    /// Minimum acceptable quality score 0-100; the backend rejects reads
    /// below this, the client only passes it through
    #[serde(default = "default_min_quality")]
    pub min_quality: u8,
}

/// Pairwise match acceptance threshold.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchSettings {
    /// Score 0-100 a comparison must reach to count as a match
    #[serde(default = "default_match_threshold")]
    pub threshold: u8,
}

/// Where the biometrics persistence endpoints live.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSettings {
    #[serde(default = "default_api_url")]
    pub base_url: String,
}

fn default_native_url() -> String {
    "http://localhost:8444".to_string()
}

fn default_webapi_url() -> String {
    "https://localhost:8443".to_string()
}

fn default_capture_timeout() -> u64 {
    10
}

fn default_min_quality() -> u8 {
    50
}

fn default_match_threshold() -> u8 {
    50
}

fn default_api_url() -> String {
    "http://localhost:3000".to_string()
}

impl Default for ScannerSettings {
    fn default() -> Self {
        Self {
            native_url: default_native_url(),
            webapi_url: default_webapi_url(),
        }
    }
}

impl Default for CaptureSettings {
    fn default() -> Self {
        Self {
            timeout_secs: default_capture_timeout(),
            min_quality: default_min_quality(),
        }
    }
}

impl Default for MatchSettings {
    fn default() -> Self {
        Self {
            threshold: default_match_threshold(),
        }
    }
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_api_url(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_deployment_values() {
        let config = BiogateConfig::default();
        assert_eq!(config.scanner.native_url, "http://localhost:8444");
        assert_eq!(config.scanner.webapi_url, "https://localhost:8443");
        assert_eq!(config.capture.timeout_secs, 10);
        assert_eq!(config.capture.min_quality, 50);
        assert_eq!(config.matching.threshold, 50);
    }

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let config: BiogateConfig = toml::from_str(
            r#"
            [capture]
            timeout_secs = 15
            "#,
        )
        .unwrap();
        assert_eq!(config.capture.timeout_secs, 15);
        assert_eq!(config.capture.min_quality, 50);
        assert_eq!(config.matching.threshold, 50);
    }

    #[test]
    fn load_config_reads_a_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("workstation.toml");
        fs::write(&path, "[matching]\nthreshold = 75\n").unwrap();

        let config: BiogateConfig = load_config(path.to_str().unwrap()).unwrap();
        assert_eq!(config.matching.threshold, 75);
        assert_eq!(config.capture.timeout_secs, 10);
    }
}
