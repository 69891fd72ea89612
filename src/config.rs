// In: src/config.rs

//! The single source of truth for all gridwire channel configuration.
//!
//! This module defines the `WireConfig` struct, which is designed to be
//! created once at the application boundary (e.g., from the host's JSON
//! handover) and then passed down through the system as a shared,
//! read-only value.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Configuration for the framed channel and its sanity guards.
///
/// The length prefix of an incoming frame is data from the wire; a corrupt
/// or hostile prefix must not drive a multi-gigabyte allocation. The
/// `max_frame_len` guard bounds what `read_frame` will accept.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct WireConfig {
    /// The largest frame payload, in bytes, the reading side will accept.
    #[serde(default = "default_max_frame_len")]
    pub max_frame_len: usize,
}

impl Default for WireConfig {
    fn default() -> Self {
        Self {
            max_frame_len: default_max_frame_len(),
        }
    }
}

impl WireConfig {
    /// Builds a config from the JSON string handed over by the host process.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Helper for `serde` to provide a default for `max_frame_len`.
///
/// 256 MiB comfortably fits a 4-band 2048x2048 float64 tile with headroom.
fn default_max_frame_len() -> usize {
    256 * 1024 * 1024
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_from_empty_json() {
        let config = WireConfig::from_json("{}").unwrap();
        assert_eq!(config, WireConfig::default());
    }

    #[test]
    fn test_explicit_max_frame_len() {
        let config = WireConfig::from_json(r#"{"max_frame_len": 4096}"#).unwrap();
        assert_eq!(config.max_frame_len, 4096);
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(WireConfig::from_json("{max_frame_len:").is_err());
    }
}
