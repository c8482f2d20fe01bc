//! Host-facing debug configuration.
//!
//! The host application carries a `[debug]` section in its TOML config; this
//! struct is that section. Every field has a default so a missing or partial
//! section still yields a usable configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Debug layer configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebugConfig {
    /// Application identifier woven into GPU capture filenames.
    #[serde(default = "default_app_id")]
    pub app_id: String,
    /// Directory GPU captures are written to.
    #[serde(default = "default_capture_dir")]
    pub capture_dir: PathBuf,
    /// Path of the append-only diagnostics log.
    #[serde(default = "default_log_path")]
    pub log_path: PathBuf,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            app_id: default_app_id(),
            capture_dir: default_capture_dir(),
            log_path: default_log_path(),
        }
    }
}

fn default_app_id() -> String {
    "CGL00000".to_string()
}

fn default_capture_dir() -> PathBuf {
    PathBuf::from("captures")
}

fn default_log_path() -> PathBuf {
    PathBuf::from("cindergl.log")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DebugConfig::default();
        assert_eq!(config.app_id, "CGL00000");
        assert_eq!(config.capture_dir, PathBuf::from("captures"));
        assert_eq!(config.log_path, PathBuf::from("cindergl.log"));
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: DebugConfig = toml::from_str("app_id = \"GAME42\"").unwrap();
        assert_eq!(config.app_id, "GAME42");
        assert_eq!(config.log_path, PathBuf::from("cindergl.log"));
    }

    #[test]
    fn test_full_toml_round_trip() {
        let config = DebugConfig {
            app_id: "DEMO1234".to_string(),
            capture_dir: PathBuf::from("/tmp/caps"),
            log_path: PathBuf::from("/tmp/cindergl.log"),
        };
        let text = toml::to_string(&config).unwrap();
        let parsed: DebugConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}
