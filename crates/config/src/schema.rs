use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Top-level gateway configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TroupeConfig {
    pub server: ServerConfig,
    pub transcript: TranscriptConfig,
    pub stream: StreamConfig,
    pub catalog: CatalogConfig,
    pub preferences: PreferencesConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1".into(),
            port: 7870,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptConfig {
    /// Number of recent bus events retained per session.
    pub window: usize,
}

impl Default for TranscriptConfig {
    fn default() -> Self {
        Self { window: 50 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamConfig {
    /// Seconds between comment-only SSE heartbeats.
    pub heartbeat_secs: u64,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self { heartbeat_secs: 15 }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Path to the model catalog file (`catalog.{toml,json}`).
    /// `None` means no catalog: every resolution degrades to fallback.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PreferencesConfig {
    /// Directory of per-agent preference files (`<agent_id>.json`).
    pub dir: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = TroupeConfig::default();
        assert_eq!(cfg.server.bind, "127.0.0.1");
        assert_eq!(cfg.server.port, 7870);
        assert_eq!(cfg.transcript.window, 50);
        assert_eq!(cfg.stream.heartbeat_secs, 15);
        assert!(cfg.catalog.path.is_none());
        assert!(cfg.preferences.dir.is_none());
    }

    #[test]
    fn test_partial_toml() {
        let cfg: TroupeConfig = toml::from_str(
            r#"
            [server]
            port = 9000

            [transcript]
            window = 10
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.port, 9000);
        assert_eq!(cfg.server.bind, "127.0.0.1");
        assert_eq!(cfg.transcript.window, 10);
    }
}
