use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::{Result, error::Error, schema::TroupeConfig};

/// Standard config file names, checked in order.
const CONFIG_FILENAMES: &[&str] = &["troupe.toml", "troupe.json"];

/// Load config from the given path (TOML or JSON by extension).
pub fn load_config(path: &Path) -> Result<TroupeConfig> {
    let raw = std::fs::read_to_string(path)?;
    parse_config(&raw, path)
}

/// Discover and load config from standard locations.
///
/// Search order:
/// 1. `./troupe.{toml,json}` (project-local)
/// 2. `~/.config/troupe/troupe.{toml,json}` (user-global)
///
/// Returns `TroupeConfig::default()` if no config file is found or the
/// found file fails to parse.
pub fn discover_and_load() -> TroupeConfig {
    if let Some(path) = find_config_file() {
        debug!(path = %path.display(), "loading config");
        match load_config(&path) {
            Ok(cfg) => return cfg,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to load config, using defaults");
            },
        }
    } else {
        debug!("no config file found, using defaults");
    }
    TroupeConfig::default()
}

/// Find the first config file in standard locations.
fn find_config_file() -> Option<PathBuf> {
    // Project-local
    for name in CONFIG_FILENAMES {
        let p = PathBuf::from(name);
        if p.exists() {
            return Some(p);
        }
    }

    // User-global: ~/.config/troupe/
    if let Some(dirs) = directories::ProjectDirs::from("", "", "troupe") {
        let config_dir = dirs.config_dir();
        for name in CONFIG_FILENAMES {
            let p = config_dir.join(name);
            if p.exists() {
                return Some(p);
            }
        }
    }

    None
}

fn parse_config(raw: &str, path: &Path) -> Result<TroupeConfig> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("toml");

    match ext {
        "toml" => Ok(toml::from_str(raw)?),
        "json" => Ok(serde_json::from_str(raw)?),
        other => Err(Error::UnsupportedFormat(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("troupe.toml");
        std::fs::write(&path, "[server]\nport = 8123\n").unwrap();

        let cfg = load_config(&path).unwrap();
        assert_eq!(cfg.server.port, 8123);
    }

    #[test]
    fn test_load_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("troupe.json");
        std::fs::write(&path, r#"{"transcript": {"window": 7}}"#).unwrap();

        let cfg = load_config(&path).unwrap();
        assert_eq!(cfg.transcript.window, 7);
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_config(Path::new("/nonexistent/troupe.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("troupe.toml");
        std::fs::write(&path, "not valid [[ toml").unwrap();

        assert!(load_config(&path).is_err());
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("troupe.ini");
        std::fs::write(&path, "whatever").unwrap();

        assert!(matches!(
            load_config(&path),
            Err(Error::UnsupportedFormat(ext)) if ext == "ini"
        ));
    }
}
