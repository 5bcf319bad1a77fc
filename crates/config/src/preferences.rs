use std::path::PathBuf;

use {
    serde::{Deserialize, Serialize},
    tracing::{debug, warn},
};

/// A user's saved model choice for one agent.
///
/// Written by end-user action in a higher layer; the resolution engine only
/// ever reads it, and re-validates tier access on every call — a preference
/// that was valid when saved may have been devalued by a tier downgrade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreference {
    pub model: String,
    pub provider: String,
    pub user_selected: bool,
}

/// Per-agent preference files: `<dir>/<agent_id>.json`.
pub struct PreferenceStore {
    dir: Option<PathBuf>,
}

impl PreferenceStore {
    #[must_use]
    pub fn new(dir: Option<PathBuf>) -> Self {
        Self { dir }
    }

    /// A store with no backing directory; every load returns `None`.
    #[must_use]
    pub fn disabled() -> Self {
        Self { dir: None }
    }

    fn path_for(&self, agent_id: &str) -> Option<PathBuf> {
        // Sanitize so an agent id can never escape the preferences dir.
        let safe: String = agent_id
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.dir.as_ref().map(|d| d.join(format!("{safe}.json")))
    }

    /// Load the preference for `agent_id`.
    ///
    /// Missing file → `None`. Malformed file → warn and `None`; a corrupt
    /// preference must never propagate an error into resolution.
    pub fn load(&self, agent_id: &str) -> Option<UserPreference> {
        let path = self.path_for(agent_id)?;
        let raw = match std::fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(agent_id, "no preference file");
                return None;
            },
            Err(e) => {
                warn!(agent_id, path = %path.display(), error = %e, "failed to read preference file");
                return None;
            },
        };
        match serde_json::from_str(&raw) {
            Ok(pref) => Some(pref),
            Err(e) => {
                warn!(agent_id, path = %path.display(), error = %e, "malformed preference file, treating as absent");
                None
            },
        }
    }

    /// Persist a preference for `agent_id`, creating the directory if needed.
    pub fn save(&self, agent_id: &str, pref: &UserPreference) -> crate::Result<()> {
        let Some(path) = self.path_for(agent_id) else {
            return Err(crate::Error::Message(
                "preference store has no directory configured".into(),
            ));
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, serde_json::to_string_pretty(pref)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> (PreferenceStore, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let store = PreferenceStore::new(Some(dir.path().to_path_buf()));
        (store, dir)
    }

    #[test]
    fn test_save_and_load() {
        let (store, _dir) = temp_store();
        let pref = UserPreference {
            model: "gpt-4o".into(),
            provider: "openai".into(),
            user_selected: true,
        };
        store.save("mei", &pref).unwrap();
        assert_eq!(store.load("mei"), Some(pref));
    }

    #[test]
    fn test_load_missing() {
        let (store, _dir) = temp_store();
        assert_eq!(store.load("nobody"), None);
    }

    #[test]
    fn test_load_malformed_is_none() {
        let (store, dir) = temp_store();
        std::fs::write(dir.path().join("mei.json"), "{ not json").unwrap();
        assert_eq!(store.load("mei"), None);
    }

    #[test]
    fn test_camel_case_wire_format() {
        let (store, dir) = temp_store();
        std::fs::write(
            dir.path().join("it.json"),
            r#"{"model": "gpt-4o-mini", "provider": "openai", "userSelected": true}"#,
        )
        .unwrap();
        let pref = store.load("it").unwrap();
        assert!(pref.user_selected);
    }

    #[test]
    fn test_agent_id_sanitized() {
        let (store, dir) = temp_store();
        let pref = UserPreference {
            model: "m".into(),
            provider: "p".into(),
            user_selected: false,
        };
        store.save("../evil", &pref).unwrap();
        assert!(dir.path().join("___evil.json").exists());
        assert_eq!(store.load("../evil"), Some(pref));
    }

    #[test]
    fn test_disabled_store() {
        let store = PreferenceStore::disabled();
        assert_eq!(store.load("mei"), None);
        assert!(
            store
                .save("mei", &UserPreference {
                    model: "m".into(),
                    provider: "p".into(),
                    user_selected: true,
                })
                .is_err()
        );
    }
}
