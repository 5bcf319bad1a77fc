use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use {
    serde::Deserialize,
    tracing::{debug, warn},
    troupe_common::Tier,
};

use crate::types::{Capabilities, ModelDescriptor, OracleDefault};

// ── File schema ──────────────────────────────────────────────────────────────

/// On-disk catalog shape (`catalog.{toml,json}`).
///
/// `BTreeMap` keeps provider and model iteration order stable, which is what
/// makes `models_for_tier` deterministic.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CatalogFile {
    providers: BTreeMap<String, ProviderEntry>,
    oracle: BTreeMap<String, OracleDefault>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ProviderEntry {
    models: BTreeMap<String, ModelEntry>,
}

#[derive(Debug, Deserialize)]
struct ModelEntry {
    tier: Tier,
    #[serde(default)]
    thinking: bool,
    #[serde(default)]
    multimodal: bool,
}

// ── Snapshot ─────────────────────────────────────────────────────────────────

/// Immutable catalog snapshot: providers → models, plus oracle defaults.
#[derive(Debug, Default)]
pub struct Catalog {
    models: BTreeMap<String, BTreeMap<String, ModelDescriptor>>,
    oracle: BTreeMap<String, OracleDefault>,
}

impl Catalog {
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a snapshot directly from descriptors and oracle entries
    /// (used by tests and in-process callers).
    #[must_use]
    pub fn from_parts(
        descriptors: impl IntoIterator<Item = ModelDescriptor>,
        oracle: impl IntoIterator<Item = (String, OracleDefault)>,
    ) -> Self {
        let mut models: BTreeMap<String, BTreeMap<String, ModelDescriptor>> = BTreeMap::new();
        for desc in descriptors {
            models
                .entry(desc.provider.clone())
                .or_default()
                .insert(desc.id.clone(), desc);
        }
        Self {
            models,
            oracle: oracle.into_iter().collect(),
        }
    }

    fn from_file(file: CatalogFile) -> Self {
        let mut models: BTreeMap<String, BTreeMap<String, ModelDescriptor>> = BTreeMap::new();
        for (provider, entry) in file.providers {
            let by_id = models.entry(provider.clone()).or_default();
            for (id, model) in entry.models {
                by_id.insert(id.clone(), ModelDescriptor {
                    id,
                    provider: provider.clone(),
                    tier: model.tier,
                    capabilities: Capabilities {
                        thinking: model.thinking,
                        multimodal: model.multimodal,
                    },
                });
            }
        }
        Self {
            models,
            oracle: file.oracle,
        }
    }

    /// Look up one model by provider and id.
    #[must_use]
    pub fn model(&self, provider: &str, id: &str) -> Option<&ModelDescriptor> {
        self.models.get(provider)?.get(id)
    }

    /// The oracle's default model for an agent, if curated.
    #[must_use]
    pub fn oracle_default(&self, agent_id: &str) -> Option<&OracleDefault> {
        self.oracle.get(agent_id)
    }

    /// Every model whose tier requirement `tier` satisfies, stable-ordered
    /// by provider then model id.
    #[must_use]
    pub fn models_for_tier(&self, tier: Tier) -> Vec<ModelDescriptor> {
        self.models
            .values()
            .flat_map(|by_id| by_id.values())
            .filter(|m| tier.grants(m.tier))
            .cloned()
            .collect()
    }

    #[must_use]
    pub fn model_count(&self) -> usize {
        self.models.values().map(BTreeMap::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.models.is_empty() && self.oracle.is_empty()
    }
}

// ── Store ────────────────────────────────────────────────────────────────────

/// Owns the current catalog snapshot behind one swappable reference.
pub struct CatalogStore {
    path: Option<PathBuf>,
    snapshot: RwLock<Arc<Catalog>>,
}

impl CatalogStore {
    /// Load the catalog from `path`, or start empty when no path is given.
    ///
    /// A missing or malformed file degrades to an empty catalog with a
    /// warning; it never fails — chat must continue without a catalog.
    #[must_use]
    pub fn new(path: Option<PathBuf>) -> Self {
        let snapshot = match &path {
            Some(p) => load_or_empty(p),
            None => {
                debug!("no catalog path configured, starting empty");
                Catalog::empty()
            },
        };
        Self {
            path,
            snapshot: RwLock::new(Arc::new(snapshot)),
        }
    }

    /// Wrap an in-memory catalog (tests, embedded callers).
    #[must_use]
    pub fn from_catalog(catalog: Catalog) -> Self {
        Self {
            path: None,
            snapshot: RwLock::new(Arc::new(catalog)),
        }
    }

    /// The current snapshot. Cheap: clones an `Arc`.
    #[must_use]
    pub fn snapshot(&self) -> Arc<Catalog> {
        match self.snapshot.read() {
            Ok(guard) => Arc::clone(&guard),
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }

    /// Re-read the catalog file and swap the whole snapshot.
    ///
    /// No-op when the store has no backing path.
    pub fn reload(&self) {
        let Some(path) = &self.path else {
            return;
        };
        let fresh = Arc::new(load_or_empty(path));
        match self.snapshot.write() {
            Ok(mut guard) => *guard = fresh,
            Err(poisoned) => *poisoned.into_inner() = fresh,
        }
    }
}

fn load_or_empty(path: &Path) -> Catalog {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "catalog file unavailable, operating with empty catalog");
            return Catalog::empty();
        },
    };

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("toml");
    let parsed: Result<CatalogFile, String> = match ext {
        "toml" => toml::from_str(&raw).map_err(|e| e.to_string()),
        "json" => serde_json::from_str(&raw).map_err(|e| e.to_string()),
        other => Err(format!("unsupported catalog format: .{other}")),
    };

    match parsed {
        Ok(file) => {
            let catalog = Catalog::from_file(file);
            debug!(path = %path.display(), models = catalog.model_count(), "loaded catalog");
            catalog
        },
        Err(e) => {
            warn!(path = %path.display(), error = %e, "malformed catalog, operating with empty catalog");
            Catalog::empty()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG_TOML: &str = r#"
        [providers.openai.models."gpt-4o"]
        tier = "premium"
        multimodal = true

        [providers.openai.models."gpt-4o-mini"]
        tier = "pro"

        [providers.nvidia.models."nemotron-nano"]
        tier = "free"
        thinking = true

        [oracle.mei]
        model = "gpt-4o-mini"
        provider = "openai"
        reason = "balanced router default"
    "#;

    fn store_from_toml(raw: &str) -> (CatalogStore, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.toml");
        std::fs::write(&path, raw).unwrap();
        (CatalogStore::new(Some(path)), dir)
    }

    #[test]
    fn test_load_toml_catalog() {
        let (store, _dir) = store_from_toml(CATALOG_TOML);
        let snap = store.snapshot();

        assert_eq!(snap.model_count(), 3);
        let gpt4o = snap.model("openai", "gpt-4o").unwrap();
        assert_eq!(gpt4o.tier, Tier::Premium);
        assert!(gpt4o.capabilities.multimodal);
        assert!(!gpt4o.capabilities.thinking);

        let oracle = snap.oracle_default("mei").unwrap();
        assert_eq!(oracle.model, "gpt-4o-mini");
        assert_eq!(oracle.reason.as_deref(), Some("balanced router default"));
    }

    #[test]
    fn test_missing_file_is_empty() {
        let store = CatalogStore::new(Some(PathBuf::from("/nonexistent/catalog.toml")));
        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn test_malformed_file_is_empty() {
        let (store, _dir) = store_from_toml("providers = 12");
        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn test_models_for_tier_filters_and_orders() {
        let (store, _dir) = store_from_toml(CATALOG_TOML);
        let snap = store.snapshot();

        let free = snap.models_for_tier(Tier::Free);
        assert_eq!(free.len(), 1);
        assert_eq!(free[0].id, "nemotron-nano");

        let platinum = snap.models_for_tier(Tier::Platinum);
        let ids: Vec<(&str, &str)> = platinum
            .iter()
            .map(|m| (m.provider.as_str(), m.id.as_str()))
            .collect();
        // Stable order: provider, then model id.
        assert_eq!(ids, vec![
            ("nvidia", "nemotron-nano"),
            ("openai", "gpt-4o"),
            ("openai", "gpt-4o-mini"),
        ]);
    }

    #[test]
    fn test_reload_swaps_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.toml");
        std::fs::write(&path, CATALOG_TOML).unwrap();
        let store = CatalogStore::new(Some(path.clone()));

        let before = store.snapshot();
        assert_eq!(before.model_count(), 3);

        std::fs::write(&path, "[providers.openai.models.\"o3\"]\ntier = \"platinum\"\n").unwrap();
        store.reload();

        let after = store.snapshot();
        assert_eq!(after.model_count(), 1);
        // The old snapshot is untouched: readers holding it see a consistent view.
        assert_eq!(before.model_count(), 3);
    }

    #[test]
    fn test_reload_to_deleted_file_degrades() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.toml");
        std::fs::write(&path, CATALOG_TOML).unwrap();
        let store = CatalogStore::new(Some(path.clone()));
        assert!(!store.snapshot().is_empty());

        std::fs::remove_file(&path).unwrap();
        store.reload();
        assert!(store.snapshot().is_empty());
    }
}
