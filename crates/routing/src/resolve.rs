use std::sync::Arc;

use {
    serde::Serialize,
    tracing::debug,
    troupe_catalog::{CatalogStore, ModelDescriptor},
    troupe_common::Tier,
    troupe_config::PreferenceStore,
};

use crate::fallback::fallback_for;

/// Where a resolved model came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionSource {
    UserOverride,
    OracleDefault,
    Fallback,
}

/// The outcome of one `resolve` call. Computed per request, never cached.
///
/// Invariant: `source` reflects the actual origin of the returned model —
/// `UserOverride` only when tier access was re-validated for this call.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionResult {
    pub model: String,
    pub provider: String,
    pub source: ResolutionSource,
    pub reason: String,
    /// The matched catalog descriptor, when the catalog knows the model.
    pub model_info: Option<ModelDescriptor>,
}

/// Resolves an agent's model from preference, oracle default, or fallback.
pub struct ModelResolver {
    catalog: Arc<CatalogStore>,
    preferences: PreferenceStore,
}

impl ModelResolver {
    #[must_use]
    pub fn new(catalog: Arc<CatalogStore>, preferences: PreferenceStore) -> Self {
        Self {
            catalog,
            preferences,
        }
    }

    /// Resolve the model `agent_id` should use for a caller at `tier`.
    ///
    /// Total: never fails, never blocks on network I/O. Each step in the
    /// cascade independently re-validates tier access; a step that fails
    /// the check falls through silently to the next.
    #[must_use]
    pub fn resolve(&self, agent_id: &str, tier: Tier) -> ResolutionResult {
        let catalog = self.catalog.snapshot();

        // 1. User preference, if selected and still within the caller's tier.
        if let Some(pref) = self.preferences.load(agent_id) {
            if pref.user_selected {
                match catalog.model(&pref.provider, &pref.model) {
                    Some(desc) if tier.grants(desc.tier) => {
                        debug!(agent_id, tier = %tier, model = %desc.id, source = "user_override", "resolved model");
                        return ResolutionResult {
                            model: pref.model,
                            provider: pref.provider,
                            source: ResolutionSource::UserOverride,
                            reason: "user-selected model".into(),
                            model_info: Some(desc.clone()),
                        };
                    },
                    Some(desc) => {
                        debug!(
                            agent_id,
                            tier = %tier,
                            required = %desc.tier,
                            model = %desc.id,
                            "user preference exceeds tier, falling through"
                        );
                    },
                    None => {
                        debug!(
                            agent_id,
                            model = %pref.model,
                            provider = %pref.provider,
                            "user preference references a model the catalog does not list, falling through"
                        );
                    },
                }
            }
        }

        // 2. Oracle default, same tier check.
        if let Some(oracle) = catalog.oracle_default(agent_id) {
            match catalog.model(&oracle.provider, &oracle.model) {
                Some(desc) if tier.grants(desc.tier) => {
                    debug!(agent_id, tier = %tier, model = %desc.id, source = "oracle_default", "resolved model");
                    return ResolutionResult {
                        model: oracle.model.clone(),
                        provider: oracle.provider.clone(),
                        source: ResolutionSource::OracleDefault,
                        reason: oracle
                            .reason
                            .clone()
                            .unwrap_or_else(|| "oracle default".into()),
                        model_info: Some(desc.clone()),
                    };
                },
                _ => {
                    debug!(
                        agent_id,
                        tier = %tier,
                        model = %oracle.model,
                        "oracle default not accessible at this tier, falling through"
                    );
                },
            }
        }

        // 3. Hardcoded per-tier fallback.
        let fb = fallback_for(tier);
        debug!(agent_id, tier = %tier, model = fb.model, source = "fallback", "resolved model");
        ResolutionResult {
            model: fb.model.into(),
            provider: fb.provider.into(),
            source: ResolutionSource::Fallback,
            reason: format!("{tier}-tier fallback"),
            model_info: catalog.model(fb.provider, fb.model).cloned(),
        }
    }

    /// Every catalog model the caller's tier grants access to,
    /// stable-ordered by provider then model id.
    #[must_use]
    pub fn list_available_models(&self, tier: Tier) -> Vec<ModelDescriptor> {
        self.catalog.snapshot().models_for_tier(tier)
    }
}
