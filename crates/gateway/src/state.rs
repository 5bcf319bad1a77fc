use std::{sync::Arc, time::Duration};

use {
    troupe_bus::DelegationBus, troupe_catalog::CatalogStore, troupe_config::TroupeConfig,
    troupe_routing::ModelResolver,
};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub bus: Arc<DelegationBus>,
    pub resolver: Arc<ModelResolver>,
    pub heartbeat: Duration,
}

impl AppState {
    /// Wire up bus, catalog, and resolver from a loaded config.
    #[must_use]
    pub fn from_config(config: &TroupeConfig) -> Self {
        let catalog = Arc::new(CatalogStore::new(config.catalog.path.clone()));
        let preferences = troupe_config::PreferenceStore::new(config.preferences.dir.clone());
        Self {
            bus: Arc::new(DelegationBus::new(config.transcript.window)),
            resolver: Arc::new(ModelResolver::new(catalog, preferences)),
            heartbeat: Duration::from_secs(config.stream.heartbeat_secs.max(1)),
        }
    }
}
