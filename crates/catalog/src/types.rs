use {
    serde::{Deserialize, Serialize},
    troupe_common::Tier,
};

/// Capability flags advertised by a catalog model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Capabilities {
    pub thinking: bool,
    pub multimodal: bool,
}

/// One model in the catalog. Immutable once loaded; replaced only by a
/// wholesale catalog reload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelDescriptor {
    pub id: String,
    pub provider: String,
    pub tier: Tier,
    pub capabilities: Capabilities,
}

/// The oracle's recommended model for one agent.
///
/// Curated by an offline process; read-only to the resolution engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OracleDefault {
    pub model: String,
    pub provider: String,
    #[serde(default)]
    pub reason: Option<String>,
}
