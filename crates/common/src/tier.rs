use serde::{Deserialize, Serialize};

/// Subscription tier gating model access.
///
/// Ordered: `Free < Pro < Premium < Platinum`. A user may use a model iff
/// their tier level is `>=` the model's required tier level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Free,
    Pro,
    Premium,
    Platinum,
}

impl Tier {
    /// Numeric access level (free=0, pro=1, premium=2, platinum=3).
    #[must_use]
    pub fn level(self) -> u8 {
        match self {
            Tier::Free => 0,
            Tier::Pro => 1,
            Tier::Premium => 2,
            Tier::Platinum => 3,
        }
    }

    /// Whether a caller at this tier may use a model requiring `required`.
    #[must_use]
    pub fn grants(self, required: Tier) -> bool {
        self.level() >= required.level()
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Free => "free",
            Tier::Pro => "pro",
            Tier::Premium => "premium",
            Tier::Platinum => "platinum",
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Tier {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "free" => Ok(Tier::Free),
            "pro" => Ok(Tier::Pro),
            "premium" => Ok(Tier::Premium),
            "platinum" => Ok(Tier::Platinum),
            other => Err(crate::Error::message(format!("unknown tier: {other}"))),
        }
    }
}
