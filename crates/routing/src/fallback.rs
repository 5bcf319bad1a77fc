use troupe_common::Tier;

/// A hardcoded last-resort model assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fallback {
    pub model: &'static str,
    pub provider: &'static str,
}

/// The fixed per-tier fallback. Platinum and premium share one model;
/// pro and free each have their own.
#[must_use]
pub const fn fallback_for(tier: Tier) -> Fallback {
    match tier {
        Tier::Platinum | Tier::Premium => Fallback {
            model: "gpt-4o",
            provider: "openai",
        },
        Tier::Pro => Fallback {
            model: "gpt-4o-mini",
            provider: "openai",
        },
        Tier::Free => Fallback {
            model: "gpt-3.5-turbo",
            provider: "openai",
        },
    }
}
