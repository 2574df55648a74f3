//! Plan cap resolution: maps a subscription tier descriptor to the largest
//! `max_tokens` a caller may be granted.

/// Token ceiling for `pro` and `enterprise`, and for absent descriptors.
pub const HIGH_PLAN_CAP: u32 = 2000;
/// Token ceiling for every other named tier, including `free`.
pub const LOW_PLAN_CAP: u32 = 800;

/// Tier as reported by the subscription lookup. Anything that is not a string
/// (no user id, unknown user, NULL column) is `Absent`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PlanDescriptor {
    Text(String),
    #[default]
    Absent,
}

impl From<Option<String>> for PlanDescriptor {
    fn from(value: Option<String>) -> Self {
        value.map(PlanDescriptor::Text).unwrap_or_default()
    }
}

impl From<&str> for PlanDescriptor {
    fn from(value: &str) -> Self {
        PlanDescriptor::Text(value.to_string())
    }
}

/// Resolves the plan cap for a tier descriptor.
///
/// NOTE: an absent descriptor gets the HIGH cap, not the low one. This grants
/// unknown callers more than `free` users and is kept on purpose until product
/// decides which default it wants; callers may rely on either behaviour.
pub fn resolve_plan_cap(descriptor: &PlanDescriptor) -> u32 {
    match descriptor {
        PlanDescriptor::Text(tier) if tier == "pro" || tier == "enterprise" => HIGH_PLAN_CAP,
        PlanDescriptor::Text(_) => LOW_PLAN_CAP,
        PlanDescriptor::Absent => HIGH_PLAN_CAP,
    }
}
