//! Sampling parameter derivation.
//!
//! Pure function of `(enrichment level, plan cap)`. Every value is rounded to
//! two decimals and then re-clamped to the range the generation API accepts,
//! so rounding can never push a value out of bounds.

use serde::{Deserialize, Serialize};

use crate::enrichment::level::EnrichmentLevel;

/// Smallest token budget ever requested.
pub const MIN_MAX_TOKENS: u32 = 64;

const TEMPERATURE_RANGE: (f64, f64) = (0.0, 2.0);
const TOP_P_RANGE: (f64, f64) = (0.0, 1.0);
const PENALTY_RANGE: (f64, f64) = (-2.0, 2.0);

/// Generation controls forwarded verbatim to the text-generation API.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplingParameters {
    pub temperature: f64,
    pub top_p: f64,
    pub presence_penalty: f64,
    pub frequency_penalty: f64,
    pub max_tokens: u32,
}

/// Derives sampling parameters from the unquantised level and the plan cap.
///
/// A plan cap below `MIN_MAX_TOKENS` is raised to it so the token range is
/// never empty.
pub fn derive_sampling(level: EnrichmentLevel, plan_cap: u32) -> SamplingParameters {
    let e = level.fraction();
    let cap = plan_cap.max(MIN_MAX_TOKENS) as f64;
    let floor = MIN_MAX_TOKENS as f64;

    let max_tokens = (floor + (cap - floor) * e).clamp(floor, cap).floor() as u32;

    SamplingParameters {
        temperature: bounded(1.1 * e, TEMPERATURE_RANGE),
        top_p: bounded(0.1 + 0.9 * e, TOP_P_RANGE),
        presence_penalty: bounded(-0.6 + 1.6 * e, PENALTY_RANGE),
        frequency_penalty: bounded(0.4 * (1.0 - e), PENALTY_RANGE),
        max_tokens,
    }
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

fn bounded(x: f64, (lo, hi): (f64, f64)) -> f64 {
    round2(x).clamp(lo, hi)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn derive(level: f64, cap: u32) -> SamplingParameters {
        derive_sampling(EnrichmentLevel::new(Some(level)), cap)
    }

    #[test]
    fn test_zero_level_free_plan() {
        assert_eq!(
            derive(0.0, 800),
            SamplingParameters {
                temperature: 0.0,
                top_p: 0.1,
                presence_penalty: -0.6,
                frequency_penalty: 0.4,
                max_tokens: 64,
            }
        );
    }

    #[test]
    fn test_midpoint_free_plan() {
        assert_eq!(
            derive(50.0, 800),
            SamplingParameters {
                temperature: 0.55,
                top_p: 0.55,
                presence_penalty: 0.2,
                frequency_penalty: 0.2,
                max_tokens: 432,
            }
        );
    }

    #[test]
    fn test_full_level_pro_plan() {
        let params = derive(100.0, 2000);
        assert_eq!(params.max_tokens, 2000);
        assert_eq!(params.frequency_penalty, 0.0);
        assert_eq!(params.temperature, 1.1);
        assert_eq!(params.top_p, 1.0);
        assert_eq!(params.presence_penalty, 1.0);
    }

    #[test]
    fn test_out_of_range_levels_are_clamped() {
        assert_eq!(derive(-40.0, 800), derive(0.0, 800));
        assert_eq!(derive(400.0, 2000), derive(100.0, 2000));
    }

    #[test]
    fn test_all_fields_within_api_ranges() {
        for cap in [800, 2000] {
            let mut level = 0.0;
            while level <= 100.0 {
                let p = derive(level, cap);
                assert!((0.0..=2.0).contains(&p.temperature), "temperature {p:?}");
                assert!((0.0..=1.0).contains(&p.top_p), "top_p {p:?}");
                assert!((-2.0..=2.0).contains(&p.presence_penalty), "presence {p:?}");
                assert!((-2.0..=2.0).contains(&p.frequency_penalty), "frequency {p:?}");
                assert!((MIN_MAX_TOKENS..=cap).contains(&p.max_tokens), "max_tokens {p:?}");
                level += 0.5;
            }
        }
    }

    #[test]
    fn test_max_tokens_non_decreasing() {
        for cap in [800, 2000] {
            let mut previous = 0;
            let mut level = 0.0;
            while level <= 100.0 {
                let max_tokens = derive(level, cap).max_tokens;
                assert!(
                    max_tokens >= previous,
                    "max_tokens dropped from {previous} to {max_tokens} at level {level}"
                );
                previous = max_tokens;
                level += 0.1;
            }
        }
    }

    #[test]
    fn test_tiny_plan_cap_never_inverts_range() {
        let params = derive(100.0, 10);
        assert_eq!(params.max_tokens, MIN_MAX_TOKENS);
    }
}
