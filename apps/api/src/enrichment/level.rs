//! Enrichment level normalisation: clamping, containment quantisation and
//! the canonical percent key.

/// Level assumed when a caller does not send one (or sends a non-finite one).
pub const DEFAULT_ENRICHMENT_LEVEL: f64 = 50.0;

const MIN_LEVEL: f64 = 0.0;
const MAX_LEVEL: f64 = 100.0;

/// User-facing 0–100 dial. Always holds a finite value inside `[0, 100]`;
/// fractional values are kept as-is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnrichmentLevel(f64);

impl EnrichmentLevel {
    pub fn new(raw: Option<f64>) -> Self {
        let raw = raw
            .filter(|v| v.is_finite())
            .unwrap_or(DEFAULT_ENRICHMENT_LEVEL);
        Self(raw.clamp(MIN_LEVEL, MAX_LEVEL))
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    /// Position on the dial as a fraction in `[0, 1]`.
    pub fn fraction(&self) -> f64 {
        self.0 / MAX_LEVEL
    }

    pub fn containment(&self) -> ContainmentLevel {
        ContainmentLevel::from_level(*self)
    }
}

impl Default for EnrichmentLevel {
    fn default() -> Self {
        Self(DEFAULT_ENRICHMENT_LEVEL)
    }
}

/// Enrichment level rounded to the nearest multiple of 5. Only used to decide
/// bypass eligibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ContainmentLevel(u8);

impl ContainmentLevel {
    pub fn from_level(level: EnrichmentLevel) -> Self {
        let quantized = (level.value() / 5.0).round() * 5.0;
        Self(quantized.clamp(MIN_LEVEL, MAX_LEVEL) as u8)
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

/// Quantises to an even integer on the percent grid, clamped to `[0, 100]`.
pub fn nearest_two(n: f64) -> u8 {
    let n = if n.is_finite() { n } else { DEFAULT_ENRICHMENT_LEVEL };
    ((n / 2.0).round() * 2.0).clamp(MIN_LEVEL, MAX_LEVEL) as u8
}

/// Renders a quantised level as a zero-padded percent key: `00%`, `12%`, `100%`.
pub fn to_key(n: u8) -> String {
    format!("{n:02}%")
}

/// Canonical key for an enrichment level, as reported in response metadata.
pub fn enrichment_key(level: EnrichmentLevel) -> String {
    to_key(nearest_two(level.value()))
}
