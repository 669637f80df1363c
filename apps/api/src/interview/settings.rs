//! Generation settings and the two factory profiles.
//!
//! Temperature and top-p are never tuned together: one of them stays at the
//! neutral value 1.0 while the other carries the sampling control.

use serde::{Deserialize, Serialize};

use crate::interview::random::RandomSource;

/// Model used when the caller does not name one.
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo-instruct";

/// Value of temperature / top-p that leaves sampling unconstrained.
pub const NEUTRAL_SAMPLING: f32 = 1.0;

/// Band for whichever sampling control the diversity profile randomizes.
pub const DIVERSITY_SAMPLING_BAND: (f32, f32) = (0.3, 0.9);

/// Selector draw over `[1, 10)`; draws above this use temperature instead of top-p.
const TEMPERATURE_SELECTOR_THRESHOLD: i64 = 7;

/// Caller-tunable generation parameters.
///
/// `max_tokens`, `temperature` and `top_p` are optional on the wire but must be
/// present by the time a completion request is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationSettings {
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub frequency_penalty: f32,
    #[serde(default)]
    pub presence_penalty: f32,
    #[serde(default)]
    pub max_tokens: Option<u32>,
    #[serde(default)]
    pub temperature: Option<f32>,
    #[serde(default)]
    pub top_p: Option<f32>,
    #[serde(default)]
    pub user: String,
}

/// Named settings profile a caller can ask for instead of supplying settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingsProfile {
    Stable,
    Diversity,
}

impl SettingsProfile {
    pub fn build(self, user: &str, rng: &dyn RandomSource) -> GenerationSettings {
        match self {
            SettingsProfile::Stable => GenerationSettings::stable(user),
            SettingsProfile::Diversity => GenerationSettings::diversity(user, rng),
        }
    }
}

impl GenerationSettings {
    /// Fixed, reproducible profile.
    pub fn stable(user: &str) -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            frequency_penalty: 0.75,
            presence_penalty: 0.7,
            max_tokens: Some(175),
            temperature: Some(NEUTRAL_SAMPLING),
            top_p: Some(0.85),
            user: user.to_string(),
        }
    }

    /// Randomized profile that reduces repeated output for repeated inputs.
    ///
    /// Top-p carries the sampling control roughly 70% of the time, temperature
    /// the rest. Draw order: selector, sampling control, frequency penalty,
    /// max tokens, presence penalty.
    pub fn diversity(user: &str, rng: &dyn RandomSource) -> Self {
        let (lo, hi) = DIVERSITY_SAMPLING_BAND;

        let (temperature, top_p) = if rng.int_in(1, 10) > TEMPERATURE_SELECTOR_THRESHOLD {
            (rng.maybe_float_in(lo, hi), Some(NEUTRAL_SAMPLING))
        } else {
            (Some(NEUTRAL_SAMPLING), rng.maybe_float_in(lo, hi))
        };

        let frequency_penalty = rng.float_in(0.2, 0.85);
        let max_tokens = rng.maybe_int_in(175, 275);
        let presence_penalty = rng.float_in(0.1, 0.8);

        Self {
            model: DEFAULT_MODEL.to_string(),
            frequency_penalty,
            presence_penalty,
            max_tokens,
            temperature,
            top_p,
            user: user.to_string(),
        }
    }

    /// Returns these settings with a missing model filled in. The input is left untouched.
    pub fn with_defaults(&self) -> Self {
        let mut merged = self.clone();
        if merged.model.trim().is_empty() {
            merged.model = DEFAULT_MODEL.to_string();
        }
        merged
    }

    /// True when both temperature and top-p are set away from neutral.
    pub fn tunes_both_sampling_controls(&self) -> bool {
        let varied = |v: Option<f32>| v.is_some_and(|v| (v - NEUTRAL_SAMPLING).abs() > f32::EPSILON);
        varied(self.temperature) && varied(self.top_p)
    }
}
