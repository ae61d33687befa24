//! Configuration for the EMOTI pet model.
//!
//! Maps directly to `emoti.toml`. Every default reproduces the normative
//! constants of the state-evolution model, so a default-constructed
//! [`PetConfig`] needs no file at all.

use serde::{Deserialize, Serialize};

/// Top-level EMOTI configuration, loadable from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PetConfig {
    /// Stat decay tuning.
    #[serde(default)]
    pub decay: DecayConfig,
    /// Mood derivation tuning.
    #[serde(default)]
    pub mood: MoodConfig,
    /// Evolution gate thresholds.
    #[serde(default)]
    pub evolution: EvolutionConfig,
    /// Local persistence settings.
    #[serde(default)]
    pub persistence: PersistenceConfig,
}

impl PetConfig {
    /// Load configuration from a TOML string.
    ///
    /// # Errors
    /// Returns `PetError::Config` if the TOML is invalid.
    pub fn from_toml(toml_str: &str) -> crate::error::Result<Self> {
        toml::from_str(toml_str).map_err(|e| crate::PetError::Config(e.to_string()))
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }
}

// ---------------------------------------------------------------------------
// Sub-configs
// ---------------------------------------------------------------------------

/// A uniform per-minute decay-rate range. Each decay pass draws one rate
/// per stat, independently, from `[min, max]`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RateRange {
    /// Lower bound, points per minute.
    pub min: f32,
    /// Upper bound, points per minute.
    pub max: f32,
}

/// Stat decay configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecayConfig {
    /// Decay passes are throttled: elapsed time below this is not modeled.
    #[serde(default = "default_min_elapsed")]
    pub min_elapsed_minutes: f32,
    /// Hunger (satiety) decay range, points per minute.
    #[serde(default = "default_hunger_rate")]
    pub hunger_rate: RateRange,
    /// Happiness decay range, points per minute.
    #[serde(default = "default_happiness_rate")]
    pub happiness_rate: RateRange,
    /// Cleanliness decay range, points per minute.
    #[serde(default = "default_cleanliness_rate")]
    pub cleanliness_rate: RateRange,
    /// Energy decay range, points per minute.
    #[serde(default = "default_energy_rate")]
    pub energy_rate: RateRange,
    /// Local hour at which night begins (inclusive).
    #[serde(default = "default_22")]
    pub night_start_hour: u32,
    /// Local hour at which night ends (exclusive).
    #[serde(default = "default_6")]
    pub night_end_hour: u32,
    /// Energy decays faster at night.
    #[serde(default = "default_1_2")]
    pub night_energy_multiplier: f32,
    /// Happiness decays slower at night.
    #[serde(default = "default_0_8")]
    pub night_happiness_multiplier: f32,
    /// Care within this window halves all decay.
    #[serde(default = "default_30")]
    pub care_window_minutes: f32,
    /// Multiplier applied to all four decay amounts after recent care.
    #[serde(default = "default_0_5")]
    pub care_multiplier: f32,
}

impl Default for DecayConfig {
    fn default() -> Self {
        Self {
            min_elapsed_minutes: 1.0,
            hunger_rate: RateRange { min: 0.10, max: 0.30 },
            happiness_rate: RateRange { min: 0.05, max: 0.20 },
            cleanliness_rate: RateRange { min: 0.08, max: 0.26 },
            energy_rate: RateRange { min: 0.10, max: 0.35 },
            night_start_hour: 22,
            night_end_hour: 6,
            night_energy_multiplier: 1.2,
            night_happiness_multiplier: 0.8,
            care_window_minutes: 30.0,
            care_multiplier: 0.5,
        }
    }
}

/// Mood weighting — weights must sum to ~1.0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoodWeights {
    /// Weight of hunger (satiety) in the well-being score.
    #[serde(default = "default_0_30")]
    pub hunger: f32,
    /// Weight of happiness.
    #[serde(default = "default_0_40")]
    pub happiness: f32,
    /// Weight of cleanliness.
    #[serde(default = "default_0_15")]
    pub cleanliness: f32,
    /// Weight of energy.
    #[serde(default = "default_0_15")]
    pub energy: f32,
}

impl Default for MoodWeights {
    fn default() -> Self {
        Self {
            hunger: 0.30,
            happiness: 0.40,
            cleanliness: 0.15,
            energy: 0.15,
        }
    }
}

/// Mood derivation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoodConfig {
    /// Stat weighting for the well-being score.
    #[serde(default)]
    pub weights: MoodWeights,
    /// Care actions within this window can override the base mood.
    #[serde(default = "default_15")]
    pub override_window_minutes: f32,
}

impl Default for MoodConfig {
    fn default() -> Self {
        Self {
            weights: MoodWeights::default(),
            override_window_minutes: 15.0,
        }
    }
}

/// Evolution gate configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolutionConfig {
    /// Every stat must be at least this high to advance.
    #[serde(default = "default_75")]
    pub stat_floor: f32,
    /// Cumulative care actions required, indexed by target stage.
    #[serde(default = "default_care_thresholds")]
    pub care_thresholds: [u32; 5],
    /// Days since creation required, indexed by target stage.
    #[serde(default = "default_time_thresholds")]
    pub time_thresholds_days: [f32; 5],
    /// Stat boost applied to all four stats on advancement.
    #[serde(default = "default_10")]
    pub stat_boost: f32,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            stat_floor: 75.0,
            care_thresholds: [0, 50, 150, 300, 500],
            time_thresholds_days: [0.0, 3.0, 7.0, 14.0, 30.0],
            stat_boost: 10.0,
        }
    }
}

/// Local persistence settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistenceConfig {
    /// Use WAL mode for concurrent reads.
    #[serde(default = "default_true")]
    pub wal_mode: bool,
    /// Detect save corruption via CRC-32 checksums.
    #[serde(default = "default_true")]
    pub checksum_enabled: bool,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            wal_mode: true,
            checksum_enabled: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Serde default helpers
// ---------------------------------------------------------------------------

fn default_true() -> bool { true }
fn default_min_elapsed() -> f32 { 1.0 }
fn default_hunger_rate() -> RateRange { RateRange { min: 0.10, max: 0.30 } }
fn default_happiness_rate() -> RateRange { RateRange { min: 0.05, max: 0.20 } }
fn default_cleanliness_rate() -> RateRange { RateRange { min: 0.08, max: 0.26 } }
fn default_energy_rate() -> RateRange { RateRange { min: 0.10, max: 0.35 } }
fn default_care_thresholds() -> [u32; 5] { [0, 50, 150, 300, 500] }
fn default_time_thresholds() -> [f32; 5] { [0.0, 3.0, 7.0, 14.0, 30.0] }
fn default_0_15() -> f32 { 0.15 }
fn default_0_30() -> f32 { 0.30 }
fn default_0_40() -> f32 { 0.40 }
fn default_0_5() -> f32 { 0.5 }
fn default_0_8() -> f32 { 0.8 }
fn default_1_2() -> f32 { 1.2 }
fn default_6() -> u32 { 6 }
fn default_10() -> f32 { 10.0 }
fn default_15() -> f32 { 15.0 }
fn default_22() -> u32 { 22 }
fn default_30() -> f32 { 30.0 }
fn default_75() -> f32 { 75.0 }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_model_constants() {
        let config = PetConfig::default();
        assert!((config.decay.hunger_rate.min - 0.10).abs() < f32::EPSILON);
        assert!((config.decay.energy_rate.max - 0.35).abs() < f32::EPSILON);
        assert_eq!(config.decay.night_start_hour, 22);
        assert!((config.mood.weights.hunger - 0.30).abs() < f32::EPSILON);
        let weight_sum = config.mood.weights.hunger
            + config.mood.weights.happiness
            + config.mood.weights.cleanliness
            + config.mood.weights.energy;
        assert!((weight_sum - 1.0).abs() < 1e-6);
        assert_eq!(config.evolution.care_thresholds, [0, 50, 150, 300, 500]);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config = PetConfig::from_toml(
            r#"
            [decay]
            care_window_minutes = 45.0

            [evolution]
            stat_floor = 80.0
            "#,
        )
        .unwrap();
        assert!((config.decay.care_window_minutes - 45.0).abs() < f32::EPSILON);
        assert!((config.decay.care_multiplier - 0.5).abs() < f32::EPSILON);
        assert!((config.evolution.stat_floor - 80.0).abs() < f32::EPSILON);
        assert!((config.mood.override_window_minutes - 15.0).abs() < f32::EPSILON);
    }

    #[test]
    fn invalid_toml_is_a_config_error() {
        let err = PetConfig::from_toml("not valid [ toml").unwrap_err();
        assert!(matches!(err, crate::PetError::Config(_)));
    }
}
