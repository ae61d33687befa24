//! The pet entity — the sole entity of the EMOTI model.
//!
//! A [`Pet`] is created once when the user completes naming, then mutated
//! exclusively through the transition functions in [`crate::decay`],
//! [`crate::mood`], [`crate::evolution`] and [`crate::care`], composed by the
//! caller in the fixed order: decay → care delta → record → evolution check.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{PetError, Result};
use crate::types::{CareEvent, Mood};

/// Inclusive stat range: every stat lives in `[STAT_MIN, STAT_MAX]`.
pub const STAT_MIN: f32 = 0.0;
/// Upper stat bound.
pub const STAT_MAX: f32 = 100.0;

/// Baseline value for all four stats at creation.
pub const STAT_BASELINE: f32 = 50.0;

/// Minimum pet-name length in characters, after trimming.
pub const NAME_MIN_CHARS: usize = 2;
/// Maximum pet-name length in characters.
pub const NAME_MAX_CHARS: usize = 20;

// ---------------------------------------------------------------------------
// Stats
// ---------------------------------------------------------------------------

/// The four care stats, each clamped to [0, 100].
///
/// `hunger` is satiety (100 = full), not appetite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    /// Satiety level.
    pub hunger: f32,
    /// Contentment level.
    pub happiness: f32,
    /// Grooming level.
    pub cleanliness: f32,
    /// Rest level.
    pub energy: f32,
}

impl Stats {
    /// All four stats at the creation baseline.
    pub const BASELINE: Self = Self {
        hunger: STAT_BASELINE,
        happiness: STAT_BASELINE,
        cleanliness: STAT_BASELINE,
        energy: STAT_BASELINE,
    };

    /// Copy of these stats with every value clamped into [0, 100].
    ///
    /// Out-of-range input is a caller contract violation; transitions clamp
    /// on read rather than propagate corruption.
    #[must_use]
    pub fn clamped(self) -> Self {
        Self {
            hunger: self.hunger.clamp(STAT_MIN, STAT_MAX),
            happiness: self.happiness.clamp(STAT_MIN, STAT_MAX),
            cleanliness: self.cleanliness.clamp(STAT_MIN, STAT_MAX),
            energy: self.energy.clamp(STAT_MIN, STAT_MAX),
        }
    }

    /// The minimum of the four stats ("stat consistency" — the evolution
    /// gate requires all stats high, not just the average).
    #[must_use]
    pub fn min_stat(self) -> f32 {
        self.hunger
            .min(self.happiness)
            .min(self.cleanliness)
            .min(self.energy)
    }

    /// Copy with `amount` added to every stat, clamped into [0, 100].
    #[must_use]
    pub fn boosted(self, amount: f32) -> Self {
        Self {
            hunger: self.hunger + amount,
            happiness: self.happiness + amount,
            cleanliness: self.cleanliness + amount,
            energy: self.energy + amount,
        }
        .clamped()
    }

    /// True if every stat is within [0, 100].
    #[must_use]
    pub fn in_bounds(self) -> bool {
        let ok = |v: f32| (STAT_MIN..=STAT_MAX).contains(&v);
        ok(self.hunger) && ok(self.happiness) && ok(self.cleanliness) && ok(self.energy)
    }
}

impl Default for Stats {
    fn default() -> Self {
        Self::BASELINE
    }
}

// ---------------------------------------------------------------------------
// Pet
// ---------------------------------------------------------------------------

/// The virtual pet entity.
///
/// Serialized flat (stats inline), matching the stored JSON shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pet {
    /// Display name, 2–20 characters.
    pub name: String,
    /// The four care stats.
    #[serde(flatten)]
    pub stats: Stats,
    /// Lifecycle tier in [0, 4]; monotonically non-decreasing.
    pub evolution_stage: u8,
    /// Derived well-being label.
    pub mood: Mood,
    /// When the last decay pass ran. Advances only through decay.
    pub last_updated: DateTime<Utc>,
    /// Total recorded care actions; strictly increasing.
    pub care_count: u32,
    /// Immutable creation timestamp.
    pub created_at: DateTime<Utc>,
    /// The most recent care action, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_care_action: Option<CareEvent>,
}

impl Pet {
    /// Create a new pet at the neutral baseline: all stats 50, stage 0,
    /// mood neutral, zero care actions.
    ///
    /// # Errors
    /// Returns [`PetError::InvalidName`] if the trimmed name is shorter than
    /// 2 or longer than 20 characters.
    pub fn new(name: &str, now: DateTime<Utc>) -> Result<Self> {
        let name = validate_name(name)?;
        Ok(Self {
            name,
            stats: Stats::BASELINE,
            evolution_stage: 0,
            mood: Mood::Neutral,
            last_updated: now,
            care_count: 0,
            created_at: now,
            last_care_action: None,
        })
    }

    /// Days elapsed since creation, as seen from `now`.
    #[must_use]
    pub fn age_days<Tz: chrono::TimeZone>(&self, now: DateTime<Tz>) -> f32 {
        now.signed_duration_since(self.created_at).num_seconds() as f32 / 86_400.0
    }

    /// Minutes since the last decay pass, as seen from `now`.
    #[must_use]
    pub fn minutes_since_update<Tz: chrono::TimeZone>(&self, now: DateTime<Tz>) -> f32 {
        now.signed_duration_since(self.last_updated).num_seconds() as f32 / 60.0
    }
}

/// Validate and trim a pet name per the naming-screen rules.
///
/// # Errors
/// Returns [`PetError::InvalidName`] when empty, too short or too long.
pub fn validate_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    let chars = trimmed.chars().count();
    if chars == 0 {
        return Err(PetError::InvalidName {
            name: trimmed.to_string(),
            reason: "name must not be empty".to_string(),
        });
    }
    if chars < NAME_MIN_CHARS {
        return Err(PetError::InvalidName {
            name: trimmed.to_string(),
            reason: format!("name must be at least {NAME_MIN_CHARS} characters"),
        });
    }
    if chars > NAME_MAX_CHARS {
        return Err(PetError::InvalidName {
            name: trimmed.to_string(),
            reason: format!("name must be at most {NAME_MAX_CHARS} characters"),
        });
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_pet_starts_at_baseline() {
        let now = Utc::now();
        let pet = Pet::new("Momo", now).unwrap();
        assert_eq!(pet.stats, Stats::BASELINE);
        assert_eq!(pet.evolution_stage, 0);
        assert_eq!(pet.mood, Mood::Neutral);
        assert_eq!(pet.care_count, 0);
        assert_eq!(pet.created_at, now);
        assert_eq!(pet.last_updated, now);
        assert!(pet.last_care_action.is_none());
    }

    #[test]
    fn name_is_trimmed() {
        let pet = Pet::new("  Momo  ", Utc::now()).unwrap();
        assert_eq!(pet.name, "Momo");
    }

    #[test]
    fn name_length_is_enforced() {
        let now = Utc::now();
        assert!(Pet::new("", now).is_err());
        assert!(Pet::new("M", now).is_err());
        assert!(Pet::new("   ", now).is_err());
        assert!(Pet::new(&"x".repeat(21), now).is_err());
        assert!(Pet::new(&"x".repeat(20), now).is_ok());
        assert!(Pet::new("Mo", now).is_ok());
    }

    #[test]
    fn stats_clamp_and_min() {
        let stats = Stats {
            hunger: -5.0,
            happiness: 120.0,
            cleanliness: 50.0,
            energy: 99.0,
        };
        let clamped = stats.clamped();
        assert!(clamped.in_bounds());
        assert!((clamped.hunger - 0.0).abs() < f32::EPSILON);
        assert!((clamped.happiness - 100.0).abs() < f32::EPSILON);
        assert!((clamped.min_stat() - 0.0).abs() < f32::EPSILON);
    }

    #[test]
    fn boost_clamps_at_ceiling() {
        let boosted = Stats {
            hunger: 95.0,
            happiness: 100.0,
            cleanliness: 50.0,
            energy: 89.9,
        }
        .boosted(10.0);
        assert!((boosted.hunger - 100.0).abs() < f32::EPSILON);
        assert!((boosted.happiness - 100.0).abs() < f32::EPSILON);
        assert!((boosted.cleanliness - 60.0).abs() < f32::EPSILON);
        assert!(boosted.energy <= 100.0);
    }

    #[test]
    fn pet_serializes_stats_flat() {
        let pet = Pet::new("Momo", Utc::now()).unwrap();
        let json = serde_json::to_value(&pet).unwrap();
        assert!(json.get("hunger").is_some(), "stats should be inline: {json}");
        assert!(json.get("stats").is_none());
        assert_eq!(json["mood"], "neutral");

        let back: Pet = serde_json::from_value(json).unwrap();
        assert_eq!(back, pet);
    }
}
