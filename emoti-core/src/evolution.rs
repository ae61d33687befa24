//! Evolution gate — discrete lifecycle tiers unlocked by sustained care.
//!
//! Five stages (0–4). Advancement requires all three conditions at once:
//! every stat at or above the floor (75), enough cumulative care actions for
//! the next stage, and enough days since creation. The gate moves at most
//! one stage per invocation and never goes backwards.

use chrono::{DateTime, Local};
use tracing::info;

use crate::config::EvolutionConfig;
use crate::pet::Pet;
use crate::types::Mood;

/// Highest evolution stage.
pub const MAX_STAGE: u8 = 4;

/// Advance the pet by one stage if it qualifies, else return it unchanged.
///
/// On advancement the mood is set to the transient [`Mood::Evolving`] label
/// (it overrides the mood model until the next recomputation) and all four
/// stats get a +10 boost, clamped at 100.
#[must_use]
pub fn check_evolution(pet: &Pet, now: DateTime<Local>, config: &EvolutionConfig) -> Pet {
    if pet.evolution_stage >= MAX_STAGE {
        return pet.clone();
    }

    let next = usize::from(pet.evolution_stage) + 1;
    let stats = pet.stats.clamped();

    let stats_high = stats.min_stat() >= config.stat_floor;
    let cared_enough = pet.care_count >= config.care_thresholds[next];
    let old_enough = pet.age_days(now) >= config.time_thresholds_days[next];

    if !(stats_high && cared_enough && old_enough) {
        return pet.clone();
    }

    info!(
        pet = %pet.name,
        stage = next,
        care_count = pet.care_count,
        "Pet evolved"
    );

    Pet {
        evolution_stage: pet.evolution_stage + 1,
        mood: Mood::Evolving,
        stats: stats.boosted(config.stat_boost),
        ..pet.clone()
    }
}
