//! Stat decay — scheduled reduction of care stats over elapsed real time.
//!
//! Each pass computes, per stat:
//!
//!   loss = rate_per_minute × minutes_elapsed × modifiers
//!
//! where the rate is drawn fresh from a fixed uniform range per stat (decay
//! is intentionally not perfectly predictable), and the modifiers are:
//!
//! - night (local hour in [22, 6)): energy ×1.2, happiness ×0.8
//! - recent care (< 30 minutes ago): all four losses ×0.5
//!
//! Stats are floored at 0. Decay and mood derivation are never separated in
//! observable behavior: every pass ends by recomputing the mood.
//!
//! The random source is injectable so tests can pin exact decay amounts with
//! a seeded generator.

use chrono::{DateTime, Local, Timelike, Utc};
use rand::Rng;
use tracing::{debug, trace};

use crate::config::{DecayConfig, PetConfig, RateRange};
use crate::mood;
use crate::pet::{Pet, STAT_MIN};

/// Apply decay accumulated since `pet.last_updated`, then recompute mood.
///
/// Returns the pet unchanged if less than the configured throttle (1 minute
/// by default) has elapsed — sub-minute decay is simply not modeled. A
/// negative elapsed time (clock skew) is treated the same way.
///
/// `now` carries the caller's timezone so the night window follows the local
/// hour of the evaluation time.
#[must_use]
pub fn decay_stats<R: Rng + ?Sized>(
    pet: &Pet,
    now: DateTime<Local>,
    rng: &mut R,
    config: &PetConfig,
) -> Pet {
    let decay = &config.decay;
    let minutes = pet.minutes_since_update(now);
    if minutes < decay.min_elapsed_minutes {
        trace!(pet = %pet.name, minutes, "Decay throttled, no-op");
        return pet.clone();
    }

    let hunger_rate = sample_rate(rng, decay.hunger_rate);
    let happiness_rate = sample_rate(rng, decay.happiness_rate);
    let cleanliness_rate = sample_rate(rng, decay.cleanliness_rate);
    let energy_rate = sample_rate(rng, decay.energy_rate);

    // Night is judged by the local hour of the evaluation time, not the
    // elapsed interval.
    let night = is_night(now.hour(), decay);
    let energy_modifier = if night { decay.night_energy_multiplier } else { 1.0 };
    let happiness_modifier = if night { decay.night_happiness_multiplier } else { 1.0 };

    let care_modifier = match &pet.last_care_action {
        Some(event) if event.minutes_before(now) < decay.care_window_minutes => {
            decay.care_multiplier
        }
        // No recorded care counts as infinitely long ago.
        _ => 1.0,
    };

    let mut stats = pet.stats.clamped();
    stats.hunger = (stats.hunger - hunger_rate * minutes * care_modifier).max(STAT_MIN);
    stats.happiness = (stats.happiness
        - happiness_rate * minutes * care_modifier * happiness_modifier)
        .max(STAT_MIN);
    stats.cleanliness =
        (stats.cleanliness - cleanliness_rate * minutes * care_modifier).max(STAT_MIN);
    stats.energy =
        (stats.energy - energy_rate * minutes * care_modifier * energy_modifier).max(STAT_MIN);

    debug!(
        pet = %pet.name,
        minutes,
        night,
        care_modifier,
        hunger = stats.hunger,
        happiness = stats.happiness,
        cleanliness = stats.cleanliness,
        energy = stats.energy,
        "Decay pass applied"
    );

    let mut updated = Pet {
        stats,
        last_updated: now.with_timezone(&Utc),
        ..pet.clone()
    };
    updated.mood = mood::derive_mood(
        updated.stats,
        updated.last_care_action.as_ref(),
        now,
        &config.mood,
    );
    updated
}

/// Draw a per-minute decay rate from a uniform range.
fn sample_rate<R: Rng + ?Sized>(rng: &mut R, range: RateRange) -> f32 {
    if range.max <= range.min {
        return range.min;
    }
    rng.gen_range(range.min..=range.max)
}

/// Whether `hour` falls in the night window (wraps around midnight).
fn is_night(hour: u32, config: &DecayConfig) -> bool {
    hour >= config.night_start_hour || hour < config.night_end_hour
}
