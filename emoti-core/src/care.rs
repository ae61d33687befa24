//! Care actions — recording, stat deltas, and the composed transition.
//!
//! Recording and the stat delta are separate steps: [`record_care_action`]
//! only bumps the counter and overwrites the last-action slot, while
//! [`apply_care_delta`] applies the action's stat effect. [`apply_care`]
//! composes the full user-initiated sequence in the fixed order
//! decay → delta → record → evolution check, threading one evaluation
//! timestamp through all of it.

use chrono::{DateTime, Local, Utc};
use rand::Rng;
use tracing::debug;

use crate::config::PetConfig;
use crate::decay;
use crate::evolution;
use crate::pet::Pet;
use crate::types::{CareAction, CareEvent};

/// Stat deltas per action: (hunger, happiness, cleanliness, energy).
///
/// Feeding and cleaning cost a little energy, playing costs more, resting
/// restores it.
#[must_use]
pub fn action_delta(action: CareAction) -> (f32, f32, f32, f32) {
    match action {
        CareAction::Feed => (20.0, 0.0, 0.0, -10.0),
        CareAction::Clean => (0.0, 0.0, 20.0, -10.0),
        CareAction::Play => (0.0, 20.0, 0.0, -15.0),
        CareAction::Rest => (0.0, 0.0, 0.0, 20.0),
    }
}

/// Apply the action's stat delta, clamped into [0, 100]. Does not record
/// the action.
#[must_use]
pub fn apply_care_delta(pet: &Pet, action: CareAction) -> Pet {
    let (hunger, happiness, cleanliness, energy) = action_delta(action);
    let mut stats = pet.stats.clamped();
    stats.hunger += hunger;
    stats.happiness += happiness;
    stats.cleanliness += cleanliness;
    stats.energy += energy;
    Pet {
        stats: stats.clamped(),
        ..pet.clone()
    }
}

/// Record that a care action happened at `now`.
///
/// Increments `care_count` by exactly 1 and overwrites `last_care_action`.
/// Stats are untouched — the delta is the caller's separate step.
#[must_use]
pub fn record_care_action(pet: &Pet, action: CareAction, now: DateTime<Utc>) -> Pet {
    debug!(pet = %pet.name, action = %action, "Care action recorded");
    Pet {
        care_count: pet.care_count + 1,
        last_care_action: Some(CareEvent {
            action,
            timestamp: now,
        }),
        ..pet.clone()
    }
}

/// The full user-initiated care transition:
/// decay → stat delta → record → evolution check.
///
/// One `now` is threaded through every step, so decay, the recorded
/// timestamp and the evolution age check all agree on the evaluation time.
#[must_use]
pub fn apply_care<R: Rng + ?Sized>(
    pet: &Pet,
    action: CareAction,
    now: DateTime<Local>,
    rng: &mut R,
    config: &PetConfig,
) -> Pet {
    let pet = decay::decay_stats(pet, now, rng, config);
    let pet = apply_care_delta(&pet, action);
    let pet = record_care_action(&pet, action, now.with_timezone(&Utc));
    evolution::check_evolution(&pet, now, &config.evolution)
}
