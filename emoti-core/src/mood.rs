//! Mood derivation — a pure function from stats and care recency to a label.
//!
//! The well-being score is a weighted sum of the four stats:
//!
//!   score = 0.30×hunger + 0.40×happiness + 0.15×cleanliness + 0.15×energy
//!
//! mapped to a base mood through descending threshold bands (first match
//! wins), then optionally overridden when the most recent care action is
//! fresh (< 15 minutes). Score comparisons in the overrides are strict:
//! a feed at exactly score 75 does not fire the override.

use chrono::{DateTime, Local};
use tracing::trace;

use crate::config::{MoodConfig, MoodWeights};
use crate::pet::{Pet, Stats};
use crate::types::{CareAction, CareEvent, Mood};

/// Score band lower bounds and their moods, checked in descending order.
const MOOD_BANDS: [(f32, Mood); 5] = [
    (90.0, Mood::Excited),
    (75.0, Mood::Happy),
    (50.0, Mood::Neutral),
    (25.0, Mood::Lonely),
    (10.0, Mood::Tired),
];

/// Weighted well-being score over clamped stats, in [0, 100] for the
/// default weights.
#[must_use]
pub fn weighted_score(stats: Stats, weights: &MoodWeights) -> f32 {
    let stats = stats.clamped();
    stats.hunger * weights.hunger
        + stats.happiness * weights.happiness
        + stats.cleanliness * weights.cleanliness
        + stats.energy * weights.energy
}

/// Derive the mood label from stats and the most recent care action.
///
/// Pure: two pets with identical stats and care history get identical moods
/// for the same `now`.
#[must_use]
pub fn derive_mood(
    stats: Stats,
    last_care: Option<&CareEvent>,
    now: DateTime<Local>,
    config: &MoodConfig,
) -> Mood {
    let stats = stats.clamped();
    let score = weighted_score(stats, &config.weights);

    let mut mood = MOOD_BANDS
        .iter()
        .find(|(min_score, _)| score >= *min_score)
        .map_or(Mood::Sick, |(_, mood)| *mood);

    // Fresh care can lift the mood past what the score alone would give.
    // No recorded care counts as infinitely long ago.
    if let Some(event) = last_care {
        if event.minutes_before(now) < config.override_window_minutes {
            mood = match event.action {
                CareAction::Feed if score < 75.0 => Mood::Happy,
                CareAction::Play if score < 90.0 => Mood::Excited,
                CareAction::Clean if stats.cleanliness > 80.0 => Mood::Happy,
                CareAction::Rest if stats.energy > 80.0 => Mood::Neutral,
                _ => mood,
            };
        }
    }

    trace!(score, mood = %mood, "Mood derived");
    mood
}

/// Recompute a pet's mood from its current stats and care history.
#[must_use]
pub fn update_mood(pet: &Pet, now: DateTime<Local>, config: &MoodConfig) -> Pet {
    Pet {
        mood: derive_mood(pet.stats, pet.last_care_action.as_ref(), now, config),
        ..pet.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn uniform(value: f32) -> Stats {
        Stats {
            hunger: value,
            happiness: value,
            cleanliness: value,
            energy: value,
        }
    }

    fn care(action: CareAction, minutes_ago: i64, now: DateTime<Local>) -> Option<CareEvent> {
        Some(CareEvent {
            action,
            timestamp: (now - Duration::minutes(minutes_ago)).with_timezone(&Utc),
        })
    }

    #[test]
    fn score_bands_map_in_descending_order() {
        let config = MoodConfig::default();
        let now = Local::now();
        let cases = [
            (95.0, Mood::Excited),
            (90.0, Mood::Excited),
            (80.0, Mood::Happy),
            (75.0, Mood::Happy),
            (60.0, Mood::Neutral),
            (30.0, Mood::Lonely),
            (15.0, Mood::Tired),
            (5.0, Mood::Sick),
            (0.0, Mood::Sick),
        ];
        for (value, expected) in cases {
            assert_eq!(
                derive_mood(uniform(value), None, now, &config),
                expected,
                "uniform stats {value}"
            );
        }
    }

    #[test]
    fn weighted_score_example() {
        // 0.3×40 + 0.4×90 + 0.15×90 + 0.15×90 = 75 → Happy.
        let stats = Stats {
            hunger: 40.0,
            happiness: 90.0,
            cleanliness: 90.0,
            energy: 90.0,
        };
        let config = MoodConfig::default();
        assert!((weighted_score(stats, &config.weights) - 75.0).abs() < 1e-4);
        assert_eq!(derive_mood(stats, None, Local::now(), &config), Mood::Happy);
    }

    #[test]
    fn feed_override_requires_score_strictly_below_75() {
        let now = Local::now();
        let config = MoodConfig::default();
        // Score is exactly 75: the `< 75` comparison must not fire.
        let stats = Stats {
            hunger: 40.0,
            happiness: 90.0,
            cleanliness: 90.0,
            energy: 90.0,
        };
        let mood = derive_mood(stats, care(CareAction::Feed, 5, now).as_ref(), now, &config);
        assert_eq!(mood, Mood::Happy);

        // Just below 75 the override lifts a Neutral pet to Happy.
        let low = uniform(60.0);
        let mood = derive_mood(low, care(CareAction::Feed, 5, now).as_ref(), now, &config);
        assert_eq!(mood, Mood::Happy);
    }

    #[test]
    fn play_override_forces_excited() {
        let now = Local::now();
        let config = MoodConfig::default();
        let mood = derive_mood(
            uniform(40.0),
            care(CareAction::Play, 1, now).as_ref(),
            now,
            &config,
        );
        assert_eq!(mood, Mood::Excited);
    }

    #[test]
    fn clean_override_needs_high_cleanliness() {
        let now = Local::now();
        let config = MoodConfig::default();
        let mut stats = uniform(40.0);
        stats.cleanliness = 85.0;
        let mood = derive_mood(stats, care(CareAction::Clean, 2, now).as_ref(), now, &config);
        assert_eq!(mood, Mood::Happy);

        stats.cleanliness = 80.0; // boundary: `> 80`, not `>=`
        let mood = derive_mood(stats, care(CareAction::Clean, 2, now).as_ref(), now, &config);
        assert_eq!(mood, Mood::Lonely);
    }

    #[test]
    fn rest_override_needs_high_energy() {
        let now = Local::now();
        let config = MoodConfig::default();
        let mut stats = uniform(30.0);
        stats.energy = 90.0;
        let mood = derive_mood(stats, care(CareAction::Rest, 3, now).as_ref(), now, &config);
        assert_eq!(mood, Mood::Neutral);
    }

    #[test]
    fn stale_care_does_not_override() {
        let now = Local::now();
        let config = MoodConfig::default();
        let mood = derive_mood(
            uniform(40.0),
            care(CareAction::Play, 16, now).as_ref(),
            now,
            &config,
        );
        assert_eq!(mood, Mood::Lonely);
    }

    #[test]
    fn mood_is_deterministic() {
        let now = Local::now();
        let config = MoodConfig::default();
        let stats = Stats {
            hunger: 33.0,
            happiness: 71.0,
            cleanliness: 58.0,
            energy: 64.0,
        };
        let event = care(CareAction::Feed, 4, now);
        let a = derive_mood(stats, event.as_ref(), now, &config);
        let b = derive_mood(stats, event.as_ref(), now, &config);
        assert_eq!(a, b);
    }

    #[test]
    fn update_mood_only_touches_mood() {
        let now = Local::now();
        let config = MoodConfig::default();
        let mut pet = Pet::new("Momo", now.with_timezone(&Utc)).unwrap();
        pet.stats = uniform(95.0);
        pet.mood = Mood::Sick; // stale

        let updated = update_mood(&pet, now, &config);
        assert_eq!(updated.mood, Mood::Excited);
        assert_eq!(updated.stats, pet.stats);
        assert_eq!(updated.care_count, pet.care_count);
        assert_eq!(updated.last_updated, pet.last_updated);
    }
}
