//! EMOTI benchmark suite.
//!
//! The transitions run on the UI thread of the host app, so they have to be
//! effectively free:
//!   decay_pass ............ < 5μs
//!   mood_derivation ....... < 1μs
//!   evolution_gate ........ < 1μs
//!   full_care_transition .. < 10μs

use chrono::{Duration, Local, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use emoti_core::config::PetConfig;
use emoti_core::mood::derive_mood;
use emoti_core::{apply_care, check_evolution, decay_stats, CareAction, CareEvent, Pet, Stats};

fn stale_pet() -> Pet {
    let now = Local::now();
    let mut pet = Pet::new("Momo", (now - Duration::days(4)).with_timezone(&Utc))
        .expect("valid name");
    pet.stats = Stats {
        hunger: 82.0,
        happiness: 91.0,
        cleanliness: 77.0,
        energy: 88.0,
    };
    pet.care_count = 120;
    pet.last_updated = (now - Duration::hours(2)).with_timezone(&Utc);
    pet.last_care_action = Some(CareEvent {
        action: CareAction::Play,
        timestamp: (now - Duration::minutes(10)).with_timezone(&Utc),
    });
    pet
}

/// Benchmark: one decay pass over a two-hour gap.
fn bench_decay_pass(c: &mut Criterion) {
    let pet = stale_pet();
    let config = PetConfig::default();
    let now = Local::now();
    let mut rng = StdRng::seed_from_u64(42);

    c.bench_function("decay_pass", |b| {
        b.iter(|| {
            let after = decay_stats(black_box(&pet), now, &mut rng, &config);
            black_box(after);
        });
    });
}

/// Benchmark: mood derivation with a fresh care action in the window.
fn bench_mood_derivation(c: &mut Criterion) {
    let pet = stale_pet();
    let config = PetConfig::default();
    let now = Local::now();

    c.bench_function("mood_derivation", |b| {
        b.iter(|| {
            let mood = derive_mood(
                black_box(pet.stats),
                pet.last_care_action.as_ref(),
                now,
                &config.mood,
            );
            black_box(mood);
        });
    });
}

/// Benchmark: the evolution gate with all three conditions checked.
fn bench_evolution_gate(c: &mut Criterion) {
    let pet = stale_pet();
    let config = PetConfig::default();
    let now = Local::now();

    c.bench_function("evolution_gate", |b| {
        b.iter(|| {
            let after = check_evolution(black_box(&pet), now, &config.evolution);
            black_box(after);
        });
    });
}

/// Benchmark: the full composed care transition.
fn bench_full_care_transition(c: &mut Criterion) {
    let pet = stale_pet();
    let config = PetConfig::default();
    let now = Local::now();
    let mut rng = StdRng::seed_from_u64(42);

    c.bench_function("full_care_transition", |b| {
        b.iter(|| {
            let after = apply_care(black_box(&pet), CareAction::Feed, now, &mut rng, &config);
            black_box(after);
        });
    });
}

criterion_group!(
    benches,
    bench_decay_pass,
    bench_mood_derivation,
    bench_evolution_gate,
    bench_full_care_transition
);
criterion_main!(benches);
