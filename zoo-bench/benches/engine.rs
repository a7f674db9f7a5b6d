//! Zoo Engine Benchmark Suite
//!
//! Per-frame and per-tick budgets:
//!   decay_pass_1000_animals ........ < 50μs
//!   mood_report_16_animals ......... < 20μs
//!   wander_step_16_animals ......... < 100μs
//!   game_session_round_trip ........ < 20μs

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use zoo_core::config::{WorldConfig, ZooConfig};
use zoo_core::content;
use zoo_core::decay::{DecayRates, decay_pass};
use zoo_core::mood::{self, MoodTable};
use zoo_core::registry::Registry;
use zoo_core::types::{Animal, AnimalId, Vitals};
use zoo_core::world::WanderField;
use zoo_session::Zoo;

fn make_animal(i: u32) -> Animal {
    Animal {
        id: AnimalId(i),
        name: format!("Animal {i}"),
        species: "Lion".to_string(),
        image: String::new(),
        game: "facts".to_string(),
        vitals: Vitals::new(i64::from(i % 101), i64::from((i * 7) % 101), i64::from((i * 13) % 101)),
        unlocked: i % 2 == 0,
        cost: i % 10,
        characteristics: vec![],
        facts: vec![],
    }
}

/// Benchmark: one decay pass over a large population (target: < 50μs).
fn bench_decay_pass(c: &mut Criterion) {
    let animals = (0..1000).map(make_animal).collect();
    let mut registry = Registry::new(animals).expect("registry");
    let rates = DecayRates::default();

    c.bench_function("decay_pass_1000_animals", |b| {
        b.iter(|| {
            let changed = decay_pass(black_box(&mut registry), black_box(rates));
            black_box(changed);
        });
    });
}

/// Benchmark: mood reports for the whole seed catalogue (target: < 20μs).
fn bench_mood_reports(c: &mut Criterion) {
    let animals = content::bundled_animals().expect("bundled");
    let table = MoodTable::bundled("Lion").expect("moods");

    c.bench_function("mood_report_16_animals", |b| {
        b.iter(|| {
            for animal in &animals {
                black_box(mood::describe(black_box(animal), &table));
            }
        });
    });
}

/// Benchmark: one world-view frame with every animal roaming (target: < 100μs).
fn bench_wander_step(c: &mut Criterion) {
    let mut field = WanderField::new(1920.0, 1080.0, WorldConfig::default(), 42);
    for i in 0..16 {
        field.spawn(AnimalId(i));
    }

    c.bench_function("wander_step_16_animals", |b| {
        b.iter(|| field.step(black_box(16.0)));
    });
}

/// Benchmark: start, report and settle one mini-game (target: < 20μs).
fn bench_game_session(c: &mut Criterion) {
    let mut zoo = Zoo::bundled(ZooConfig::default(), None).expect("zoo");

    c.bench_function("game_session_round_trip", |b| {
        b.iter(|| {
            let session = zoo.start_game(black_box(AnimalId(1))).expect("start");
            session.report(black_box(75.0));
            let receipt = zoo.finish_game(session).expect("finish");
            black_box(receipt);
            let _ = zoo.drain_events();
        });
    });
}

criterion_group!(
    benches,
    bench_decay_pass,
    bench_mood_reports,
    bench_wander_step,
    bench_game_session,
);
criterion_main!(benches);
