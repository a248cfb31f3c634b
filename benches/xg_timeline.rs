//! Benchmarks for xG timeline recomputation

use chrono::{TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use matchpulse::event::{EventType, MatchEvent, Team};
use matchpulse::xg::{compute_timeline, win_probability, XgConfig};
use std::collections::HashMap;
use uuid::Uuid;

fn sample_events(n: usize) -> Vec<MatchEvent> {
    (0..n)
        .map(|i| MatchEvent {
            id: Uuid::new_v4(),
            match_id: "bench".to_string(),
            timestamp: Utc.with_ymd_and_hms(2026, 6, 14, 18, 0, 0).unwrap(),
            minute: (i / 2) as u32,
            event_type: match i % 4 {
                0 => EventType::Shot,
                1 => EventType::ShotOnTarget,
                2 => EventType::BigChance,
                _ => EventType::Goal,
            },
            team: if i % 2 == 0 { Team::Home } else { Team::Away },
            player_ids: vec![],
            x: None,
            y: None,
            meta: HashMap::new(),
        })
        .collect()
}

fn benchmark_timeline_recompute(c: &mut Criterion) {
    let events = sample_events(200);
    let config = XgConfig::default();

    c.bench_function("xg_timeline_200_events", |b| {
        b.iter(|| compute_timeline(black_box(&events), &config))
    });
}

fn benchmark_win_probability(c: &mut Criterion) {
    c.bench_function("win_probability", |b| {
        b.iter(|| win_probability(black_box(2.4), black_box(1.1), 0.6))
    });
}

criterion_group!(
    benches,
    benchmark_timeline_recompute,
    benchmark_win_probability
);
criterion_main!(benches);
