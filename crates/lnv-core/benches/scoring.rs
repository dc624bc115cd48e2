//! Benchmarks for recommendation scoring and itinerary builds.
//!
//! Run with: cargo bench --package lnv-core

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use lnv_core::{ItineraryParams, Venue, VibeArc, compute_recommendations, generate_itinerary};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

const TAGS: &[&str] = &[
    "chill", "casual", "date-friendly", "high-energy", "dancey", "loud", "rowdy", "late-eats",
    "food-focused", "upscale", "views", "rooftop", "live-music", "karaoke", "games", "divey",
];
const AREAS: &[&str] = &["Capitol Hill", "Ballard", "Fremont", "Belltown", "Georgetown"];
const CATEGORIES: &[&str] = &["Cocktail Bar", "Dive Bar", "Nightclub", "Pub", "Diner"];
const CLOSINGS: &[&str] = &["11:00 PM", "12:00 AM", "1:00 AM", "2:00 AM", "Late"];

/// Synthetic dataset shaped like the real venue list.
fn generate_venues(n: usize) -> Vec<Venue> {
    let mut rng = SmallRng::seed_from_u64(7);
    (0..n)
        .map(|i| {
            let tags: Vec<&str> = (0..rng.random_range(1..6))
                .map(|_| TAGS[rng.random_range(0..TAGS.len())])
                .collect();
            Venue::new(
                &format!("Venue {i}"),
                AREAS[i % AREAS.len()],
                CATEGORIES[i % CATEGORIES.len()],
                &tags.join(", "),
            )
            .with_distance(&format!("{:.1} mi", rng.random_range(0.2..12.0)))
            .with_closing_time(CLOSINGS[i % CLOSINGS.len()])
        })
        .collect()
}

fn bench_recommendations(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_recommendations");

    for size in [100, 500, 2_000] {
        let venues = generate_venues(size);
        let base = venues[0].clone();
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &venues, |b, venues| {
            b.iter(|| compute_recommendations(black_box(venues), &base, Some(6.0), 8))
        });
    }

    group.finish();
}

fn bench_itinerary(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate_itinerary");
    let venues = generate_venues(500);

    for stops in [3, 6] {
        let params =
            ItineraryParams::from_clock("21:00", "02:00", stops, VibeArc::ChillToWild, None)
                .expect("valid clock");
        group.bench_with_input(BenchmarkId::from_parameter(stops), &params, |b, params| {
            let mut rng = SmallRng::seed_from_u64(42);
            b.iter(|| generate_itinerary(black_box(&venues), params, &mut rng))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_recommendations, bench_itinerary);
criterion_main!(benches);
