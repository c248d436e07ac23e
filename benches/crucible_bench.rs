use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::time::Duration;

use galaxy_crucible::board::Galaxy;
use galaxy_crucible::claims::{compute_distance_claims, compute_strength_claims, ClaimWeights, ContestPolicy};
use galaxy_crucible::protocol::encode_board_string;
use galaxy_crucible::score::{score, ScoreConfig};
use galaxy_crucible::{Crucible, CrucibleConfig, RandomSequence};

fn sample_galaxy() -> Galaxy {
    Galaxy::generate(3, 6, &RandomSequence::from_seed(1)).unwrap()
}

/// Scoring config with the gates relaxed, so every call runs the claim path.
fn open_config() -> ScoreConfig {
    ScoreConfig {
        both_holes_required: false,
        hard_hole_limit: false,
        hole_count: 0,
        allow_adjacent_holes: true,
        allow_adjacent_anomalies: true,
        ..ScoreConfig::default()
    }
}

fn bench_generate(c: &mut Criterion) {
    let seq = RandomSequence::from_seed(7);
    c.bench_function("generate_radius_3", |b| {
        b.iter(|| Galaxy::generate(black_box(3), black_box(6), &seq).unwrap())
    });
}

fn bench_distance_claims(c: &mut Criterion) {
    let g = sample_galaxy();
    let weights = ClaimWeights::default();
    c.bench_function("distance_claims_radius_3", |b| {
        b.iter(|| compute_distance_claims(black_box(&g), black_box(&weights)))
    });
}

fn bench_strength_claims(c: &mut Criterion) {
    let g = sample_galaxy();
    let d = compute_distance_claims(&g, &ClaimWeights::default());
    c.bench_function("strength_claims_claim_size", |b| {
        b.iter(|| compute_strength_claims(black_box(&g), black_box(&d), ContestPolicy::ClaimSize, -3.0))
    });
}

fn bench_score(c: &mut Criterion) {
    let g = sample_galaxy();
    let config = open_config();
    c.bench_function("score_radius_3", |b| {
        b.iter(|| score(black_box(&g), black_box(&config)))
    });
}

fn bench_board_string(c: &mut Criterion) {
    let g = sample_galaxy();
    c.bench_function("encode_board_string", |b| {
        b.iter(|| encode_board_string(black_box(&g)))
    });
}

fn bench_search_batch(c: &mut Criterion) {
    let config = CrucibleConfig {
        seed: 3,
        threads: 4,
        ..CrucibleConfig::default()
    };
    let crucible = Crucible::new(&config).unwrap();
    let mut group = c.benchmark_group("search");
    group.measurement_time(Duration::from_secs(10));
    group.sample_size(20);
    group.bench_function("batch_200_parallel", |b| {
        b.iter(|| crucible.search(black_box(200), true))
    });
    group.bench_function("batch_200_sequential", |b| {
        b.iter(|| crucible.search(black_box(200), false))
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_generate,
    bench_distance_claims,
    bench_strength_claims,
    bench_score,
    bench_board_string,
    bench_search_batch,
);
criterion_main!(benches);
