//! Criterion benchmarks for u-seating.
//!
//! Uses a synthetic roster (cyclic attribute values, one or two topics per
//! participant) to measure scoring and full annealing cost.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use u_seating::anneal::{AnnealConfig, AnnealRunner};
use u_seating::encode::ParticipantRecord;
use u_seating::plan::SeatingProblem;
use u_seating::score::{ScoreConfig, TableObjective};

// ===========================================================================
// Synthetic roster
// ===========================================================================

const TOPICS: [&str; 6] = ["ml", "hpc", "bio", "quantum", "materials", "climate"];

fn synthetic_problem(n: usize) -> SeatingProblem {
    let records = (0..n)
        .map(|i| {
            let topics = if i % 3 == 0 {
                format!("{};{}", TOPICS[i % 6], TOPICS[(i + 1) % 6])
            } else {
                TOPICS[i % 6].to_string()
            };
            ParticipantRecord::new(format!("p{i}"), topics)
                .with_attribute("Org", format!("org{}", i % 7))
                .with_attribute("Years", format!("y{}", i % 4))
                .with_attribute("Career", format!("c{}", i % 3))
        })
        .collect();
    SeatingProblem::from_records(records, &["Org", "Years", "Career"]).unwrap()
}

fn score_config() -> ScoreConfig {
    ScoreConfig::new(vec![1.4, 1.2, 1.2], 1.4, vec![1.0, 1.0, 1.0, 0.5])
}

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_assignment_score(c: &mut Criterion) {
    let mut group = c.benchmark_group("assignment_score");

    for (n, m) in [(48usize, 6usize), (200, 20), (1000, 100)] {
        let problem = synthetic_problem(n);
        let config = score_config();
        let scorer = problem.scorer(&config).unwrap();
        let assignment = problem.initial_assignment(m).unwrap();
        group.bench_with_input(BenchmarkId::new(format!("n{n}_m{m}"), n), &assignment, |b, a| {
            b.iter(|| black_box(scorer.assignment_score(black_box(a))))
        });
    }
    group.finish();
}

fn bench_anneal(c: &mut Criterion) {
    let mut group = c.benchmark_group("anneal");
    group.sample_size(10);

    for (n, m) in [(48usize, 6usize), (200, 20)] {
        let problem = synthetic_problem(n);
        let config = score_config();
        let scorer = problem.scorer(&config).unwrap();
        let initial = problem.initial_assignment(m).unwrap();
        let anneal = AnnealConfig::default()
            .with_steps(32)
            .with_microsteps(256)
            .with_seed(42);
        group.bench_with_input(
            BenchmarkId::new(format!("n{n}_m{m}"), n),
            &(initial, anneal),
            |b, (initial, anneal)| {
                b.iter(|| {
                    let result = AnnealRunner::run(&scorer, initial.clone(), black_box(anneal));
                    black_box(result)
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_assignment_score, bench_anneal);
criterion_main!(benches);
