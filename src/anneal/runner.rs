//! Swap-annealing execution loop.
//!
//! # Algorithm
//!
//! For every checkpoint of the [`Schedule`], in cooling order:
//!
//! 1. Repeat `microsteps` times:
//!    a. Pick two distinct tables uniformly at random
//!    b. Score both tables (`prev`)
//!    c. Swap one uniformly chosen member of each
//!    d. Rescore both tables (`next`)
//!    e. Keep the swap if `next > prev`, otherwise keep it with
//!       probability `exp((next - prev) / temperature)`; undo it if rejected
//! 2. Append the whole-assignment score to the [`ScoreTrace`]
//!
//! The score is maximized. Only the two touched tables are rescored per
//! proposal, which relies on [`TableObjective`] being a sum over tables.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rand::seq::index;
use rand::Rng;
use tracing::{debug, info, instrument, warn};

use super::config::{AnnealConfig, Schedule};
use super::types::{ScoreTrace, TraceEntry};
use crate::assignment::Assignment;
use crate::error::{Result, SeatingError};
use crate::random::{create_rng, resolve_seed};
use crate::score::TableObjective;

/// Result of an annealing run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnnealResult {
    /// The assignment after the last completed checkpoint.
    pub assignment: Assignment,

    /// Whole-assignment score before the first proposal.
    pub initial_score: f64,

    /// Whole-assignment score of `assignment`.
    pub final_score: f64,

    /// One entry per completed checkpoint.
    pub trace: ScoreTrace,

    /// Total swap proposals evaluated.
    pub proposals: usize,

    /// Number of accepted swaps (including improvements).
    pub accepted_moves: usize,

    /// Number of strictly improving swaps.
    pub improving_moves: usize,

    /// Whether cancelled externally.
    pub cancelled: bool,

    /// Seed that reproduces this run.
    pub seed: u64,
}

impl AnnealResult {
    /// Fraction of proposals that were kept; 0 when nothing was proposed.
    pub fn acceptance_ratio(&self) -> f64 {
        if self.proposals == 0 {
            0.0
        } else {
            self.accepted_moves as f64 / self.proposals as f64
        }
    }
}

/// Probability of keeping a swap that moves the score from `prev` to `next`.
///
/// Always 1 for a strict improvement. Otherwise `exp((next - prev) / temperature)`,
/// which tends to 0 as the temperature tends to 0 from above.
pub fn acceptance_probability(prev: f64, next: f64, temperature: f64) -> f64 {
    if next > prev {
        1.0
    } else {
        ((next - prev) / temperature).exp()
    }
}

/// Metropolis decision. Draws from `rng` only for non-improving moves.
pub fn accept_move<R: Rng>(prev: f64, next: f64, temperature: f64, rng: &mut R) -> bool {
    next > prev || rng.random::<f64>() < acceptance_probability(prev, next, temperature)
}

/// Counters for one pass over the schedule.
#[derive(Debug, Default, Clone, Copy)]
struct MoveStats {
    proposals: usize,
    accepted: usize,
    improving: usize,
}

/// Executes swap annealing over a table assignment.
pub struct AnnealRunner;

impl AnnealRunner {
    /// Runs the full schedule from `initial`.
    pub fn run<O: TableObjective>(
        objective: &O,
        initial: Assignment,
        config: &AnnealConfig,
    ) -> Result<AnnealResult> {
        Self::run_with_cancel(objective, initial, config, None)
    }

    /// Runs with an optional cancellation flag, checked before each checkpoint.
    ///
    /// A cancelled run still returns a valid assignment: the state after
    /// the last completed checkpoint.
    #[instrument(
        skip_all,
        name = "anneal",
        fields(tables = initial.len(), participants = initial.participants())
    )]
    pub fn run_with_cancel<O: TableObjective>(
        objective: &O,
        initial: Assignment,
        config: &AnnealConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<AnnealResult> {
        let schedule = config.schedule()?;
        let seed = resolve_seed(config.seed);
        let mut rng = create_rng(seed);

        info!(
            checkpoints = schedule.len(),
            microsteps = config.microsteps,
            seed,
            "Starting swap annealing."
        );

        let result = Self::run_schedule(
            objective,
            initial,
            &schedule,
            config.microsteps,
            &mut rng,
            cancel.as_deref(),
            seed,
        );

        info!(
            initial_score = result.initial_score,
            final_score = result.final_score,
            acceptance = result.acceptance_ratio(),
            cancelled = result.cancelled,
            "Annealing finished."
        );
        Ok(result)
    }

    /// Runs `restarts` independent anneals from the same initial assignment
    /// with seeds `seed, seed + 1, ...` and returns the one with the highest
    /// final score (lowest restart index on ties).
    ///
    /// With the `parallel` feature the restarts run on the rayon pool.
    pub fn run_restarts<O: TableObjective>(
        objective: &O,
        initial: &Assignment,
        config: &AnnealConfig,
        restarts: usize,
    ) -> Result<AnnealResult> {
        if restarts == 0 {
            return Err(SeatingError::InvalidAnnealConfig(
                "restarts must be positive".into(),
            ));
        }
        let schedule = config.schedule()?;
        let base_seed = resolve_seed(config.seed);

        let run_one = |restart: usize| {
            let seed = base_seed.wrapping_add(restart as u64);
            let mut rng = create_rng(seed);
            let result = Self::run_schedule(
                objective,
                initial.clone(),
                &schedule,
                config.microsteps,
                &mut rng,
                None,
                seed,
            );
            debug!(restart, seed, final_score = result.final_score, "Restart finished.");
            result
        };

        #[cfg(feature = "parallel")]
        let results: Vec<AnnealResult> = {
            use rayon::prelude::*;
            (0..restarts).into_par_iter().map(run_one).collect()
        };
        #[cfg(not(feature = "parallel"))]
        let results: Vec<AnnealResult> = (0..restarts).map(run_one).collect();

        let mut best: Option<AnnealResult> = None;
        for result in results {
            if best
                .as_ref()
                .is_none_or(|b| result.final_score > b.final_score)
            {
                best = Some(result);
            }
        }
        let best = best.ok_or_else(|| {
            SeatingError::InvalidAnnealConfig("no restart produced a result".into())
        })?;
        info!(
            restarts,
            seed = best.seed,
            final_score = best.final_score,
            "Selected best restart."
        );
        Ok(best)
    }

    /// Cooling loop over a prepared schedule with a caller-owned generator.
    pub fn run_schedule<O: TableObjective, R: Rng>(
        objective: &O,
        initial: Assignment,
        schedule: &Schedule,
        microsteps: usize,
        rng: &mut R,
        cancel: Option<&AtomicBool>,
        seed: u64,
    ) -> AnnealResult {
        let mut assignment = initial;
        let initial_score = objective.assignment_score(&assignment);
        let mut trace = ScoreTrace::with_capacity(schedule.len());
        let mut totals = MoveStats::default();
        let mut cancelled = false;

        for checkpoint in schedule.iter() {
            if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                warn!(checkpoint = checkpoint.index, "Annealing cancelled.");
                cancelled = true;
                break;
            }

            let mut stats = MoveStats::default();
            for _ in 0..microsteps {
                microstep(objective, &mut assignment, checkpoint.temperature, rng, &mut stats);
            }
            totals.proposals += stats.proposals;
            totals.accepted += stats.accepted;
            totals.improving += stats.improving;

            let score = objective.assignment_score(&assignment);
            debug!(
                checkpoint = checkpoint.index,
                t = checkpoint.t,
                temperature = checkpoint.temperature,
                score,
                accepted = stats.accepted,
                "Checkpoint complete."
            );
            trace.push(TraceEntry {
                checkpoint: checkpoint.index,
                t: checkpoint.t,
                temperature: checkpoint.temperature,
                score,
                accepted: stats.accepted,
            });
        }

        let final_score = trace.last().map_or(initial_score, |e| e.score);
        AnnealResult {
            assignment,
            initial_score,
            final_score,
            trace,
            proposals: totals.proposals,
            accepted_moves: totals.accepted,
            improving_moves: totals.improving,
            cancelled,
            seed,
        }
    }
}

/// One propose / score / accept-or-undo cycle. A no-op with fewer than two tables.
fn microstep<O: TableObjective, R: Rng>(
    objective: &O,
    assignment: &mut Assignment,
    temperature: f64,
    rng: &mut R,
    stats: &mut MoveStats,
) {
    if assignment.len() < 2 {
        return;
    }
    let pair = index::sample(rng, assignment.len(), 2);
    let (a, b) = (pair.index(0), pair.index(1));

    let prev =
        objective.table_score(assignment.table(a)) + objective.table_score(assignment.table(b));

    let pos_a = rng.random_range(0..assignment.table(a).len());
    let pos_b = rng.random_range(0..assignment.table(b).len());
    assignment.swap_one(a, b, pos_a, pos_b);

    let next =
        objective.table_score(assignment.table(a)) + objective.table_score(assignment.table(b));
    stats.proposals += 1;

    if accept_move(prev, next, temperature, rng) {
        stats.accepted += 1;
        if next > prev {
            stats.improving += 1;
        }
    } else {
        assignment.swap_one(a, b, pos_a, pos_b);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::{FeatureMatrix, TopicMatrix};
    use crate::score::{ScoreConfig, Scorer};
    use proptest::prelude::*;

    // ---- Objective that counts distinct groups per table ----

    struct DistinctGroups {
        group: Vec<usize>,
    }

    impl TableObjective for DistinctGroups {
        fn table_score(&self, members: &[usize]) -> f64 {
            let mut g: Vec<usize> = members.iter().map(|&p| self.group[p]).collect();
            g.sort_unstable();
            g.dedup();
            g.len() as f64
        }
    }

    /// Objective that never changes, so every swap is a tie.
    struct Flat;

    impl TableObjective for Flat {
        fn table_score(&self, _members: &[usize]) -> f64 {
            0.0
        }
    }

    fn grouped(n: usize, groups: usize) -> DistinctGroups {
        // participants 0..n in contiguous blocks; round-robin seats mix them poorly
        DistinctGroups {
            group: (0..n).map(|p| p * groups / n).collect(),
        }
    }

    #[test]
    fn test_acceptance_probability() {
        assert_eq!(acceptance_probability(1.0, 2.0, 1e-12), 1.0);
        assert_eq!(acceptance_probability(1.0, 2.0, 1e12), 1.0);
        assert!((acceptance_probability(2.0, 1.0, 1.0) - (-1.0f64).exp()).abs() < 1e-12);
        assert_eq!(acceptance_probability(1.0, 1.0, 0.3), 1.0);
        assert!(acceptance_probability(2.0, 1.0, 1e-6) < 1e-100);
    }

    #[test]
    fn test_improving_move_always_accepted() {
        let mut rng = create_rng(42);
        for _ in 0..100 {
            assert!(accept_move(0.0, 1e-9, 1e-9, &mut rng));
        }
    }

    #[test]
    fn test_worsening_move_rejected_when_cold() {
        let mut rng = create_rng(42);
        for _ in 0..100 {
            assert!(!accept_move(1.0, 0.0, 1e-6, &mut rng));
        }
    }

    #[test]
    fn test_trace_has_one_entry_per_checkpoint() {
        let objective = grouped(12, 3);
        let initial = Assignment::initialize(12, 3).unwrap();
        let config = AnnealConfig::default()
            .with_steps(10)
            .with_microsteps(20)
            .with_seed(42);
        let result = AnnealRunner::run(&objective, initial, &config).unwrap();

        assert_eq!(result.trace.len(), 9);
        assert_eq!(result.proposals, 9 * 20);
        assert!(!result.cancelled);
        assert_eq!(result.seed, 42);
        assert_eq!(result.final_score, objective.assignment_score(&result.assignment));
        let per_checkpoint: usize = result.trace.entries().iter().map(|e| e.accepted).sum();
        assert_eq!(per_checkpoint, result.accepted_moves);
    }

    #[test]
    fn test_anneal_improves_grouping() {
        // 3 tables, 3 groups of 4: best is every table holding all 3 groups.
        let group: Vec<usize> = vec![0, 0, 0, 1, 1, 1, 2, 2, 2, 0, 1, 2];
        let objective = DistinctGroups { group };
        let initial = Assignment::from_tables(
            12,
            vec![vec![0, 1, 2, 9], vec![3, 4, 5, 10], vec![6, 7, 8, 11]],
        )
        .unwrap();
        let config = AnnealConfig::default()
            .with_steps(64)
            .with_microsteps(100)
            .with_temperature_scale(0.2)
            .with_seed(7);
        let result = AnnealRunner::run(&objective, initial, &config).unwrap();

        assert!(result.initial_score < 9.0);
        assert!((result.final_score - 9.0).abs() < 1e-12, "got {}", result.final_score);
        assert!(result.improving_moves > 0);
    }

    #[test]
    fn test_same_seed_same_result() {
        let objective = grouped(20, 4);
        let config = AnnealConfig::default()
            .with_steps(16)
            .with_microsteps(30)
            .with_seed(9);
        let a = AnnealRunner::run(&objective, Assignment::initialize(20, 4).unwrap(), &config).unwrap();
        let b = AnnealRunner::run(&objective, Assignment::initialize(20, 4).unwrap(), &config).unwrap();
        assert_eq!(a.assignment, b.assignment);
        assert_eq!(a.trace, b.trace);
    }

    #[test]
    fn test_rejects_degenerate_schedule() {
        let err = AnnealRunner::run(
            &Flat,
            Assignment::initialize(4, 2).unwrap(),
            &AnnealConfig::default().with_steps(1),
        )
        .unwrap_err();
        assert!(matches!(err, SeatingError::DegenerateSchedule { steps: 1 }));
    }

    #[test]
    fn test_cancellation() {
        let config = AnnealConfig::default().with_seed(42);
        // Set before running, so cancellation happens at the first checkpoint.
        let cancel = Arc::new(AtomicBool::new(true));
        let initial = Assignment::initialize(8, 2).unwrap();
        let result = AnnealRunner::run_with_cancel(&Flat, initial.clone(), &config, Some(cancel)).unwrap();
        assert!(result.cancelled);
        assert!(result.trace.is_empty());
        assert_eq!(result.assignment, initial);
        assert_eq!(result.final_score, result.initial_score);
    }

    #[test]
    fn test_single_table_records_trace_without_moves() {
        let initial = Assignment::initialize(5, 1).unwrap();
        let config = AnnealConfig::default().with_steps(5).with_microsteps(10).with_seed(1);
        let result = AnnealRunner::run(&Flat, initial.clone(), &config).unwrap();
        assert_eq!(result.trace.len(), 4);
        assert_eq!(result.proposals, 0);
        assert_eq!(result.assignment, initial);
    }

    #[test]
    fn test_ties_are_accepted() {
        let config = AnnealConfig::default().with_steps(3).with_microsteps(50).with_seed(3);
        let result = AnnealRunner::run(&Flat, Assignment::initialize(10, 2).unwrap(), &config).unwrap();
        assert_eq!(result.accepted_moves, result.proposals);
        assert_eq!(result.improving_moves, 0);
        assert!((result.acceptance_ratio() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_restarts_pick_best() {
        let objective = grouped(24, 4);
        let initial = Assignment::initialize(24, 4).unwrap();
        let config = AnnealConfig::default()
            .with_steps(8)
            .with_microsteps(10)
            .with_seed(100);
        let best = AnnealRunner::run_restarts(&objective, &initial, &config, 4).unwrap();
        for restart in 0..4u64 {
            let single = AnnealRunner::run(
                &objective,
                initial.clone(),
                &config.clone().with_seed(100 + restart),
            )
            .unwrap();
            assert!(best.final_score >= single.final_score);
        }
        assert!((100..104).contains(&best.seed));
    }

    #[test]
    fn test_restarts_reject_zero() {
        let initial = Assignment::initialize(4, 2).unwrap();
        let config = AnnealConfig::default().with_seed(1);
        assert!(AnnealRunner::run_restarts(&Flat, &initial, &config, 0).is_err());
    }

    #[test]
    fn test_scorer_drives_runner() {
        let features = FeatureMatrix::new(6, 1, vec![0, 0, 0, 1, 1, 1]).unwrap();
        let topics = TopicMatrix::from_rows(1, &vec![vec![true]; 6]).unwrap();
        let config = ScoreConfig::new(vec![2.0], 1.0, vec![1.0, 0.0]);
        let scorer = Scorer::new(&features, &topics, &config).unwrap();
        // tables [0,1,2] and [3,4,5] hold one value each
        let initial = Assignment::from_tables(6, vec![vec![0, 1, 2], vec![3, 4, 5]]).unwrap();
        let anneal = AnnealConfig::default().with_steps(8).with_microsteps(20).with_seed(5);
        let result = AnnealRunner::run(&scorer, initial, &anneal).unwrap();
        assert!((result.initial_score - 4.0).abs() < 1e-12);
        assert!((result.final_score - 8.0).abs() < 1e-12);
    }

    // ---- Rollback: a rejected microstep leaves the assignment untouched ----

    /// Any swap out of the initial state lowers the score.
    struct Pinned {
        home: Vec<usize>,
    }

    impl TableObjective for Pinned {
        fn table_score(&self, members: &[usize]) -> f64 {
            let first = members[0];
            members.iter().filter(|&&p| self.home[p] == self.home[first]).count() as f64
        }
    }

    proptest! {
        #[test]
        fn prop_rejected_swaps_roll_back(seed in any::<u64>(), n in 4usize..20) {
            let initial = Assignment::initialize(n, 2).unwrap();
            let home: Vec<usize> = (0..n).map(|p| p % 2).collect();
            let objective = Pinned { home };
            let mut assignment = initial.clone();
            let mut rng = create_rng(seed);
            let mut stats = MoveStats::default();
            for _ in 0..20 {
                microstep(&objective, &mut assignment, 1e-9, &mut rng, &mut stats);
                prop_assert_eq!(&assignment, &initial);
            }
            prop_assert_eq!(stats.accepted, 0);
        }

        #[test]
        fn prop_run_preserves_partition_and_sizes(
            seed in any::<u64>(),
            n in 2usize..30,
            m_seed in 0usize..100,
        ) {
            let m = 1 + m_seed % n;
            let objective = grouped(n, 3.min(n));
            let initial = Assignment::initialize(n, m).unwrap();
            let sizes = initial.sizes();
            let config = AnnealConfig::default()
                .with_steps(4)
                .with_microsteps(25)
                .with_seed(seed);
            let result = AnnealRunner::run(&objective, initial, &config).unwrap();
            prop_assert!(result.assignment.is_partition());
            prop_assert_eq!(result.assignment.sizes(), sizes);
            prop_assert_eq!(result.trace.len(), 3);
        }
    }
}
