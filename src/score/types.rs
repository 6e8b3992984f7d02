//! Objective seam between the scorer and the annealer.

use crate::assignment::Assignment;

/// Scores one table of participant indices. Higher is better.
///
/// The annealer only ever rescores the two tables touched by a swap, so
/// the whole-assignment score must be the sum of per-table scores.
pub trait TableObjective: Send + Sync {
    /// Score of a single table given its member indices.
    fn table_score(&self, members: &[usize]) -> f64;

    /// Sum of [`table_score`](Self::table_score) over every table.
    fn assignment_score(&self, assignment: &Assignment) -> f64 {
        assignment
            .tables()
            .iter()
            .map(|members| self.table_score(members))
            .sum()
    }
}
