//! From participant records to an exported seating plan.
//!
//! [`SeatingProblem`] encodes the roster once; [`SeatingPlan`] pairs an
//! annealing result with that problem so tables can be labelled and
//! exported by participant name.

mod problem;
mod report;

pub use problem::SeatingProblem;
pub use report::{ExportRecord, SeatingPlan, TableSummary};
