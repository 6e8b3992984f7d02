//! Simulated annealing over table swaps.
//!
//! A single-assignment trajectory search. Each proposal swaps one member
//! between two random tables and is kept by the Metropolis rule under a
//! logarithmic cooling schedule `T(t) = -A ln(t)`. Rejected swaps are
//! undone in place, so the assignment is always a valid partition.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Metropolis et al. (1953), "Equation of State Calculations by Fast Computing Machines"

mod config;
mod runner;
mod types;

pub use config::{AnnealConfig, Checkpoint, Schedule};
pub use runner::{accept_move, acceptance_probability, AnnealResult, AnnealRunner};
pub use types::{ScoreTrace, TraceEntry};
