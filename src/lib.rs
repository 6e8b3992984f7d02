//! Diversity-aware table assignment by simulated annealing.
//!
//! Seats a fixed set of participants at a fixed number of tables so that
//! each table mixes categorical attributes (organization, seniority, ...)
//! while the topical make-up of the table is scored as well.
//!
//! - **Encoding** ([`encode`]): participant records to an N x F matrix of
//!   categorical codes and an N x T topic membership matrix.
//! - **Scoring** ([`score`]): per-table objective, exponential in the
//!   number of distinct values per feature and in the largest topic overlap.
//! - **Assignment** ([`assignment`]): the table partition, round-robin
//!   initialization and in-place swaps.
//! - **Annealing** ([`anneal`]): swap proposals accepted by the Metropolis
//!   rule under a logarithmic cooling schedule, with a per-checkpoint
//!   score trace.
//! - **Plans** ([`plan`]) and **I/O** ([`io`]): glue from CSV rosters to
//!   labelled tables and an exported assignment table.
//!
//! # Example
//!
//! ```
//! use u_seating::anneal::AnnealConfig;
//! use u_seating::encode::ParticipantRecord;
//! use u_seating::plan::SeatingProblem;
//! use u_seating::score::ScoreConfig;
//!
//! let records = vec![
//!     ParticipantRecord::new("Ada", "ml;hpc").with_attribute("Org", "BNL"),
//!     ParticipantRecord::new("Grace", "hpc").with_attribute("Org", "SBU"),
//!     ParticipantRecord::new("Alan", "ml").with_attribute("Org", "BNL"),
//!     ParticipantRecord::new("Kat", "bio;").with_attribute("Org", "MIT"),
//! ];
//! let problem = SeatingProblem::from_records(records, &["Org"]).unwrap();
//! let score = ScoreConfig::new(vec![1.2], 1.4, vec![1.0, 0.5]);
//! let anneal = AnnealConfig::default().with_steps(16).with_microsteps(32).with_seed(1);
//!
//! let plan = problem.solve(2, &score, &anneal).unwrap();
//! assert!(plan.assignment().is_partition());
//! assert_eq!(plan.trace().len(), 15);
//! ```

pub mod anneal;
pub mod assignment;
pub mod encode;
pub mod error;
pub mod io;
pub mod plan;
pub mod random;
pub mod score;

pub use error::{Result, SeatingError};
