//! Table scoring.
//!
//! A table is scored by how diverse its members are across the
//! categorical features and by how crowded its most popular topic is.
//! Diversity is rewarded exponentially: each additional distinct value of
//! feature `j` multiplies that feature's term by its base.
//!
//! The topic-alignment term `topic_base ^ max_overlap` enters the
//! objective with its configured weight as-is; with a positive weight,
//! more topical overlap raises the score.

mod config;
mod scorer;
mod types;

pub use config::ScoreConfig;
pub use scorer::{
    distinct_count, diversity_terms, max_topic_overlap, topic_alignment_term, Scorer,
};
pub use types::TableObjective;
