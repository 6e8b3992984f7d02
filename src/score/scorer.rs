//! Diversity and topic-alignment scoring.

use super::config::ScoreConfig;
use super::types::TableObjective;
use crate::encode::{FeatureMatrix, TopicMatrix};
use crate::error::{Result, SeatingError};

/// Number of distinct values of feature `feature` among `members`.
pub fn distinct_count(members: &[usize], features: &FeatureMatrix, feature: usize) -> usize {
    let mut values: Vec<u32> = members.iter().map(|&p| features.get(p, feature)).collect();
    values.sort_unstable();
    values.dedup();
    values.len()
}

/// `base_j ^ distinct_j` for every feature column `j`.
pub fn diversity_terms(members: &[usize], features: &FeatureMatrix, bases: &[f64]) -> Vec<f64> {
    bases
        .iter()
        .enumerate()
        .map(|(j, &base)| base.powi(distinct_count(members, features, j) as i32))
        .collect()
}

/// Member count of the most crowded topic at the table.
pub fn max_topic_overlap(members: &[usize], topics: &TopicMatrix) -> u32 {
    topics.topic_counts(members).into_iter().max().unwrap_or(0)
}

/// `base ^ max_overlap`. Grows with topical crowding; the sign of its
/// contribution is whatever the caller's weight makes it.
pub fn topic_alignment_term(members: &[usize], topics: &TopicMatrix, base: f64) -> f64 {
    base.powi(max_topic_overlap(members, topics) as i32)
}

/// Table objective over a fixed feature matrix, topic matrix and score config.
#[derive(Debug, Clone)]
pub struct Scorer<'a> {
    features: &'a FeatureMatrix,
    topics: &'a TopicMatrix,
    config: &'a ScoreConfig,
}

impl<'a> Scorer<'a> {
    /// Validates `config` against the matrices and binds them together.
    pub fn new(
        features: &'a FeatureMatrix,
        topics: &'a TopicMatrix,
        config: &'a ScoreConfig,
    ) -> Result<Self> {
        if features.rows() != topics.rows() {
            return Err(SeatingError::DimensionMismatch {
                what: "topic matrix rows",
                expected: features.rows(),
                actual: topics.rows(),
            });
        }
        config.validate(features.cols())?;
        Ok(Self {
            features,
            topics,
            config,
        })
    }

    pub fn participants(&self) -> usize {
        self.features.rows()
    }

    pub fn features(&self) -> &FeatureMatrix {
        self.features
    }

    pub fn topics(&self) -> &TopicMatrix {
        self.topics
    }

    pub fn config(&self) -> &ScoreConfig {
        self.config
    }

    /// The F+1 term vector: diversity terms in feature order, then topic alignment.
    pub fn terms(&self, members: &[usize]) -> Vec<f64> {
        let mut terms = diversity_terms(members, self.features, &self.config.feature_bases);
        terms.push(topic_alignment_term(members, self.topics, self.config.topic_base));
        terms
    }
}

impl TableObjective for Scorer<'_> {
    fn table_score(&self, members: &[usize]) -> f64 {
        self.terms(members)
            .iter()
            .zip(&self.config.weights)
            .map(|(term, weight)| term * weight)
            .sum()
    }
}
