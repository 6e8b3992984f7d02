//! Scoring parameters.

use crate::error::{Result, SeatingError};

/// Exponential bases and linear weights of the table objective.
///
/// The objective of one table is the dot product of `weights` with the
/// term vector `[b_0^d_0, .., b_{F-1}^d_{F-1}, topic_base^max_overlap]`,
/// where `d_j` is the number of distinct values of feature `j` at the table
/// and `max_overlap` is the member count of its most crowded topic.
/// Weight order is therefore every feature weight in feature order, then
/// the topic weight last.
///
/// # Examples
///
/// ```
/// use u_seating::score::ScoreConfig;
///
/// let config = ScoreConfig::new(vec![1.4, 1.2, 1.2], 1.4, vec![1.0, 1.0, 1.0, 0.5]);
/// assert!(config.validate(3).is_ok());
/// assert!(config.validate(2).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoreConfig {
    /// One diversity base per categorical feature. Bases above 1 reward
    /// more distinct values; a larger base makes that feature matter more.
    pub feature_bases: Vec<f64>,

    /// Base of the topic-alignment term.
    pub topic_base: f64,

    /// Linear weights, length `feature_bases.len() + 1`.
    pub weights: Vec<f64>,
}

impl ScoreConfig {
    pub fn new(feature_bases: Vec<f64>, topic_base: f64, weights: Vec<f64>) -> Self {
        Self {
            feature_bases,
            topic_base,
            weights,
        }
    }

    /// Same base and unit weight for every feature, plus the topic term.
    pub fn uniform(
        feature_count: usize,
        feature_base: f64,
        topic_base: f64,
        topic_weight: f64,
    ) -> Self {
        let mut weights = vec![1.0; feature_count];
        weights.push(topic_weight);
        Self {
            feature_bases: vec![feature_base; feature_count],
            topic_base,
            weights,
        }
    }

    pub fn feature_count(&self) -> usize {
        self.feature_bases.len()
    }

    /// Checks the vector lengths against `feature_count` and that every
    /// base is finite and positive and every weight finite.
    pub fn validate(&self, feature_count: usize) -> Result<()> {
        if self.feature_bases.len() != feature_count {
            return Err(SeatingError::InvalidScoreConfig(format!(
                "expected {feature_count} feature bases, got {}",
                self.feature_bases.len()
            )));
        }
        if self.weights.len() != feature_count + 1 {
            return Err(SeatingError::InvalidScoreConfig(format!(
                "expected {} weights (features + topic), got {}",
                feature_count + 1,
                self.weights.len()
            )));
        }
        let mut bases = self.feature_bases.iter().chain(std::iter::once(&self.topic_base));
        if let Some(base) = bases.find(|b| !b.is_finite() || **b <= 0.0) {
            return Err(SeatingError::InvalidScoreConfig(format!(
                "bases must be finite and positive, got {base}"
            )));
        }
        if let Some(w) = self.weights.iter().find(|w| !w.is_finite()) {
            return Err(SeatingError::InvalidScoreConfig(format!(
                "weights must be finite, got {w}"
            )));
        }
        Ok(())
    }
}
