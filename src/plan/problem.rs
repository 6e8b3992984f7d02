//! Encoded seating problem.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use tracing::info;

use super::report::SeatingPlan;
use crate::anneal::{AnnealConfig, AnnealRunner};
use crate::assignment::Assignment;
use crate::encode::{
    encode_categorical, CategoricalEncoding, FeatureMatrix, ParticipantRecord, Roster,
    TopicMatrix, TopicVocabulary, DEFAULT_TOPIC_SEPARATOR,
};
use crate::error::Result;
use crate::score::{ScoreConfig, Scorer};

/// Participants encoded once into the optimizer's read-only inputs.
#[derive(Debug, Clone)]
pub struct SeatingProblem {
    roster: Roster,
    encoding: CategoricalEncoding,
    vocabulary: TopicVocabulary,
    features: FeatureMatrix,
    topics: TopicMatrix,
}

impl SeatingProblem {
    /// Encodes `records` on `attribute_names` with the default topic separator.
    pub fn from_records<S: AsRef<str>>(
        records: Vec<ParticipantRecord>,
        attribute_names: &[S],
    ) -> Result<Self> {
        Self::with_separator(records, attribute_names, DEFAULT_TOPIC_SEPARATOR)
    }

    /// Encodes `records`, failing on duplicate names, missing attributes
    /// or malformed topic tags.
    pub fn with_separator<S: AsRef<str>>(
        records: Vec<ParticipantRecord>,
        attribute_names: &[S],
        separator: char,
    ) -> Result<Self> {
        let roster = Roster::new(records)?;
        let encoding = encode_categorical(roster.records(), attribute_names)?;
        let features = encoding.to_feature_matrix()?;
        let vocabulary = TopicVocabulary::build(roster.records(), separator)?;
        let topics = vocabulary.encode(roster.records())?;
        info!(
            participants = roster.len(),
            features = features.cols(),
            topics = vocabulary.len(),
            "Encoded roster."
        );
        Ok(Self {
            roster,
            encoding,
            vocabulary,
            features,
            topics,
        })
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn encoding(&self) -> &CategoricalEncoding {
        &self.encoding
    }

    pub fn vocabulary(&self) -> &TopicVocabulary {
        &self.vocabulary
    }

    pub fn features(&self) -> &FeatureMatrix {
        &self.features
    }

    pub fn topics(&self) -> &TopicMatrix {
        &self.topics
    }

    pub fn participants(&self) -> usize {
        self.roster.len()
    }

    pub fn scorer<'a>(&'a self, config: &'a ScoreConfig) -> Result<Scorer<'a>> {
        Scorer::new(&self.features, &self.topics, config)
    }

    /// Round-robin starting assignment over `tables` tables.
    pub fn initial_assignment(&self, tables: usize) -> Result<Assignment> {
        Assignment::initialize(self.participants(), tables)
    }

    /// Anneals the round-robin assignment into a seating plan.
    pub fn solve(
        &self,
        tables: usize,
        score: &ScoreConfig,
        anneal: &AnnealConfig,
    ) -> Result<SeatingPlan<'_>> {
        self.solve_with_cancel(tables, score, anneal, None)
    }

    pub fn solve_with_cancel(
        &self,
        tables: usize,
        score: &ScoreConfig,
        anneal: &AnnealConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<SeatingPlan<'_>> {
        let scorer = self.scorer(score)?;
        let initial = self.initial_assignment(tables)?;
        let result = AnnealRunner::run_with_cancel(&scorer, initial, anneal, cancel)?;
        Ok(SeatingPlan::new(self, result))
    }

    /// Best of `restarts` independent anneals.
    pub fn solve_restarts(
        &self,
        tables: usize,
        score: &ScoreConfig,
        anneal: &AnnealConfig,
        restarts: usize,
    ) -> Result<SeatingPlan<'_>> {
        let scorer = self.scorer(score)?;
        let initial = self.initial_assignment(tables)?;
        let result = AnnealRunner::run_restarts(&scorer, &initial, anneal, restarts)?;
        Ok(SeatingPlan::new(self, result))
    }
}
