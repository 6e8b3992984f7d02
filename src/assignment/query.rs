//! Read-only table queries used for reporting and export.

use super::store::Assignment;
use crate::encode::TopicMatrix;

/// Index of the largest count, lowest index on ties. `None` when empty.
pub fn argmax_first(counts: &[u32]) -> Option<usize> {
    let mut best: Option<(usize, u32)> = None;
    for (i, &c) in counts.iter().enumerate() {
        if best.is_none_or(|(_, b)| c > b) {
            best = Some((i, c));
        }
    }
    best.map(|(i, _)| i)
}

impl Assignment {
    /// Per-topic member counts at `table`.
    pub fn topic_counts(&self, table: usize, topics: &TopicMatrix) -> Vec<u32> {
        topics.topic_counts(self.table(table))
    }

    /// Topic with the most members at `table`; ties go to the lowest topic index.
    pub fn dominant_topic(&self, table: usize, topics: &TopicMatrix) -> Option<usize> {
        argmax_first(&self.topic_counts(table, topics))
    }

    /// [`dominant_topic`](Self::dominant_topic) for every table, in table order.
    pub fn dominant_topics(&self, topics: &TopicMatrix) -> Vec<Option<usize>> {
        (0..self.len())
            .map(|table| self.dominant_topic(table, topics))
            .collect()
    }
}
