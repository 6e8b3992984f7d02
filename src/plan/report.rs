//! Annealed plans, per-table summaries and export rows.

use std::fmt;

use super::problem::SeatingProblem;
use crate::anneal::{AnnealResult, ScoreTrace};
use crate::assignment::Assignment;

/// One exported row: a participant and where they sit.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExportRecord {
    pub name: String,
    /// Raw attribute values, in encoding order.
    pub attributes: Vec<String>,
    /// 1-based table number.
    pub table_id: usize,
    /// Dominant topic of the participant's table.
    pub topic: Option<String>,
}

/// Human-readable view of one table.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TableSummary {
    /// 1-based table number.
    pub table_id: usize,
    pub dominant_topic: Option<String>,
    /// `(topic, members declaring it)` for every topic present at the table.
    pub topic_counts: Vec<(String, u32)>,
    /// `(name, attribute values)` per member, in seat order.
    pub members: Vec<(String, Vec<String>)>,
}

impl fmt::Display for TableSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "-".repeat(30);
        writeln!(f, "{rule}{:02}{rule}", self.table_id)?;
        writeln!(
            f,
            "Top Topic: {}",
            self.dominant_topic.as_deref().unwrap_or("None")
        )?;
        let counts: Vec<String> = self
            .topic_counts
            .iter()
            .map(|(topic, count)| format!("{topic}={count}"))
            .collect();
        writeln!(f, "Topics: {}", counts.join(", "))?;
        for (name, attributes) in &self.members {
            writeln!(f, "  {name} | {}", attributes.join(" | "))?;
        }
        Ok(())
    }
}

/// An annealed assignment together with the problem it seats.
#[derive(Debug, Clone)]
pub struct SeatingPlan<'p> {
    problem: &'p SeatingProblem,
    result: AnnealResult,
    dominant_topics: Vec<Option<usize>>,
}

impl<'p> SeatingPlan<'p> {
    pub(crate) fn new(problem: &'p SeatingProblem, result: AnnealResult) -> Self {
        let dominant_topics = result.assignment.dominant_topics(problem.topics());
        Self {
            problem,
            result,
            dominant_topics,
        }
    }

    pub fn assignment(&self) -> &Assignment {
        &self.result.assignment
    }

    pub fn trace(&self) -> &ScoreTrace {
        &self.result.trace
    }

    pub fn result(&self) -> &AnnealResult {
        &self.result
    }

    pub fn into_result(self) -> AnnealResult {
        self.result
    }

    /// Dominant topic label per table, lowest topic index on ties.
    pub fn dominant_topic(&self, table: usize) -> Option<&str> {
        self.dominant_topics
            .get(table)
            .copied()
            .flatten()
            .and_then(|topic| self.problem.vocabulary().name(topic))
    }

    pub fn dominant_topic_labels(&self) -> Vec<Option<&str>> {
        (0..self.dominant_topics.len())
            .map(|table| self.dominant_topic(table))
            .collect()
    }

    fn attribute_values(&self, participant: usize) -> Vec<String> {
        self.problem
            .encoding()
            .attributes()
            .iter()
            .map(|a| {
                a.index
                    .value(a.codes[participant])
                    .unwrap_or_default()
                    .to_string()
            })
            .collect()
    }

    /// One row per participant, in roster order.
    pub fn export_records(&self) -> Vec<ExportRecord> {
        let seats = self.assignment().table_by_participant();
        self.problem
            .roster()
            .records()
            .iter()
            .zip(seats)
            .enumerate()
            .filter_map(|(participant, (record, seat))| {
                let table = seat?;
                Some(ExportRecord {
                    name: record.name.clone(),
                    attributes: self.attribute_values(participant),
                    table_id: table + 1,
                    topic: self.dominant_topic(table).map(str::to_string),
                })
            })
            .collect()
    }

    pub fn summaries(&self) -> Vec<TableSummary> {
        let vocabulary = self.problem.vocabulary();
        let roster = self.problem.roster();
        self.assignment()
            .tables()
            .iter()
            .enumerate()
            .map(|(table, members)| {
                let topic_counts = self
                    .assignment()
                    .topic_counts(table, self.problem.topics())
                    .into_iter()
                    .enumerate()
                    .filter(|&(_, count)| count > 0)
                    .filter_map(|(topic, count)| {
                        vocabulary.name(topic).map(|name| (name.to_string(), count))
                    })
                    .collect();
                let members = members
                    .iter()
                    .filter_map(|&p| {
                        roster
                            .get(p)
                            .map(|r| (r.name.clone(), self.attribute_values(p)))
                    })
                    .collect();
                TableSummary {
                    table_id: table + 1,
                    dominant_topic: self.dominant_topic(table).map(str::to_string),
                    topic_counts,
                    members,
                }
            })
            .collect()
    }
}
