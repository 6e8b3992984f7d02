//! Participant records and the fixed-shape matrices built from them.

use std::collections::{HashMap, HashSet};

use crate::error::{Result, SeatingError};

/// One participant as supplied by the roster source.
///
/// `attributes` maps categorical attribute names to raw values; `topics`
/// holds one tag or two tags joined by the vocabulary separator.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParticipantRecord {
    pub name: String,
    pub attributes: HashMap<String, String>,
    pub topics: String,
}

impl ParticipantRecord {
    pub fn new(name: impl Into<String>, topics: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: HashMap::new(),
            topics: topics.into(),
        }
    }

    pub fn with_attribute(
        mut self,
        attribute: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.attributes.insert(attribute.into(), value.into());
        self
    }

    /// Returns the raw value of `attribute`, failing if it was never set.
    pub fn attribute(&self, attribute: &str) -> Result<&str> {
        self.attributes
            .get(attribute)
            .map(String::as_str)
            .ok_or_else(|| SeatingError::MissingAttribute {
                participant: self.name.clone(),
                attribute: attribute.to_string(),
            })
    }
}

/// A validated, ordered set of participants.
///
/// Participant `i` is `records()[i]`; this index is the identity used by
/// every matrix and assignment in the crate.
#[derive(Debug, Clone)]
pub struct Roster {
    records: Vec<ParticipantRecord>,
}

impl Roster {
    /// Builds a roster, rejecting duplicate participant names.
    pub fn new(records: Vec<ParticipantRecord>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert(record.name.as_str()) {
                return Err(SeatingError::DuplicateParticipant {
                    name: record.name.clone(),
                });
            }
        }
        Ok(Self { records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[ParticipantRecord] {
        &self.records
    }

    pub fn get(&self, participant: usize) -> Option<&ParticipantRecord> {
        self.records.get(participant)
    }
}

/// N x F matrix of encoded categorical values, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FeatureMatrix {
    rows: usize,
    cols: usize,
    data: Vec<u32>,
}

impl FeatureMatrix {
    /// Wraps row-major `data` of shape `rows x cols`.
    pub fn new(rows: usize, cols: usize, data: Vec<u32>) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(SeatingError::DimensionMismatch {
                what: "feature matrix cells",
                expected: rows * cols,
                actual: data.len(),
            });
        }
        Ok(Self { rows, cols, data })
    }

    /// Builds the matrix from per-attribute code columns of equal length.
    pub fn from_columns(rows: usize, columns: &[Vec<u32>]) -> Result<Self> {
        for column in columns {
            if column.len() != rows {
                return Err(SeatingError::DimensionMismatch {
                    what: "feature column length",
                    expected: rows,
                    actual: column.len(),
                });
            }
        }
        let cols = columns.len();
        let mut data = Vec::with_capacity(rows * cols);
        for i in 0..rows {
            data.extend(columns.iter().map(|column| column[i]));
        }
        Ok(Self { rows, cols, data })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn row(&self, participant: usize) -> &[u32] {
        &self.data[participant * self.cols..(participant + 1) * self.cols]
    }

    pub fn get(&self, participant: usize, feature: usize) -> u32 {
        self.data[participant * self.cols + feature]
    }
}

/// N x T binary topic membership matrix, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TopicMatrix {
    rows: usize,
    cols: usize,
    data: Vec<bool>,
}

impl TopicMatrix {
    /// An all-zero matrix of shape `rows x cols`.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![false; rows * cols],
        }
    }

    /// Builds the matrix from explicit rows of equal length `cols`.
    pub fn from_rows(cols: usize, rows: &[Vec<bool>]) -> Result<Self> {
        let mut matrix = Self::zeros(rows.len(), cols);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(SeatingError::DimensionMismatch {
                    what: "topic row length",
                    expected: cols,
                    actual: row.len(),
                });
            }
            matrix.data[i * cols..(i + 1) * cols].copy_from_slice(row);
        }
        Ok(matrix)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn row(&self, participant: usize) -> &[bool] {
        &self.data[participant * self.cols..(participant + 1) * self.cols]
    }

    pub fn get(&self, participant: usize, topic: usize) -> bool {
        self.data[participant * self.cols + topic]
    }

    pub(crate) fn set(&mut self, participant: usize, topic: usize) {
        self.data[participant * self.cols + topic] = true;
    }

    /// Per-topic member counts over `members` (the elementwise row sum).
    pub fn topic_counts(&self, members: &[usize]) -> Vec<u32> {
        let mut counts = vec![0u32; self.cols];
        for &p in members {
            for (count, &bit) in counts.iter_mut().zip(self.row(p)) {
                *count += u32::from(bit);
            }
        }
        counts
    }
}
