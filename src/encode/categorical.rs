//! Categorical attribute indexing.

use std::collections::HashMap;

use super::types::{FeatureMatrix, ParticipantRecord};
use crate::error::{Result, SeatingError};

/// Value-to-code map for one categorical attribute, in order of first appearance.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CategoryIndex {
    attribute: String,
    values: Vec<String>,
    codes: HashMap<String, u32>,
}

impl CategoryIndex {
    /// Indexes the distinct values of `values`; the first one seen gets code 0.
    pub fn from_values<'a, I>(attribute: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut index = Self {
            attribute: attribute.into(),
            values: Vec::new(),
            codes: HashMap::new(),
        };
        for value in values {
            if !index.codes.contains_key(value) {
                index.codes.insert(value.to_string(), index.values.len() as u32);
                index.values.push(value.to_string());
            }
        }
        index
    }

    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Code of a raw value; values not seen while indexing are an error.
    pub fn code_of(&self, value: &str) -> Result<u32> {
        self.codes
            .get(value)
            .copied()
            .ok_or_else(|| SeatingError::UnknownCategory {
                attribute: self.attribute.clone(),
                value: value.to_string(),
            })
    }

    pub fn value(&self, code: u32) -> Option<&str> {
        self.values.get(code as usize).map(String::as_str)
    }
}

/// One encoded attribute: its index and the per-participant codes.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EncodedAttribute {
    pub index: CategoryIndex,
    pub codes: Vec<u32>,
}

/// Encoded categorical attributes, in the order they were requested.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CategoricalEncoding {
    participants: usize,
    attributes: Vec<EncodedAttribute>,
}

impl CategoricalEncoding {
    pub fn attributes(&self) -> &[EncodedAttribute] {
        &self.attributes
    }

    pub fn attribute(&self, name: &str) -> Option<&EncodedAttribute> {
        self.attributes.iter().find(|a| a.index.attribute() == name)
    }

    pub fn attribute_names(&self) -> Vec<&str> {
        self.attributes.iter().map(|a| a.index.attribute()).collect()
    }

    /// Stacks the code columns into an N x F matrix, column j = attribute j.
    pub fn to_feature_matrix(&self) -> Result<FeatureMatrix> {
        let columns: Vec<Vec<u32>> = self.attributes.iter().map(|a| a.codes.clone()).collect();
        FeatureMatrix::from_columns(self.participants, &columns)
    }
}

/// Indexes and encodes each named attribute across all records.
pub fn encode_categorical<S: AsRef<str>>(
    records: &[ParticipantRecord],
    attribute_names: &[S],
) -> Result<CategoricalEncoding> {
    let mut attributes = Vec::with_capacity(attribute_names.len());
    for name in attribute_names {
        let name = name.as_ref();
        let raw = records
            .iter()
            .map(|r| r.attribute(name))
            .collect::<Result<Vec<&str>>>()?;
        let index = CategoryIndex::from_values(name, raw.iter().copied());
        let codes = raw
            .iter()
            .map(|value| index.code_of(value))
            .collect::<Result<Vec<u32>>>()?;
        attributes.push(EncodedAttribute { index, codes });
    }
    Ok(CategoricalEncoding {
        participants: records.len(),
        attributes,
    })
}
