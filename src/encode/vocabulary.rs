//! Topic vocabulary and one-hot topic encoding.

use std::collections::HashMap;

use super::types::{ParticipantRecord, TopicMatrix};
use crate::error::{Result, SeatingError};

/// Separator between the two tags of a topic string.
pub const DEFAULT_TOPIC_SEPARATOR: char = ';';

/// Splits a raw topic string into its one or two tags.
///
/// Trailing separators are stripped first, so `"a;"` is the single tag
/// `"a"`. Empty tags and more than two tags are rejected.
pub fn split_topics<'a>(
    participant: &str,
    raw: &'a str,
    separator: char,
) -> Result<Vec<&'a str>> {
    let tags: Vec<&str> = raw.trim_end_matches(separator).split(separator).collect();
    if tags.len() > 2 || tags.iter().any(|tag| tag.is_empty()) {
        return Err(SeatingError::MalformedTopics {
            participant: participant.to_string(),
            raw: raw.to_string(),
        });
    }
    Ok(tags)
}

/// Distinct topic tags with stable indices in first-seen order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TopicVocabulary {
    separator: char,
    names: Vec<String>,
    index: HashMap<String, usize>,
}

impl TopicVocabulary {
    /// Scans every record's topic string and assigns each new tag the next index.
    pub fn build(records: &[ParticipantRecord], separator: char) -> Result<Self> {
        let mut vocabulary = Self {
            separator,
            names: Vec::new(),
            index: HashMap::new(),
        };
        for record in records {
            for tag in split_topics(&record.name, &record.topics, separator)? {
                if !vocabulary.index.contains_key(tag) {
                    vocabulary.index.insert(tag.to_string(), vocabulary.names.len());
                    vocabulary.names.push(tag.to_string());
                }
            }
        }
        Ok(vocabulary)
    }

    pub fn separator(&self) -> char {
        self.separator
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn index_of(&self, tag: &str) -> Option<usize> {
        self.index.get(tag).copied()
    }

    /// Reverse lookup, index to tag.
    pub fn name(&self, topic: usize) -> Option<&str> {
        self.names.get(topic).map(String::as_str)
    }

    /// Tags in index order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Encodes each record's tags as a row of the N x T membership matrix.
    pub fn encode(&self, records: &[ParticipantRecord]) -> Result<TopicMatrix> {
        let mut matrix = TopicMatrix::zeros(records.len(), self.len());
        for (i, record) in records.iter().enumerate() {
            for tag in split_topics(&record.name, &record.topics, self.separator)? {
                let topic = self
                    .index_of(tag)
                    .ok_or_else(|| SeatingError::UnknownTopic {
                        tag: tag.to_string(),
                    })?;
                matrix.set(i, topic);
            }
        }
        Ok(matrix)
    }
}

/// Builds the topic vocabulary using the default separator.
pub fn build_topic_vocabulary(records: &[ParticipantRecord]) -> Result<TopicVocabulary> {
    TopicVocabulary::build(records, DEFAULT_TOPIC_SEPARATOR)
}

/// Encodes records against an existing vocabulary.
pub fn encode_topics(
    records: &[ParticipantRecord],
    vocabulary: &TopicVocabulary,
) -> Result<TopicMatrix> {
    vocabulary.encode(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(topics: &[&str]) -> Vec<ParticipantRecord> {
        topics
            .iter()
            .enumerate()
            .map(|(i, t)| ParticipantRecord::new(format!("p{i}"), *t))
            .collect()
    }

    #[test]
    fn test_split_strips_trailing_separator() {
        assert_eq!(split_topics("p", "ml;", ';').unwrap(), vec!["ml"]);
        assert_eq!(split_topics("p", "ml;hpc;", ';').unwrap(), vec!["ml", "hpc"]);
        assert_eq!(split_topics("p", "ml", ';').unwrap(), vec!["ml"]);
    }

    #[test]
    fn test_split_rejects_malformed() {
        assert!(split_topics("p", "", ';').is_err());
        assert!(split_topics("p", ";ml", ';').is_err());
        assert!(split_topics("p", "a;b;c", ';').is_err());
    }

    #[test]
    fn test_vocabulary_first_seen_order() {
        let recs = records(&["hpc;ml", "ml", "bio;", "hpc"]);
        let vocab = build_topic_vocabulary(&recs).unwrap();
        assert_eq!(vocab.names(), &["hpc", "ml", "bio"]);
        assert_eq!(vocab.index_of("bio"), Some(2));
        assert_eq!(vocab.name(1), Some("ml"));
        assert_eq!(vocab.name(3), None);
    }

    #[test]
    fn test_encode_topics_sets_one_or_two_bits() {
        let recs = records(&["hpc;ml", "ml;", "bio"]);
        let vocab = build_topic_vocabulary(&recs).unwrap();
        let m = encode_topics(&recs, &vocab).unwrap();
        assert_eq!(m.row(0), &[true, true, false]);
        assert_eq!(m.row(1), &[false, true, false]);
        assert_eq!(m.row(2), &[false, false, true]);
    }

    #[test]
    fn test_encode_unknown_topic_fails() {
        let vocab = build_topic_vocabulary(&records(&["ml"])).unwrap();
        let err = encode_topics(&records(&["quantum"]), &vocab).unwrap_err();
        assert!(matches!(err, SeatingError::UnknownTopic { ref tag } if tag == "quantum"));
    }

    #[test]
    fn test_custom_separator() {
        let recs = records(&["a|b|", "c"]);
        let vocab = TopicVocabulary::build(&recs, '|').unwrap();
        assert_eq!(vocab.len(), 3);
        assert_eq!(vocab.separator(), '|');
    }
}
