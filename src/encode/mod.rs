//! Feature encoding.
//!
//! Turns participant records into the two read-only inputs of the
//! optimizer: an N x F [`FeatureMatrix`] of categorical codes and an
//! N x T [`TopicMatrix`] of topic memberships.
//!
//! Indices are assigned in first-seen order, so encoding the same records
//! twice always produces the same matrices.

mod categorical;
mod types;
mod vocabulary;

pub use categorical::{encode_categorical, CategoricalEncoding, CategoryIndex, EncodedAttribute};
pub use types::{FeatureMatrix, ParticipantRecord, Roster, TopicMatrix};
pub use vocabulary::{
    build_topic_vocabulary, encode_topics, split_topics, TopicVocabulary, DEFAULT_TOPIC_SEPARATOR,
};
