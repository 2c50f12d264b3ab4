//! Error definitions for vectorization
use thiserror::Error;

use crate::vectorizer::config::DocumentFrequency;

pub type Result<T> = std::result::Result<T, VectorizerError>;

#[derive(Error, Debug)]
pub enum VectorizerError {
    #[error("{bound} document frequency must be a non-negative integer or a fraction in [0, 1], got {value}")]
    InvalidDocumentFrequency {
        bound: &'static str,
        value: DocumentFrequency,
    },
    #[error("min document frequency cannot be greater than max document frequency (min = {0}, max = {1})")]
    FlippedDocumentFrequencies(DocumentFrequency, DocumentFrequency),
    #[error("max_features must be a positive integer, got {0}")]
    InvalidMaxFeatures(usize),
    #[error("count vector has dimension {got}, vocabulary has {expected} terms")]
    DimensionMismatch { expected: usize, got: usize },
    #[error("invalid vocabulary: {0}")]
    InvalidVocabulary(String),
    #[error(transparent)]
    Serialization(#[from] serde_cbor::Error),
}
