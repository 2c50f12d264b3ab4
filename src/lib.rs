//! This crate turns pre-tokenized documents into term frequency and
//! TF-IDF vectors.
//!
//! Data flow:
//! documents -> [Vocabulary] (terms and document frequencies)
//! -> count vectors ([term_frequency]) -> weighted vectors ([tfidf]).
//!
//! All vectors of one call are indexed by the same vocabulary.
pub mod error;
pub mod input;
pub mod utils;
pub mod vectorizer;

/// Crate error and result alias
pub use error::{Result, VectorizerError};

/// Vocabulary Builder
/// Learns the ordered, pruned term set of a corpus with its
/// document frequency table.
///
/// Terms are ordered by descending total corpus count, ties broken by
/// first appearance in the corpus. The vocabulary is immutable once built
/// and can be shared across threads and calls.
///
/// # Serialization
/// Supported, and as CBOR through `to_cbor` / `from_cbor`.
pub use vectorizer::vocabulary::Vocabulary;

/// Vectorizer options
/// Document frequency bounds, `max_features`, term ordering,
/// IDF method and row normalization.
pub use vectorizer::config::{DocumentFrequency, Normalization, TermOrdering, VectorizerConfig};

/// Entry points
/// `build_vocabulary`, `term_frequency` and `tfidf` over token sequences.
pub use vectorizer::{build_vocabulary, term_frequency, tfidf, tfidf_with_vocabulary};

/// TF-IDF Weighter
/// Weighs count vectors against the vocabulary they were counted with.
/// The `TFIDFEngine` trait lets callers replace the TF and IDF formulas.
pub use vectorizer::tfidf::{DefaultTFIDFEngine, IdfMethod, TFIDFEngine, TfIdfWeighter, WeightedVector};

/// Term-Frequency Vectorizer output
pub use vectorizer::tf::CountVector;

/// Sparse vector used for every output row
pub use utils::vector::SparseVec;

/// Legacy input adapter
/// Accepts raw text next to token sequences and reports a deprecation
/// notice when it had to tokenize.
pub use input::{
    tfidf_input, tfidf_input_with, term_frequency_input, DefaultTokenizer, DeprecationNotice, DocumentInput,
    Tokenizer, Vectorized,
};
