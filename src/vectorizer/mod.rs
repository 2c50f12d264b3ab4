pub mod config;
pub mod corpus;
pub mod term;
pub mod tf;
pub mod tfidf;
pub mod vocabulary;

use tracing::trace;

use crate::error::Result;
use crate::vectorizer::config::VectorizerConfig;
use crate::vectorizer::tf::{count_vectors, CountVector};
use crate::vectorizer::tfidf::{TfIdfWeighter, WeightedVector};
use crate::vectorizer::vocabulary::Vocabulary;

/// Build the vocabulary and document frequency table of `documents`.
///
/// # Errors
/// Configuration errors, reported before any document is scanned.
pub fn build_vocabulary<D, T>(documents: &[D], config: &VectorizerConfig) -> Result<Vocabulary>
where
    D: AsRef<[T]> + Sync,
    T: AsRef<str> + Sync,
{
    Vocabulary::build(documents, config)
}

/// Count vectors of `documents`.
///
/// Without a vocabulary, one is built from `documents` with default bounds.
///
/// # Examples
/// ```
/// use term_vectorizer::term_frequency;
/// let docs = vec![vec!["a", "b", "c", "c"]];
/// let counts = term_frequency(&docs, None);
/// // vocabulary is [c, a, b]
/// assert_eq!(counts[0].to_dense(), vec![2, 1, 1]);
/// ```
pub fn term_frequency<D, T>(documents: &[D], vocabulary: Option<&Vocabulary>) -> Vec<CountVector>
where
    D: AsRef<[T]> + Sync,
    T: AsRef<str> + Sync,
{
    let built;
    let vocabulary = match vocabulary {
        Some(vocabulary) => vocabulary,
        None => {
            built = Vocabulary::build_default(documents);
            &built
        }
    };
    trace!(documents = documents.len(), dims = vocabulary.len(), "term frequency");
    count_vectors(vocabulary, documents)
}

/// TF-IDF vectors of `documents`, with a vocabulary learned from them under `config`.
///
/// # Examples
/// ```
/// use term_vectorizer::{tfidf, VectorizerConfig};
/// let docs = vec![vec!["Hi", "Bye"], vec!["Test", "Bye", "Bye"]];
/// let rows = tfidf(&docs, &VectorizerConfig::default()).unwrap();
/// let rare = 1.5f64.ln() + 1.0;
/// assert_eq!(rows[0].to_dense(), vec![1.0, rare, 0.0]);
/// assert_eq!(rows[1].to_dense(), vec![2.0, 0.0, rare]);
/// ```
pub fn tfidf<D, T>(documents: &[D], config: &VectorizerConfig) -> Result<Vec<WeightedVector>>
where
    D: AsRef<[T]> + Sync,
    T: AsRef<str> + Sync,
{
    let (_, weighted) = tfidf_with_vocabulary(documents, config)?;
    Ok(weighted)
}

/// Same as [tfidf], also returning the vocabulary that indexes the vectors
pub fn tfidf_with_vocabulary<D, T>(
    documents: &[D],
    config: &VectorizerConfig,
) -> Result<(Vocabulary, Vec<WeightedVector>)>
where
    D: AsRef<[T]> + Sync,
    T: AsRef<str> + Sync,
{
    let vocabulary = Vocabulary::build(documents, config)?;
    let counts = count_vectors(&vocabulary, documents);
    trace!(documents = documents.len(), dims = vocabulary.len(), "tf-idf");
    let weighted = TfIdfWeighter::from_config(config).weigh(&vocabulary, &counts)?;
    Ok((vocabulary, weighted))
}
