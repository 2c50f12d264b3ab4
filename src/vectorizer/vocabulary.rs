use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, VectorizerError};
use crate::vectorizer::config::{TermOrdering, VectorizerConfig};
use crate::vectorizer::corpus::{Corpus, TermStats};
use crate::vectorizer::tfidf::IdfMethod;

/// Ordered, pruned set of terms with dense indices `0..len()`.
///
/// Built once per corpus by [Vocabulary::build] and immutable afterwards;
/// it carries the document frequency table of the corpus it was built
/// from, so it can be shared between threads and vectorization calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "VocabularyData")]
pub struct Vocabulary {
    #[serde(serialize_with = "indexmap::map::serde_seq::serialize")]
    terms: IndexMap<Box<str>, TermStats>,
    n_documents: usize,
}

/// Wire layout of [Vocabulary], checked before it becomes one
#[derive(Deserialize)]
struct VocabularyData {
    terms: Vec<(Box<str>, TermStats)>,
    n_documents: usize,
}

impl TryFrom<VocabularyData> for Vocabulary {
    type Error = VectorizerError;

    /// Every entry must satisfy `1 <= doc_freq <= n_documents` and
    /// `corpus_count >= doc_freq`, and terms must be unique.
    fn try_from(data: VocabularyData) -> Result<Self> {
        let n_documents = data.n_documents;
        let mut terms = IndexMap::with_capacity(data.terms.len());
        for (term, stats) in data.terms {
            if stats.doc_freq == 0 || stats.doc_freq > n_documents {
                return Err(VectorizerError::InvalidVocabulary(format!(
                    "term {term:?} has document frequency {} for {n_documents} documents",
                    stats.doc_freq
                )));
            }
            if stats.corpus_count < stats.doc_freq as u64 {
                return Err(VectorizerError::InvalidVocabulary(format!(
                    "term {term:?} has corpus count {} below its document frequency {}",
                    stats.corpus_count, stats.doc_freq
                )));
            }
            if terms.contains_key(&term) {
                return Err(VectorizerError::InvalidVocabulary(format!(
                    "term {term:?} appears more than once"
                )));
            }
            terms.insert(term, stats);
        }
        Ok(Self { terms, n_documents })
    }
}

impl Vocabulary {
    /// Learns a vocabulary from `documents`.
    ///
    /// 1. scan: document frequency and total corpus count per term
    /// 2. keep terms with `min_df <= df <= max_df`
    /// 3. stable sort by descending corpus count (ties keep first appearance)
    /// 4. truncate to `max_features`
    /// 5. reorder lexicographically if requested
    ///
    /// The configuration is validated before any document is read.
    pub fn build<D, T>(documents: &[D], config: &VectorizerConfig) -> Result<Self>
    where
        D: AsRef<[T]> + Sync,
        T: AsRef<str> + Sync,
    {
        config.validate()?;
        let (min_df, max_df) = config.resolve_df_bounds(documents.len())?;
        Ok(Self::select(documents, config, min_df, max_df))
    }

    /// Vocabulary with default bounds, which never fail validation
    pub(crate) fn build_default<D, T>(documents: &[D]) -> Self
    where
        D: AsRef<[T]> + Sync,
        T: AsRef<str> + Sync,
    {
        Self::select(documents, &VectorizerConfig::default(), 1, documents.len())
    }

    fn select<D, T>(documents: &[D], config: &VectorizerConfig, min_df: usize, max_df: usize) -> Self
    where
        D: AsRef<[T]> + Sync,
        T: AsRef<str> + Sync,
    {
        let corpus = Corpus::scan(documents);
        let n_documents = corpus.doc_num();
        let scanned = corpus.vocab_size();

        let mut terms: Vec<(Box<str>, TermStats)> = corpus
            .into_terms()
            .filter(|(_, stats)| min_df <= stats.doc_freq && stats.doc_freq <= max_df)
            .collect();
        // slice::sort_by is stable
        terms.sort_by(|a, b| b.1.corpus_count.cmp(&a.1.corpus_count));
        if let Some(max_features) = config.max_features {
            terms.truncate(max_features);
        }
        if config.ordering == TermOrdering::Lexicographic {
            terms.sort_by(|a, b| a.0.cmp(&b.0));
        }

        debug!(
            n_documents,
            scanned,
            kept = terms.len(),
            min_df,
            max_df,
            max_features = ?config.max_features,
            "built vocabulary"
        );

        Self {
            terms: terms.into_iter().collect(),
            n_documents,
        }
    }

    /// Number of terms, i.e. the dense length of every vector
    #[inline]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Number of documents of the corpus the vocabulary was built from
    #[inline]
    pub fn n_documents(&self) -> usize {
        self.n_documents
    }

    #[inline]
    pub fn index_of(&self, term: &str) -> Option<usize> {
        self.terms.get_index_of(term)
    }

    #[inline]
    pub fn term_at(&self, index: usize) -> Option<&str> {
        self.terms.get_index(index).map(|(term, _)| &**term)
    }

    #[inline]
    pub fn contains(&self, term: &str) -> bool {
        self.terms.contains_key(term)
    }

    /// Terms in index order
    pub fn terms(&self) -> impl Iterator<Item = &str> + '_ {
        self.terms.keys().map(|term| &**term)
    }

    /// Document frequency of the term at `index`
    #[inline]
    pub fn doc_freq(&self, index: usize) -> Option<usize> {
        self.terms.get_index(index).map(|(_, stats)| stats.doc_freq)
    }

    /// Total corpus count of the term at `index`
    #[inline]
    pub fn corpus_count(&self, index: usize) -> Option<u64> {
        self.terms.get_index(index).map(|(_, stats)| stats.corpus_count)
    }

    /// Document frequencies in index order
    pub fn doc_freqs(&self) -> Vec<usize> {
        self.terms.values().map(|stats| stats.doc_freq).collect()
    }

    /// IDF of every term in index order, against [Vocabulary::n_documents]
    pub fn idf_vector(&self, method: IdfMethod) -> Vec<f64> {
        self.terms
            .values()
            .map(|stats| method.compute_idf(self.n_documents, stats.doc_freq))
            .collect()
    }

    /// Encode as CBOR so a fitted vocabulary can be reused on later batches
    pub fn to_cbor(&self) -> Result<Vec<u8>> {
        Ok(serde_cbor::to_vec(self)?)
    }

    /// Decode a vocabulary written by [Vocabulary::to_cbor].
    ///
    /// Malformed bytes fail with [VectorizerError::Serialization], entries
    /// that no corpus could have produced with [VectorizerError::InvalidVocabulary].
    pub fn from_cbor(bytes: &[u8]) -> Result<Self> {
        let data: VocabularyData = serde_cbor::from_slice(bytes)?;
        Self::try_from(data)
    }
}
