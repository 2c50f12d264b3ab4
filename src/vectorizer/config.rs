use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, VectorizerError};
use crate::vectorizer::tfidf::IdfMethod;

/// Document frequency bound.
///
/// `Absolute` is a document count used as is,
/// `Relative` is a fraction of the corpus size in `[0, 1]`,
/// converted to a count with `ceil(fraction * n_documents)`.
///
/// Deserializes untagged: integers become `Absolute`, floats `Relative`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DocumentFrequency {
    Absolute(usize),
    Relative(f64),
}

impl DocumentFrequency {
    /// Convert the bound into a document count for a corpus of `n_documents`
    #[inline]
    pub fn resolve(&self, n_documents: usize) -> usize {
        match *self {
            DocumentFrequency::Absolute(count) => count,
            DocumentFrequency::Relative(fraction) => (fraction * n_documents as f64).ceil() as usize,
        }
    }

    fn is_valid(&self) -> bool {
        match *self {
            DocumentFrequency::Absolute(_) => true,
            DocumentFrequency::Relative(fraction) => {
                fraction.is_finite() && (0.0..=1.0).contains(&fraction)
            }
        }
    }
}

impl fmt::Display for DocumentFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentFrequency::Absolute(count) => write!(f, "{count}"),
            DocumentFrequency::Relative(fraction) => write!(f, "{fraction}"),
        }
    }
}

/// Order of the vocabulary, and therefore of vector components
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TermOrdering {
    /// Descending total corpus count, ties by first appearance
    #[default]
    CorpusFrequency,
    /// Byte-wise string order.
    /// `max_features` still keeps the most frequent terms before reordering.
    Lexicographic,
}

/// Row normalization applied to weighted vectors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Normalization {
    #[default]
    None,
    L1,
    L2,
}

/// Vectorizer options.
///
/// ### Attributes
///
/// * `min_df`: minimum document frequency a term needs to be kept. Defaults to `Absolute(1)`.
/// * `max_df`: maximum document frequency (inclusive) a term may have to be kept. Defaults to `Relative(1.0)`, i.e. the corpus size.
/// * `max_features`: keep only this many terms, the most frequent ones, after document frequency filtering. Defaults to no limit.
/// * `ordering`: vocabulary order. Defaults to [TermOrdering::CorpusFrequency].
/// * `idf`: inverse document frequency formula. Defaults to [IdfMethod::Smooth].
/// * `sublinear_tf`: replace counts `c` with `1 + ln(c)` before weighting. Defaults to `false`.
/// * `norm`: row normalization of weighted vectors. Defaults to [Normalization::None].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorizerConfig {
    pub min_df: DocumentFrequency,
    pub max_df: DocumentFrequency,
    pub max_features: Option<usize>,
    pub ordering: TermOrdering,
    pub idf: IdfMethod,
    pub sublinear_tf: bool,
    pub norm: Normalization,
}

impl Default for VectorizerConfig {
    fn default() -> Self {
        Self {
            min_df: DocumentFrequency::Absolute(1),
            max_df: DocumentFrequency::Relative(1.0),
            max_features: None,
            ordering: TermOrdering::CorpusFrequency,
            idf: IdfMethod::Smooth,
            sublinear_tf: false,
            norm: Normalization::None,
        }
    }
}

impl VectorizerConfig {
    pub fn min_df(mut self, min_df: DocumentFrequency) -> Self {
        self.min_df = min_df;
        self
    }

    pub fn max_df(mut self, max_df: DocumentFrequency) -> Self {
        self.max_df = max_df;
        self
    }

    pub fn max_features(mut self, max_features: usize) -> Self {
        self.max_features = Some(max_features);
        self
    }

    pub fn ordering(mut self, ordering: TermOrdering) -> Self {
        self.ordering = ordering;
        self
    }

    pub fn idf(mut self, idf: IdfMethod) -> Self {
        self.idf = idf;
        self
    }

    pub fn sublinear_tf(mut self, sublinear_tf: bool) -> Self {
        self.sublinear_tf = sublinear_tf;
        self
    }

    pub fn norm(mut self, norm: Normalization) -> Self {
        self.norm = norm;
        self
    }

    /// Checks the options that do not depend on the corpus.
    ///
    /// Returns an error if:
    /// * a fractional document frequency is outside `[0, 1]` or not finite
    /// * `min_df` is greater than `max_df` when both are of the same kind
    /// * `max_features` is zero
    pub fn validate(&self) -> Result<()> {
        if !self.min_df.is_valid() {
            return Err(VectorizerError::InvalidDocumentFrequency {
                bound: "min",
                value: self.min_df,
            });
        }
        if !self.max_df.is_valid() {
            return Err(VectorizerError::InvalidDocumentFrequency {
                bound: "max",
                value: self.max_df,
            });
        }
        let flipped = match (self.min_df, self.max_df) {
            (DocumentFrequency::Absolute(min), DocumentFrequency::Absolute(max)) => min > max,
            (DocumentFrequency::Relative(min), DocumentFrequency::Relative(max)) => min > max,
            _ => false,
        };
        if flipped {
            return Err(VectorizerError::FlippedDocumentFrequencies(self.min_df, self.max_df));
        }
        if self.max_features == Some(0) {
            return Err(VectorizerError::InvalidMaxFeatures(0));
        }
        Ok(())
    }

    /// Resolves both document frequency bounds into counts for a corpus of
    /// `n_documents`, after [validate](Self::validate) has passed.
    ///
    /// Mixed absolute/relative bounds can only be compared here; an empty
    /// corpus never fails.
    pub(crate) fn resolve_df_bounds(&self, n_documents: usize) -> Result<(usize, usize)> {
        let (min, max) = (self.min_df.resolve(n_documents), self.max_df.resolve(n_documents));
        if n_documents > 0 && min > max {
            return Err(VectorizerError::FlippedDocumentFrequencies(self.min_df, self.max_df));
        }
        Ok((min, max))
    }
}
