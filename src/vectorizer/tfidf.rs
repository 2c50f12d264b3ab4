use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{Result, VectorizerError};
use crate::utils::vector::SparseVec;
use crate::vectorizer::config::{Normalization, VectorizerConfig};
use crate::vectorizer::tf::CountVector;
use crate::vectorizer::vocabulary::Vocabulary;

/// TF-IDF weights of one document, indexed by vocabulary position
pub type WeightedVector = SparseVec<f64>;

/// Methods for computing the inverse document frequency of a vocabulary entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum IdfMethod {
    /// `ln((1 + n) / (1 + df)) + 1`. The "plus ones" inside the log act as an extra
    /// document containing every term; the trailing one keeps terms present in
    /// every document at weight 1.
    #[default]
    Smooth,
    /// `ln(n / df) + 1`.
    NonSmooth,
    /// `ln(n / (1 + df))`, terms present in (almost) every document get weight <= 0.
    Textbook,
}

impl IdfMethod {
    /// `n` documents, `df` of them contain the term. `df >= 1` for every vocabulary term.
    #[inline]
    pub fn compute_idf(&self, n: usize, df: usize) -> f64 {
        let (n, df) = (n as f64, df as f64);
        match self {
            IdfMethod::Smooth => ((1.0 + n) / (1.0 + df)).ln() + 1.0,
            IdfMethod::NonSmooth => (n / df).ln() + 1.0,
            IdfMethod::Textbook => (n / (1.0 + df)).ln(),
        }
    }
}

pub trait TFIDFEngine {
    /// IDF of every vocabulary term, in index order
    fn idf_vec(&self, vocabulary: &Vocabulary) -> Vec<f64>;
    /// term frequency value for a raw count `count > 0`
    fn tf(&self, count: u64) -> f64;
}

/// Default engine: raw or sublinear counts times an [IdfMethod]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DefaultTFIDFEngine {
    pub idf: IdfMethod,
    pub sublinear_tf: bool,
}

impl TFIDFEngine for DefaultTFIDFEngine {
    fn idf_vec(&self, vocabulary: &Vocabulary) -> Vec<f64> {
        vocabulary.idf_vector(self.idf)
    }

    #[inline]
    fn tf(&self, count: u64) -> f64 {
        if self.sublinear_tf {
            1.0 + (count as f64).ln()
        } else {
            count as f64
        }
    }
}

/// Turns count vectors into weighted vectors against the vocabulary
/// (and therefore the document frequencies) they were counted with.
#[derive(Debug, Clone, Default)]
pub struct TfIdfWeighter<E = DefaultTFIDFEngine>
where
    E: TFIDFEngine,
{
    engine: E,
    norm: Normalization,
}

impl TfIdfWeighter<DefaultTFIDFEngine> {
    pub fn from_config(config: &VectorizerConfig) -> Self {
        Self {
            engine: DefaultTFIDFEngine {
                idf: config.idf,
                sublinear_tf: config.sublinear_tf,
            },
            norm: config.norm,
        }
    }
}

impl<E> TfIdfWeighter<E>
where
    E: TFIDFEngine + Sync,
{
    pub fn with_engine(engine: E, norm: Normalization) -> Self {
        Self { engine, norm }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// One weighted vector per count vector, same row order.
    ///
    /// `weight = tf(count) * idf(term)`, followed by the configured row
    /// normalization. Rows without terms stay empty.
    ///
    /// Fails with [VectorizerError::DimensionMismatch] when a count vector
    /// was not counted against `vocabulary`.
    pub fn weigh(&self, vocabulary: &Vocabulary, counts: &[CountVector]) -> Result<Vec<WeightedVector>> {
        let expected = vocabulary.len();
        if let Some(row) = counts.iter().find(|row| row.len() != expected) {
            return Err(VectorizerError::DimensionMismatch {
                expected,
                got: row.len(),
            });
        }
        let idf = self.engine.idf_vec(vocabulary);
        if idf.len() != expected {
            return Err(VectorizerError::DimensionMismatch {
                expected,
                got: idf.len(),
            });
        }
        Ok(counts
            .par_iter()
            .map(|row| {
                let mut weighted = row.map(|index, count| self.engine.tf(count) * idf[index]);
                match self.norm {
                    Normalization::None => {}
                    Normalization::L1 => {
                        let norm = weighted.l1_norm();
                        weighted.scale_down(norm);
                    }
                    Normalization::L2 => {
                        let norm = weighted.l2_norm();
                        weighted.scale_down(norm);
                    }
                }
                weighted
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vectorizer::config::DocumentFrequency;
    use crate::vectorizer::tf::count_vectors;
    use approx::assert_abs_diff_eq;

    fn weigh(docs: &[Vec<&str>], config: &VectorizerConfig) -> (Vocabulary, Vec<Vec<f64>>) {
        let vocabulary = Vocabulary::build(docs, config).unwrap();
        let counts = count_vectors(&vocabulary, docs);
        let rows = TfIdfWeighter::from_config(config)
            .weigh(&vocabulary, &counts)
            .unwrap()
            .iter()
            .map(|row| row.to_dense())
            .collect();
        (vocabulary, rows)
    }

    fn assert_rows_eq(got: &[Vec<f64>], want: &[Vec<f64>]) {
        assert_eq!(got.len(), want.len());
        for (got_row, want_row) in got.iter().zip(want) {
            assert_eq!(got_row.len(), want_row.len());
            for (&g, &w) in got_row.iter().zip(want_row) {
                assert_abs_diff_eq!(g, w, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn idf_methods() {
        assert_abs_diff_eq!(IdfMethod::Smooth.compute_idf(2, 1), (1.5f64).ln() + 1.0);
        assert_abs_diff_eq!(IdfMethod::Smooth.compute_idf(2, 2), 1.0);
        assert_abs_diff_eq!(IdfMethod::NonSmooth.compute_idf(3, 2), (1.5f64).ln() + 1.0);
        assert_abs_diff_eq!(IdfMethod::NonSmooth.compute_idf(4, 4), 1.0);
        assert_abs_diff_eq!(IdfMethod::Textbook.compute_idf(4, 1), (2.0f64).ln());
        for method in [IdfMethod::Smooth, IdfMethod::NonSmooth] {
            assert_eq!(method.compute_idf(1, 1), 1.0);
        }
    }

    #[test]
    fn two_document_formula() {
        let docs = vec![vec!["Hi", "Bye"], vec!["Test", "Bye", "Bye"]];
        let (vocabulary, rows) = weigh(&docs, &VectorizerConfig::default());
        assert_eq!(vocabulary.terms().collect::<Vec<_>>(), vec!["Bye", "Hi", "Test"]);
        let rare = (3.0f64 / 2.0).ln() + 1.0;
        let common = (3.0f64 / 3.0).ln() + 1.0;
        assert_rows_eq(
            &rows,
            &[vec![common, rare, 0.0], vec![2.0 * common, 0.0, rare]],
        );
    }

    #[test]
    fn non_smooth_formula() {
        let docs = vec![vec!["Hi", "Bye"], vec!["Test", "Bye", "Bye"]];
        let config = VectorizerConfig::default().idf(IdfMethod::NonSmooth);
        let (_, rows) = weigh(&docs, &config);
        let rare = (2.0f64).ln() + 1.0;
        assert_rows_eq(&rows, &[vec![1.0, rare, 0.0], vec![2.0, 0.0, rare]]);
    }

    #[test]
    fn single_document_reduces_to_counts() {
        let docs = vec![vec!["ONE", "one", "one", "two"]];
        let (_, rows) = weigh(&docs, &VectorizerConfig::default());
        assert_eq!(rows, vec![vec![2.0, 1.0, 1.0]]);
    }

    #[test]
    fn max_df_leaves_zero_for_pruned_rows() {
        let docs = vec![vec!["one"], vec!["one", "two"]];
        let config = VectorizerConfig::default().max_df(DocumentFrequency::Absolute(1));
        let (_, rows) = weigh(&docs, &config);
        assert_rows_eq(&rows, &[vec![0.0], vec![1.4054651081081644]]);
    }

    #[test]
    fn min_df_keeps_common_term() {
        let docs = vec![vec!["one"], vec!["one", "two"]];
        let config = VectorizerConfig::default().min_df(DocumentFrequency::Absolute(2));
        let (_, rows) = weigh(&docs, &config);
        assert_eq!(rows, vec![vec![1.0], vec![1.0]]);
    }

    #[test]
    fn max_features_keeps_most_frequent() {
        let docs = vec![vec!["one", "one", "two"]];
        let config = VectorizerConfig::default().max_features(1);
        let (_, rows) = weigh(&docs, &config);
        assert_eq!(rows, vec![vec![2.0]]);
    }

    #[test]
    fn sublinear_tf() {
        let docs = vec![vec!["a", "a", "a", "b"]];
        let config = VectorizerConfig::default().sublinear_tf(true);
        let (_, rows) = weigh(&docs, &config);
        assert_rows_eq(&rows, &[vec![1.0 + (3.0f64).ln(), 1.0]]);
    }

    #[test]
    fn normalization_only_when_configured() {
        let docs = vec![vec!["a", "a", "a", "a", "b", "b", "b"], vec![]];
        let (_, rows) = weigh(&docs, &VectorizerConfig::default());
        assert_ne!(rows[0].iter().map(|w| w * w).sum::<f64>(), 1.0);

        let config = VectorizerConfig::default().norm(Normalization::L2);
        let (_, rows) = weigh(&docs, &config);
        assert_rows_eq(&rows, &[vec![0.8, 0.6], vec![0.0, 0.0]]);

        let config = VectorizerConfig::default().norm(Normalization::L1);
        let (_, rows) = weigh(&docs, &config);
        assert_rows_eq(&rows, &[vec![4.0 / 7.0, 3.0 / 7.0], vec![0.0, 0.0]]);
    }

    #[test]
    fn custom_engine() {
        struct Binary;
        impl TFIDFEngine for Binary {
            fn idf_vec(&self, vocabulary: &Vocabulary) -> Vec<f64> {
                vec![1.0; vocabulary.len()]
            }
            fn tf(&self, _count: u64) -> f64 {
                1.0
            }
        }

        let docs = vec![vec!["x", "x", "y"]];
        let vocabulary = Vocabulary::build(&docs, &VectorizerConfig::default()).unwrap();
        let counts = count_vectors(&vocabulary, &docs);
        let rows = TfIdfWeighter::with_engine(Binary, Normalization::None).weigh(&vocabulary, &counts).unwrap();
        assert_eq!(rows[0].to_dense(), vec![1.0, 1.0]);
    }

    #[test]
    fn counts_from_another_vocabulary_are_rejected() {
        let docs = vec![vec!["a", "b", "c"]];
        let counted = Vocabulary::build(&docs, &VectorizerConfig::default()).unwrap();
        let counts = count_vectors(&counted, &docs);
        let other = Vocabulary::build(&[vec!["x"]], &VectorizerConfig::default()).unwrap();

        let err = TfIdfWeighter::from_config(&VectorizerConfig::default())
            .weigh(&other, &counts)
            .unwrap_err();
        assert!(matches!(
            err,
            VectorizerError::DimensionMismatch { expected: 1, got: 3 }
        ));
    }

    #[test]
    fn engine_idf_matches_vocabulary_idf() {
        let docs = vec![vec!["a", "b"], vec!["a"], vec!["a", "c", "c"]];
        let vocabulary = Vocabulary::build(&docs, &VectorizerConfig::default()).unwrap();
        for idf in [IdfMethod::Smooth, IdfMethod::NonSmooth, IdfMethod::Textbook] {
            let engine = DefaultTFIDFEngine { idf, sublinear_tf: false };
            assert_eq!(engine.idf_vec(&vocabulary), vocabulary.idf_vector(idf));
        }
    }
}
