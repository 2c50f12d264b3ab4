use indexmap::IndexMap;
use rayon::prelude::*;

use crate::utils::vector::SparseVec;
use crate::vectorizer::vocabulary::Vocabulary;

/// Raw occurrence counts of one document, indexed by vocabulary position
pub type CountVector = SparseVec<u64>;

/// Counts the tokens of one document that belong to `vocabulary`.
/// Tokens outside the vocabulary are dropped.
pub fn count_vector<T>(vocabulary: &Vocabulary, tokens: &[T]) -> CountVector
where
    T: AsRef<str>,
{
    let mut counts: IndexMap<usize, u64> = IndexMap::new();
    for token in tokens {
        if let Some(index) = vocabulary.index_of(token.as_ref()) {
            *counts.entry(index).or_insert(0) += 1;
        }
    }
    SparseVec::from_entries(vocabulary.len(), counts)
}

/// One count vector per document, row `i` for document `i`
pub fn count_vectors<D, T>(vocabulary: &Vocabulary, documents: &[D]) -> Vec<CountVector>
where
    D: AsRef<[T]> + Sync,
    T: AsRef<str> + Sync,
{
    documents
        .par_iter()
        .map(|doc| count_vector(vocabulary, doc.as_ref()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vectorizer::config::{DocumentFrequency, VectorizerConfig};

    #[test]
    fn counts_follow_vocabulary_order() {
        let docs = vec![vec!["a", "b", "c", "c"]];
        let vocabulary = Vocabulary::build(&docs, &VectorizerConfig::default()).unwrap();
        let counts = count_vectors(&vocabulary, &docs);
        assert_eq!(counts.len(), 1);
        // vocabulary is [c, a, b]
        assert_eq!(counts[0].to_dense(), vec![2, 1, 1]);
    }

    #[test]
    fn unknown_and_pruned_tokens_are_dropped() {
        let docs = vec![vec!["one"], vec!["one", "two"]];
        let config = VectorizerConfig::default().max_df(DocumentFrequency::Absolute(1));
        let vocabulary = Vocabulary::build(&docs, &config).unwrap();

        let counts = count_vectors(&vocabulary, &docs);
        assert_eq!(counts[0].to_dense(), vec![0]);
        assert_eq!(counts[1].to_dense(), vec![1]);

        let unseen = count_vector(&vocabulary, &["three", "one", "two", "two"]);
        assert_eq!(unseen.to_dense(), vec![2]);
    }

    #[test]
    fn every_row_has_vocabulary_length() {
        let docs = vec![vec!["x", "y"], vec![], vec!["y", "z", "z"], vec!["w"]];
        let vocabulary = Vocabulary::build(&docs, &VectorizerConfig::default()).unwrap();
        let counts = count_vectors(&vocabulary, &docs);
        assert_eq!(counts.len(), docs.len());
        for row in &counts {
            assert_eq!(row.len(), vocabulary.len());
        }
        assert_eq!(counts[1].nnz(), 0);
    }

    #[test]
    fn empty_vocabulary_yields_empty_rows() {
        let docs = vec![vec!["a"], vec!["b"]];
        let config = VectorizerConfig::default().min_df(DocumentFrequency::Absolute(2));
        let vocabulary = Vocabulary::build(&docs, &config).unwrap();
        let counts = count_vectors(&vocabulary, &docs);
        assert_eq!(counts.len(), 2);
        assert!(counts.iter().all(|row| row.is_empty() && row.nnz() == 0));
    }
}
