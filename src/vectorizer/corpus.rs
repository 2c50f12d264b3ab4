use indexmap::IndexMap;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::vectorizer::term::TermFrequency;

/// Corpus-wide statistics of one term
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermStats {
    /// number of documents containing the term at least once
    pub doc_freq: usize,
    /// occurrences summed over all documents
    pub corpus_count: u64,
}

/// Keeps document count and per-term statistics of a scanned corpus.
/// Terms are kept in first-appearance order of the scan.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    doc_num: usize,
    term_stats: IndexMap<Box<str>, TermStats>,
}

impl Corpus {
    /// Create a new instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan every document once.
    ///
    /// Documents are counted in parallel; partial corpora are merged
    /// left to right, so first-appearance order matches a sequential scan.
    pub fn scan<D, T>(documents: &[D]) -> Self
    where
        D: AsRef<[T]> + Sync,
        T: AsRef<str> + Sync,
    {
        documents
            .par_iter()
            .fold(Corpus::new, |mut corpus, doc| {
                corpus.add_doc(&TermFrequency::from_tokens(doc.as_ref()));
                corpus
            })
            .reduce(Corpus::new, |mut left, right| {
                left.merge_corpus(right);
                left
            })
    }

    /// Add a document's terms to the corpus
    pub fn add_doc(&mut self, doc: &TermFrequency) {
        self.doc_num += 1;
        for (term, count) in doc.iter() {
            if let Some(stats) = self.term_stats.get_mut(term) {
                stats.doc_freq += 1;
                stats.corpus_count += count;
            } else {
                self.term_stats.insert(
                    term.into(),
                    TermStats {
                        doc_freq: 1,
                        corpus_count: count,
                    },
                );
            }
        }
    }

    /// Merge another corpus into self.
    /// Terms first seen in `other` are appended after the terms of self.
    pub fn merge_corpus(&mut self, other: Corpus) {
        self.doc_num += other.doc_num;
        for (term, other_stats) in other.term_stats {
            let stats = self.term_stats.entry(term).or_default();
            stats.doc_freq += other_stats.doc_freq;
            stats.corpus_count += other_stats.corpus_count;
        }
    }

    /// Get the number of documents in the corpus
    #[inline]
    pub fn doc_num(&self) -> usize {
        self.doc_num
    }

    /// Get the number of distinct terms
    #[inline]
    pub fn vocab_size(&self) -> usize {
        self.term_stats.len()
    }

    #[inline]
    pub fn term_stats(&self, term: &str) -> Option<TermStats> {
        self.term_stats.get(term).copied()
    }

    /// Consume into `(term, stats)` pairs in first-appearance order
    pub fn into_terms(self) -> impl Iterator<Item = (Box<str>, TermStats)> {
        self.term_stats.into_iter()
    }
}
