//! Legacy input handling.
//!
//! Callers are expected to pass documents that are already tokenized.
//! Raw text is still accepted through [DocumentInput::RawText]: it is split
//! by a [Tokenizer] and the call reports a single [DeprecationNotice].
use std::fmt;

use tracing::warn;

use crate::error::Result;
use crate::vectorizer::config::VectorizerConfig;
use crate::vectorizer::tf::CountVector;
use crate::vectorizer::tfidf::WeightedVector;
use crate::vectorizer::vocabulary::Vocabulary;
use crate::vectorizer::{term_frequency, tfidf};

/// Splits raw text into tokens
pub trait Tokenizer {
    fn tokenize(&self, text: &str) -> Vec<String>;
}

/// Splits on whitespace, then separates runs of ASCII punctuation from runs
/// of other characters, keeping both: `"end. Go!"` becomes `["end", ".", "Go", "!"]`.
/// No case folding.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTokenizer;

impl Tokenizer for DefaultTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        let mut tokens = Vec::new();
        for chunk in text.split_whitespace() {
            let mut current = String::new();
            let mut current_is_punct = false;
            for ch in chunk.chars() {
                let is_punct = ch.is_ascii_punctuation();
                if !current.is_empty() && is_punct != current_is_punct {
                    tokens.push(std::mem::take(&mut current));
                }
                current_is_punct = is_punct;
                current.push(ch);
            }
            if !current.is_empty() {
                tokens.push(current);
            }
        }
        tokens
    }
}

/// Shape of the documents handed to a vectorization call
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentInput {
    /// One untokenized string per document
    RawText(Vec<String>),
    /// One token sequence per document
    Tokens(Vec<Vec<String>>),
}

impl From<Vec<Vec<String>>> for DocumentInput {
    fn from(documents: Vec<Vec<String>>) -> Self {
        DocumentInput::Tokens(documents)
    }
}

impl From<Vec<String>> for DocumentInput {
    fn from(texts: Vec<String>) -> Self {
        DocumentInput::RawText(texts)
    }
}

/// Signals that raw text was tokenized with the default policy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeprecationNotice {
    pub message: String,
}

impl fmt::Display for DeprecationNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "deprecated: {}", self.message)
    }
}

/// Vectors of one call, with the notice raised while resolving the input
#[derive(Debug, Clone, PartialEq)]
pub struct Vectorized<V> {
    pub rows: Vec<V>,
    pub notice: Option<DeprecationNotice>,
}

impl DocumentInput {
    /// Number of documents, known without tokenizing
    pub fn len(&self) -> usize {
        match self {
            DocumentInput::RawText(texts) => texts.len(),
            DocumentInput::Tokens(documents) => documents.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Token sequences for the vectorizers, tokenizing raw text with `tokenizer`.
    /// The notice is produced, and logged, once per call regardless of the
    /// number of documents.
    pub fn resolve<K>(self, tokenizer: &K) -> (Vec<Vec<String>>, Option<DeprecationNotice>)
    where
        K: Tokenizer + ?Sized,
    {
        match self {
            DocumentInput::Tokens(documents) => (documents, None),
            DocumentInput::RawText(texts) => {
                let notice = DeprecationNotice {
                    message: format!(
                        "{} document(s) were given as raw text and tokenized with the default policy; \
                         tokenize documents before vectorizing",
                        texts.len()
                    ),
                };
                warn!(documents = texts.len(), "raw text input is deprecated, tokenizing");
                let documents = texts.iter().map(|text| tokenizer.tokenize(text)).collect();
                (documents, Some(notice))
            }
        }
    }
}

/// [term_frequency] over either input shape, tokenizing raw text with [DefaultTokenizer]
pub fn term_frequency_input<I>(input: I, vocabulary: Option<&Vocabulary>) -> Vectorized<CountVector>
where
    I: Into<DocumentInput>,
{
    let (documents, notice) = input.into().resolve(&DefaultTokenizer);
    Vectorized {
        rows: term_frequency(&documents, vocabulary),
        notice,
    }
}

/// [tfidf] over either input shape, tokenizing raw text with [DefaultTokenizer]
pub fn tfidf_input<I>(input: I, config: &VectorizerConfig) -> Result<Vectorized<WeightedVector>>
where
    I: Into<DocumentInput>,
{
    tfidf_input_with(input, config, &DefaultTokenizer)
}

/// [tfidf_input] with a caller-supplied tokenizer.
///
/// The configuration, including document frequency bounds resolved against
/// the number of documents, is checked before the input is resolved, so an
/// invalid call neither tokenizes nor warns.
pub fn tfidf_input_with<I, K>(input: I, config: &VectorizerConfig, tokenizer: &K) -> Result<Vectorized<WeightedVector>>
where
    I: Into<DocumentInput>,
    K: Tokenizer + ?Sized,
{
    let input = input.into();
    config.validate()?;
    config.resolve_df_bounds(input.len())?;
    let (documents, notice) = input.resolve(tokenizer);
    Ok(Vectorized {
        rows: tfidf(&documents, config)?,
        notice,
    })
}
