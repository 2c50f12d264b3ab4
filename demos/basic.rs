use term_vectorizer::{tfidf_with_vocabulary, term_frequency_input, DocumentFrequency, VectorizerConfig};

fn main() {
    // documents are already tokenized upstream
    let docs = vec![
        vec!["rust", "fast", "parallel", "rust"],
        vec!["rust", "flexible", "safe", "rust"],
        vec!["safe", "parallel"],
    ];

    let config = VectorizerConfig::default().max_df(DocumentFrequency::Relative(0.7));
    let (vocabulary, rows) = match tfidf_with_vocabulary(&docs, &config) {
        Ok(result) => result,
        Err(err) => {
            eprintln!("invalid configuration: {err}");
            return;
        }
    };

    println!("vocabulary: {:?}", vocabulary.terms().collect::<Vec<_>>());
    for (i, row) in rows.iter().enumerate() {
        println!("doc{i}: {:?}", row.to_dense());
    }

    // legacy raw text still works, with a notice
    let result = term_frequency_input(vec!["Hello world !".to_string()], None);
    if let Some(notice) = &result.notice {
        println!("{notice}");
    }
    println!("counts: {:?}", result.rows[0].to_dense());
}
