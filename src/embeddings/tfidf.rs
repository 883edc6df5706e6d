//! Sparse lexical embedding via TF-IDF over the corpus vocabulary

use std::collections::BTreeMap;
use std::collections::HashMap;

/// TF-IDF vectorizer fit on a fixed document corpus.
///
/// The vocabulary and document frequencies are computed once at fit time
/// and never change, matching the index's build-once lifecycle. Vectors
/// have one dimension per vocabulary term; query terms outside the
/// vocabulary are ignored.
pub struct TfIdfVectorizer {
    /// Term -> vector dimension, ordered for deterministic layout
    vocabulary: BTreeMap<String, usize>,
    /// Inverse document frequency per dimension
    idf: Vec<f32>,
}

impl TfIdfVectorizer {
    /// Fit vocabulary and document frequencies on the corpus
    pub fn fit<S: AsRef<str>>(corpus: &[S]) -> Self {
        let mut vocabulary = BTreeMap::new();
        let mut doc_frequency: HashMap<String, usize> = HashMap::new();

        for text in corpus {
            let mut seen = std::collections::HashSet::new();
            for token in tokenize(text.as_ref()) {
                if seen.insert(token.clone()) {
                    *doc_frequency.entry(token.clone()).or_insert(0) += 1;
                }
                let next_dim = vocabulary.len();
                vocabulary.entry(token).or_insert(next_dim);
            }
        }

        // Reassign dimensions in sorted term order so layout is independent
        // of corpus iteration order
        for (dim, (_, slot)) in vocabulary.iter_mut().enumerate() {
            *slot = dim;
        }

        let n_docs = corpus.len() as f32;
        let mut idf = vec![0.0; vocabulary.len()];
        for (term, &dim) in &vocabulary {
            let df = doc_frequency.get(term).copied().unwrap_or(1) as f32;
            // Smoothed idf; always positive so single-document corpora
            // still produce non-zero weights
            idf[dim] = (1.0 + n_docs / df).ln();
        }

        Self { vocabulary, idf }
    }

    /// Compute the TF-IDF vector for a text in the fitted feature space
    pub fn embed(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.vocabulary.len()];
        for token in tokenize(text) {
            if let Some(&dim) = self.vocabulary.get(&token) {
                vector[dim] += 1.0;
            }
        }
        for (dim, weight) in vector.iter_mut().enumerate() {
            *weight *= self.idf[dim];
        }
        vector
    }

    /// Number of dimensions in the fitted feature space
    pub fn dimension(&self) -> usize {
        self.vocabulary.len()
    }
}

/// Lowercase alphanumeric tokenization
fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embeddings::cosine_similarity;

    #[test]
    fn test_fit_builds_vocabulary() {
        let vectorizer = TfIdfVectorizer::fit(&["rust and tokio", "python and numpy"]);
        // rust, and, tokio, python, numpy
        assert_eq!(vectorizer.dimension(), 5);
    }

    #[test]
    fn test_embed_unknown_terms_are_zero() {
        let vectorizer = TfIdfVectorizer::fit(&["rust tokio"]);
        let v = vectorizer.embed("javascript react");
        assert!(v.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_rarer_terms_weigh_more() {
        // "shared" appears in both documents, "unique" in one
        let vectorizer = TfIdfVectorizer::fit(&["shared unique", "shared other"]);
        let v = vectorizer.embed("shared unique");
        let shared_weight = v
            .iter()
            .zip(weights(&vectorizer, "shared"))
            .find_map(|(w, hit)| hit.then_some(*w))
            .unwrap();
        let unique_weight = v
            .iter()
            .zip(weights(&vectorizer, "unique"))
            .find_map(|(w, hit)| hit.then_some(*w))
            .unwrap();
        assert!(unique_weight > shared_weight);
    }

    #[test]
    fn test_matching_document_scores_higher() {
        let corpus = [
            "Project: Ray Tracer\nDescription: A path tracer in rust",
            "Technical Skills: Python, SQL, Docker",
        ];
        let vectorizer = TfIdfVectorizer::fit(&corpus);
        let query = vectorizer.embed("rust ray tracer");
        let doc0 = vectorizer.embed(corpus[0]);
        let doc1 = vectorizer.embed(corpus[1]);
        assert!(cosine_similarity(&query, &doc0) > cosine_similarity(&query, &doc1));
    }

    #[test]
    fn test_fit_is_deterministic() {
        let corpus = ["alpha beta gamma", "beta delta", "gamma alpha"];
        let a = TfIdfVectorizer::fit(&corpus);
        let b = TfIdfVectorizer::fit(&corpus);
        assert_eq!(a.embed("alpha delta"), b.embed("alpha delta"));
    }

    #[test]
    fn test_tokenize_case_and_punctuation() {
        let tokens: Vec<String> = tokenize("Rust, Tokio! (async)").collect();
        assert_eq!(tokens, vec!["rust", "tokio", "async"]);
    }

    fn weights(vectorizer: &TfIdfVectorizer, term: &str) -> Vec<bool> {
        let probe = vectorizer.embed(term);
        probe.iter().map(|&x| x > 0.0).collect()
    }
}
