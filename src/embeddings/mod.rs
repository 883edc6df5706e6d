//! Embedding strategies for the vector index
//!
//! Two interchangeable strategies produce vectors in a fixed feature space:
//! - Lexical: TF-IDF over the corpus vocabulary (default, fully offline)
//! - Remote: dense embeddings from an OpenAI-compatible or Ollama API
//!
//! Both are compared with cosine similarity, so scores are rank-comparable
//! regardless of strategy.

pub mod client;
pub mod tfidf;

pub use client::EmbeddingClient;
pub use client::EmbeddingProvider;
pub use tfidf::TfIdfVectorizer;

use crate::config::AppConfig;
use crate::errors::FolioRagError;
use crate::errors::Result;

/// Embedding backend selected at construction time
enum Backend {
    /// Sparse lexical vectors fit on the document corpus
    Lexical(TfIdfVectorizer),
    /// Dense vectors from a remote embedding API
    Remote(EmbeddingClient),
}

/// Facade over the configured embedding strategy.
///
/// Built once alongside the index; immutable afterwards, so concurrent
/// queries may share it freely.
pub struct EmbeddingService {
    backend: Backend,
}

impl EmbeddingService {
    /// Create a lexical service fit on the given corpus
    pub fn lexical<S: AsRef<str>>(corpus: &[S]) -> Self {
        Self {
            backend: Backend::Lexical(TfIdfVectorizer::fit(corpus)),
        }
    }

    /// Create a service from configuration.
    ///
    /// The corpus is required because the lexical strategy derives its
    /// vocabulary and document frequencies from it; remote strategies
    /// ignore it.
    pub fn from_config<S: AsRef<str>>(config: &AppConfig, corpus: &[S]) -> Result<Self> {
        let backend = match config.embedding_strategy() {
            "lexical" => Backend::Lexical(TfIdfVectorizer::fit(corpus)),
            "openai" => Backend::Remote(EmbeddingClient::new(
                EmbeddingProvider::OpenAI,
                config.embedding_model().to_string(),
                config.embedding_endpoint().to_string(),
                config.embeddings.api_key.clone(),
            )?),
            "ollama" => Backend::Remote(EmbeddingClient::new(
                EmbeddingProvider::Ollama,
                config.embedding_model().to_string(),
                config.embedding_endpoint().to_string(),
                None,
            )?),
            other => {
                return Err(FolioRagError::Config(format!(
                    "Unknown embedding strategy: {other} (expected lexical, openai or ollama)"
                )))
            }
        };
        Ok(Self { backend })
    }

    /// Compute the feature vector for a single text
    pub async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        match &self.backend {
            Backend::Lexical(vectorizer) => Ok(vectorizer.embed(text)),
            Backend::Remote(client) => client.generate(text).await,
        }
    }

    /// Compute feature vectors for multiple texts
    pub async fn embed_batch(&self, texts: Vec<&str>) -> Result<Vec<Vec<f32>>> {
        match &self.backend {
            Backend::Lexical(vectorizer) => {
                Ok(texts.iter().map(|t| vectorizer.embed(t)).collect())
            }
            Backend::Remote(client) => client.generate_batch(texts).await,
        }
    }
}

/// Cosine similarity between two vectors of the same dimension.
///
/// Returns 0.0 for mismatched dimensions or zero-norm inputs, which keeps
/// degenerate queries from ranking above real matches.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_similarity_identical() {
        let v = vec![1.0, 2.0, 3.0];
        let sim = cosine_similarity(&v, &v);
        assert!((sim - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_similarity_orthogonal() {
        let a = vec![1.0, 0.0];
        let b = vec![0.0, 1.0];
        assert_eq!(cosine_similarity(&a, &b), 0.0);
    }

    #[test]
    fn test_cosine_similarity_zero_norm() {
        let a = vec![0.0, 0.0];
        let b = vec![1.0, 1.0];
        assert_eq!(cosine_similarity(&a, &b), 0.0);
    }

    #[test]
    fn test_cosine_similarity_dimension_mismatch() {
        let a = vec![1.0, 2.0];
        let b = vec![1.0, 2.0, 3.0];
        assert_eq!(cosine_similarity(&a, &b), 0.0);
    }

    #[tokio::test]
    async fn test_lexical_service_embeds_in_corpus_space() {
        let corpus = ["rust systems programming", "python data science"];
        let service = EmbeddingService::lexical(&corpus);
        let v = service.embed("rust programming").await.unwrap();
        assert!(!v.is_empty());
        assert!(v.iter().any(|&x| x > 0.0));
    }
}
