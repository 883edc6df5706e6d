//! In-memory vector index over the document corpus

use tracing::debug;

use crate::embeddings::cosine_similarity;
use crate::embeddings::EmbeddingService;
use crate::errors::Result;
use crate::models::Document;
use crate::rag::ScoredDocument;

/// Immutable similarity index built once from the document corpus.
///
/// A document's position in the corpus is its identity; there is no
/// insert/delete API — adding a document means a full rebuild.
pub struct VectorIndex {
    documents: Vec<Document>,
    vectors: Vec<Vec<f32>>,
}

impl VectorIndex {
    /// Build the index by embedding every document's content
    pub async fn build(documents: Vec<Document>, service: &EmbeddingService) -> Result<Self> {
        let texts: Vec<&str> = documents.iter().map(|d| d.content.as_str()).collect();
        let vectors = if texts.is_empty() {
            Vec::new()
        } else {
            service.embed_batch(texts).await?
        };
        debug!("Built vector index over {} documents", documents.len());
        Ok(Self { documents, vectors })
    }

    /// Number of indexed documents
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// The indexed corpus, in construction order
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// Return the `top_k` most similar documents to the query, in
    /// descending score order. Ties resolve to the lower corpus index.
    ///
    /// When no document scores positively (degenerate query with no
    /// overlap), falls back to the first `top_k` documents in corpus
    /// order so the composer always has grounding material. That fallback
    /// is a compatibility policy, not a relevance claim.
    pub async fn search(
        &self,
        service: &EmbeddingService,
        query: &str,
        top_k: usize,
    ) -> Result<Vec<ScoredDocument>> {
        debug!("Searching index for: {}", query);
        let query_vector = service.embed(query).await?;

        let mut scored: Vec<(usize, f32)> = self
            .vectors
            .iter()
            .enumerate()
            .map(|(idx, vector)| (idx, cosine_similarity(&query_vector, vector)))
            .collect();

        if scored.iter().all(|&(_, score)| score <= 0.0) {
            debug!("No positive similarity; falling back to corpus order");
            return Ok(self
                .documents
                .iter()
                .take(top_k)
                .map(|doc| ScoredDocument {
                    document: doc.clone(),
                    score: 0.0,
                })
                .collect());
        }

        // Stable sort keeps corpus order among equal scores
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        Ok(scored
            .into_iter()
            .take(top_k)
            .map(|(idx, score)| ScoredDocument {
                document: self.documents[idx].clone(),
                score,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DocType;

    fn doc(doc_type: DocType, content: &str) -> Document {
        Document {
            doc_type,
            content: content.to_string(),
            metadata: serde_json::json!({}),
        }
    }

    fn corpus() -> Vec<Document> {
        vec![
            doc(DocType::Project, "Project: Ray Tracer rust graphics rendering"),
            doc(DocType::Skills, "Technical Skills: Python SQL Docker"),
            doc(DocType::Experience, "Company: Acme Role: Engineer backend services"),
            doc(DocType::Achievement, "Achievement: Hackathon winner prize"),
        ]
    }

    async fn build() -> (VectorIndex, EmbeddingService) {
        let documents = corpus();
        let contents: Vec<String> = documents.iter().map(|d| d.content.clone()).collect();
        let service = EmbeddingService::lexical(&contents);
        let index = VectorIndex::build(documents, &service).await.unwrap();
        (index, service)
    }

    #[tokio::test]
    async fn test_search_returns_at_most_top_k() {
        let (index, service) = build().await;
        let results = index.search(&service, "rust graphics", 2).await.unwrap();
        assert_eq!(results.len(), 2);

        let results = index.search(&service, "rust graphics", 100).await.unwrap();
        assert_eq!(results.len(), 4);
    }

    #[tokio::test]
    async fn test_search_orders_by_descending_score() {
        let (index, service) = build().await;
        let results = index.search(&service, "rust rendering", 4).await.unwrap();
        for pair in results.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
        assert_eq!(results[0].document.doc_type, DocType::Project);
        assert!(results[0].score > 0.0);
    }

    #[tokio::test]
    async fn test_search_is_deterministic() {
        let (index, service) = build().await;
        let a = index.search(&service, "backend engineer", 4).await.unwrap();
        let b = index.search(&service, "backend engineer", 4).await.unwrap();
        for (x, y) in a.iter().zip(b.iter()) {
            assert_eq!(x.document.content, y.document.content);
            assert_eq!(x.score, y.score);
        }
    }

    #[tokio::test]
    async fn test_rebuild_is_idempotent() {
        let (index_a, service_a) = build().await;
        let (index_b, service_b) = build().await;
        let a = index_a.search(&service_a, "hackathon", 4).await.unwrap();
        let b = index_b.search(&service_b, "hackathon", 4).await.unwrap();
        for (x, y) in a.iter().zip(b.iter()) {
            assert!((x.score - y.score).abs() < 1e-6);
        }
    }

    #[tokio::test]
    async fn test_tie_break_keeps_corpus_order() {
        let documents = vec![
            doc(DocType::Project, "alpha beta"),
            doc(DocType::Project, "alpha beta"),
            doc(DocType::Project, "unrelated words here"),
        ];
        let contents: Vec<String> = documents.iter().map(|d| d.content.clone()).collect();
        let service = EmbeddingService::lexical(&contents);
        let index = VectorIndex::build(documents, &service).await.unwrap();

        let results = index.search(&service, "alpha", 2).await.unwrap();
        assert_eq!(results.len(), 2);
        assert!((results[0].score - results[1].score).abs() < 1e-6);
        // Both tie; the lower corpus index comes first
        assert_eq!(results[0].document.content, "alpha beta");
        assert_eq!(results[1].document.content, "alpha beta");
    }

    #[tokio::test]
    async fn test_degenerate_query_falls_back_to_corpus_order() {
        let (index, service) = build().await;
        let results = index
            .search(&service, "zzz qqq nothing matches", 3)
            .await
            .unwrap();
        assert_eq!(results.len(), 3);
        assert!(results.iter().all(|r| r.score == 0.0));
        assert_eq!(results[0].document.doc_type, DocType::Project);
        assert_eq!(results[1].document.doc_type, DocType::Skills);
        assert_eq!(results[2].document.doc_type, DocType::Experience);
    }

    #[tokio::test]
    async fn test_empty_corpus() {
        let service = EmbeddingService::lexical::<String>(&[]);
        let index = VectorIndex::build(vec![], &service).await.unwrap();
        assert!(index.is_empty());
        let results = index.search(&service, "anything", 5).await.unwrap();
        assert!(results.is_empty());
    }
}
