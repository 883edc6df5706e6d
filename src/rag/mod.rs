//! RAG (Retrieval-Augmented Generation) module
//!
//! End-to-end portfolio Q&A:
//! - Intent short-circuits for known query categories
//! - Similarity retrieval over the document corpus
//! - Context assembly from retrieved documents
//! - LLM-based answer generation with source attribution
//!
//! # Examples
//!
//! ```rust,no_run
//! use foliorag::config::AppConfig;
//! use foliorag::rag::PortfolioEngine;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::load()?;
//!     let engine = PortfolioEngine::new(&config).await?;
//!
//!     let response = engine.query("what projects have you built?").await?;
//!     println!("Answer: {}", response.response);
//!     println!("Sources: {}", response.sources.len());
//!
//!     Ok(())
//! }
//! ```

pub mod context;
pub mod index;
pub mod pipeline;

pub use context::ContextAssembler;
pub use index::VectorIndex;
pub use pipeline::PortfolioEngine;

use crate::models::Document;

/// A retrieved document with its relevance score.
///
/// Retrieval results are ordered by descending score; ties keep corpus
/// order so repeated queries are deterministic.
#[derive(Debug, Clone)]
pub struct ScoredDocument {
    pub document: Document,
    pub score: f32,
}
