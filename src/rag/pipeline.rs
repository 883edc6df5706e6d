//! Complete query pipeline: route -> retrieve -> compose

use tracing::debug;
use tracing::info;
use tracing::warn;

use crate::config::AppConfig;
use crate::documents::build_documents;
use crate::embeddings::EmbeddingService;
use crate::errors::FolioRagError;
use crate::errors::Result;
use crate::llm::prompts::build_portfolio_prompt;
use crate::llm::prompts::SYSTEM_PERSONA;
use crate::llm::LlmService;
use crate::models::Document;
use crate::models::FinalResponse;
use crate::models::Portfolio;
use crate::models::ResumeRef;
use crate::rag::ContextAssembler;
use crate::rag::ScoredDocument;
use crate::rag::VectorIndex;
use crate::router;

/// The portfolio Q&A engine.
///
/// Constructed once at startup: loads the portfolio JSON, derives the
/// document corpus, builds the vector index and wires up the completion
/// service. Everything is immutable afterwards, so `query` takes `&self`
/// and concurrent callers can share one instance without locking.
pub struct PortfolioEngine {
    portfolio: Portfolio,
    resume: ResumeRef,
    index: VectorIndex,
    embedding_service: EmbeddingService,
    context_assembler: ContextAssembler,
    llm_service: LlmService,
    top_k: usize,
}

impl PortfolioEngine {
    /// Create the engine from configuration, loading portfolio data from
    /// the configured path.
    ///
    /// Fails fast on malformed portfolio records so a corrupt corpus is
    /// never served.
    pub async fn new(config: &AppConfig) -> Result<Self> {
        let portfolio = Portfolio::from_file(config.portfolio_data_path())?;
        Self::from_portfolio(config, portfolio).await
    }

    /// Create the engine from already-loaded portfolio data
    pub async fn from_portfolio(config: &AppConfig, portfolio: Portfolio) -> Result<Self> {
        let documents = build_documents(&portfolio);
        info!("Built {} documents from portfolio data", documents.len());

        let contents: Vec<String> = documents.iter().map(|d| d.content.clone()).collect();
        let embedding_service = EmbeddingService::from_config(config, &contents)?;
        let index = VectorIndex::build(documents, &embedding_service).await?;
        let llm_service = LlmService::new(config)?;

        Ok(Self {
            portfolio,
            resume: ResumeRef {
                filename: config.portfolio.resume_filename.clone(),
                url: config.portfolio.resume_url.clone(),
            },
            index,
            embedding_service,
            context_assembler: ContextAssembler::new(config.max_context_length()),
            llm_service,
            top_k: config.top_k(),
        })
    }

    /// Answer a query.
    ///
    /// Blank input is rejected with [`FolioRagError::EmptyQuery`] (the
    /// serving boundary maps it to a client error). Known intents
    /// short-circuit to structured payloads; everything else goes through
    /// retrieval and LLM composition. A completion-service failure is
    /// recovered with an apology message, never propagated.
    pub async fn query(&self, message: &str) -> Result<FinalResponse> {
        if message.trim().is_empty() {
            return Err(FolioRagError::EmptyQuery);
        }

        info!("Processing query: {}", message);

        if let Some(response) = router::route(message, &self.portfolio, &self.resume) {
            debug!("Intent short-circuit matched");
            return Ok(response);
        }

        debug!("No intent match; falling through to retrieval");
        let results = self
            .index
            .search(&self.embedding_service, message, self.top_k)
            .await?;
        debug!("Retrieved {} documents", results.len());

        let context = self.context_assembler.assemble(&results);
        let sources = self.context_assembler.sources(&results);

        let prompt = build_portfolio_prompt(message, &context);
        let response = match self.llm_service.complete(SYSTEM_PERSONA, &prompt).await {
            Ok(text) => text,
            Err(e) => {
                warn!("Completion service failed: {}", e);
                apology(&e)
            }
        };

        Ok(FinalResponse {
            response,
            sources,
            structured_data: None,
        })
    }

    /// Retrieval only, without LLM generation
    pub async fn search(&self, query: &str, limit: usize) -> Result<Vec<ScoredDocument>> {
        self.index
            .search(&self.embedding_service, query, limit)
            .await
    }

    /// The indexed document corpus, in construction order
    pub fn documents(&self) -> &[Document] {
        self.index.documents()
    }

    /// The loaded portfolio data
    pub fn portfolio(&self) -> &Portfolio {
        &self.portfolio
    }
}

/// User-facing apology substituted for a completion-service failure
fn apology(error: &FolioRagError) -> String {
    format!(
        "I apologize, but I encountered an error processing your request. \
         Please try again. Error: {error}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apology_embeds_error_detail() {
        let message = apology(&FolioRagError::Completion("connection refused".to_string()));
        assert!(message.starts_with("I apologize"));
        assert!(message.contains("connection refused"));
    }
}
