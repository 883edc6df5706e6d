pub mod config;
pub mod documents;
pub mod embeddings;
pub mod errors;
pub mod llm;
pub mod logging;
pub mod models;
pub mod rag;
pub mod router;

pub use config::AppConfig;
pub use errors::*;
pub use models::FinalResponse;
pub use rag::PortfolioEngine;
