use std::path::Path;

use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioConfig {
    /// Path to the portfolio JSON document
    pub data_path: String,
    /// Resume file name advertised by the resume intent
    #[serde(default = "default_resume_filename")]
    pub resume_filename: String,
    /// Resume download URL advertised by the resume intent
    #[serde(default = "default_resume_url")]
    pub resume_url: String,
}

fn default_resume_filename() -> String {
    "resume.pdf".to_string()
}

fn default_resume_url() -> String {
    "/resume.pdf".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingsConfig {
    /// Embedding strategy: "lexical" (offline TF-IDF), "openai" or "ollama"
    #[serde(default = "default_strategy")]
    pub strategy: String,
    #[serde(default = "default_embedding_model")]
    pub model: String,
    #[serde(default = "default_embedding_endpoint")]
    pub endpoint: String,
    #[serde(default)]
    pub api_key: Option<String>,
}

fn default_strategy() -> String {
    "lexical".to_string()
}

fn default_embedding_model() -> String {
    "nomic-embed-text".to_string()
}

fn default_embedding_endpoint() -> String {
    "http://localhost:11434".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    #[serde(default = "default_top_k")]
    pub top_k: usize,
    #[serde(default = "default_max_context_length")]
    pub max_context_length: usize,
}

fn default_top_k() -> usize {
    5
}

fn default_max_context_length() -> usize {
    4000
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    pub llm_endpoint: String,
    pub llm_key: String,
    #[serde(default = "default_llm_model")]
    pub llm_model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: usize,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_llm_model() -> String {
    "llama-3.3-70b-versatile".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> usize {
    1000
}

fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub portfolio: PortfolioConfig,
    pub logging: LoggingConfig,
    #[serde(default)]
    pub embeddings: EmbeddingsConfig,
    #[serde(default)]
    pub retrieval: RetrievalConfig,
    pub llm: LlmConfig,
}

impl Default for EmbeddingsConfig {
    fn default() -> Self {
        Self {
            strategy: default_strategy(),
            model: default_embedding_model(),
            endpoint: default_embedding_endpoint(),
            api_key: None,
        }
    }
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
            max_context_length: default_max_context_length(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from default config file path
    pub fn load() -> crate::Result<Self> {
        // Try to load from config.toml first, then fall back to config.example.toml
        if Path::new("config.toml").exists() {
            Self::from_file("config.toml")
        } else if Path::new("config.example.toml").exists() {
            tracing::warn!(
                "Using config.example.toml. Please create config.toml for production use."
            );
            Self::from_file("config.example.toml")
        } else {
            Err(crate::FolioRagError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "No config file found. Please create config.toml or config.example.toml",
            )))
        }
    }

    /// Get portfolio data path
    pub fn portfolio_data_path(&self) -> &str {
        &self.portfolio.data_path
    }

    /// Get retrieval top-k
    pub fn top_k(&self) -> usize {
        self.retrieval.top_k
    }

    /// Get max context length for prompt assembly
    pub fn max_context_length(&self) -> usize {
        self.retrieval.max_context_length
    }

    /// Get embedding strategy name
    pub fn embedding_strategy(&self) -> &str {
        &self.embeddings.strategy
    }

    /// Get embedding model name
    pub fn embedding_model(&self) -> &str {
        &self.embeddings.model
    }

    /// Get embedding endpoint
    pub fn embedding_endpoint(&self) -> &str {
        &self.embeddings.endpoint
    }

    /// Get LLM endpoint
    pub fn llm_endpoint(&self) -> &str {
        &self.llm.llm_endpoint
    }

    /// Get LLM key
    pub fn llm_key(&self) -> &str {
        &self.llm.llm_key
    }

    /// Get LLM model
    pub fn llm_model(&self) -> &str {
        &self.llm.llm_model
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            portfolio: PortfolioConfig {
                data_path: "data/portfolio.example.json".to_string(),
                resume_filename: default_resume_filename(),
                resume_url: default_resume_url(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            embeddings: EmbeddingsConfig::default(),
            retrieval: RetrievalConfig::default(),
            llm: LlmConfig {
                llm_endpoint: "http://localhost:11434".to_string(),
                llm_key: "ollama".to_string(),
                llm_model: default_llm_model(),
                temperature: default_temperature(),
                max_tokens: default_max_tokens(),
                timeout_secs: default_timeout_secs(),
            },
        }
    }
}
