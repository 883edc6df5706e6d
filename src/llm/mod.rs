//! LLM completion service
//!
//! A thin client over a chat-completion API, treated as an opaque
//! `complete(system, user) -> text` capability. Supports OpenAI-compatible
//! endpoints (OpenAI, Groq, vLLM, ...) and Ollama. Single request/response,
//! no streaming, bounded by the configured timeout.

pub mod prompts;

use reqwest::Client;
use serde::Deserialize;
use serde::Serialize;
use tracing::debug;

use crate::config::AppConfig;
use crate::errors::FolioRagError;
use crate::errors::Result;

/// A single chat message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Supported completion providers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmProvider {
    /// OpenAI-compatible chat completions API (OpenAI, Groq, vLLM, ...)
    OpenAICompatible,
    /// Ollama local chat API
    Ollama,
}

/// Client for generating text completions
pub struct LlmService {
    provider: LlmProvider,
    endpoint: String,
    api_key: String,
    model: String,
    temperature: f32,
    max_tokens: usize,
    client: Client,
}

impl LlmService {
    /// Create a new LLM service from configuration.
    ///
    /// Provider selection follows the key convention: `llm_key = "ollama"`
    /// selects the Ollama API, anything else is treated as a bearer token
    /// for an OpenAI-compatible endpoint.
    pub fn new(config: &AppConfig) -> Result<Self> {
        let provider = if config.llm_key() == "ollama" {
            LlmProvider::Ollama
        } else {
            LlmProvider::OpenAICompatible
        };

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.llm.timeout_secs))
            .build()
            .map_err(|e| FolioRagError::Http(e.to_string()))?;

        Ok(Self {
            provider,
            endpoint: config.llm_endpoint().to_string(),
            api_key: config.llm_key().to_string(),
            model: config.llm_model().to_string(),
            temperature: config.llm.temperature,
            max_tokens: config.llm.max_tokens,
            client,
        })
    }

    /// Generate a completion for a system persona and a user prompt.
    ///
    /// Any failure (network, timeout, non-2xx status, malformed body) maps
    /// to [`FolioRagError::Completion`]; the response composer recovers
    /// from it with an apology message rather than propagating.
    pub async fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<String> {
        let messages = vec![
            ChatMessage::system(system_prompt),
            ChatMessage::user(user_prompt),
        ];

        match self.provider {
            LlmProvider::OpenAICompatible => self.complete_openai(&messages).await,
            LlmProvider::Ollama => self.complete_ollama(&messages).await,
        }
    }

    /// Complete using an OpenAI-compatible chat completions API
    async fn complete_openai(&self, messages: &[ChatMessage]) -> Result<String> {
        #[derive(Serialize)]
        struct ChatRequest<'a> {
            model: &'a str,
            messages: &'a [ChatMessage],
            temperature: f32,
            max_tokens: usize,
        }

        #[derive(Deserialize)]
        struct ChatResponse {
            choices: Vec<Choice>,
        }

        #[derive(Deserialize)]
        struct Choice {
            message: ResponseMessage,
        }

        #[derive(Deserialize)]
        struct ResponseMessage {
            content: String,
        }

        let url = format!("{}/chat/completions", self.endpoint);
        debug!("Calling chat completions API: {}", url);

        let request = ChatRequest {
            model: &self.model,
            messages,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| FolioRagError::Completion(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(FolioRagError::Completion(format!(
                "Chat API error ({status}): {error_text}"
            )));
        }

        let result: ChatResponse = response
            .json()
            .await
            .map_err(|e| FolioRagError::Completion(format!("Failed to parse response: {e}")))?;

        result
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| FolioRagError::Completion("No completion in response".to_string()))
    }

    /// Complete using the Ollama chat API
    async fn complete_ollama(&self, messages: &[ChatMessage]) -> Result<String> {
        #[derive(Serialize)]
        struct OllamaRequest<'a> {
            model: &'a str,
            messages: &'a [ChatMessage],
            stream: bool,
            options: OllamaOptions,
        }

        #[derive(Serialize)]
        struct OllamaOptions {
            temperature: f32,
            num_predict: usize,
        }

        #[derive(Deserialize)]
        struct OllamaResponse {
            message: ResponseMessage,
        }

        #[derive(Deserialize)]
        struct ResponseMessage {
            content: String,
        }

        let url = format!("{}/api/chat", self.endpoint);
        debug!("Calling Ollama chat API: {}", url);

        let request = OllamaRequest {
            model: &self.model,
            messages,
            stream: false,
            options: OllamaOptions {
                temperature: self.temperature,
                num_predict: self.max_tokens,
            },
        };

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| FolioRagError::Completion(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(FolioRagError::Completion(format!(
                "Ollama API error ({status}): {error_text}"
            )));
        }

        let result: OllamaResponse = response
            .json()
            .await
            .map_err(|e| FolioRagError::Completion(format!("Failed to parse response: {e}")))?;

        Ok(result.message.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    fn unreachable_config() -> AppConfig {
        let mut config = AppConfig::default();
        // TEST-NET-1 address, guaranteed unroutable; short timeout keeps
        // the failure path fast
        config.llm.llm_endpoint = "http://192.0.2.1:1".to_string();
        config.llm.llm_key = "test-key".to_string();
        config.llm.timeout_secs = 1;
        config
    }

    #[test]
    fn test_provider_selection() {
        let mut config = AppConfig::default();
        config.llm.llm_key = "ollama".to_string();
        let service = LlmService::new(&config).unwrap();
        assert_eq!(service.provider, LlmProvider::Ollama);

        config.llm.llm_key = "gsk_something".to_string();
        let service = LlmService::new(&config).unwrap();
        assert_eq!(service.provider, LlmProvider::OpenAICompatible);
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_completion_error() {
        let service = LlmService::new(&unreachable_config()).unwrap();
        let result = service.complete("system", "user").await;
        assert!(matches!(result, Err(FolioRagError::Completion(_))));
    }

    #[test]
    fn test_chat_message_roles() {
        assert_eq!(ChatMessage::system("s").role, "system");
        assert_eq!(ChatMessage::user("u").role, "user");
    }
}
