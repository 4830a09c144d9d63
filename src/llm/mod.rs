use async_trait::async_trait;
use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One role-tagged block of a chat-completion request. Serializes to the
/// OpenAI-compatible wire shape used by the Groq endpoint.
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

#[async_trait]
pub trait LlmProvider: Send + Sync {
    async fn complete(
        &self,
        messages: &[ChatMessage],
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>>;
}

/// Client for the Groq chat-completions endpoint (OpenAI wire format).
pub struct GroqClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl GroqClient {
    pub fn new(api_key: String, base_url: Option<String>, model: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: base_url
                .unwrap_or_else(|| "https://api.groq.com/openai/v1".to_string()),
            model,
        }
    }
}

#[async_trait]
impl LlmProvider for GroqClient {
    async fn complete(
        &self,
        messages: &[ChatMessage],
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&serde_json::json!({
                "model": self.model,
                "messages": messages,
                "temperature": 0.3,
                "max_tokens": 1000
            }))
            .send()
            .await?
            .error_for_status()?;

        let result: Value = response.json().await?;
        let content = result["choices"][0]["message"]["content"]
            .as_str()
            .ok_or("completion response missing message content")?;

        Ok(content.to_string())
    }
}

/// Degradation contract: LLM failures never propagate to callers. Transport,
/// HTTP and parse errors all collapse into a fixed fallback string that is
/// returned in place of the completion text.
pub async fn complete_with_fallback(provider: &dyn LlmProvider, messages: &[ChatMessage]) -> String {
    match provider.complete(messages).await {
        Ok(text) => text,
        Err(e) => {
            warn!("LLM request failed: {}", e);
            format!("AI service temporarily unavailable: {}", e)
        }
    }
}
