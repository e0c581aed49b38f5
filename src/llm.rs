use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::LlmConfig;

/// Model requested for every completion. Not configurable.
pub const MODEL: &str = "deepseek-chat";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChatMessage,
}

/// Seam between the dispatcher and the completion API so handlers can be
/// exercised against a stub backend.
#[async_trait]
pub trait Completion: Send + Sync {
    async fn complete(&self, system_prompt: &str, user_text: &str) -> Result<String>;
}

pub struct LlmClient {
    client: reqwest::Client,
    config: LlmConfig,
}

impl LlmClient {
    pub fn new(config: LlmConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn build_request(system_prompt: &str, user_text: &str) -> ChatRequest {
        ChatRequest {
            model: MODEL.to_string(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: system_prompt.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: user_text.to_string(),
                },
            ],
            stream: false,
        }
    }
}

#[async_trait]
impl Completion for LlmClient {
    /// One non-streaming chat-completion call; returns the first choice's
    /// text. No retry, no timeout override — transport and API errors
    /// propagate to the caller.
    async fn complete(&self, system_prompt: &str, user_text: &str) -> Result<String> {
        let request = Self::build_request(system_prompt, user_text);
        let url = format!("{}/chat/completions", self.config.base_url);

        debug!("Sending completion request to {}", url);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .context("Failed to send completion request")?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            anyhow::bail!("Completion API error ({}): {}", status, error_body);
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .context("Failed to parse completion response")?;

        chat_response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .context("No completion returned")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_wire_format() {
        let request = LlmClient::build_request("analyze this", "hello");
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["model"], "deepseek-chat");
        assert_eq!(json["stream"], false);

        let messages = json["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0]["role"], "system");
        assert_eq!(messages[0]["content"], "analyze this");
        assert_eq!(messages[1]["role"], "user");
        assert_eq!(messages[1]["content"], "hello");
    }

    #[test]
    fn test_user_text_passed_verbatim() {
        let text = "  multi\nline  input with spaces  ";
        let request = LlmClient::build_request("p", text);
        assert_eq!(request.messages[1].content, text);
    }

    #[test]
    fn test_response_first_choice() {
        let body = r#"{
            "choices": [
                {"message": {"role": "assistant", "content": "first"}},
                {"message": {"role": "assistant", "content": "second"}}
            ]
        }"#;
        let response: ChatResponse = serde_json::from_str(body).unwrap();
        let content = response.choices.into_iter().next().map(|c| c.message.content);
        assert_eq!(content.as_deref(), Some("first"));
    }

    #[test]
    fn test_empty_choices_is_none() {
        let body = r#"{"choices": []}"#;
        let response: ChatResponse = serde_json::from_str(body).unwrap();
        assert!(response.choices.into_iter().next().is_none());
    }
}
