//! Chat client - passthrough to the chat-completions API
//!
//! Sends the fixed property-management system prompt plus the truncated
//! conversation window. When no API key is configured the daemon answers
//! from the canned topic list instead of calling out.

use anyhow::{Context, Result};
use atrium_common::assistant::{build_chat_messages, ChatMessage, EMPTY_REPLY_FALLBACK};
use atrium_common::config::LlmConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
struct CompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Client for the chat-completions endpoint
pub struct ChatClient {
    client: reqwest::Client,
    config: LlmConfig,
}

impl ChatClient {
    pub fn new(config: LlmConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Whether the LLM path is usable (enabled and key present)
    pub fn is_configured(&self) -> bool {
        self.config.enabled && self.config.api_key().is_some()
    }

    /// Send the conversation and return the assistant's reply
    pub async fn chat(&self, history: &[ChatMessage], user_message: &str) -> Result<String> {
        let api_key = self
            .config
            .api_key()
            .context("No chat API key configured")?;

        let request = CompletionRequest {
            model: self.config.model.clone(),
            messages: build_chat_messages(history, user_message),
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };

        let resp = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .context("Failed to reach chat completion endpoint")?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            anyhow::bail!("Chat completion request failed ({}): {}", status, text);
        }

        let completion: CompletionResponse = resp
            .json()
            .await
            .context("Failed to parse chat completion response")?;

        let reply = completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_else(|| EMPTY_REPLY_FALLBACK.to_string());

        Ok(reply)
    }
}
