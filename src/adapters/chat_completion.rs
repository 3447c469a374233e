//! OpenAI-compatible chat completion client.
//!
//! Used by the assistant to phrase computed analyses; it never sees raw
//! provider payloads.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::adapters::football_data::{classify_status, classify_transport_error};
use crate::adapters::traits::ChatCompletion;
use crate::config::AssistantConfig;
use crate::domain::ChatMessage;
use crate::error::{BetBrainError, Result};

const PROVIDER: &str = "chat-completion";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct WireMessage {
    role: String,
    content: String,
}

#[derive(Debug, Clone, Serialize)]
struct CompletionRequest {
    model: String,
    messages: Vec<WireMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Clone, Deserialize)]
struct CompletionChoice {
    message: WireMessage,
}

/// Chat completion client with bearer authentication
pub struct ChatCompletionClient {
    config: AssistantConfig,
    http: Client,
}

impl ChatCompletionClient {
    pub fn new(config: AssistantConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| BetBrainError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, http })
    }

    pub fn is_configured(&self) -> bool {
        self.config.is_configured()
    }

    fn build_request(&self, system: &str, messages: &[ChatMessage]) -> CompletionRequest {
        let mut wire = Vec::with_capacity(messages.len() + 1);
        wire.push(WireMessage {
            role: "system".to_string(),
            content: system.to_string(),
        });
        wire.extend(messages.iter().map(|m| WireMessage {
            role: m.role.as_str().to_string(),
            content: m.content.clone(),
        }));

        CompletionRequest {
            model: self.config.model.clone(),
            messages: wire,
            temperature: Some(self.config.temperature),
            max_tokens: Some(self.config.max_tokens),
        }
    }
}

#[async_trait]
impl ChatCompletion for ChatCompletionClient {
    async fn complete(&self, system: &str, messages: &[ChatMessage]) -> Result<String> {
        if !self.is_configured() {
            return Err(BetBrainError::NotConfigured("CHAT_API_KEY not set".to_string()));
        }

        debug!("Sending {} messages to chat completion", messages.len() + 1);

        let request = self.build_request(system, messages);
        let url = format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        );

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| classify_transport_error(e, PROVIDER))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!("Chat completion error: {} - {}", status, body);
            return Err(classify_status(status, body, PROVIDER, "/chat/completions"));
        }

        let completion: CompletionResponse = response.json().await?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| BetBrainError::UpstreamStatus {
                provider: PROVIDER.to_string(),
                status: 200,
                body: "empty completion".to_string(),
            })?;

        debug!("Chat completion received: {} chars", content.len());
        Ok(content)
    }
}
