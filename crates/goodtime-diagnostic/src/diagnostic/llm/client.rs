use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::CompletionConfig;

use super::prompt::CompletionPrompt;

const TEMPERATURE: f32 = 0.7;
const MAX_TOKENS: u32 = 800;
const ERROR_BODY_LIMIT: usize = 240;

/// Chat-completion boundary so the analyst can be exercised without a network.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Returns the raw text of the first choice.
    async fn complete(&self, prompt: &CompletionPrompt) -> Result<String, CompletionError>;
}

/// Failures that abort an analysis; unparseable model output is not one of them.
#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    #[error("completion transport failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("completion endpoint answered {status}: {body}")]
    Status { status: u16, body: String },
    #[error("completion response carried no message content")]
    EmptyResponse,
}

/// Client for OpenAI-compatible `/chat/completions` endpoints.
pub struct OpenAiCompletionClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

impl OpenAiCompletionClient {
    pub fn new(config: &CompletionConfig) -> Result<Self, CompletionError> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            http,
            endpoint: format!("{}/chat/completions", config.base_url.trim_end_matches('/')),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl CompletionClient for OpenAiCompletionClient {
    async fn complete(&self, prompt: &CompletionPrompt) -> Result<String, CompletionError> {
        let body = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &prompt.system,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt.user,
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(CompletionError::Status {
                status: status.as_u16(),
                body: text.chars().take(ERROR_BODY_LIMIT).collect(),
            });
        }

        let payload: ChatResponse = response.json().await?;
        payload
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(CompletionError::EmptyResponse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn endpoint_joins_base_url_without_double_slash() {
        let config = CompletionConfig {
            api_key: "sk-test".to_string(),
            base_url: "https://llm.example.com/v1/".to_string(),
            model: "gpt-4o-mini".to_string(),
            timeout: Duration::from_secs(5),
        };
        let client = OpenAiCompletionClient::new(&config).expect("client builds");
        assert_eq!(client.endpoint(), "https://llm.example.com/v1/chat/completions");
    }

    #[test]
    fn chat_request_serializes_openai_shape() {
        let body = ChatRequest {
            model: "gpt-4o-mini",
            messages: [
                ChatMessage {
                    role: "system",
                    content: "sys",
                },
                ChatMessage {
                    role: "user",
                    content: "question",
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };
        let json = serde_json::to_value(&body).expect("serializes");
        assert_eq!(json["messages"][1]["role"], "user");
        assert_eq!(json["max_tokens"], 800);
    }

    #[test]
    fn chat_response_tolerates_null_content() {
        let raw = r#"{"choices": [{"message": {"role": "assistant", "content": null}}]}"#;
        let payload: ChatResponse = serde_json::from_str(raw).expect("parses");
        assert!(payload.choices[0].message.content.is_none());
    }
}
