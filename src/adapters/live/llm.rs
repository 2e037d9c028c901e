//! Live adapter for the `LlmClient` port using the OpenAI chat completions API.

use std::env;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::ports::llm::{CompletionFuture, CompletionRequest, CompletionResponse, LlmClient};

const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Live LLM client that calls the OpenAI API.
pub struct LiveLlmClient {
    client: Client,
}

impl LiveLlmClient {
    /// Creates a new live LLM client.
    #[must_use]
    pub fn new() -> Self {
        Self { client: Client::new() }
    }
}

impl Default for LiveLlmClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Request body sent to the chat completions API.
#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<ChatMessage<'a>>,
}

/// A single message in the chat completions request.
#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Top-level response from the chat completions API.
#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
    usage: Usage,
}

/// One completion choice in the response.
#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

/// The message inside a completion choice.
#[derive(Deserialize)]
struct ResponseMessage {
    content: String,
}

/// Token usage reported by the API.
#[derive(Deserialize)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

/// Error response from the OpenAI API.
#[derive(Deserialize)]
struct ApiError {
    error: ApiErrorDetail,
}

/// Detail inside an OpenAI error response.
#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
}

impl LlmClient for LiveLlmClient {
    fn complete(&self, request: &CompletionRequest) -> CompletionFuture<'_> {
        let model = request.model.clone();
        let prompt = request.prompt.clone();
        let max_tokens = request.max_tokens;

        Box::pin(async move {
            let api_key = env::var("OPENAI_API_KEY").map_err(|_| {
                Box::<dyn std::error::Error + Send + Sync>::from(
                    "OPENAI_API_KEY environment variable not set",
                )
            })?;

            let body = ChatRequest {
                model: &model,
                max_tokens,
                messages: vec![ChatMessage { role: "user", content: &prompt }],
            };

            let response = self
                .client
                .post(OPENAI_API_URL)
                .bearer_auth(&api_key)
                .json(&body)
                .send()
                .await
                .map_err(|e| -> Box<dyn std::error::Error + Send + Sync> {
                    format!("OpenAI API request failed: {e}").into()
                })?;

            let status = response.status();
            let response_text =
                response.text().await.map_err(|e| -> Box<dyn std::error::Error + Send + Sync> {
                    format!("Failed to read OpenAI API response: {e}").into()
                })?;

            if !status.is_success() {
                let msg = serde_json::from_str::<ApiError>(&response_text)
                    .map(|e| e.error.message)
                    .unwrap_or(response_text);
                return Err(format!("OpenAI API error ({}): {msg}", status.as_u16()).into());
            }

            let api_response: ChatResponse = serde_json::from_str(&response_text).map_err(
                |e| -> Box<dyn std::error::Error + Send + Sync> {
                    format!("Failed to parse OpenAI API response: {e}").into()
                },
            )?;

            let text = api_response
                .choices
                .into_iter()
                .next()
                .map(|choice| choice.message.content)
                .unwrap_or_default();

            Ok(CompletionResponse {
                text,
                prompt_tokens: api_response.usage.prompt_tokens,
                completion_tokens: api_response.usage.completion_tokens,
            })
        })
    }
}
