use anyhow::{Context, bail};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

const TEMPERATURE: f32 = 0.0;

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChatMessage,
}

/// Client for an OpenAI-compatible chat completions endpoint, used for
/// single prompt-in, text-out generation requests.
pub struct GenerationClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
    max_tokens: u32,
    headers: HashMap<String, String>,
}

impl GenerationClient {
    pub fn new(
        base_url: &str,
        api_key: &str,
        model: &str,
        max_tokens: u32,
        headers: &HashMap<String, String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
            max_tokens,
            headers: headers.clone(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send one prompt as a single user message and return the raw text of
    /// the first choice. Every failure mode (transport, auth, quota, empty
    /// response) surfaces as a recoverable error for the caller to log.
    pub async fn generate(&self, prompt: &str) -> anyhow::Result<String> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            max_tokens: self.max_tokens,
            temperature: TEMPERATURE,
        };

        let mut builder = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json");
        for (key, value) in &self.headers {
            builder = builder.header(key, value);
        }

        let response = builder
            .json(&request)
            .send()
            .await
            .context("generation request failed")?
            .error_for_status()
            .context("generation service returned an error status")?;

        let chat_response: ChatResponse = response
            .json()
            .await
            .context("malformed generation response")?;

        let Some(choice) = chat_response.choices.into_iter().next() else {
            bail!("generation response contained no choices");
        };
        Ok(choice.message.content)
    }
}
