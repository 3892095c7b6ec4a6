use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;
use crate::config::CompletionConfig;
use crate::prediction::types::PredictError;

/// Text-completion client. Built once at startup and shared read-only.
pub struct CompletionClient {
    client: Client,
    base_url: String,
    api_key: String,
    config: CompletionConfig,
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

impl CompletionClient {
    pub fn new(base_url: String, api_key: String, config: CompletionConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            config,
        }
    }

    pub fn config(&self) -> &CompletionConfig {
        &self.config
    }

    /// Submit `prompt` and return the first choice's text as-is.
    pub async fn complete(&self, prompt: &str) -> Result<String, PredictError> {
        let url = format!("{}/completions", self.base_url);
        let request = CompletionRequest {
            model: &self.config.model,
            prompt,
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        debug!(
            model = %self.config.model,
            prompt_len = prompt.len(),
            "Submitting completion request"
        );

        let response = self.client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| PredictError::CompletionFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|b| b.error.message)
                .unwrap_or_else(|_| format!("HTTP {}", status));
            return Err(PredictError::CompletionFailed(message));
        }

        let completion: CompletionResponse = response
            .json()
            .await
            .map_err(|e| PredictError::CompletionFailed(e.to_string()))?;

        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.text)
            .ok_or_else(|| PredictError::CompletionFailed("no completion choices returned".to_string()))
    }
}
