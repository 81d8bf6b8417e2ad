use async_trait::async_trait;
use log::{ debug, info, warn };
use serde::{ Deserialize, Serialize };
use serde_json::Value;
use thiserror::Error;

use crate::config::CompletionOptions;
use crate::errors::{ FactCheckError, FactCheckResult };
use crate::implementations::config::{ ConfigError, LlmProvider, LlmSettings };
use crate::traits::llm_client::LlmClient;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("API error: {0}")] ApiError(String),

    #[error("Configuration error: {0}")] ConfigError(#[from] ConfigError),

    #[error("Failed to parse API response: {0}")] ParseError(String),

    #[error("Network error: {0}")] NetworkError(String),

    #[error("Empty response from {0}")] EmptyResponse(String),

    #[error("HTTP error: {status} - {message}")] HttpError {
        status: u16,
        message: String,
    },
}

impl From<LlmError> for FactCheckError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::ConfigError(err) => FactCheckError::ConfigError(err.to_string()),
            other =>
                FactCheckError::ExternalServiceError {
                    service: "LLM API".to_string(),
                    message: other.to_string(),
                },
        }
    }
}

/// OpenAI chat request types
#[derive(Debug, Serialize, Deserialize, Clone)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: usize,
}

/// LLM client speaking the Gemini, OpenAI or Anthropic HTTP APIs.
///
/// The client is built once per run and shared by the claim extractor and
/// the claim verifier.
#[derive(Clone)]
pub struct HttpLlmClient {
    settings: LlmSettings,
    http_client: reqwest::Client,
}

impl HttpLlmClient {
    pub fn new(settings: LlmSettings, timeout_secs: u64) -> Result<Self, LlmError> {
        let http_client = reqwest::Client
            ::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| LlmError::NetworkError(format!("Failed to create HTTP client: {}", e)))?;

        info!("Using {} provider with model {}", settings.provider, settings.model);
        Ok(Self { settings, http_client })
    }

    fn build_request(&self, prompt: &str, options: &CompletionOptions) -> reqwest::RequestBuilder {
        let settings = &self.settings;
        match settings.provider {
            LlmProvider::Gemini => {
                let url = format!(
                    "{}/{}:generateContent",
                    settings.endpoint.trim_end_matches('/'),
                    settings.model
                );
                let mut body =
                    serde_json::json!({
                    "contents": [{ "role": "user", "parts": [{ "text": prompt }] }],
                    "generationConfig": {
                        "temperature": options.temperature,
                        "maxOutputTokens": options.max_tokens,
                    }
                });
                if let Some(system) = &options.system_prompt {
                    body["systemInstruction"] = serde_json::json!({ "parts": [{ "text": system }] });
                }
                self.http_client
                    .post(url)
                    .header("Content-Type", "application/json")
                    .header("x-goog-api-key", &settings.api_key)
                    .json(&body)
            }
            LlmProvider::Anthropic => {
                let mut body =
                    serde_json::json!({
                    "model": settings.model,
                    "max_tokens": options.max_tokens,
                    "temperature": options.temperature,
                    "messages": [{ "role": "user", "content": prompt }]
                });
                if let Some(system) = &options.system_prompt {
                    body["system"] = Value::String(system.clone());
                }
                self.http_client
                    .post(&settings.endpoint)
                    .header("Content-Type", "application/json")
                    .header("x-api-key", &settings.api_key)
                    .header("anthropic-version", "2023-06-01")
                    .json(&body)
            }
            LlmProvider::OpenAI => {
                let mut messages = Vec::new();
                if let Some(system) = &options.system_prompt {
                    messages.push(ChatMessage { role: "system".to_string(), content: system.clone() });
                }
                messages.push(ChatMessage { role: "user".to_string(), content: prompt.to_string() });

                let request = ChatRequest {
                    model: settings.model.clone(),
                    messages,
                    temperature: options.temperature,
                    max_tokens: options.max_tokens,
                };
                self.http_client
                    .post(&settings.endpoint)
                    .header("Content-Type", "application/json")
                    .header("Authorization", format!("Bearer {}", settings.api_key))
                    .json(&request)
            }
        }
    }

    async fn call_llm_api(&self, prompt: &str, options: &CompletionOptions) -> Result<String, LlmError> {
        let provider = self.settings.provider;

        info!("Making LLM API request to {}", provider);
        debug!("API endpoint: {}", self.settings.endpoint);
        debug!("Model: {}", self.settings.model);
        debug!("Temperature: {}", options.temperature);
        debug!("Max tokens: {}", options.max_tokens);
        debug!("Prompt length: {} characters", prompt.len());

        let response = self
            .build_request(prompt, options)
            .send().await
            .map_err(|e| {
                let error_msg = format!("Network error when calling {} API: {}", provider, e);
                warn!("{}", error_msg);
                if e.is_timeout() {
                    warn!("Request timed out");
                }
                if e.is_connect() {
                    warn!("Connection error - check network connectivity");
                }
                LlmError::NetworkError(error_msg)
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let error_text = response
                .text().await
                .unwrap_or_else(|_| "Failed to get error message".to_string());

            warn!("API error: HTTP {} - {}", status, error_text);
            return Err(LlmError::HttpError {
                status,
                message: error_text,
            });
        }

        let response_text = response.text().await.map_err(|e| {
            warn!("Failed to get response text: {}", e);
            LlmError::ParseError(e.to_string())
        })?;
        debug!("Response length: {} characters", response_text.len());

        let response_json: Value = serde_json::from_str(&response_text).map_err(|e| {
            warn!("JSON parsing error: {}", e);
            LlmError::ParseError(format!("Invalid JSON response: {}", e))
        })?;

        let content = extract_completion_text(provider, &response_json)?;
        info!("API call completed successfully");
        debug!("Content length: {} characters", content.len());
        Ok(content)
    }
}

#[async_trait]
impl LlmClient for HttpLlmClient {
    async fn complete(&self, prompt: &str, options: &CompletionOptions) -> FactCheckResult<String> {
        Ok(self.call_llm_api(prompt, options).await?)
    }

    fn model_name(&self) -> String {
        format!("{}/{}", self.settings.provider, self.settings.model)
    }
}

/// Pull the completion text out of a provider's response body
pub fn extract_completion_text(provider: LlmProvider, body: &Value) -> Result<String, LlmError> {
    let text = match provider {
        LlmProvider::Gemini => extract_gemini_text(body)?,
        LlmProvider::OpenAI => extract_openai_text(body)?,
        LlmProvider::Anthropic => extract_anthropic_text(body)?,
    };

    if text.trim().is_empty() {
        warn!("{} returned an empty completion", provider);
        return Err(LlmError::EmptyResponse(provider.to_string()));
    }
    Ok(text)
}

fn extract_gemini_text(body: &Value) -> Result<String, LlmError> {
    let Some(candidate) = body["candidates"].as_array().and_then(|c| c.first()) else {
        if let Some(reason) = body["promptFeedback"]["blockReason"].as_str() {
            return Err(LlmError::ApiError(format!("Prompt blocked: {}", reason)));
        }
        return Err(LlmError::EmptyResponse("gemini".to_string()));
    };

    let parts = candidate["content"]["parts"]
        .as_array()
        .ok_or_else(|| {
            let reason = candidate["finishReason"].as_str().unwrap_or("unknown");
            LlmError::ParseError(format!("Missing content parts (finish reason: {})", reason))
        })?;

    Ok(
        parts
            .iter()
            .filter_map(|p| p["text"].as_str())
            .collect::<Vec<_>>()
            .concat()
    )
}

fn extract_openai_text(body: &Value) -> Result<String, LlmError> {
    let choice = body["choices"]
        .as_array()
        .and_then(|c| c.first())
        .ok_or_else(|| LlmError::ApiError("No choices in response".to_string()))?;

    choice["message"]["content"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| LlmError::ParseError("Missing message content in response".to_string()))
}

fn extract_anthropic_text(body: &Value) -> Result<String, LlmError> {
    let content = body["content"]
        .as_array()
        .ok_or_else(|| LlmError::ParseError("Unable to find content in Anthropic response".to_string()))?;

    Ok(
        content
            .iter()
            .filter(|block| block["type"].as_str().map_or(true, |t| t == "text"))
            .filter_map(|block| block["text"].as_str())
            .collect::<Vec<_>>()
            .concat()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn gemini_parts_are_joined() {
        let body =
            json!({
            "candidates": [{
                "content": { "parts": [{ "text": "[{\"claim\":" }, { "text": " \"x\"}]" }] },
                "finishReason": "STOP"
            }]
        });
        let text = extract_completion_text(LlmProvider::Gemini, &body).unwrap();
        assert_eq!(text, "[{\"claim\": \"x\"}]");
    }

    #[test]
    fn gemini_block_reason_is_reported() {
        let body = json!({ "promptFeedback": { "blockReason": "SAFETY" } });
        let err = extract_completion_text(LlmProvider::Gemini, &body).unwrap_err();
        assert!(matches!(err, LlmError::ApiError(msg) if msg.contains("SAFETY")));
    }

    #[test]
    fn openai_content_is_extracted() {
        let body = json!({ "choices": [{ "message": { "role": "assistant", "content": "{\"status\":\"VERIFIED\"}" } }] });
        assert_eq!(
            extract_completion_text(LlmProvider::OpenAI, &body).unwrap(),
            "{\"status\":\"VERIFIED\"}"
        );
        assert!(extract_completion_text(LlmProvider::OpenAI, &json!({ "choices": [] })).is_err());
    }

    #[test]
    fn anthropic_text_blocks_are_joined() {
        let body = json!({ "content": [{ "type": "text", "text": "[]" }] });
        assert_eq!(extract_completion_text(LlmProvider::Anthropic, &body).unwrap(), "[]");
    }

    #[test]
    fn blank_completion_is_an_error() {
        let body = json!({ "choices": [{ "message": { "content": "   " } }] });
        let err = extract_completion_text(LlmProvider::OpenAI, &body).unwrap_err();
        assert!(matches!(err, LlmError::EmptyResponse(_)));

        let converted: FactCheckError = err.into();
        assert!(matches!(converted, FactCheckError::ExternalServiceError { .. }));
    }
}
