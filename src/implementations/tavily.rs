use async_trait::async_trait;
use log::{ debug, info, warn };
use serde::{ Deserialize, Serialize };
use thiserror::Error;

use crate::errors::{ FactCheckError, FactCheckResult };
use crate::models::evidence::{ SearchDepth, SearchEvidence, SearchHit, SearchRequest };
use crate::traits::search_service::SearchService;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Failed to create HTTP client: {0}")] ClientError(String),

    #[error("Network error: {0}")] NetworkError(String),

    #[error("HTTP error: {status} - {message}")] HttpError {
        status: u16,
        message: String,
    },

    #[error("Failed to parse search response: {0}")] ParseError(String),
}

impl From<SearchError> for FactCheckError {
    fn from(err: SearchError) -> Self {
        FactCheckError::ExternalServiceError {
            service: "Tavily".to_string(),
            message: err.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
struct TavilyRequest<'a> {
    api_key: &'a str,
    query: &'a str,
    search_depth: SearchDepth,
    max_results: usize,
    include_answer: bool,
}

#[derive(Debug, Deserialize)]
struct TavilyResponse {
    #[serde(default)]
    results: Vec<SearchHit>,
    #[serde(default)]
    answer: Option<String>,
}

impl From<TavilyResponse> for SearchEvidence {
    fn from(response: TavilyResponse) -> Self {
        SearchEvidence {
            results: response.results,
            answer: response.answer,
        }
    }
}

/// Tavily web-search client
pub struct TavilySearchService {
    api_key: String,
    endpoint: String,
    client: reqwest::Client,
}

impl TavilySearchService {
    pub fn new(api_key: String, endpoint: String) -> FactCheckResult<Self> {
        let client = reqwest::Client
            ::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| SearchError::ClientError(e.to_string()))?;

        Ok(Self { api_key, endpoint, client })
    }

    async fn post_search(&self, request: &SearchRequest) -> Result<SearchEvidence, SearchError> {
        let body = TavilyRequest {
            api_key: &self.api_key,
            query: &request.query,
            search_depth: request.depth,
            max_results: request.max_results,
            include_answer: request.include_answer,
        };

        let response = self.client
            .post(&self.endpoint)
            .json(&body)
            .send().await
            .map_err(|e| {
                if e.is_timeout() {
                    warn!("Tavily request timed out");
                }
                SearchError::NetworkError(e.to_string())
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            warn!("Tavily API error: HTTP {} - {}", status, message);
            return Err(SearchError::HttpError { status, message });
        }

        let parsed: TavilyResponse = response
            .json().await
            .map_err(|e| SearchError::ParseError(e.to_string()))?;
        Ok(parsed.into())
    }
}

#[async_trait]
impl SearchService for TavilySearchService {
    async fn search(&self, request: &SearchRequest) -> FactCheckResult<SearchEvidence> {
        info!("Searching: {}", request.query);
        let evidence = self.post_search(request).await?;
        debug!(
            "Search returned {} results (answer: {})",
            evidence.results.len(),
            evidence.answer.is_some()
        );
        Ok(evidence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_uses_tavily_field_names() {
        let body = TavilyRequest {
            api_key: "tvly-key",
            query: "Bitcoin price January 2026",
            search_depth: SearchDepth::Advanced,
            max_results: 5,
            include_answer: true,
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["search_depth"], "advanced");
        assert_eq!(value["max_results"], 5);
        assert_eq!(value["include_answer"], true);
    }

    #[test]
    fn sparse_response_maps_to_evidence() {
        let raw =
            r#"{
            "query": "q",
            "answer": null,
            "results": [
                {"title": "Price today", "url": "https://a.example", "content": "BTC at $95,000", "score": 0.91},
                {"url": "https://b.example"}
            ]
        }"#;
        let parsed: TavilyResponse = serde_json::from_str(raw).unwrap();
        let evidence: SearchEvidence = parsed.into();

        assert_eq!(evidence.results.len(), 2);
        assert_eq!(evidence.results[0].score, Some(0.91));
        assert_eq!(evidence.results[1].title, "");
        assert_eq!(evidence.answer, None);
    }

    #[test]
    fn missing_results_key_is_empty_evidence() {
        let parsed: TavilyResponse = serde_json::from_str(r#"{"answer": "n/a"}"#).unwrap();
        let evidence: SearchEvidence = parsed.into();
        assert!(evidence.results.is_empty());
    }
}
