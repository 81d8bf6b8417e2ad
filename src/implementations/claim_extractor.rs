use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use log::{ debug, info, warn };
use serde_json::Value;

use crate::config::CompletionOptions;
use crate::errors::{ FactCheckError, FactCheckResult };
use crate::implementations::normalize::parse_model_json;
use crate::implementations::prompts::render_template;
use crate::models::claim::ClaimRecord;
use crate::models::common::{ truncate_chars, ClaimCategory };
use crate::traits::claim_extractor::{ ClaimExtractor, ExtractionOutcome };
use crate::traits::llm_client::LlmClient;

/// Extracts claims by prompting an LLM with the leading part of the document
pub struct LLMClaimExtractor {
    llm: Arc<dyn LlmClient>,
    template: String,
    options: CompletionOptions,
    char_budget: usize,
}

impl LLMClaimExtractor {
    pub fn new(
        llm: Arc<dyn LlmClient>,
        template: String,
        options: CompletionOptions,
        char_budget: usize
    ) -> Self {
        Self { llm, template, options, char_budget }
    }

    async fn try_extract(&self, text: &str) -> FactCheckResult<Vec<ClaimRecord>> {
        let excerpt = truncate_chars(text, self.char_budget);
        if excerpt.trim().is_empty() {
            return Err(FactCheckError::ExtractionError("Document contains no extractable text".to_string()));
        }
        if excerpt.len() < text.len() {
            info!(
                "Document truncated to its first {} characters for extraction",
                self.char_budget
            );
        }

        let mut params = HashMap::new();
        params.insert("document", excerpt.to_string());
        let prompt = render_template(&self.template, &params);

        debug!("Extracting claims with {}", self.llm.model_name());
        let response = self.llm.complete(&prompt, &self.options).await?;
        parse_claims(&response)
    }
}

#[async_trait]
impl ClaimExtractor for LLMClaimExtractor {
    async fn extract(&self, text: &str) -> ExtractionOutcome {
        match self.try_extract(text).await {
            Ok(claims) => {
                info!("Extracted {} claims", claims.len());
                ExtractionOutcome { claims, diagnostic: None }
            }
            Err(e) => {
                warn!("Claim extraction failed: {}", e);
                ExtractionOutcome::failed(e)
            }
        }
    }
}

/// Parse a model response into claim records.
///
/// Accepts a bare array, an object with a `claims` array, or any object
/// whose first array-valued field holds the claims. Items missing the
/// claim text or search query are dropped.
pub fn parse_claims(response: &str) -> FactCheckResult<Vec<ClaimRecord>> {
    let value = parse_model_json(response).map_err(|e| {
        debug!("Unparseable extraction response: {}", truncate_chars(response, 200));
        FactCheckError::ExtractionError(format!("Response is not valid JSON: {}", e))
    })?;

    let items = select_claim_list(&value).ok_or_else(||
        FactCheckError::ExtractionError("Response does not contain a list of claims".to_string())
    )?;

    let claims: Vec<ClaimRecord> = items.iter().filter_map(claim_from_value).collect();
    let dropped = items.len() - claims.len();
    if dropped > 0 {
        warn!("Dropped {} malformed claim entries", dropped);
    }
    Ok(claims)
}

/// Locate the claim array inside a parsed response
pub fn select_claim_list(value: &Value) -> Option<&Vec<Value>> {
    match value {
        Value::Array(items) => Some(items),
        Value::Object(map) =>
            match map.get("claims") {
                Some(claims) => claims.as_array(),
                None => map.values().find_map(Value::as_array),
            }
        _ => None,
    }
}

fn claim_from_value(item: &Value) -> Option<ClaimRecord> {
    let text = item.get("claim")?.as_str()?;
    let search_query = item.get("search_query")?.as_str()?;
    let category = item
        .get("category")
        .and_then(Value::as_str)
        .map(ClaimCategory::from_token)
        .unwrap_or_default();

    ClaimRecord::new(text, category, search_query)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn fenced_array_is_parsed() {
        let response =
            "```json\n[{\"claim\": \"Bitcoin is trading at $42,500\", \"category\": \"financial\", \"search_query\": \"Bitcoin price\"}]\n```";
        let claims = parse_claims(response).unwrap();
        assert_eq!(claims.len(), 1);
        assert_eq!(claims[0].text, "Bitcoin is trading at $42,500");
        assert_eq!(claims[0].category, ClaimCategory::Financial);
    }

    #[test]
    fn unfenced_json_tag_is_parsed() {
        let claims = parse_claims("json\n[{\"claim\":\"a\",\"search_query\":\"q\"}]").unwrap();
        assert_eq!(claims.len(), 1);
        assert_eq!(claims[0].text, "a");
        assert_eq!(claims[0].search_query, "q");
    }

    #[test]
    fn claims_key_is_preferred() {
        let value =
            json!({
            "notes": [1, 2],
            "claims": [{"claim": "a", "search_query": "q"}]
        });
        let list = select_claim_list(&value).unwrap();
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn first_list_value_is_used_without_claims_key() {
        let value =
            json!({
            "count": 2,
            "items": [{"claim": "a", "search_query": "q"}, {"claim": "b", "search_query": "r"}],
            "other": []
        });
        assert_eq!(select_claim_list(&value).unwrap().len(), 2);
    }

    #[test]
    fn non_list_shapes_are_rejected() {
        assert!(select_claim_list(&json!({"claims": "none"})).is_none());
        assert!(select_claim_list(&json!({"count": 0})).is_none());
        assert!(select_claim_list(&json!("text")).is_none());
        assert!(matches!(parse_claims("{\"count\": 0}"), Err(FactCheckError::ExtractionError(_))));
        assert!(matches!(parse_claims("no json here"), Err(FactCheckError::ExtractionError(_))));
    }

    #[test]
    fn malformed_items_are_dropped() {
        let response =
            r#"[
            {"claim": "Unemployment is 3.9%", "category": "Statistics", "search_query": "unemployment rate"},
            {"claim": "", "category": "date", "search_query": "q"},
            {"claim": "No query"},
            "just a string",
            {"claim": "Launched in 2024", "category": "space", "search_query": "launch year"}
        ]"#;
        let claims = parse_claims(response).unwrap();
        assert_eq!(claims.len(), 2);
        assert_eq!(claims[0].category, ClaimCategory::Statistic);
        assert_eq!(claims[1].category, ClaimCategory::Other);
        assert!(claims.iter().all(ClaimRecord::is_valid));
    }
}
