use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use log::{ debug, info, warn };
use serde_json::Value;

use crate::config::{ CheckerOptions, CompletionOptions };
use crate::errors::{ FactCheckError, FactCheckResult };
use crate::implementations::normalize::parse_model_json;
use crate::implementations::prompts::{ as_of_label, render_template };
use crate::models::claim::ClaimRecord;
use crate::models::common::{ truncate_chars, VerdictStatus };
use crate::models::evidence::{ SearchDepth, SearchRequest };
use crate::models::verdict::VerdictRecord;
use crate::traits::claim_verifier::ClaimVerifier;
use crate::traits::llm_client::LlmClient;
use crate::traits::search_service::SearchService;

/// Verifies claims by searching the web and asking an LLM to adjudicate
pub struct LLMClaimVerifier {
    llm: Arc<dyn LlmClient>,
    search: Arc<dyn SearchService>,
    template: String,
    options: CompletionOptions,
    checker: CheckerOptions,
}

impl LLMClaimVerifier {
    pub fn new(
        llm: Arc<dyn LlmClient>,
        search: Arc<dyn SearchService>,
        template: String,
        options: CompletionOptions,
        checker: CheckerOptions
    ) -> Self {
        Self { llm, search, template, options, checker }
    }

    fn search_request(&self, claim: &ClaimRecord) -> SearchRequest {
        SearchRequest {
            query: claim.search_query.clone(),
            max_results: self.checker.search_max_results,
            depth: SearchDepth::Advanced,
            include_answer: true,
        }
    }
}

#[async_trait]
impl ClaimVerifier for LLMClaimVerifier {
    async fn try_verify(&self, claim: &ClaimRecord) -> FactCheckResult<VerdictRecord> {
        let evidence = self.search.search(&self.search_request(claim)).await?;

        let mut params = HashMap::new();
        params.insert("claim", claim.text.clone());
        params.insert(
            "search_context",
            evidence.digest(
                self.checker.digest_results,
                self.checker.snippet_chars,
                self.checker.title_chars
            )
        );
        params.insert("answer", evidence.answer_or_default().to_string());
        params.insert("as_of", as_of_label());
        let prompt = render_template(&self.template, &params);

        let response = self.llm.complete(&prompt, &self.options).await?;
        parse_verdict(&response)
    }

    async fn verify(&self, claim: &ClaimRecord) -> VerdictRecord {
        match self.try_verify(claim).await {
            Ok(verdict) => {
                info!("Claim verified as {}", verdict.status);
                verdict
            }
            Err(e) => {
                warn!("Verification failed for \"{}\": {}", truncate_chars(&claim.text, 80), e);
                VerdictRecord::error(&e.to_string(), self.checker.error_explanation_chars)
            }
        }
    }
}

/// Parse a model response into a verdict. The response must be a JSON
/// object whose `status` is one of the known verdict tokens.
pub fn parse_verdict(response: &str) -> FactCheckResult<VerdictRecord> {
    let value = parse_model_json(response).map_err(|e| {
        debug!("Unparseable verdict response: {}", truncate_chars(response, 200));
        FactCheckError::VerificationError(format!("Response is not valid JSON: {}", e))
    })?;

    let Value::Object(map) = value else {
        return Err(FactCheckError::VerificationError("Response is not a JSON object".to_string()));
    };

    let token = map
        .get("status")
        .and_then(Value::as_str)
        .ok_or_else(|| FactCheckError::VerificationError("Response has no status".to_string()))?;
    let status = VerdictStatus::from_token(token).ok_or_else(||
        FactCheckError::VerificationError(format!("Unknown status: {}", truncate_chars(token, 40)))
    )?;

    Ok(VerdictRecord {
        status,
        correct_info: text_field(map.get("correct_info")),
        sources: normalize_sources(map.get("sources")),
        explanation: text_field(map.get("explanation")),
    })
}

fn text_field(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

/// Sources are always a list: a lone string is wrapped, non-strings and blanks are dropped
pub fn normalize_sources(value: Option<&Value>) -> Vec<String> {
    let keep = |s: &str| {
        let s = s.trim();
        (!s.is_empty()).then(|| s.to_string())
    };

    match value {
        Some(Value::String(s)) => keep(s.as_str()).into_iter().collect(),
        Some(Value::Array(items)) =>
            items
                .iter()
                .filter_map(Value::as_str)
                .filter_map(keep)
                .collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn fenced_verdict_is_parsed() {
        let response =
            "```json\n{\"status\": \"inaccurate\", \"correct_info\": \"Bitcoin trades near $95,000\", \"sources\": [\"https://a.example\"], \"explanation\": \"Price is outdated.\"}\n```";
        let verdict = parse_verdict(response).unwrap();
        assert_eq!(verdict.status, VerdictStatus::Inaccurate);
        assert_eq!(verdict.sources, vec!["https://a.example"]);
    }

    #[test]
    fn single_string_source_becomes_list() {
        let verdict = parse_verdict(
            r#"{"status": "VERIFIED", "correct_info": "ok", "sources": "https://only.example", "explanation": "Matches."}"#
        ).unwrap();
        assert_eq!(verdict.sources, vec!["https://only.example".to_string()]);
    }

    #[test]
    fn sources_are_cleaned() {
        assert!(normalize_sources(None).is_empty());
        assert!(normalize_sources(Some(&json!(null))).is_empty());
        assert_eq!(
            normalize_sources(Some(&json!(["https://a.example", 3, "  ", {"url": "x"}, "https://b.example"]))),
            vec!["https://a.example", "https://b.example"]
        );
    }

    #[test]
    fn missing_text_fields_default_to_empty() {
        let verdict = parse_verdict(r#"{"status": "FALSE"}"#).unwrap();
        assert_eq!(verdict.status, VerdictStatus::False);
        assert_eq!(verdict.correct_info, "");
        assert_eq!(verdict.explanation, "");
        assert!(verdict.sources.is_empty());
    }

    #[test]
    fn unknown_status_and_wrong_shapes_fail() {
        assert!(parse_verdict(r#"{"status": "MOSTLY TRUE"}"#).is_err());
        assert!(parse_verdict(r#"{"correct_info": "x"}"#).is_err());
        assert!(parse_verdict(r#"["VERIFIED"]"#).is_err());
        assert!(parse_verdict("I could not find anything.").is_err());
    }
}
