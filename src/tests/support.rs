//! In-memory fakes for the LLM and search collaborators.

use std::collections::HashMap;
use std::sync::atomic::{ AtomicUsize, Ordering };
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::config::CompletionOptions;
use crate::errors::{ FactCheckError, FactCheckResult };
use crate::models::claim::ClaimRecord;
use crate::models::common::ClaimCategory;
use crate::models::evidence::{ SearchEvidence, SearchHit, SearchRequest };
use crate::models::report::StatusCounts;
use crate::models::verdict::VerdictRecord;
use crate::traits::llm_client::LlmClient;
use crate::traits::progress::ProgressObserver;
use crate::traits::search_service::SearchService;

pub fn setup() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn claim(text: &str, query: &str) -> ClaimRecord {
    ClaimRecord::new(text, ClaimCategory::Statistic, query).unwrap()
}

pub fn verdict_json(status: &str) -> String {
    format!(
        r#"{{"status": "{}", "correct_info": "Per the source", "sources": ["https://source.example/{}"], "explanation": "Checked against search results."}}"#,
        status,
        status.to_lowercase()
    )
}

/// LLM whose answer is chosen by the first registered marker found in the prompt
pub struct ScriptedLlm {
    rules: Vec<(String, Result<String, String>)>,
    fallback: String,
    pub calls: AtomicUsize,
    pub prompts: Mutex<Vec<String>>,
}

impl ScriptedLlm {
    pub fn new(fallback: &str) -> Self {
        Self {
            rules: Vec::new(),
            fallback: fallback.to_string(),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn when(mut self, marker: &str, response: &str) -> Self {
        self.rules.push((marker.to_string(), Ok(response.to_string())));
        self
    }

    pub fn failing_when(mut self, marker: &str, message: &str) -> Self {
        self.rules.push((marker.to_string(), Err(message.to_string())));
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl LlmClient for ScriptedLlm {
    async fn complete(&self, prompt: &str, _options: &CompletionOptions) -> FactCheckResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());

        for (marker, response) in &self.rules {
            if prompt.contains(marker.as_str()) {
                return match response {
                    Ok(text) => Ok(text.clone()),
                    Err(message) =>
                        Err(FactCheckError::ExternalServiceError {
                            service: "LLM API".to_string(),
                            message: message.clone(),
                        }),
                };
            }
        }
        Ok(self.fallback.clone())
    }

    fn model_name(&self) -> String {
        "scripted/test".to_string()
    }
}

/// Search engine with canned evidence, per-query failures and delays
#[derive(Default)]
pub struct FakeSearch {
    failures: HashMap<String, String>,
    delays: HashMap<String, Duration>,
    pub requests: Mutex<Vec<SearchRequest>>,
}

impl FakeSearch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(mut self, query: &str, message: &str) -> Self {
        self.failures.insert(query.to_string(), message.to_string());
        self
    }

    pub fn delayed(mut self, query: &str, delay: Duration) -> Self {
        self.delays.insert(query.to_string(), delay);
        self
    }
}

#[async_trait]
impl SearchService for FakeSearch {
    async fn search(&self, request: &SearchRequest) -> FactCheckResult<SearchEvidence> {
        self.requests.lock().unwrap().push(request.clone());

        if let Some(delay) = self.delays.get(&request.query) {
            tokio::time::sleep(*delay).await;
        }
        if let Some(message) = self.failures.get(&request.query) {
            return Err(FactCheckError::ExternalServiceError {
                service: "Tavily".to_string(),
                message: message.clone(),
            });
        }

        Ok(SearchEvidence {
            results: vec![SearchHit {
                title: format!("Result for {}", request.query),
                url: "https://news.example/article".to_string(),
                content: format!("Reporting about {}", request.query),
                score: Some(0.9),
            }],
            answer: Some(format!("Summary for {}", request.query)),
        })
    }
}

/// Observer that records every callback
#[derive(Default)]
pub struct RecordingObserver {
    pub started: Mutex<Option<usize>>,
    pub seen: Mutex<Vec<(usize, String, StatusCounts)>>,
    pub finished: Mutex<Option<StatusCounts>>,
}

impl ProgressObserver for RecordingObserver {
    fn on_start(&self, total: usize) {
        *self.started.lock().unwrap() = Some(total);
    }

    fn on_verdict(
        &self,
        index: usize,
        _total: usize,
        claim: &ClaimRecord,
        _verdict: &VerdictRecord,
        counts: &StatusCounts
    ) {
        self.seen.lock().unwrap().push((index, claim.text.clone(), *counts));
    }

    fn on_finish(&self, counts: &StatusCounts) {
        *self.finished.lock().unwrap() = Some(*counts);
    }
}
