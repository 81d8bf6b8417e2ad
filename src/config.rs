use serde::{ Deserialize, Serialize };

/// Options controlling how a fact-checking run budgets its work
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckerOptions {
    /// Number of leading characters of the document sent for claim extraction
    pub document_char_budget: usize,

    /// Maximum number of web results requested per claim
    pub search_max_results: usize,

    /// Number of results included in the evidence digest
    pub digest_results: usize,

    /// Character budget for each result's content snippet
    pub snippet_chars: usize,

    /// Character budget for each result's title
    pub title_chars: usize,

    /// Character budget for the failure description of an ERROR verdict
    pub error_explanation_chars: usize,

    /// Number of claims verified at once; 1 is strictly sequential
    pub concurrency: usize,
}

impl Default for CheckerOptions {
    fn default() -> Self {
        Self {
            document_char_budget: 10_000,
            search_max_results: 5,
            digest_results: 3,
            snippet_chars: 400,
            title_chars: 200,
            error_explanation_chars: 150,
            concurrency: 1,
        }
    }
}

/// Decoding parameters for a single LLM completion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompletionOptions {
    /// Temperature for generation (0.0-1.0)
    pub temperature: f32,

    /// Maximum output tokens
    pub max_tokens: usize,

    /// Optional system instruction sent ahead of the prompt
    pub system_prompt: Option<String>,
}

impl Default for CompletionOptions {
    fn default() -> Self {
        Self {
            temperature: 0.1,
            max_tokens: 2048,
            system_prompt: None,
        }
    }
}

impl CompletionOptions {
    /// Settings used for claim extraction: near-deterministic with a generous ceiling
    pub fn extraction() -> Self {
        Self {
            temperature: 0.1,
            max_tokens: 8192,
            system_prompt: Some(
                "You are a fact-checking assistant who extracts verifiable claims as strict JSON.".to_string()
            ),
        }
    }

    /// Settings used for claim adjudication
    pub fn verification() -> Self {
        Self {
            temperature: 0.1,
            max_tokens: 2048,
            system_prompt: Some(
                "You are a professional fact-checker who answers only with strict JSON.".to_string()
            ),
        }
    }

    /// Apply the fields set in `overrides`, keeping the rest of `self`
    pub fn overlay(mut self, overrides: CompletionOverrides) -> Self {
        if let Some(temperature) = overrides.temperature {
            self.temperature = temperature;
        }
        if let Some(max_tokens) = overrides.max_tokens {
            self.max_tokens = max_tokens;
        }
        if overrides.system_prompt.is_some() {
            self.system_prompt = overrides.system_prompt;
        }
        self
    }
}

/// A partially specified set of decoding parameters, as written in a config file
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CompletionOverrides {
    pub temperature: Option<f32>,
    pub max_tokens: Option<usize>,
    pub system_prompt: Option<String>,
}
