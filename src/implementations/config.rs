use serde::{ Deserialize, Deserializer, Serialize };
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

use crate::config::{ CheckerOptions, CompletionOptions, CompletionOverrides };
use crate::errors::FactCheckError;
use crate::implementations::prompts;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] serde_yaml::Error),

    #[error("Missing required API key: {0}")]
    MissingApiKey(String),

    #[error("Unknown LLM provider: {0}")]
    UnknownProvider(String),

    #[error("Template not found: {0}")]
    MissingTemplate(String),
}

impl From<ConfigError> for FactCheckError {
    fn from(err: ConfigError) -> Self {
        FactCheckError::ConfigError(err.to_string())
    }
}

/// LLM vendors whose wire formats the HTTP client speaks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    Gemini,
    OpenAI,
    Anthropic,
}

impl LlmProvider {
    pub const ALL: [LlmProvider; 3] = [LlmProvider::Gemini, LlmProvider::OpenAI, LlmProvider::Anthropic];

    /// Environment variables consulted for this provider's key, in order
    pub fn env_vars(&self) -> &'static [&'static str] {
        match self {
            LlmProvider::Gemini => &["GOOGLE_API_KEY", "GEMINI_API_KEY"],
            LlmProvider::OpenAI => &["OPENAI_API_KEY"],
            LlmProvider::Anthropic => &["ANTHROPIC_API_KEY"],
        }
    }

    pub fn default_endpoint(&self) -> &'static str {
        match self {
            LlmProvider::Gemini => "https://generativelanguage.googleapis.com/v1beta/models",
            LlmProvider::OpenAI => "https://api.openai.com/v1/chat/completions",
            LlmProvider::Anthropic => "https://api.anthropic.com/v1/messages",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            LlmProvider::Gemini => "gemini-2.0-flash",
            LlmProvider::OpenAI => "gpt-4o",
            LlmProvider::Anthropic => "claude-3-5-sonnet-latest",
        }
    }
}

impl FromStr for LlmProvider {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gemini" | "google" => Ok(LlmProvider::Gemini),
            "openai" | "gpt" => Ok(LlmProvider::OpenAI),
            "anthropic" | "claude" => Ok(LlmProvider::Anthropic),
            other => Err(ConfigError::UnknownProvider(other.to_string())),
        }
    }
}

impl fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LlmProvider::Gemini => "gemini",
            LlmProvider::OpenAI => "openai",
            LlmProvider::Anthropic => "anthropic",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct ApiConfig {
    /// Preferred provider (LLM only)
    pub provider: Option<LlmProvider>,

    /// API key for the service
    pub api_key: Option<String>,

    /// API endpoint for the service
    pub api_endpoint: Option<String>,

    /// Model to use (LLM only)
    pub model: Option<String>,
}

/// Resolved connection settings for the LLM
#[derive(Debug, Clone, PartialEq)]
pub struct LlmSettings {
    pub provider: LlmProvider,
    pub api_key: String,
    pub endpoint: String,
    pub model: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ServiceConfig {
    /// Configuration for the LLM used for claim extraction and adjudication
    pub llm_api: ApiConfig,

    /// Configuration for the web-search API
    pub search_api: ApiConfig,

    /// Prompt templates keyed by task ("extraction", "verification").
    /// Templates not named in the file keep their built-in text.
    #[serde(deserialize_with = "templates_over_defaults")]
    pub prompt_templates: HashMap<String, String>,

    /// Decoding parameters for claim extraction
    #[serde(deserialize_with = "extraction_over_defaults")]
    pub extraction: CompletionOptions,

    /// Decoding parameters for claim verification
    #[serde(deserialize_with = "verification_over_defaults")]
    pub verification: CompletionOptions,

    /// Budgets for a fact-checking run
    pub checker: CheckerOptions,

    /// Timeout for LLM requests, in seconds
    pub request_timeout_secs: u64,
}

impl ServiceConfig {
    /// Load configuration from a YAML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config: ServiceConfig = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    /// Get the LLM API key, checking environment variables if not in config.
    /// If the preferred provider has no key, the other providers are tried.
    pub fn get_api_key(&self, preferred: LlmProvider) -> Result<(LlmProvider, String), ConfigError> {
        use log::{ debug, info };

        if let Some(api_key) = &self.llm_api.api_key {
            debug!("Using API key from config");
            return Ok((preferred, api_key.clone()));
        }

        if let Some(key) = first_env_var(preferred.env_vars()) {
            info!("Using preferred provider: {}", preferred);
            return Ok((preferred, key));
        }
        debug!("Preferred provider {} not available, trying others", preferred);

        for provider in LlmProvider::ALL {
            if provider == preferred {
                continue;
            }
            if let Some(key) = first_env_var(provider.env_vars()) {
                info!("Using alternative provider: {} (preferred was {})", provider, preferred);
                return Ok((provider, key));
            }
            debug!("Provider {} not available", provider);
        }

        Err(ConfigError::MissingApiKey("No API keys found for any LLM provider".to_string()))
    }

    /// Resolve provider, key, endpoint and model for the LLM client
    pub fn llm_settings(&self) -> Result<LlmSettings, ConfigError> {
        let preferred = self.llm_api.provider.unwrap_or(LlmProvider::Gemini);
        let (provider, api_key) = self.get_api_key(preferred)?;

        // An endpoint or model configured for another provider makes no sense after a fallback
        let same_provider = provider == preferred;
        let endpoint = self.llm_api.api_endpoint
            .clone()
            .filter(|_| same_provider)
            .unwrap_or_else(|| provider.default_endpoint().to_string());
        let model = self.llm_api.model
            .clone()
            .filter(|_| same_provider)
            .unwrap_or_else(|| provider.default_model().to_string());

        Ok(LlmSettings { provider, api_key, endpoint, model })
    }

    /// Get the search API key from config or TAVILY_API_KEY
    pub fn search_api_key(&self) -> Result<String, ConfigError> {
        if let Some(api_key) = &self.search_api.api_key {
            return Ok(api_key.clone());
        }
        first_env_var(&["TAVILY_API_KEY"]).ok_or_else(||
            ConfigError::MissingApiKey("TAVILY_API_KEY is not set".to_string())
        )
    }

    pub fn search_endpoint(&self) -> String {
        self.search_api.api_endpoint
            .clone()
            .unwrap_or_else(|| "https://api.tavily.com/search".to_string())
    }

    /// Get the template for a specific task
    pub fn get_template(&self, template_name: &str) -> Result<String, ConfigError> {
        self.prompt_templates
            .get(template_name)
            .cloned()
            .ok_or_else(|| ConfigError::MissingTemplate(template_name.to_string()))
    }
}

fn first_env_var(names: &[&str]) -> Option<String> {
    names
        .iter()
        .filter_map(|name| std::env::var(name).ok())
        .find(|value| !value.trim().is_empty())
}

fn default_templates() -> HashMap<String, String> {
    let mut templates = HashMap::new();
    templates.insert(prompts::EXTRACTION_TEMPLATE_NAME.to_string(), prompts::default_extraction_template());
    templates.insert(
        prompts::VERIFICATION_TEMPLATE_NAME.to_string(),
        prompts::DEFAULT_VERIFICATION_TEMPLATE.to_string()
    );
    templates
}

fn templates_over_defaults<'de, D>(deserializer: D) -> Result<HashMap<String, String>, D::Error>
    where D: Deserializer<'de>
{
    let mut templates = Option::<HashMap<String, String>>::deserialize(deserializer)?.unwrap_or_default();
    for (name, text) in default_templates() {
        templates.entry(name).or_insert(text);
    }
    Ok(templates)
}

fn extraction_over_defaults<'de, D>(deserializer: D) -> Result<CompletionOptions, D::Error>
    where D: Deserializer<'de>
{
    let overrides = Option::<CompletionOverrides>::deserialize(deserializer)?.unwrap_or_default();
    Ok(CompletionOptions::extraction().overlay(overrides))
}

fn verification_over_defaults<'de, D>(deserializer: D) -> Result<CompletionOptions, D::Error>
    where D: Deserializer<'de>
{
    let overrides = Option::<CompletionOverrides>::deserialize(deserializer)?.unwrap_or_default();
    Ok(CompletionOptions::verification().overlay(overrides))
}

/// Default configuration
impl Default for ServiceConfig {
    fn default() -> Self {
        ServiceConfig {
            llm_api: ApiConfig {
                provider: Some(LlmProvider::Gemini),
                ..ApiConfig::default()
            },
            search_api: ApiConfig::default(),
            prompt_templates: default_templates(),
            extraction: CompletionOptions::extraction(),
            verification: CompletionOptions::verification(),
            checker: CheckerOptions::default(),
            request_timeout_secs: 120,
        }
    }
}
