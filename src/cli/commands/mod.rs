use anyhow::{ anyhow, Result };
use log::info;
use std::path::Path;

use veracity::errors::FactCheckError;
use veracity::implementations::config::{ LlmProvider, ServiceConfig };
use veracity::models::report::ReportSummary;

use crate::cli::ModelArgs;

pub mod check;
pub mod extract;
pub mod verify;

/// How command results are written to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Result<Self> {
        match value.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(anyhow!("Unsupported output format: {}", value)),
        }
    }

    pub fn is_text(&self) -> bool {
        *self == OutputFormat::Text
    }
}

/// Load the configuration file (or defaults) and apply command-line overrides
pub fn load_config(path: Option<&Path>, overrides: &ModelArgs) -> Result<ServiceConfig> {
    let mut config = match path {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            ServiceConfig::from_file(path).map_err(FactCheckError::from)?
        }
        None => ServiceConfig::default(),
    };

    if let Some(provider) = &overrides.provider {
        let provider: LlmProvider = provider.parse().map_err(FactCheckError::from)?;
        if config.llm_api.provider != Some(provider) {
            // Endpoint and model from the file belong to the old provider
            config.llm_api.api_endpoint = None;
            config.llm_api.model = None;
            config.llm_api.api_key = None;
        }
        config.llm_api.provider = Some(provider);
    }
    if let Some(model) = &overrides.model {
        config.llm_api.model = Some(model.clone());
    }
    if let Some(concurrency) = overrides.concurrency {
        if concurrency == 0 {
            return Err(anyhow!("--concurrency must be at least 1"));
        }
        config.checker.concurrency = concurrency;
    }

    Ok(config)
}

/// Write the report to `output` or to the default timestamped file name
pub fn export_report(
    report: &ReportSummary,
    output: Option<&Path>,
    summary_only: bool
) -> Result<std::path::PathBuf> {
    let path = match output {
        Some(path) => path.to_path_buf(),
        None => std::path::PathBuf::from(report.default_file_name()),
    };
    report.export(&path, !summary_only)?;
    Ok(path)
}
