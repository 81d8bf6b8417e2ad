use anyhow::Result;
use std::fs;
use std::path::Path;

use veracity::implementations::config::ServiceConfig;
use veracity::implementations::fact_checker::FactChecker;

use crate::cli::commands::OutputFormat;
use crate::cli::ui;

/// Extract command: list the claims found in a document
pub async fn execute(
    config: &ServiceConfig,
    document_path: &Path,
    output_path: Option<&Path>,
    format: OutputFormat
) -> Result<()> {
    let checker = FactChecker::from_config(config)?;
    let document = checker.load(document_path)?;

    let spinner = ui::spinner_with_message("Extracting factual claims...");
    let extraction = checker.extract(&document.text).await;
    spinner.finish_and_clear();

    if let Some(diagnostic) = &extraction.diagnostic {
        if format.is_text() {
            ui::print_warning(&diagnostic.to_string());
        } else {
            eprintln!("{}", diagnostic);
        }
    }

    let claims_json = serde_json::to_string_pretty(&extraction.claims)?;
    match format {
        OutputFormat::Json => println!("{}", claims_json),
        OutputFormat::Text => {
            ui::print_header(&format!("Claims in {}", document.name));
            if extraction.is_empty() {
                ui::print_warning("No claims extracted");
            } else {
                ui::print_claims(&extraction.claims);
            }
        }
    }

    if let Some(output_path) = output_path {
        fs::write(output_path, &claims_json)?;
        if format.is_text() {
            ui::print_success(&format!("{} claims saved to {}", extraction.claims.len(), output_path.display()));
        }
    }

    Ok(())
}
