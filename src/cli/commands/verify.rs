use anyhow::{ anyhow, Result };
use std::fs;
use std::path::Path;

use veracity::implementations::config::ServiceConfig;
use veracity::implementations::fact_checker::FactChecker;
use veracity::models::claim::ClaimRecord;

use crate::cli::commands::{ export_report, OutputFormat };
use crate::cli::ui;

/// Verify command: check the claims stored in a claims file
pub async fn execute(
    config: &ServiceConfig,
    claims_path: &Path,
    document_name: Option<&str>,
    output_path: Option<&Path>,
    summary_only: bool,
    format: OutputFormat
) -> Result<()> {
    let content = fs
        ::read_to_string(claims_path)
        .map_err(|e| anyhow!("Failed to read claims file: {}", e))?;
    let (claims, skipped) = parse_claims_file(&content)?;

    let text_mode = format.is_text();
    if text_mode {
        ui::print_header("Verifying Claims");
        ui::print_info(&format!("Loaded {} claims", claims.len()));
    }
    if skipped > 0 {
        let message = format!("Skipped {} claims with an empty claim or search query", skipped);
        if text_mode {
            ui::print_warning(&message);
        } else {
            // stdout carries only the report in JSON mode
            eprintln!("{}", message);
        }
    }

    let document = document_name
        .map(str::to_string)
        .unwrap_or_else(|| claims_path.display().to_string());

    let checker = FactChecker::from_config(config)?;
    let progress = ui::TerminalProgress::new(text_mode);
    let report = checker.run(&document, &claims, &progress).await;

    if text_mode {
        ui::print_summary(&report);
    } else {
        println!("{}", report.to_json(!summary_only)?);
    }

    let saved = export_report(&report, output_path, summary_only)?;
    if text_mode {
        ui::print_success(&format!("Report saved to {}", saved.display()));
    }
    Ok(())
}

/// Parse a claims file, dropping entries with an empty claim or query.
/// Returns the kept claims and the number dropped.
fn parse_claims_file(content: &str) -> Result<(Vec<ClaimRecord>, usize)> {
    let claims: Vec<ClaimRecord> = serde_json
        ::from_str(content)
        .map_err(|e| anyhow!("Claims file is not a JSON array of claims: {}", e))?;

    let total = claims.len();
    let claims: Vec<ClaimRecord> = claims.into_iter().filter(ClaimRecord::is_valid).collect();
    let skipped = total - claims.len();
    Ok((claims, skipped))
}
