use anyhow::Result;
use std::path::Path;

use veracity::implementations::config::ServiceConfig;
use veracity::implementations::fact_checker::FactChecker;

use crate::cli::commands::{ export_report, OutputFormat };
use crate::cli::ui;

/// Check command: load, extract, verify and export a report
pub async fn execute(
    config: &ServiceConfig,
    document_path: &Path,
    output_path: Option<&Path>,
    summary_only: bool,
    interactive: bool,
    format: OutputFormat
) -> Result<()> {
    let text_mode = format.is_text();
    if text_mode {
        ui::print_header("Fact-Checking Document");
    }

    let checker = FactChecker::from_config(config)?;

    // Load document
    let spinner = ui::spinner_with_message("Reading document...");
    let document = match checker.load(document_path) {
        Ok(document) => document,
        Err(e) => {
            spinner.finish_and_clear();
            return Err(e.into());
        }
    };
    spinner.finish_with_message(format!("Read {} characters from {}", document.text.chars().count(), document.name));

    // Extract claims
    let spinner = ui::spinner_with_message("Extracting factual claims...");
    let extraction = checker.extract(&document.text).await;
    spinner.finish_and_clear();

    if text_mode {
        if let Some(diagnostic) = &extraction.diagnostic {
            ui::print_warning(&diagnostic.to_string());
        }
        if extraction.is_empty() {
            ui::print_warning("No claims extracted");
            ui::print_info("Make sure the document contains specific factual claims (numbers, dates, statistics).");
        } else {
            ui::print_info(&format!("Found {} claims to verify", extraction.claims.len()));
        }
    } else if extraction.is_empty() {
        // stdout carries only the report in JSON mode
        eprintln!("No claims extracted");
    }

    if interactive && !extraction.is_empty() {
        let prompt = format!("Verify {} claims against web search?", extraction.claims.len());
        if !ui::confirm_action(&prompt)? {
            ui::print_info("Verification cancelled.");
            return Ok(());
        }
    }

    // Verify claims
    if text_mode && !extraction.is_empty() {
        ui::print_header("Verification Results");
    }
    let progress = ui::TerminalProgress::new(text_mode);
    let report = checker.run(&document.name, &extraction.claims, &progress).await;

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
