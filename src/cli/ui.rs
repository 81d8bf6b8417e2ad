use colored::*;
use console::Term;
use dialoguer::{ theme::ColorfulTheme, Confirm };
use indicatif::{ ProgressBar, ProgressStyle };
use std::time::Duration;
use textwrap::wrap;

use veracity::models::claim::ClaimRecord;
use veracity::models::common::{ AccuracyBand, VerdictStatus };
use veracity::models::report::{ ReportSummary, StatusCounts };
use veracity::models::verdict::VerdictRecord;
use veracity::traits::progress::ProgressObserver;

const MAX_SOURCES_SHOWN: usize = 3;

/// UI theme for consistent appearance
pub fn get_theme() -> ColorfulTheme {
    ColorfulTheme::default()
}

fn terminal_width() -> usize {
    (Term::stdout().size().1 as usize).max(40)
}

/// Print a section header
pub fn print_header(title: &str) {
    let title = format!(" {} ", title);
    println!("\n{}\n", title.bold().white().on_blue());
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", "ERROR:".red().bold(), message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!("{} {}", "WARNING:".yellow().bold(), message);
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("{} {}", "SUCCESS:".green().bold(), message);
}

/// Print information
pub fn print_info(message: &str) {
    println!("{} {}", "INFO:".blue().bold(), message);
}

/// Print a formatted result
pub fn print_result(label: &str, value: &str) {
    println!("{}: {}", label.bold(), value);
}

fn print_wrapped(label: &str, text: &str) {
    let indent = " ".repeat(label.len() + 2);
    let width = terminal_width().saturating_sub(10);
    for (i, line) in wrap(text, width.saturating_sub(indent.len()).max(20)).iter().enumerate() {
        if i == 0 {
            println!("  {}: {}", label.bold(), line);
        } else {
            println!("  {}{}", indent, line);
        }
    }
}

/// Create a new progress bar
pub fn create_progress_bar(length: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(length);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {pos:>3}/{len:3} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("##-");
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb
}

/// Display a spinner while waiting for an operation to complete
pub fn spinner_with_message(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
        .template("{spinner:.green} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    spinner.set_style(style);
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// Confirm an action with the user
pub fn confirm_action(prompt: &str) -> std::io::Result<bool> {
    Confirm::with_theme(&get_theme())
        .with_prompt(prompt)
        .default(true)
        .interact()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
}

fn status_label(status: VerdictStatus) -> ColoredString {
    match status {
        VerdictStatus::Verified => "✓ VERIFIED".green().bold(),
        VerdictStatus::Inaccurate => "! INACCURATE".yellow().bold(),
        VerdictStatus::False => "✗ FALSE".red().bold(),
        VerdictStatus::Error => "⚠ ERROR".magenta().bold(),
    }
}

/// Print a numbered list of extracted claims
pub fn print_claims(claims: &[ClaimRecord]) {
    for (i, claim) in claims.iter().enumerate() {
        println!("{:>3}. {} {}", i + 1, format!("[{}]", claim.category).cyan(), claim.text);
        println!("     {} {}", "query:".dimmed(), claim.search_query.dimmed());
    }
}

/// Print a card for a single verdict
pub fn print_verdict_card(index: usize, total: usize, claim: &ClaimRecord, verdict: &VerdictRecord) {
    println!(
        "\n{} {} {}",
        format!("[{}/{}]", index + 1, total).bold(),
        status_label(verdict.status),
        format!("({})", claim.category).dimmed()
    );
    print_wrapped("Claim", &claim.text);
    if verdict.status != VerdictStatus::Verified && !verdict.correct_info.is_empty() {
        print_wrapped("Correct info", &verdict.correct_info);
    }
    if !verdict.explanation.is_empty() {
        print_wrapped("Why", &verdict.explanation);
    }
    for source in verdict.sources.iter().take(MAX_SOURCES_SHOWN) {
        println!("  {} {}", "→".blue(), source.underline());
    }
}

/// Print the aggregate table and accuracy band for a report
pub fn print_summary(report: &ReportSummary) {
    print_header("Summary");
    let counts = &report.counts;
    print_result("Document", &report.document);
    print_result("Total claims", &report.total_claims().to_string());
    println!("{}: {}", "Verified".bold(), counts.verified.to_string().green());
    println!("{}: {}", "Inaccurate".bold(), counts.inaccurate.to_string().yellow());
    println!("{}: {}", "False".bold(), counts.false_claims.to_string().red());
    println!("{}: {}", "Errors".bold(), counts.errors.to_string().magenta());
    print_result("Accuracy", &format!("{:.1}%", report.accuracy()));

    match report.band() {
        Some(band @ AccuracyBand::MostlyAccurate) => print_success(band.describe()),
        Some(band @ AccuracyBand::NeedsCorrection) => print_warning(band.describe()),
        Some(band @ AccuracyBand::SignificantInaccuracies) => print_error(band.describe()),
        None if report.total_claims() > 0 => print_warning("No claim could be checked."),
        None => {}
    }
}

/// Progress observer drawing a bar and a card per verdict
pub struct TerminalProgress {
    bar: ProgressBar,
    show_cards: bool,
}

impl TerminalProgress {
    pub fn new(show_cards: bool) -> Self {
        Self {
            bar: create_progress_bar(0, "Verifying claims"),
            show_cards,
        }
    }
}

impl ProgressObserver for TerminalProgress {
    fn on_start(&self, total: usize) {
        self.bar.set_length(total as u64);
    }

    fn on_verdict(
        &self,
        index: usize,
        total: usize,
        claim: &ClaimRecord,
        verdict: &VerdictRecord,
        counts: &StatusCounts
    ) {
        if self.show_cards {
            self.bar.suspend(|| print_verdict_card(index, total, claim, verdict));
        }
        self.bar.set_message(
            format!(
                "{} verified, {} inaccurate, {} false, {} errors",
                counts.verified,
                counts.inaccurate,
                counts.false_claims,
                counts.errors
            )
        );
        self.bar.inc(1);
    }

    fn on_finish(&self, _counts: &StatusCounts) {
        self.bar.finish_and_clear();
    }
}
