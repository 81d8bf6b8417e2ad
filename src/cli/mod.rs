use clap::{ Parser, Subcommand };
use std::path::PathBuf;

pub mod commands;
pub mod ui;

#[derive(Parser)]
#[command(
    name = "veracity",
    about = "Extract factual claims from a document and check them against live web search",
    version,
    author,
    long_about = None
)]
pub struct FactCheckCli {
    /// Sets the log level (error, warn, info, debug, trace)
    #[arg(short, long, global = true, default_value = "warn")]
    pub log_level: String,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format (text, json)
    #[arg(long, global = true, default_value = "text")]
    pub output_format: String,

    #[command(subcommand)]
    pub command: Commands,
}

/// Overrides applied on top of the configuration file
#[derive(clap::Args, Debug, Clone, Default)]
pub struct ModelArgs {
    /// LLM provider (gemini, openai, anthropic)
    #[arg(long)]
    pub provider: Option<String>,

    /// Model name for the selected provider
    #[arg(long)]
    pub model: Option<String>,

    /// Number of claims verified at once
    #[arg(long)]
    pub concurrency: Option<usize>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fact-check a document end to end
    Check {
        /// Document to check (PDF, .txt or .md)
        document: PathBuf,

        /// Output file for the JSON report
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Export only the summary, without per-claim results
        #[arg(long, default_value = "false")]
        summary_only: bool,

        #[command(flatten)]
        model: ModelArgs,

        /// Ask for confirmation before verifying the extracted claims
        #[arg(short, long, default_value = "false")]
        interactive: bool,
    },

    /// Extract claims from a document without verifying them
    Extract {
        /// Document to read claims from
        document: PathBuf,

        /// Write the claims to this JSON file
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        model: ModelArgs,
    },

    /// Verify claims from a claims file
    Verify {
        /// JSON file holding an array of claims
        #[arg(long)]
        claims: PathBuf,

        /// Document name recorded in the report
        #[arg(short, long)]
        document: Option<String>,

        /// Output file for the JSON report
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Export only the summary, without per-claim results
        #[arg(long, default_value = "false")]
        summary_only: bool,

        #[command(flatten)]
        model: ModelArgs,
    },
}
