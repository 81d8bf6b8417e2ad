use clap::Parser;
use colored::*;
use log::info;
use veracity::errors::{ ErrorSeverity, FactCheckError, RecoverableError };

mod cli;
use cli::commands::{ self, OutputFormat };
use cli::{ Commands, FactCheckCli };

#[tokio::main]
async fn main() {
    // API keys may live in a local .env file
    dotenv::dotenv().ok();

    // Parse the command line arguments
    let cli = FactCheckCli::parse();

    // Setup logging
    setup_logging(&cli.log_level);

    if let Err(e) = run(cli).await {
        report_error(&e);
        std::process::exit(1);
    }
}

async fn run(cli: FactCheckCli) -> anyhow::Result<()> {
    let format = OutputFormat::parse(&cli.output_format)?;
    let config_path = cli.config.as_deref();

    match &cli.command {
        Commands::Check { document, output, summary_only, model, interactive } => {
            let config = commands::load_config(config_path, model)?;
            commands::check::execute(
                &config,
                document,
                output.as_deref(),
                *summary_only,
                *interactive,
                format
            ).await?;
        }

        Commands::Extract { document, output, model } => {
            let config = commands::load_config(config_path, model)?;
            commands::extract::execute(&config, document, output.as_deref(), format).await?;
        }

        Commands::Verify { claims, document, output, summary_only, model } => {
            let config = commands::load_config(config_path, model)?;
            commands::verify::execute(
                &config,
                claims,
                document.as_deref(),
                output.as_deref(),
                *summary_only,
                format
            ).await?;
        }
    }

    Ok(())
}

/// Print an error with its severity and, when known, how to recover
fn report_error(error: &anyhow::Error) {
    let Some(fact_check_error) = error.downcast_ref::<FactCheckError>() else {
        cli::ui::print_error(&error.to_string());
        return;
    };

    let label = match fact_check_error.severity() {
        ErrorSeverity::Fatal => "FATAL:".red().bold(),
        ErrorSeverity::Error => "ERROR:".red().bold(),
        ErrorSeverity::Warning => "WARNING:".yellow().bold(),
    };
    eprintln!("{} {}", label, fact_check_error);
    if let Some(strategy) = fact_check_error.recovery_strategy() {
        eprintln!("{} {}", "HINT:".blue().bold(), strategy);
    }
}

fn setup_logging(log_level: &str) {
    // Set up the logger based on the log level
    let level = match log_level.to_lowercase().as_str() {
        "trace" => log::LevelFilter::Trace,
        "debug" => log::LevelFilter::Debug,
        "info" => log::LevelFilter::Info,
        "warn" => log::LevelFilter::Warn,
        "error" => log::LevelFilter::Error,
        _ => log::LevelFilter::Warn,
    };

    env_logger::Builder::new().filter_level(level).init();

    info!("Logger initialized with level: {}", log_level);
}
