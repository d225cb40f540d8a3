use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};

use lnmfetch::cli::Cli;
use lnmfetch::config::Config;
use lnmfetch::models::{DownloadOutcome, Region, RunReport};
use lnmfetch::{pipeline, prompt};

#[tokio::main]
async fn main() -> Result<()> {
    // Set default log level to INFO if not specified
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "lnmfetch=info");
    }

    // Initialize logging to both console and file
    use tracing_subscriber::{fmt, EnvFilter, layer::SubscriberExt, util::SubscriberInitExt, Layer};

    let file_appender = tracing_appender::rolling::never(".", "lnmfetch.log");

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_filter(EnvFilter::from_default_env())
        )
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_filter(EnvFilter::from_default_env())
        )
        .init();

    let cli = Cli::parse();

    let config = cli.apply(Config::from_env()?);
    config.validate()?;

    let region = match &cli.region {
        Some(answer) => prompt::parse_region(answer)?,
        None => ask_region().await?,
    };
    info!("Fetching LNM PDFs for district {}", region);

    let report = match pipeline::run(&config, region).await {
        Ok(report) => report,
        Err(e) => {
            error!("Run failed: {}", e);
            return Err(e.into());
        }
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    Ok(())
}

/// Prompt on the terminal without blocking the runtime. Stdin is released
/// when the blocking task returns.
async fn ask_region() -> Result<Region> {
    let region = tokio::task::spawn_blocking(|| {
        let stdin = std::io::stdin();
        let stdout = std::io::stdout();
        prompt::prompt_region(stdin.lock(), stdout.lock())
    })
    .await
    .context("Region prompt task panicked")??;

    Ok(region)
}

fn print_report(report: &RunReport) {
    println!(
        "District {}: {} PDF links found, {} retained",
        report.region,
        report.links_found,
        report.retained.len()
    );
    for record in &report.downloads {
        match &record.outcome {
            DownloadOutcome::Failed { reason } => {
                println!("  {:<10} {} ({})", record.outcome.as_str(), record.filename, reason)
            }
            outcome => println!("  {:<10} {}", outcome.as_str(), record.filename),
        }
    }
}
