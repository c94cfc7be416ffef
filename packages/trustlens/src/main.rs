//! TrustLens CLI
//!
//! Analyzes the reviews on a product page and shows the stored results of
//! the last run.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use trustlens::broker;
use trustlens::fetch::{load_saved, PageFetcher};
use trustlens::report::DetailsView;
use trustlens::{
    Analyzer, Config, FileStore, PageSession, ResultStore, RunOutcome, SkipReason,
    TerminalPresenter, Trigger,
};

#[derive(Parser)]
#[command(name = "trustlens")]
#[command(about = "Score product reviews for likely inauthenticity")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze the reviews on a product page
    Analyze {
        /// Page URL
        url: String,

        /// Read the page markup from this file instead of fetching it
        #[arg(long)]
        html: Option<PathBuf>,

        /// Treat the page as embedded in another page
        #[arg(long)]
        embedded: bool,
    },

    /// Show the results of the last analysis
    Details,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,trustlens=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_line_number(true),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::debug!(?config, "Loaded configuration");

    match cli.command {
        Commands::Analyze {
            url,
            html,
            embedded,
        } => analyze(&config, &url, html, embedded).await,
        Commands::Details => details(&config).await,
    }
}

async fn analyze(config: &Config, url: &str, html: Option<PathBuf>, embedded: bool) -> Result<()> {
    let judge = config.gemini_judge()?;
    if !judge.is_configured() {
        tracing::warn!("GEMINI_API_KEY is not set; every review will fail to score");
    }

    let (broker, _broker_task) = broker::spawn(judge, FileStore::new(&config.store_path));
    let analyzer = Arc::new(
        Analyzer::new(
            config.analyzer_config(),
            broker.clone(),
            broker,
            TerminalPresenter::new(),
        )
        .context("Invalid selector configuration")?,
    );

    let mut page = match html {
        Some(path) => load_saved(url, &path).await,
        None => PageFetcher::new()?.fetch(url).await,
    }
    .with_context(|| format!("Failed to load {}", url))?;
    if embedded {
        page = page.embedded();
    }

    let (session, _session_task) = PageSession::spawn(analyzer.clone(), page);
    let mut outcomes = session.subscribe();

    let ack = session.trigger(Trigger::PageLoad).await?;
    tracing::debug!(status = %ack.status, "Session acknowledged");

    let outcome = outcomes
        .recv()
        .await
        .context("Session stopped before the analysis finished")?;

    match outcome {
        RunOutcome::Completed(run) => {
            // The presenter already printed the block unless the page had no anchor
            if analyzer.presenter().shown().is_none() {
                println!(
                    "Product Suspicion Score: {}% (no place on the page to show it)",
                    run.average_suspicion_score
                );
            }
            if run.failed() > 0 {
                println!(
                    "{}",
                    format!("{} review(s) could not be scored", run.failed()).yellow()
                );
            }
        }
        RunOutcome::NothingAnalyzable {
            discovered,
            candidates,
            failed,
        } => {
            println!(
                "No reviews could be analyzed ({} found, {} with enough text, {} failed).",
                discovered, candidates, failed
            );
        }
        RunOutcome::Skipped(SkipReason::OffTarget) => {
            bail!("{} is not on a supported site ({})", url, config.target_host)
        }
        RunOutcome::Skipped(SkipReason::Embedded) => {
            println!("Embedded pages are not analyzed.");
        }
        RunOutcome::AlreadyRunning => {
            println!("An analysis is already in progress.");
        }
    }

    Ok(())
}

async fn details(config: &Config) -> Result<()> {
    let (broker, _broker_task) = broker::spawn(config.gemini_judge()?, FileStore::new(&config.store_path));

    let stored = match broker.load_analysis().await {
        Ok(stored) => stored,
        Err(e) => {
            tracing::error!(error = %e, "Error retrieving analysis");
            None
        }
    };

    print!("{}", DetailsView::from_stored(stored).render());
    Ok(())
}
