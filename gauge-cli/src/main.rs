//! Gauge CLI
//!
//! Interactive front end for the evaluation orchestrator: asks the
//! operator what to do, then drives the run or inspect flow against the
//! provider client and the local record store.
//!
//! Flow errors are logged and swallowed at the flow boundary so the
//! process always releases its resources and exits cleanly.

mod commands;
mod console;
mod loader;
mod poller;
#[cfg(test)]
mod testing;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use commands::{Action, parse_action};
use console::{OperatorInput, Terminal};
use gauge_client::EvalsClient;
use gauge_store::SqlitePool;

#[derive(Parser)]
#[command(name = "gauge")]
#[command(about = "Remote evaluation job orchestrator", long_about = None)]
struct Cli {
    /// Directory containing one subdirectory per job
    #[arg(long, env = "GAUGE_JOBS_DIR", default_value = "./jobs")]
    jobs_dir: PathBuf,

    /// Record store location
    #[arg(
        long,
        env = "GAUGE_DATABASE_URL",
        default_value = gauge_store::DEFAULT_DATABASE_URL
    )]
    database_url: String,

    /// Evaluation provider base URL
    #[arg(long, env = "OPENAI_BASE_URL", default_value = "https://api.openai.com/v1")]
    api_url: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gauge=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    // The credential is required before any flow runs.
    let api_key = std::env::var("OPENAI_API_KEY")
        .context("OPENAI_API_KEY is not set; add it to the environment or a .env file")?;

    let client = EvalsClient::new(&cli.api_url, api_key);

    let pool = gauge_store::create_pool(&cli.database_url)
        .await
        .with_context(|| format!("failed to open record store at {}", cli.database_url))?;
    gauge_store::run_migrations(&pool)
        .await
        .context("failed to run store migrations")?;

    let mut terminal = Terminal::new();

    dispatch(&cli, &client, &pool, &mut terminal).await;

    pool.close().await;
    Ok(())
}

/// Ask for the top-level action and run the matching flow
///
/// Never returns an error: each flow's failure is reported here so the
/// caller can still release the store connection.
async fn dispatch(cli: &Cli, client: &EvalsClient, pool: &SqlitePool, input: &mut dyn OperatorInput) {
    println!("{}", "Gauge evaluation orchestrator".bold());
    println!();

    let answer = match input.ask("Do you want to (r)un an eval or (s)ee an eval? ") {
        Ok(answer) => answer,
        Err(e) => {
            error!("failed to read operator input: {e}");
            return;
        }
    };

    match parse_action(&answer) {
        Ok(Action::Run) => {
            if let Err(e) = commands::run::run_flow(client, pool, &cli.jobs_dir, input).await {
                error!("run flow failed: {e:#}");
                println!("{}", format!("✗ {e:#}").red());
            }
        }
        Ok(Action::See) => {
            if let Err(e) = commands::see::see_flow(pool).await {
                error!("inspect flow failed: {e:#}");
                println!("{}", format!("✗ {e:#}").red());
            }
        }
        Err(e) => {
            println!("{}", format!("✗ {e}").red());
        }
    }
}
