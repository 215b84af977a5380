//! Run flow
//!
//! Lists job folders, resolves the job record, performs the remote steps
//! that have not completed yet, and polls the launched run to completion.
//! Steps whose identifier is already recorded are skipped, which is the
//! entire resume mechanism.

use std::path::Path;

use anyhow::{Context, Result};
use colored::*;
use tracing::info;

use gauge_client::EvalsApi;
use gauge_core::domain::run::{RunReport, RunStatus};
use gauge_store::{SqlitePool, jobs};

use crate::commands::parse_folder_index;
use crate::console::OperatorInput;
use crate::loader::{self, JobBundle};
use crate::poller::RunPoller;

/// Interactive entry point: folder menu, then the resumable steps
pub async fn run_flow(
    api: &dyn EvalsApi,
    pool: &SqlitePool,
    jobs_dir: &Path,
    input: &mut dyn OperatorInput,
) -> Result<()> {
    let folders = loader::list_job_folders(jobs_dir)
        .with_context(|| format!("failed to list job folders under {}", jobs_dir.display()))?;

    if folders.is_empty() {
        anyhow::bail!("no job folders found under {}", jobs_dir.display());
    }

    println!("{}", "Available jobs:".bold());
    for (index, folder) in folders.iter().enumerate() {
        println!("  {}. {}", index + 1, folder);
    }
    println!();

    let answer = input.ask("Which job would you like to run? (enter number): ")?;
    let index = parse_folder_index(&answer, folders.len())?;
    let name = &folders[index];

    println!();
    println!("{} {}", "▸ Selected:".cyan(), name.bold());

    let bundle = loader::load_job(&jobs_dir.join(name))?;
    println!("  Dataset: {} sample(s)", bundle.sample_count);

    let report = execute_job(api, pool, name, &bundle, &RunPoller::default()).await?;

    print_report(&report);
    Ok(())
}

/// Perform the create-eval, upload, and run steps for one job
///
/// The eval and upload steps are skipped when the record already carries
/// their identifier; a run is always launched and polled.
pub async fn execute_job(
    api: &dyn EvalsApi,
    pool: &SqlitePool,
    name: &str,
    bundle: &JobBundle,
    poller: &RunPoller,
) -> Result<RunReport> {
    let record = jobs::find_or_create(pool, name)
        .await
        .with_context(|| format!("failed to resolve job record `{name}`"))?;

    let eval_id = match record.eval_id.clone() {
        Some(id) => {
            println!("{}", format!("✓ Using existing eval: {id}").green());
            id
        }
        None => {
            println!("{}", "Creating eval...".bold());
            let id = api
                .create_eval(name, &bundle.eval_spec)
                .await
                .with_context(|| format!("failed to create eval for job `{name}`"))?;
            jobs::set_eval_id(pool, record.id, &id)
                .await
                .context("failed to record eval id")?;
            info!(job = name, eval_id = %id, "eval created");
            println!("{}", format!("✓ Eval created: {id}").green());
            id
        }
    };

    let data_id = match record.data_id.clone() {
        Some(id) => {
            println!("{}", format!("✓ Using existing dataset: {id}").green());
            id
        }
        None => {
            println!("{}", "Uploading dataset...".bold());
            let id = api
                .upload_dataset(&bundle.dataset_path)
                .await
                .with_context(|| format!("failed to upload dataset for job `{name}`"))?;
            jobs::set_data_id(pool, record.id, &id)
                .await
                .context("failed to record dataset id")?;
            info!(job = name, data_id = %id, "dataset uploaded");
            println!("{}", format!("✓ Dataset uploaded: {id}").green());
            id
        }
    };

    println!("{}", "Starting run...".bold());
    let run = api
        .create_run(&eval_id, &bundle.run_spec, &bundle.prompt, &data_id)
        .await
        .with_context(|| format!("failed to start run for job `{name}`"))?;
    println!(
        "{}",
        format!("✓ Run started: {} ({})", run.id, run.status).green()
    );

    let report = poller
        .wait(api, &eval_id, &data_id, &run.id)
        .await
        .with_context(|| format!("run {} for job `{name}` did not complete", run.id))?;

    Ok(report)
}

/// Print the final run snapshot
fn print_report(report: &RunReport) {
    println!();
    println!("{}", "Run finished:".bold());
    println!("  Run ID:   {}", report.run_id.cyan());
    println!("  Eval ID:  {}", report.eval_id.dimmed());
    println!("  Data ID:  {}", report.data_id.dimmed());
    println!("  Status:   {}", colorize_status(&report.status));
    println!(
        "  Samples:  {}/{}",
        report.samples_processed, report.total_samples
    );
    println!(
        "  Finished: {}",
        report.completed_at.format("%Y-%m-%d %H:%M:%S")
    );

    if let Ok(pretty) = serde_json::to_string_pretty(&report.metrics) {
        println!("\n{}", "Metrics:".bold());
        println!("{pretty}");
    }
}

/// Colorize run status for display
fn colorize_status(status: &RunStatus) -> colored::ColoredString {
    match status {
        RunStatus::Queued => status.to_string().yellow(),
        RunStatus::Running => status.to_string().cyan(),
        RunStatus::Completed => status.to_string().green(),
        RunStatus::Failed => status.to_string().red(),
        RunStatus::Other(_) => status.to_string().normal(),
    }
}
