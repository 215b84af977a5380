//! Inspect flow
//!
//! Lists every job record with its readiness and recorded identifiers,
//! newest first.

use anyhow::{Context, Result};
use colored::*;

use gauge_core::domain::job::{JobRecord, Readiness};
use gauge_store::{SqlitePool, jobs};

pub async fn see_flow(pool: &SqlitePool) -> Result<()> {
    let records = jobs::list_all(pool)
        .await
        .context("failed to list job records")?;

    if records.is_empty() {
        println!("{}", "No evaluations recorded yet.".yellow());
        return Ok(());
    }

    println!("{}", format!("Found {} evaluation(s):", records.len()).bold());
    println!();
    for record in &records {
        print_record(record);
    }

    Ok(())
}

/// Print a job record summary
fn print_record(record: &JobRecord) {
    let readiness = match record.readiness() {
        Readiness::Ready => "Ready".green(),
        Readiness::Incomplete => "Incomplete".yellow(),
    };

    println!("  {} {} [{}]", "▸".cyan(), record.name.bold(), readiness);
    println!(
        "    Created: {}",
        record
            .created_at
            .format("%Y-%m-%d %H:%M:%S")
            .to_string()
            .dimmed()
    );
    if let Some(eval_id) = &record.eval_id {
        println!("    Eval ID: {}", eval_id.dimmed());
    }
    if let Some(data_id) = &record.data_id {
        println!("    Data ID: {}", data_id.dimmed());
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_see_flow_handles_empty_and_populated_store() {
        let pool = gauge_store::create_memory_pool().await.unwrap();
        gauge_store::run_migrations(&pool).await.unwrap();

        see_flow(&pool).await.unwrap();

        let record = jobs::create(&pool, "sentiment-check").await.unwrap();
        jobs::set_eval_id(&pool, record.id, "eval_123").await.unwrap();

        see_flow(&pool).await.unwrap();
    }
}
