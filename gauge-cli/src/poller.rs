//! Run poller
//!
//! Waits for a remote evaluation run to reach a terminal status by
//! re-querying at a fixed interval, bounded by an attempt budget.
//! Strictly sequential: one run, one wait-then-query loop.

use std::time::Duration;

use chrono::Utc;
use thiserror::Error;
use tracing::debug;

use gauge_client::{ClientError, EvalsApi};
use gauge_core::domain::run::RunReport;
use gauge_core::dto::run::EvalRun;

/// Wait between status queries
pub const POLL_INTERVAL: Duration = Duration::from_secs(10);
/// Maximum number of status queries before giving up
pub const MAX_POLL_ATTEMPTS: u32 = 60;

#[derive(Debug, Error)]
pub enum PollError {
    /// Status query failed
    #[error(transparent)]
    Client(#[from] ClientError),

    /// Attempt budget exhausted while the run was still pending; the
    /// remote run keeps going, it is not cancelled
    #[error("run did not reach a terminal status within {attempts} checks")]
    Timeout { attempts: u32 },
}

/// Sequential wait-then-query loop over a single run
pub struct RunPoller {
    interval: Duration,
    max_attempts: u32,
}

impl RunPoller {
    pub fn new(interval: Duration, max_attempts: u32) -> Self {
        Self {
            interval,
            max_attempts,
        }
    }

    /// Poll until the run reaches a terminal status
    ///
    /// Queries at most `max_attempts` times with `interval` between
    /// queries and returns the report assembled from the terminal
    /// response.
    pub async fn wait<A: EvalsApi + ?Sized>(
        &self,
        api: &A,
        eval_id: &str,
        data_id: &str,
        run_id: &str,
    ) -> Result<RunReport, PollError> {
        for attempt in 1..=self.max_attempts {
            let run = api.get_run(eval_id, run_id).await?;
            debug!(attempt, status = %run.status, "polled run {}", run.id);

            if run.status.is_terminal() {
                return Ok(assemble_report(run, eval_id, data_id));
            }

            if attempt < self.max_attempts {
                tokio::time::sleep(self.interval).await;
            }
        }

        Err(PollError::Timeout {
            attempts: self.max_attempts,
        })
    }
}

impl Default for RunPoller {
    fn default() -> Self {
        Self::new(POLL_INTERVAL, MAX_POLL_ATTEMPTS)
    }
}

/// Build the final snapshot, defaulting whatever the provider omitted
fn assemble_report(run: EvalRun, eval_id: &str, data_id: &str) -> RunReport {
    RunReport {
        run_id: run.id,
        eval_id: eval_id.to_string(),
        data_id: data_id.to_string(),
        status: run.status,
        results: run
            .results
            .unwrap_or_else(|| serde_json::Value::Object(Default::default())),
        metrics: run
            .metrics
            .unwrap_or_else(|| serde_json::Value::Object(Default::default())),
        samples_processed: run.samples_processed.unwrap_or(0),
        total_samples: run.total_samples.unwrap_or(0),
        completed_at: run.completed_at.unwrap_or_else(Utc::now),
    }
}
