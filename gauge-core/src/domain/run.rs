//! Run status and report domain types

use serde::{Deserialize, Serialize};

/// Remote run status as reported by the provider
///
/// Polling continues only while a run is queued or running, so any
/// unrecognized status string is preserved as a terminal `Other` value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RunStatus {
    Queued,
    Running,
    Completed,
    Failed,
    Other(String),
}

impl RunStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, RunStatus::Queued | RunStatus::Running)
    }

    pub fn as_str(&self) -> &str {
        match self {
            RunStatus::Queued => "queued",
            RunStatus::Running => "running",
            RunStatus::Completed => "completed",
            RunStatus::Failed => "failed",
            RunStatus::Other(status) => status,
        }
    }
}

impl From<String> for RunStatus {
    fn from(status: String) -> Self {
        match status.as_str() {
            "queued" => RunStatus::Queued,
            "running" => RunStatus::Running,
            "completed" => RunStatus::Completed,
            "failed" => RunStatus::Failed,
            _ => RunStatus::Other(status),
        }
    }
}

impl From<RunStatus> for String {
    fn from(status: RunStatus) -> Self {
        status.as_str().to_string()
    }
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of a run that reached a terminal status
///
/// Assembled by the poller from the final status response; never persisted.
/// Payloads the provider omitted are defaulted rather than left optional so
/// downstream consumers need no presence checks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub run_id: String,
    pub eval_id: String,
    pub data_id: String,
    pub status: RunStatus,
    pub results: serde_json::Value,
    pub metrics: serde_json::Value,
    pub samples_processed: u64,
    pub total_samples: u64,
    pub completed_at: chrono::DateTime<chrono::Utc>,
}
