//! Scripted provider double shared by the poller and flow tests

use std::collections::VecDeque;
use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;

use gauge_client::{ClientError, EvalsApi, Result};
use gauge_core::domain::run::RunStatus;
use gauge_core::dto::eval::EvalSpec;
use gauge_core::dto::run::{EvalRun, RunSpec};

/// Scripted stand-in for the provider API
///
/// `get_run` consumes the status script front to back; the last entry
/// repeats once the script is exhausted. Every call is recorded so tests
/// can assert which remote steps ran.
pub struct FakeApi {
    statuses: Mutex<VecDeque<RunStatus>>,
    fallback: RunStatus,
    calls: Mutex<Vec<&'static str>>,
    pub fail_create_eval: bool,
    pub fail_upload: bool,
}

impl FakeApi {
    pub fn new(statuses: &[RunStatus]) -> Self {
        let fallback = statuses.last().cloned().unwrap_or(RunStatus::Completed);
        Self {
            statuses: Mutex::new(statuses.to_vec().into()),
            fallback,
            calls: Mutex::new(Vec::new()),
            fail_create_eval: false,
            fail_upload: false,
        }
    }

    pub fn failing_upload(statuses: &[RunStatus]) -> Self {
        Self {
            fail_upload: true,
            ..Self::new(statuses)
        }
    }

    /// Number of recorded calls to the named method
    pub fn count(&self, method: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|call| **call == method)
            .count()
    }

    /// Total number of recorded calls
    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn record(&self, method: &'static str) {
        self.calls.lock().unwrap().push(method);
    }

    fn run_state(&self, status: RunStatus) -> EvalRun {
        EvalRun {
            id: "run_789".to_string(),
            status,
            results: None,
            metrics: None,
            samples_processed: None,
            total_samples: None,
            completed_at: None,
        }
    }
}

#[async_trait]
impl EvalsApi for FakeApi {
    async fn create_eval(&self, _name: &str, _spec: &EvalSpec) -> Result<String> {
        self.record("create_eval");
        if self.fail_create_eval {
            return Err(ClientError::api_error(400, "create rejected"));
        }
        Ok("eval_123".to_string())
    }

    async fn upload_dataset(&self, _path: &Path) -> Result<String> {
        self.record("upload_dataset");
        if self.fail_upload {
            return Err(ClientError::api_error(500, "upload rejected"));
        }
        Ok("file_456".to_string())
    }

    async fn create_run(
        &self,
        _eval_id: &str,
        _spec: &RunSpec,
        _prompt: &str,
        _data_id: &str,
    ) -> Result<EvalRun> {
        self.record("create_run");
        Ok(self.run_state(RunStatus::Queued))
    }

    async fn get_run(&self, _eval_id: &str, _run_id: &str) -> Result<EvalRun> {
        self.record("get_run");
        let status = self
            .statuses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone());
        Ok(self.run_state(status))
    }
}
