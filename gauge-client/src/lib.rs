//! Gauge Provider Client
//!
//! A typed HTTP client for the remote evaluation provider: eval creation,
//! dataset upload, run creation, and run status.
//!
//! Each operation is a single request/response pair with no internal retry;
//! callers decide what a failure means for their flow.
//!
//! # Example
//!
//! ```no_run
//! use gauge_client::EvalsClient;
//!
//! # async fn example() -> gauge_client::Result<()> {
//! let client = EvalsClient::new("https://api.openai.com/v1", "sk-...");
//!
//! let run = client.get_run("eval_123", "run_456").await?;
//! println!("run {} is {}", run.id, run.status);
//! # Ok(())
//! # }
//! ```

pub mod error;
mod evals;
mod files;

pub use error::{ClientError, Result};

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::path::Path;

use gauge_core::dto::eval::EvalSpec;
use gauge_core::dto::run::{EvalRun, RunSpec};

/// Remote operations needed by the run flow and the poller
///
/// `EvalsClient` is the production implementation; tests substitute a
/// scripted fake.
#[async_trait]
pub trait EvalsApi: Send + Sync {
    /// Create an eval resource and return its identifier
    async fn create_eval(&self, name: &str, spec: &EvalSpec) -> Result<String>;

    /// Upload a dataset file and return its identifier
    async fn upload_dataset(&self, path: &Path) -> Result<String>;

    /// Launch an evaluation run; returns immediately with a pending run
    async fn create_run(
        &self,
        eval_id: &str,
        spec: &RunSpec,
        prompt: &str,
        data_id: &str,
    ) -> Result<EvalRun>;

    /// Fetch the current state of a run
    async fn get_run(&self, eval_id: &str, run_id: &str) -> Result<EvalRun>;
}

/// HTTP client for the evaluation provider API
#[derive(Debug, Clone)]
pub struct EvalsClient {
    /// Base URL of the provider (e.g., "https://api.openai.com/v1")
    base_url: String,
    /// Bearer credential sent with every request
    api_key: String,
    /// HTTP client instance
    client: Client,
}

impl EvalsClient {
    /// Create a new provider client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the provider API
    /// * `api_key` - The access credential
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            client: Client::new(),
        }
    }

    /// Create a new provider client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    pub fn with_client(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        client: Client,
    ) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            client,
        }
    }

    /// Get the base URL of the provider
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Handle a provider response and deserialize JSON
    ///
    /// Checks the status code and surfaces the provider's own message on
    /// failure, or deserializes the response body if successful.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            tracing::debug!(status = status.as_u16(), "provider returned an error status");
            return Err(ClientError::api_error(
                status.as_u16(),
                provider_message(&error_text),
            ));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("failed to parse JSON response: {}", e)))
    }
}

/// Extract the human-readable message from a provider error body
///
/// Falls back to the raw text when the body is not the expected
/// `{"error": {"message": ...}}` shape.
fn provider_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}

#[async_trait]
impl EvalsApi for EvalsClient {
    async fn create_eval(&self, name: &str, spec: &EvalSpec) -> Result<String> {
        EvalsClient::create_eval(self, name, spec).await
    }

    async fn upload_dataset(&self, path: &Path) -> Result<String> {
        EvalsClient::upload_dataset(self, path).await
    }

    async fn create_run(
        &self,
        eval_id: &str,
        spec: &RunSpec,
        prompt: &str,
        data_id: &str,
    ) -> Result<EvalRun> {
        EvalsClient::create_run(self, eval_id, spec, prompt, data_id).await
    }

    async fn get_run(&self, eval_id: &str, run_id: &str) -> Result<EvalRun> {
        EvalsClient::get_run(self, eval_id, run_id).await
    }
}
