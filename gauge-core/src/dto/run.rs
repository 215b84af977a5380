//! Run descriptor (`run.json`) and provider wire types

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::run::RunStatus;
use crate::dto::SpecError;

/// Run definition submitted alongside the prompt and dataset reference
///
/// Unrecognized top-level keys are preserved and forwarded verbatim; the
/// `data_source` section is rebuilt by the client with the assembled
/// template and file reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSpec {
    pub name: String,
    pub data_source: DataSourceSpec,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Data-source section of a run descriptor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataSourceSpec {
    #[serde(rename = "type")]
    pub kind: String,
    pub model: String,
    pub input_messages: InputMessagesSpec,
}

/// Input-message shape; the template itself is assembled at run creation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputMessagesSpec {
    #[serde(rename = "type")]
    pub kind: String,
}

impl RunSpec {
    pub fn validate(&self) -> Result<(), SpecError> {
        if self.name.trim().is_empty() {
            return Err(SpecError::Field {
                field: "name",
                reason: "must not be empty",
            });
        }
        if self.data_source.kind.trim().is_empty() {
            return Err(SpecError::Field {
                field: "data_source.type",
                reason: "must not be empty",
            });
        }
        if self.data_source.model.trim().is_empty() {
            return Err(SpecError::Field {
                field: "data_source.model",
                reason: "must not be empty",
            });
        }
        if self.data_source.input_messages.kind.trim().is_empty() {
            return Err(SpecError::Field {
                field: "data_source.input_messages.type",
                reason: "must not be empty",
            });
        }
        Ok(())
    }
}

/// Run state returned by the provider's create-run and run-status endpoints
///
/// Everything beyond `id` and `status` is optional; the poller applies
/// defaults when assembling the final report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalRun {
    pub id: String,
    pub status: RunStatus,
    #[serde(default)]
    pub results: Option<Value>,
    #[serde(default)]
    pub metrics: Option<Value>,
    #[serde(default)]
    pub samples_processed: Option<u64>,
    #[serde(default)]
    pub total_samples: Option<u64>,
    /// Provider reports completion as unix seconds
    #[serde(default, with = "chrono::serde::ts_seconds_option")]
    pub completed_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn descriptor() -> Value {
        json!({
            "name": "sentiment-run",
            "data_source": {
                "type": "completions",
                "model": "gpt-4o-mini",
                "input_messages": { "type": "template" }
            },
            "metadata": { "owner": "nlp" }
        })
    }

    #[test]
    fn test_parses_descriptor_and_keeps_extras() {
        let spec: RunSpec = serde_json::from_value(descriptor()).unwrap();

        assert!(spec.validate().is_ok());
        assert_eq!(spec.data_source.kind, "completions");
        assert_eq!(spec.data_source.model, "gpt-4o-mini");
        assert!(spec.extra.contains_key("metadata"));
    }

    #[test]
    fn test_rejects_blank_model() {
        let mut value = descriptor();
        value["data_source"]["model"] = json!("  ");
        let spec: RunSpec = serde_json::from_value(value).unwrap();

        assert!(spec.validate().is_err());
    }

    #[test]
    fn test_run_state_defaults_optional_fields() {
        let run: EvalRun = serde_json::from_value(json!({
            "id": "run_123",
            "status": "queued"
        }))
        .unwrap();

        assert_eq!(run.status, RunStatus::Queued);
        assert!(run.results.is_none());
        assert!(run.completed_at.is_none());
    }

    #[test]
    fn test_run_state_parses_completion_seconds() {
        let run: EvalRun = serde_json::from_value(json!({
            "id": "run_123",
            "status": "completed",
            "samples_processed": 40,
            "total_samples": 40,
            "completed_at": 1_700_000_000
        }))
        .unwrap();

        assert!(run.status.is_terminal());
        assert_eq!(run.samples_processed, Some(40));
        assert_eq!(run.completed_at.unwrap().timestamp(), 1_700_000_000);
    }
}
