//! Eval creation descriptor (`create.json`)

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::dto::SpecError;

/// Eval definition submitted to the provider's create-eval endpoint
///
/// The job name is injected by the client at submission time; it is not
/// part of the descriptor file. Unrecognized top-level keys are preserved
/// and forwarded verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalSpec {
    /// Shape of the rows the eval consumes
    pub data_source_config: Value,
    /// Graders applied to each sample
    pub testing_criteria: Vec<Value>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl EvalSpec {
    pub fn validate(&self) -> Result<(), SpecError> {
        if !self.data_source_config.is_object() {
            return Err(SpecError::Field {
                field: "data_source_config",
                reason: "must be an object",
            });
        }
        if self.testing_criteria.is_empty() {
            return Err(SpecError::Field {
                field: "testing_criteria",
                reason: "must not be empty",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parses_descriptor_with_extras() {
        let spec: EvalSpec = serde_json::from_value(json!({
            "data_source_config": { "type": "custom", "item_schema": { "type": "object" } },
            "testing_criteria": [{ "type": "string_check", "operation": "eq" }],
            "metadata": { "team": "nlp" }
        }))
        .unwrap();

        assert!(spec.validate().is_ok());
        assert!(spec.extra.contains_key("metadata"));
    }

    #[test]
    fn test_rejects_empty_testing_criteria() {
        let spec: EvalSpec = serde_json::from_value(json!({
            "data_source_config": { "type": "custom" },
            "testing_criteria": []
        }))
        .unwrap();

        assert!(spec.validate().is_err());
    }

    #[test]
    fn test_rejects_non_object_data_source_config() {
        let spec: EvalSpec = serde_json::from_value(json!({
            "data_source_config": "custom",
            "testing_criteria": [{ "type": "string_check" }]
        }))
        .unwrap();

        assert!(spec.validate().is_err());
    }
}
