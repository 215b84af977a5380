//! Eval and run endpoints

use serde::Deserialize;
use serde_json::json;

use crate::EvalsClient;
use crate::error::{ClientError, Result};
use gauge_core::dto::eval::EvalSpec;
use gauge_core::dto::run::{EvalRun, RunSpec};

/// Role of the instructional turn in every run template
const INSTRUCTION_ROLE: &str = "developer";
/// Placeholder substituted with each dataset row's input
const ITEM_PLACEHOLDER: &str = "{{ item.input }}";

#[derive(Debug, Deserialize)]
struct CreatedEval {
    id: String,
}

impl EvalsClient {
    /// Create an eval resource from a creation descriptor
    ///
    /// The job name is injected into the descriptor before submission; the
    /// rest of the descriptor is forwarded verbatim.
    ///
    /// # Returns
    /// The provider-assigned eval identifier
    pub async fn create_eval(&self, name: &str, spec: &EvalSpec) -> Result<String> {
        let url = format!("{}/evals", self.base_url);

        let mut body = serde_json::to_value(spec)
            .map_err(|e| ClientError::ParseError(format!("failed to encode descriptor: {}", e)))?;
        body["name"] = json!(name);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let created: CreatedEval = self.handle_response(response).await?;
        Ok(created.id)
    }

    /// Launch an evaluation run
    ///
    /// The input-message template is always two turns: an instructional
    /// turn carrying the full prompt text and a user turn carrying the
    /// per-row placeholder. The data source references the uploaded
    /// dataset by file id.
    ///
    /// Returns immediately with the run in a pending state; use
    /// [`EvalsClient::get_run`] to follow it.
    pub async fn create_run(
        &self,
        eval_id: &str,
        spec: &RunSpec,
        prompt: &str,
        data_id: &str,
    ) -> Result<EvalRun> {
        let url = format!("{}/evals/{}/runs", self.base_url, eval_id);
        let body = build_run_body(spec, prompt, data_id)?;

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Fetch the current state of a run
    pub async fn get_run(&self, eval_id: &str, run_id: &str) -> Result<EvalRun> {
        let url = format!("{}/evals/{}/runs/{}", self.base_url, eval_id, run_id);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        self.handle_response(response).await
    }
}

/// Assemble the create-run request body
///
/// Starts from the descriptor so provider-specific extras survive, then
/// rebuilds `data_source` with the two-turn template and file reference.
fn build_run_body(spec: &RunSpec, prompt: &str, data_id: &str) -> Result<serde_json::Value> {
    let mut body = serde_json::to_value(spec)
        .map_err(|e| ClientError::ParseError(format!("failed to encode descriptor: {}", e)))?;

    body["data_source"] = json!({
        "type": spec.data_source.kind,
        "model": spec.data_source.model,
        "input_messages": {
            "type": spec.data_source.input_messages.kind,
            "template": [
                { "role": INSTRUCTION_ROLE, "content": prompt },
                { "role": "user", "content": ITEM_PLACEHOLDER },
            ],
        },
        "source": { "type": "file_id", "id": data_id },
    });

    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn spec() -> RunSpec {
        serde_json::from_value(json!({
            "name": "sentiment-run",
            "data_source": {
                "type": "completions",
                "model": "gpt-4o-mini",
                "input_messages": { "type": "template" }
            },
            "metadata": { "owner": "nlp" }
        }))
        .unwrap()
    }

    #[test]
    fn test_run_body_has_two_turn_template() {
        let body = build_run_body(&spec(), "Grade the sentiment.", "file_123").unwrap();

        let template = &body["data_source"]["input_messages"]["template"];
        assert_eq!(template.as_array().unwrap().len(), 2);
        assert_eq!(template[0]["role"], "developer");
        assert_eq!(template[0]["content"], "Grade the sentiment.");
        assert_eq!(template[1]["role"], "user");
        assert_eq!(template[1]["content"], "{{ item.input }}");
    }

    #[test]
    fn test_run_body_references_uploaded_file() {
        let body = build_run_body(&spec(), "prompt", "file_123").unwrap();

        assert_eq!(body["data_source"]["source"]["type"], "file_id");
        assert_eq!(body["data_source"]["source"]["id"], "file_123");
        assert_eq!(body["data_source"]["model"], "gpt-4o-mini");
    }

    #[test]
    fn test_run_body_keeps_descriptor_extras() {
        let body = build_run_body(&spec(), "prompt", "file_123").unwrap();

        assert_eq!(body["name"], "sentiment-run");
        assert_eq!(body["metadata"]["owner"], "nlp");
    }
}
