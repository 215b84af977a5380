//! File upload endpoint

use std::path::Path;

use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use crate::EvalsClient;
use crate::error::{ClientError, Result};

/// Purpose tag the provider requires for evaluation datasets
const UPLOAD_PURPOSE: &str = "evals";

#[derive(Debug, Deserialize)]
struct UploadedFile {
    id: String,
}

impl EvalsClient {
    /// Upload a dataset file for evaluation use
    ///
    /// The file is read locally first, so an unreadable path fails before
    /// any network traffic.
    ///
    /// # Returns
    /// The provider-assigned file identifier
    pub async fn upload_dataset(&self, path: &Path) -> Result<String> {
        let bytes = tokio::fs::read(path).await.map_err(|source| ClientError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("data.jsonl")
            .to_string();

        let form = Form::new()
            .text("purpose", UPLOAD_PURPOSE)
            .part("file", Part::bytes(bytes).file_name(file_name));

        let url = format!("{}/files", self.base_url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await?;

        let uploaded: UploadedFile = self.handle_response(response).await?;
        Ok(uploaded.id)
    }
}
