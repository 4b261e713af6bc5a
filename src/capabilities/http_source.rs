//! HTTP file source: asks a backend endpoint for the files of a set of records

use super::traits::FileSource;
use crate::config::SourceConfig;
use crate::error::{Error, FetchError, Result};
use crate::types::{FileRecord, RecordId};
use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

/// Request body sent to the backend
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GetFilesRequest<'a> {
    record_ids: &'a [RecordId],
}

/// Fetches record files by POSTing `{"recordIds": [...]}` to an endpoint
///
/// The endpoint answers with a JSON array of
/// `{"fileName", "body", "recordName"}` objects (or `null` for no files).
/// Error bodies carrying a `message` field, either as an object or as the
/// first element of an array, are surfaced verbatim.
#[derive(Clone, Debug)]
pub struct HttpFileSource {
    client: reqwest::Client,
    endpoint: url::Url,
    auth_header: Option<String>,
}

impl HttpFileSource {
    /// Create a source from configuration
    pub fn new(config: &SourceConfig) -> Result<Self> {
        let endpoint = url::Url::parse(&config.endpoint).map_err(|e| {
            Error::config(
                "source.endpoint",
                format!("invalid endpoint '{}': {}", config.endpoint, e),
            )
        })?;

        Ok(Self {
            client: reqwest::Client::new(),
            endpoint,
            auth_header: config.auth_header.clone(),
        })
    }

    /// Endpoint this source talks to
    pub fn endpoint(&self) -> &url::Url {
        &self.endpoint
    }
}

/// Pull a human-readable message out of an error body, if there is one
fn backend_error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    let object = match &value {
        serde_json::Value::Array(items) => items.first()?,
        other => other,
    };
    object
        .get("message")
        .and_then(serde_json::Value::as_str)
        .map(str::to_string)
}

#[async_trait]
impl FileSource for HttpFileSource {
    async fn get_files(&self, record_ids: &[RecordId]) -> Result<Vec<FileRecord>> {
        let mut request = self
            .client
            .post(self.endpoint.clone())
            .json(&GetFilesRequest { record_ids });

        if let Some(auth) = &self.auth_header {
            request = request.header("Authorization", auth);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(match backend_error_message(&body) {
                Some(message) => Error::Fetch(FetchError::Backend(message)),
                None => Error::Fetch(FetchError::BadStatus {
                    status: status.as_u16(),
                    endpoint: self.endpoint.to_string(),
                }),
            });
        }

        let files: Option<Vec<FileRecord>> = response.json().await?;
        let files = files.unwrap_or_default();

        debug!(
            records = record_ids.len(),
            files = files.len(),
            "fetched record files"
        );

        Ok(files)
    }

    fn name(&self) -> &'static str {
        "http"
    }
}
