//! Document AI REST client.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::RemoteCallError;
use crate::models::config::DocAiConfig;
use crate::models::document::{Document, RawDocument};

use super::{DocumentProcessor, ProcessedDocument, Result, TokenProvider};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProcessRequest<'a> {
    raw_document: RawDocumentPayload<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RawDocumentPayload<'a> {
    content: String,
    mime_type: &'a str,
}

#[derive(Deserialize)]
struct ProcessResponse {
    #[serde(default)]
    document: Option<serde_json::Value>,
}

/// Client for a single Document AI processor.
pub struct DocumentAiClient {
    http: reqwest::Client,
    endpoint: String,
    processor_name: String,
    token: TokenProvider,
}

impl DocumentAiClient {
    /// Create a client for the configured processor.
    pub fn new(config: &DocAiConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("docai/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            endpoint: config.api_endpoint(),
            processor_name: config.processor_name(),
            token: TokenProvider::from_token(config.access_token.clone()),
        })
    }

    /// URL of the synchronous `:process` method.
    pub fn process_url(&self) -> String {
        format!("{}/v1/{}:process", self.endpoint, self.processor_name)
    }
}

impl DocumentProcessor for DocumentAiClient {
    fn processor_name(&self) -> &str {
        &self.processor_name
    }

    async fn process(&self, document: &RawDocument) -> Result<ProcessedDocument> {
        let token = self.token.token().await?;

        let request = ProcessRequest {
            raw_document: RawDocumentPayload {
                content: STANDARD.encode(&document.content),
                mime_type: document.mime_type.as_str(),
            },
        };

        debug!(
            "POST {} ({} bytes, {})",
            self.process_url(),
            document.len(),
            document.mime_type
        );

        let response = self
            .http
            .post(self.process_url())
            .bearer_auth(token)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RemoteCallError::Status {
                status: status.as_u16(),
                body: body.trim().to_string(),
            });
        }

        let body = response.text().await?;
        let parsed: ProcessResponse =
            serde_json::from_str(&body).map_err(|e| RemoteCallError::Decode(e.to_string()))?;
        let raw = parsed.document.ok_or(RemoteCallError::EmptyResponse)?;
        let document: Document = serde_json::from_value(raw.clone())
            .map_err(|e| RemoteCallError::Decode(e.to_string()))?;

        info!(
            "Processor returned {} chars of text and {} entities",
            document.text.len(),
            document.entities.len()
        );

        Ok(ProcessedDocument { raw, document })
    }
}
