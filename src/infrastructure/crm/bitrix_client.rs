use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::application::ports::{CrmClient, CrmClientError};
use crate::domain::{CommentId, FileDescriptor, FileId, LeadId, TimelineComment};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Bitrix24 REST adapter speaking the inbound-webhook URL scheme, where
/// the base URL already carries the auth token and method names are
/// appended as path segments.
pub struct BitrixClient {
    client: reqwest::Client,
    base_url: String,
}

impl BitrixClient {
    pub fn new(webhook_base_url: &str) -> Result<Self, CrmClientError> {
        let client = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| CrmClientError::ApiRequestFailed(format!("client build: {}", e)))?;

        Ok(Self {
            client,
            base_url: format!("{}/", webhook_base_url.trim_end_matches('/')),
        })
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}{}", self.base_url, method)
    }
}

#[derive(Deserialize)]
struct CommentGetResponse {
    result: Option<CommentResult>,
}

#[derive(Deserialize)]
struct CommentResult {
    #[serde(rename = "ENTITY_ID")]
    entity_id: Option<Value>,
    #[serde(rename = "FILES")]
    files: Option<HashMap<String, FileEntry>>,
}

#[derive(Deserialize)]
struct FileEntry {
    id: Option<Value>,
}

#[derive(Deserialize)]
struct FileGetResponse {
    result: Option<FileGetResult>,
}

#[derive(Deserialize)]
struct FileGetResult {
    #[serde(rename = "DOWNLOAD_URL")]
    download_url: Option<String>,
}

#[derive(Serialize)]
struct AddCommentRequest<'a> {
    fields: AddCommentFields<'a>,
}

#[derive(Serialize)]
struct AddCommentFields<'a> {
    #[serde(rename = "ENTITY_ID")]
    entity_id: &'a str,
    #[serde(rename = "ENTITY_TYPE")]
    entity_type: &'a str,
    #[serde(rename = "COMMENT")]
    comment: &'a str,
}

/// Bitrix serves ids as numbers or strings depending on the method.
fn id_value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[async_trait]
impl CrmClient for BitrixClient {
    async fn get_comment(&self, id: &CommentId) -> Result<TimelineComment, CrmClientError> {
        let url = self.method_url("crm.timeline.comment.get");

        tracing::debug!(comment_id = %id, "Fetching comment from Bitrix24");

        let response = self
            .client
            .get(&url)
            .query(&[("id", id.as_str())])
            .send()
            .await
            .map_err(|e| CrmClientError::ApiRequestFailed(format!("request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(CrmClientError::ApiRequestFailed(format!(
                "status {}: {}",
                status, body
            )));
        }

        let parsed: CommentGetResponse = response
            .json()
            .await
            .map_err(|e| CrmClientError::InvalidResponse(format!("parse response: {}", e)))?;

        let result = parsed
            .result
            .ok_or_else(|| CrmClientError::InvalidResponse("missing result".to_string()))?;

        let entity_id = result
            .entity_id
            .as_ref()
            .and_then(id_value_to_string)
            .map(LeadId::new);

        let files = result
            .files
            .unwrap_or_default()
            .into_values()
            .filter_map(|entry| entry.id.as_ref().and_then(id_value_to_string))
            .map(|id| FileDescriptor {
                id: FileId::new(id),
            })
            .collect();

        Ok(TimelineComment { entity_id, files })
    }

    async fn resolve_download_url(&self, id: &FileId) -> Result<String, CrmClientError> {
        let url = self.method_url("disk.file.get");

        tracing::debug!(file_id = %id, "Resolving download URL");

        let response = self
            .client
            .get(&url)
            .query(&[("id", id.as_str())])
            .send()
            .await
            .map_err(|e| CrmClientError::ApiRequestFailed(format!("request: {}", e)))?;

        if !response.status().is_success() {
            return Err(CrmClientError::NotFound(format!(
                "file {}: status {}",
                id,
                response.status()
            )));
        }

        let parsed: FileGetResponse = response
            .json()
            .await
            .map_err(|e| CrmClientError::InvalidResponse(format!("parse response: {}", e)))?;

        parsed
            .result
            .and_then(|r| r.download_url)
            .filter(|u| !u.is_empty())
            .ok_or_else(|| CrmClientError::NotFound(format!("file {}: no download url", id)))
    }

    async fn add_comment(&self, lead: &LeadId, text: &str) -> Result<(), CrmClientError> {
        let url = self.method_url("crm.timeline.comment.add.json");

        let payload = AddCommentRequest {
            fields: AddCommentFields {
                entity_id: lead.as_str(),
                entity_type: "lead",
                comment: text,
            },
        };

        let response = self
            .client
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| CrmClientError::ApiRequestFailed(format!("request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(CrmClientError::ApiRequestFailed(format!(
                "status {}: {}",
                status, body
            )));
        }

        Ok(())
    }
}
