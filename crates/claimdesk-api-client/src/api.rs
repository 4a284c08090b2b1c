//! Domain methods for the claims API client.
//!
//! [`ClaimsApi`] is the seam the submission workflow and the review views depend on;
//! [`ApiClient`] implements it over HTTP and tests substitute in-memory fakes.

use async_trait::async_trait;
use claimdesk_core::models::lenient;
use claimdesk_core::{ClaimFile, ClaimReport, ClaimSummary, RemoteStatus};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::envelope;
use crate::{ApiClient, ClientError};

/// Pre-signed POST target for one file (`GET /get-presigned-post-url`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadSlot {
    pub url: String,
    /// Form fields that must precede the file part (key, policy, signature...).
    #[serde(default)]
    pub fields: Map<String, Value>,
}

/// Result of uploading one file into a claim's storage prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    pub file_name: String,
    /// Object key assigned by the upload slot, when it reports one.
    pub key: Option<String>,
}

/// Response of `GET /claim-status/{claimId}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClaimStatusResponse {
    #[serde(deserialize_with = "lenient::required_string")]
    pub status: String,
    #[serde(deserialize_with = "lenient::string")]
    pub claim_id: Option<String>,
}

impl ClaimStatusResponse {
    pub fn remote_status(&self) -> RemoteStatus {
        RemoteStatus::parse(&self.status)
    }
}

/// Signed link to view a stored document (`GET /view-file`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentLink {
    pub url: Option<String>,
}

#[async_trait]
pub trait ClaimsApi: Send + Sync {
    async fn upload_file(
        &self,
        claim_id: &str,
        file: &ClaimFile,
    ) -> Result<UploadedFile, ClientError>;

    /// Kick off server-side analysis. The body is not interpreted beyond being JSON.
    async fn start_processing(&self, claim_id: &str) -> Result<Value, ClientError>;

    async fn claim_status(&self, claim_id: &str) -> Result<ClaimStatusResponse, ClientError>;

    async fn list_claims(&self) -> Result<Vec<ClaimSummary>, ClientError>;

    async fn claim_report(&self, claim_id: &str) -> Result<ClaimReport, ClientError>;

    async fn document_link(
        &self,
        claim_id: &str,
        file_name: &str,
    ) -> Result<DocumentLink, ClientError>;
}

impl ApiClient {
    /// Ask the API for a pre-signed POST target for one file of a claim.
    pub async fn request_upload_slot(
        &self,
        claim_id: &str,
        file_name: &str,
    ) -> Result<UploadSlot, ClientError> {
        self.get_enveloped(
            "/get-presigned-post-url",
            &[("claimId", claim_id), ("fileName", file_name)],
        )
        .await
    }

    /// POST the file to a pre-signed slot. The slot carries its own credentials, so no
    /// session header is sent.
    async fn post_to_slot(&self, slot: &UploadSlot, file: &ClaimFile) -> Result<(), ClientError> {
        let mut form = reqwest::multipart::Form::new();
        for (name, value) in &slot.fields {
            let text = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            form = form.text(name.clone(), text);
        }

        let part = reqwest::multipart::Part::bytes(file.bytes.clone())
            .file_name(file.name.clone())
            .mime_str(&file.content_type)
            .map_err(|e| {
                ClientError::InvalidInput(format!(
                    "Invalid content type '{}': {}",
                    file.content_type, e
                ))
            })?;
        form = form.part("file", part);

        let response = self
            .client()
            .post(&slot.url)
            .multipart(form)
            .send()
            .await
            .map_err(ClientError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }
}

#[async_trait]
impl ClaimsApi for ApiClient {
    async fn upload_file(
        &self,
        claim_id: &str,
        file: &ClaimFile,
    ) -> Result<UploadedFile, ClientError> {
        if file.name.trim().is_empty() {
            return Err(ClientError::InvalidInput(
                "File name must not be empty".to_string(),
            ));
        }

        let slot = self.request_upload_slot(claim_id, &file.name).await?;
        self.post_to_slot(&slot, file).await?;

        let key = slot
            .fields
            .get("key")
            .and_then(Value::as_str)
            .map(str::to_string);

        tracing::info!(
            claim_id = %claim_id,
            file_name = %file.name,
            size = file.size(),
            "Uploaded claim file"
        );

        Ok(UploadedFile {
            file_name: file.name.clone(),
            key,
        })
    }

    async fn start_processing(&self, claim_id: &str) -> Result<Value, ClientError> {
        self.get_value("/start-claim-processing", &[("claim_id", claim_id)])
            .await
    }

    async fn claim_status(&self, claim_id: &str) -> Result<ClaimStatusResponse, ClientError> {
        self.get(
            &format!("/claim-status/{}", urlencoding::encode(claim_id)),
            &[],
        )
        .await
    }

    /// The collection comes back as a bare array or inside an envelope; any other shape
    /// is treated as "no claims".
    async fn list_claims(&self) -> Result<Vec<ClaimSummary>, ClientError> {
        let value = envelope::unwrap(self.get_value("/get-claims", &[]).await?)?;
        match value {
            Value::Array(_) => Ok(serde_json::from_value(value)?),
            _ => Ok(Vec::new()),
        }
    }

    async fn claim_report(&self, claim_id: &str) -> Result<ClaimReport, ClientError> {
        self.get("/get-claim-report", &[("claimId", claim_id)]).await
    }

    async fn document_link(
        &self,
        claim_id: &str,
        file_name: &str,
    ) -> Result<DocumentLink, ClientError> {
        self.get_enveloped(
            "/view-file",
            &[("claimId", claim_id), ("fileName", file_name)],
        )
        .await
    }
}
