//! Two-step submission pipeline: upload every file, then start processing.
//!
//! Starting processing requires an [`UploadReceipt`], which only exists once every file
//! has been accepted by storage, so a failed upload can never be followed by processing.

use claimdesk_api_client::{ClaimsApi, UploadedFile};
use claimdesk_core::ClaimFile;
use serde_json::Value;

use crate::error::SubmissionError;

/// Proof that all files of a claim were uploaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadReceipt {
    claim_id: String,
    files: Vec<UploadedFile>,
}

impl UploadReceipt {
    pub fn claim_id(&self) -> &str {
        &self.claim_id
    }

    pub fn files(&self) -> &[UploadedFile] {
        &self.files
    }
}

/// Processing has been accepted by the API for this claim.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessingHandle {
    pub claim_id: String,
    pub uploaded: Vec<UploadedFile>,
    /// Raw start-processing response; not interpreted.
    pub response: Value,
}

/// Upload files in order, stopping at the first failure.
pub async fn upload_all(
    api: &dyn ClaimsApi,
    claim_id: &str,
    files: &[ClaimFile],
) -> Result<UploadReceipt, SubmissionError> {
    let mut uploaded = Vec::with_capacity(files.len());
    for file in files {
        let result = api
            .upload_file(claim_id, file)
            .await
            .map_err(|source| SubmissionError::Upload {
                file_name: file.name.clone(),
                source,
            })?;
        uploaded.push(result);
    }

    tracing::info!(
        claim_id = %claim_id,
        file_count = uploaded.len(),
        "All claim files uploaded"
    );

    Ok(UploadReceipt {
        claim_id: claim_id.to_string(),
        files: uploaded,
    })
}

pub async fn start_processing(
    api: &dyn ClaimsApi,
    receipt: UploadReceipt,
) -> Result<ProcessingHandle, SubmissionError> {
    let response = api
        .start_processing(&receipt.claim_id)
        .await
        .map_err(SubmissionError::StartProcessing)?;

    Ok(ProcessingHandle {
        claim_id: receipt.claim_id,
        uploaded: receipt.files,
        response,
    })
}
