use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Component, Path};

use crate::models::lenient;

/// One document attached to a new claim.
#[derive(Clone, PartialEq, Eq)]
pub struct ClaimFile {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl fmt::Debug for ClaimFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClaimFile")
            .field("name", &self.name)
            .field("content_type", &self.content_type)
            .field("size", &self.bytes.len())
            .finish()
    }
}

impl ClaimFile {
    /// Content type is guessed from the file extension.
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let name = name.into();
        let content_type = content_type_for(&name).to_string();
        Self {
            name,
            content_type,
            bytes,
        }
    }

    /// Read a local file. Paths containing `..` are rejected.
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        if path.components().any(|c| c == Component::ParentDir) {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("Invalid input: {}", path.display()),
            ));
        }
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("document")
            .to_string();
        Ok(Self::new(name, bytes))
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// PDFs, images or audio files are expected; everything else is sent as a binary blob.
fn content_type_for(name: &str) -> &'static str {
    let extension = Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match extension.as_deref() {
        Some("pdf") => "application/pdf",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("tif") | Some("tiff") => "image/tiff",
        Some("mp3") => "audio/mpeg",
        Some("wav") => "audio/wav",
        Some("m4a") => "audio/mp4",
        Some("flac") => "audio/flac",
        Some("ogg") => "audio/ogg",
        Some("txt") => "text/plain",
        _ => "application/octet-stream",
    }
}

/// New-claim form contents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClaimSubmission {
    pub claim_id: String,
    pub files: Vec<ClaimFile>,
}

impl ClaimSubmission {
    pub fn new(claim_id: impl Into<String>, files: Vec<ClaimFile>) -> Self {
        Self {
            claim_id: claim_id.into(),
            files,
        }
    }

    pub fn clear(&mut self) {
        self.claim_id.clear();
        self.files.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.claim_id.is_empty() && self.files.is_empty()
    }
}

/// Row of the claims list (`GET /get-claims`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClaimSummary {
    #[serde(deserialize_with = "lenient::required_string")]
    pub claim_id: String,
    #[serde(deserialize_with = "lenient::string")]
    pub date_filed: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub incident_date: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub description: Option<String>,
}
