use serde::{Deserialize, Serialize};

/// Where the document behind a proof-of-damage row can be viewed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DocumentReference {
    /// Stored with the claim; a signed link has to be requested on demand.
    StoredFile { name: String },
    /// Already a usable URL.
    ExternalLink { url: String },
    Unavailable,
}

impl DocumentReference {
    /// A stored file name wins over a precomputed link; blank values count as absent.
    pub fn from_parts(file_name: Option<&str>, link: Option<&str>) -> Self {
        let present = |value: Option<&str>| {
            value
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };
        if let Some(name) = present(file_name) {
            return DocumentReference::StoredFile { name };
        }
        if let Some(url) = present(link) {
            return DocumentReference::ExternalLink { url };
        }
        DocumentReference::Unavailable
    }

    pub fn needs_signed_link(&self) -> bool {
        matches!(self, DocumentReference::StoredFile { .. })
    }
}
