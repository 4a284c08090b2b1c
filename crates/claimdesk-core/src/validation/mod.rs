//! New-claim form validation

use std::fmt;

use crate::error::ValidationError;
use crate::models::ClaimFile;

pub const MIN_CLAIM_ID_LENGTH: usize = 5;
pub const MAX_CLAIM_ID_LENGTH: usize = 20;

/// Fields of the new-claim form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    ClaimId,
    Files,
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormField::ClaimId => f.write_str("claim_id"),
            FormField::Files => f.write_str("files"),
        }
    }
}

/// Check a user-chosen claim identifier.
///
/// Length is checked before the character set, so `"ab c"` reports the length problem.
/// Length is measured in UTF-16 code units, the unit the dashboard form counts in.
pub fn validate_claim_id(claim_id: &str) -> Option<ValidationError> {
    let length = claim_id.encode_utf16().count();
    if length < MIN_CLAIM_ID_LENGTH {
        return Some(ValidationError::new(
            FormField::ClaimId,
            "Claim ID must be at least 5 characters long",
        ));
    }
    if length > MAX_CLAIM_ID_LENGTH {
        return Some(ValidationError::new(
            FormField::ClaimId,
            "Claim ID must be less than 20 characters long",
        ));
    }
    if !claim_id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-')
    {
        return Some(ValidationError::new(
            FormField::ClaimId,
            "Claim ID must only contain letters, numbers and dashes",
        ));
    }
    None
}

pub fn validate_files(files: &[ClaimFile]) -> Option<ValidationError> {
    if files.is_empty() {
        return Some(ValidationError::new(
            FormField::Files,
            "Please upload at least one file",
        ));
    }
    None
}

/// Inline errors for the whole form. Empty when the form can be submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    pub claim_id: Option<ValidationError>,
    pub files: Option<ValidationError>,
}

impl FormErrors {
    pub fn check(claim_id: &str, files: &[ClaimFile]) -> Self {
        Self {
            claim_id: validate_claim_id(claim_id),
            files: validate_files(files),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.claim_id.is_none() && self.files.is_none()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.claim_id.iter().chain(self.files.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file() -> ClaimFile {
        ClaimFile::new("receipt.pdf", b"%PDF-1.4".to_vec())
    }

    #[test]
    fn claim_id_within_bounds_is_valid() {
        for id in ["ABCDE", "claim-2024-001", "a1-b2-c3-d4-e5-f6-g7", "12345"] {
            assert_eq!(validate_claim_id(id), None, "{id} should be valid");
        }
    }

    #[test]
    fn claim_id_too_short() {
        let err = validate_claim_id("ABCD").unwrap();
        assert_eq!(err.field, FormField::ClaimId);
        assert_eq!(err.message, "Claim ID must be at least 5 characters long");
        assert!(validate_claim_id("").is_some());
    }

    #[test]
    fn claim_id_too_long() {
        let id = "A".repeat(21);
        let err = validate_claim_id(&id).unwrap();
        assert_eq!(err.message, "Claim ID must be less than 20 characters long");
        assert!(validate_claim_id(&"A".repeat(20)).is_none());
    }

    #[test]
    fn claim_id_with_invalid_characters() {
        for id in ["claim 001", "claim_001", "claim/001", "clâim-001"] {
            let err = validate_claim_id(id).unwrap();
            assert_eq!(
                err.message,
                "Claim ID must only contain letters, numbers and dashes"
            );
        }
    }

    #[test]
    fn claim_id_length_counts_utf16_units() {
        let err = validate_claim_id("abc😀").unwrap();
        assert_eq!(
            err.message,
            "Claim ID must only contain letters, numbers and dashes"
        );
        let err = validate_claim_id(&"😀".repeat(11)).unwrap();
        assert_eq!(err.message, "Claim ID must be less than 20 characters long");
    }

    #[test]
    fn files_must_not_be_empty() {
        let err = validate_files(&[]).unwrap();
        assert_eq!(err.field, FormField::Files);
        assert_eq!(err.message, "Please upload at least one file");
        assert!(validate_files(&[file()]).is_none());
    }

    #[test]
    fn form_errors_collects_both_fields() {
        let errors = FormErrors::check("bad", &[]);
        assert!(!errors.is_empty());
        assert_eq!(errors.iter().count(), 2);

        let ok = FormErrors::check("CLAIM-1", &[file()]);
        assert!(ok.is_empty());
    }
}
