//! Claimdesk Core Library
//!
//! This crate provides the domain models, validation rules, error metadata and
//! configuration that are shared by the API client, the submission workflow and the CLI.

pub mod config;
pub mod error;
pub mod models;
pub mod validation;

// Re-export commonly used types
pub use config::{AuthScheme, ClientConfig};
pub use error::{ErrorMetadata, LogLevel, ValidationError};
pub use models::{
    ClaimFile, ClaimReport, ClaimSubmission, ClaimSummary, DocumentReference, ProcessingStatus,
    ProofOfDamage, RemoteStatus,
};
pub use validation::{validate_claim_id, validate_files, FormErrors, FormField};
