//! Domain models
//!
//! Wire types use the camelCase field names of the claims API. Server-owned records are
//! deserialized leniently: a field with an unexpected shape degrades to "missing" instead
//! of failing the whole payload.

pub mod claim;
pub mod document;
pub mod lenient;
pub mod report;
pub mod status;

pub use claim::{ClaimFile, ClaimSubmission, ClaimSummary};
pub use document::DocumentReference;
pub use report::{
    ClaimInfo, ClaimReport, IncidentInfo, PolicyHolderDetails, PolicyInfo, PropertyInfo,
    ProofOfDamage, VendorEstimate, Witness,
};
pub use status::{ProcessingStatus, RemoteStatus};
