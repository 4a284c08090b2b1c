//! Claim report produced by server-side analysis (`GET /get-claim-report`).
//!
//! The report is treated as an opaque payload: the client never validates or reshapes it.
//! Fields whose type varies between reports are kept as raw JSON and formatted for display
//! only. Unknown fields are retained in `extra`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::models::document::DocumentReference;
use crate::models::lenient;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClaimReport {
    #[serde(deserialize_with = "lenient::string")]
    pub claim_id: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub policy_no: Option<String>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub claim_info: ClaimInfo,
    #[serde(deserialize_with = "lenient::flag")]
    pub fraud_warning: bool,
    #[serde(deserialize_with = "lenient::string")]
    pub suspicion: Option<String>,
    #[serde(deserialize_with = "lenient::number")]
    pub risk_score: Option<f64>,
    #[serde(deserialize_with = "lenient::string")]
    pub recommended_action: Option<String>,
    #[serde(deserialize_with = "lenient::string_list")]
    pub inconsistencies: Vec<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub observations: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub insights: Option<String>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub incident_info: IncidentInfo,
    #[serde(deserialize_with = "lenient::or_default")]
    pub policy_info: PolicyInfo,
    #[serde(deserialize_with = "lenient::or_default")]
    pub property_info: PropertyInfo,
    #[serde(deserialize_with = "lenient::string")]
    pub description_of_damage: Option<String>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub policy_holder_details: PolicyHolderDetails,
    #[serde(deserialize_with = "lenient::string")]
    pub call_recordings_summary: Option<String>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub proof_of_damage: Vec<ProofOfDamage>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub witness: Witness,
    #[serde(
        rename = "estimatesOfTotalCostToRepairPerEachVendor",
        deserialize_with = "lenient::or_default"
    )]
    pub vendor_estimates: Vec<VendorEstimate>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ClaimReport {
    /// Recommended action without its explanation (`"DENY - reason"` -> `"DENY"`).
    pub fn recommended_action_code(&self) -> Option<&str> {
        self.recommended_action
            .as_deref()
            .map(|action| action.split(" - ").next().unwrap_or(action))
            .filter(|code| !code.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClaimInfo {
    #[serde(deserialize_with = "lenient::string")]
    pub claim_date: Option<String>,
    pub estimated_damage_value: Value,
    pub estimated_repair_cost: Value,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IncidentInfo {
    #[serde(deserialize_with = "lenient::string")]
    pub description: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PolicyInfo {
    #[serde(deserialize_with = "lenient::string")]
    pub contact: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub insurance_company: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub agent_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PropertyInfo {
    #[serde(deserialize_with = "lenient::string")]
    pub address: Option<String>,
    #[serde(rename = "type", deserialize_with = "lenient::string")]
    pub kind: Option<String>,
    /// Either an object (damaged value, previous claim, repair cost) or free text.
    pub additional_info: Value,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PolicyHolderDetails {
    #[serde(deserialize_with = "lenient::string")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub address: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub phone_number: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProofOfDamage {
    #[serde(rename = "type", deserialize_with = "lenient::string")]
    pub kind: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub description: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub validity: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub file_name: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub link: Option<String>,
}

impl ProofOfDamage {
    pub fn document_reference(&self) -> DocumentReference {
        DocumentReference::from_parts(self.file_name.as_deref(), self.link.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Witness {
    #[serde(deserialize_with = "lenient::string")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub statement: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VendorEstimate {
    #[serde(deserialize_with = "lenient::string")]
    pub vendor_name: Option<String>,
    pub total_cost: Value,
    /// Usually a list of `"work - cost"` strings.
    pub scope_of_work: Value,
}
