//! Display formatting for a claim report: badges, alerts and key/value sections.

use claimdesk_core::ClaimReport;
use serde::Serialize;
use serde_json::Value;

const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeColor {
    Red,
    Grey,
    Green,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Badge {
    pub color: BadgeColor,
    pub label: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alert {
    pub kind: AlertKind,
    pub header: Option<String>,
    pub lines: Vec<String>,
}

/// A titled group of label/value pairs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub title: &'static str,
    pub fields: Vec<(&'static str, String)>,
}

/// Formats a number the way JSON would print it: `7`, not `7.0`.
fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

fn text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

/// Risk score badge. A missing or zero score shows as `N/A/10`.
pub fn risk_badge(score: Option<f64>) -> Badge {
    let color = match score {
        Some(s) if s >= 8.0 => BadgeColor::Red,
        Some(s) if s >= 4.0 => BadgeColor::Grey,
        _ => BadgeColor::Green,
    };
    let label = match score {
        Some(s) if s != 0.0 => format!("{}/10", format_number(s)),
        _ => format!("{}/10", NOT_AVAILABLE),
    };
    Badge { color, label }
}

pub fn action_badge(report: &ClaimReport) -> Badge {
    let action = report.recommended_action.as_deref().unwrap_or_default();
    let color = if action.starts_with("DENY") {
        BadgeColor::Red
    } else if action.starts_with("INVESTIGATE") {
        BadgeColor::Grey
    } else {
        BadgeColor::Green
    };
    let label = report
        .recommended_action_code()
        .unwrap_or(NOT_AVAILABLE)
        .to_string();
    Badge { color, label }
}

pub fn fraud_alert(report: &ClaimReport) -> Option<Alert> {
    if !report.fraud_warning {
        return None;
    }
    Some(Alert {
        kind: AlertKind::Warning,
        header: None,
        lines: vec![text(&report.suspicion)],
    })
}

pub fn inconsistencies_alert(report: &ClaimReport) -> Option<Alert> {
    if report.inconsistencies.is_empty() {
        return None;
    }
    Some(Alert {
        kind: AlertKind::Error,
        header: Some("Inconsistencies Found".to_string()),
        lines: report
            .inconsistencies
            .iter()
            .map(|item| format!("• {}", item))
            .collect(),
    })
}

/// Render a polymorphic report value as text.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => NOT_AVAILABLE.to_string(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

/// Falsy values (null, empty string, zero, false) show as N/A.
fn value_or_na(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => NOT_AVAILABLE.to_string(),
        Some(Value::String(s)) if s.is_empty() => NOT_AVAILABLE.to_string(),
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => NOT_AVAILABLE.to_string(),
        Some(other) => display_value(other),
    }
}

fn truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PropertyDetails {
    Structured {
        damaged_value: String,
        previous_claim: bool,
        repair_cost: String,
    },
    Text {
        text: String,
    },
}

pub fn property_details(additional_info: &Value) -> PropertyDetails {
    match additional_info {
        Value::Object(map) => PropertyDetails::Structured {
            damaged_value: value_or_na(map.get("damagedValue")),
            previous_claim: truthy(map.get("previousClaim")),
            repair_cost: value_or_na(map.get("repairCost")),
        },
        Value::Null => PropertyDetails::Text {
            text: String::new(),
        },
        other => PropertyDetails::Text {
            text: display_value(other),
        },
    }
}

/// Split each scope-of-work entry on `" - "` into (work, cost). `None` when the value is
/// not a list.
pub fn scope_of_work(value: &Value) -> Option<Vec<(String, String)>> {
    let items = value.as_array()?;
    Some(
        items
            .iter()
            .map(|item| {
                let entry = match item {
                    Value::String(s) => s.clone(),
                    other => display_value(other),
                };
                let mut parts = entry.split(" - ");
                let work = parts.next().unwrap_or_default().to_string();
                let cost = parts
                    .next()
                    .filter(|c| !c.is_empty())
                    .unwrap_or("0")
                    .to_string();
                (work, cost)
            })
            .collect(),
    )
}

/// Key/value sections of the detail page, in display order.
pub fn sections(report: &ClaimReport) -> Vec<Section> {
    let mut sections = Vec::new();

    sections.push(Section {
        title: "AI Risk Assessment",
        fields: vec![
            ("Risk Score", risk_badge(report.risk_score).label),
            ("Recommended Action", action_badge(report).label),
            (
                "Fraud Warning",
                if report.fraud_warning { "YES" } else { "NO" }.to_string(),
            ),
            ("Observations", text(&report.observations)),
            ("Insights", text(&report.insights)),
        ],
    });

    sections.push(Section {
        title: "Claim Info",
        fields: vec![
            ("Claim date", text(&report.claim_info.claim_date)),
            ("Incident date", text(&report.incident_info.date)),
            (
                "Estimated Value of Damage",
                display_value(&report.claim_info.estimated_damage_value),
            ),
            (
                "Estimated Cost of Repair",
                display_value(&report.claim_info.estimated_repair_cost),
            ),
            ("Agent Contact", text(&report.policy_info.contact)),
            ("Insurance Company", text(&report.policy_info.insurance_company)),
        ],
    });

    let mut property = vec![
        ("Address", text(&report.property_info.address)),
        ("Type", text(&report.property_info.kind)),
    ];
    match property_details(&report.property_info.additional_info) {
        PropertyDetails::Structured {
            damaged_value,
            previous_claim,
            repair_cost,
        } => {
            property.push(("Damaged Value", damaged_value));
            property.push((
                "Previous Claim",
                if previous_claim { "Yes" } else { "No" }.to_string(),
            ));
            property.push(("Repair Cost", repair_cost));
        }
        PropertyDetails::Text { text } => property.push(("Additional Info", text)),
    }
    property.push((
        "Description of Damage",
        text(&report.description_of_damage),
    ));
    sections.push(Section {
        title: "Claimed Property",
        fields: property,
    });

    sections.push(Section {
        title: "Insurance Policy",
        fields: vec![
            ("Policy Holder Name", text(&report.policy_holder_details.name)),
            ("Policy Address", text(&report.policy_holder_details.address)),
            ("Policy No", text(&report.policy_no)),
            ("Agent", text(&report.policy_info.agent_name)),
            ("Contact", text(&report.policy_info.contact)),
            ("Insurance Company", text(&report.policy_info.insurance_company)),
        ],
    });

    sections.push(Section {
        title: "Witness",
        fields: vec![
            ("Name", text(&report.witness.name)),
            ("Contact", text(&report.policy_holder_details.phone_number)),
            ("Relationship", "Witness".to_string()),
            ("Statement", text(&report.witness.statement)),
        ],
    });

    sections
}
