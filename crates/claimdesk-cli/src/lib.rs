use std::fmt;

use claimdesk_core::{ClaimReport, ClaimSummary, DocumentReference};
use claimdesk_workflow::report_view;
use claimdesk_workflow::{ClaimDetailView, Notification};

/// Truncate a string to max_len characters, appending "..." if truncated.
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Initialize tracing for CLI binaries.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

pub fn format_claims_table(header: &str, claims: &[ClaimSummary]) -> String {
    ClaimsTable { header, claims }.to_string()
}

pub fn format_notification(notification: &Notification) -> String {
    match &notification.action {
        Some(action) => format!(
            "[{}] {} ({}: {})",
            notification.id.as_str(),
            notification.content,
            action.label,
            action.href
        ),
        None => format!("[{}] {}", notification.id.as_str(), notification.content),
    }
}

/// Plain-text rendering of the claim detail page.
pub fn format_report(view: &ClaimDetailView) -> String {
    match view.report() {
        Some(report) => ReportText { view, report }.to_string(),
        None => "Loading...\n".to_string(),
    }
}

struct ClaimsTable<'a> {
    header: &'a str,
    claims: &'a [ClaimSummary],
}

impl fmt::Display for ClaimsTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\n=== {} ===\n", self.header)?;
        if self.claims.is_empty() {
            return writeln!(f, "No resources");
        }

        writeln!(
            f,
            "{:<20} {:<12} {:<14} {:<50}",
            "Claim ID", "Claim Date", "Incident Date", "Description"
        )?;
        writeln!(f, "{}", "-".repeat(98))?;
        for claim in self.claims {
            writeln!(
                f,
                "{:<20} {:<12} {:<14} {:<50}",
                truncate_string(&claim.claim_id, 20),
                truncate_string(claim.date_filed.as_deref().unwrap_or_default(), 12),
                truncate_string(claim.incident_date.as_deref().unwrap_or_default(), 14),
                truncate_string(claim.description.as_deref().unwrap_or_default(), 50),
            )?;
        }
        Ok(())
    }
}

struct ReportText<'a> {
    view: &'a ClaimDetailView,
    report: &'a ClaimReport,
}

impl fmt::Display for ReportText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.report;
        writeln!(
            f,
            "ID: {}",
            report.claim_id.as_deref().unwrap_or(self.view.claim_id())
        )?;
        writeln!(
            f,
            "Policy No: {}\t|\tClaim Date: {}",
            report.policy_no.as_deref().unwrap_or_default(),
            report.claim_info.claim_date.as_deref().unwrap_or_default()
        )?;
        if let Some(alert) = report_view::fraud_alert(report) {
            for line in &alert.lines {
                writeln!(f, "WARNING: {}", line)?;
            }
        }

        for section in report_view::sections(report) {
            writeln!(f, "\n## {}", section.title)?;
            for (label, value) in &section.fields {
                writeln!(f, "{}: {}", label, value)?;
            }
            if section.title == "AI Risk Assessment" {
                self.write_inconsistencies(f)?;
            }
        }

        self.write_documents(f)?;
        self.write_vendor_estimates(f)
    }
}

impl ReportText<'_> {
    fn write_inconsistencies(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(alert) = report_view::inconsistencies_alert(self.report) {
            writeln!(f, "{}:", alert.header.unwrap_or_default())?;
            for line in alert.lines {
                writeln!(f, "  {}", line)?;
            }
        }
        Ok(())
    }

    fn write_documents(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\n## Proofs of Damage")?;
        writeln!(
            f,
            "Customer Call Records: {}",
            self.report.call_recordings_summary.as_deref().unwrap_or_default()
        )?;
        let rows = self.view.documents();
        if rows.is_empty() {
            return Ok(());
        }
        writeln!(
            f,
            "{:<12} {:<50} {:<10} {}",
            "Type", "Description", "Validity", "Link"
        )?;
        for row in rows {
            let link = match &row.reference {
                DocumentReference::StoredFile { name } => format!("view-file {}", name),
                DocumentReference::ExternalLink { url } => url.clone(),
                DocumentReference::Unavailable => "N/A".to_string(),
            };
            writeln!(
                f,
                "{:<12} {:<50} {:<10} {}",
                truncate_string(&row.kind, 12),
                truncate_string(&row.description, 50),
                truncate_string(&row.validity, 10),
                link
            )?;
        }
        Ok(())
    }

    fn write_vendor_estimates(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.report.vendor_estimates.is_empty() {
            return Ok(());
        }
        writeln!(f, "\n## Cost Estimation by Vendor")?;
        for estimate in &self.report.vendor_estimates {
            writeln!(
                f,
                "{} (total: {})",
                estimate.vendor_name.as_deref().unwrap_or_default(),
                report_view::display_value(&estimate.total_cost)
            )?;
            match report_view::scope_of_work(&estimate.scope_of_work) {
                Some(items) => {
                    for (work, cost) in items {
                        writeln!(f, "  - {} ${}", work, cost)?;
                    }
                }
                None => writeln!(f, "  N/A")?,
            }
        }
        Ok(())
    }
}
