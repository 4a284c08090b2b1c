//! claimdesk: submit insurance claims and review their AI risk reports.
//!
//! Set CLAIMS_API_ENDPOINT (or API_ENDPOINT) and CLAIMS_ID_TOKEN. The token is sent as-is in
//! the Authorization header unless CLAIMS_AUTH_SCHEME=bearer.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use claimdesk_api_client::{ApiClient, ClaimsApi};
use claimdesk_cli::{format_claims_table, format_notification, format_report, init_tracing};
use claimdesk_core::{ClaimFile, ClientConfig, ProcessingStatus};
use claimdesk_workflow::{
    ClaimDetailView, ClaimsListView, PollerConfig, Route, SubmissionController, SubmitOutcome,
};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "claimdesk", about = "Insurance claim submission and review CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum ListFormat {
    Table,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
enum ReportFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload claim documents and start processing
    Submit {
        /// Claim ID (5-20 letters, numbers or dashes)
        claim_id: String,
        /// Files to upload
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Return once processing has started instead of waiting for the result
        #[arg(long)]
        no_wait: bool,
    },
    /// Query the processing status of a claim once
    Status {
        claim_id: String,
    },
    /// List submitted claims
    List {
        #[arg(long, value_enum, default_value = "table")]
        format: ListFormat,
    },
    /// Show the risk report of a claim
    Report {
        claim_id: String,
        #[arg(long, value_enum, default_value = "text")]
        format: ReportFormat,
    },
    /// Get a signed link to a stored claim document
    ViewFile {
        claim_id: String,
        file_name: String,
    },
    /// Open a dashboard path, e.g. /workflow/review/CLAIM-001
    Open {
        path: String,
    },
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize response")?;
    println!("{}", out);
    Ok(())
}

async fn submit(
    api: Arc<dyn ClaimsApi>,
    poller_config: PollerConfig,
    claim_id: String,
    paths: Vec<PathBuf>,
    no_wait: bool,
) -> anyhow::Result<()> {
    let files = paths
        .iter()
        .map(|path| {
            ClaimFile::from_path(path).with_context(|| format!("Failed to read {}", path.display()))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let mut controller = SubmissionController::new(api, poller_config);
    controller.set_claim_id(claim_id);
    controller.set_files(files);

    match controller.submit().await {
        SubmitOutcome::Invalid(errors) => {
            for error in errors.iter() {
                eprintln!("{}", error);
            }
            anyhow::bail!("Claim form is invalid");
        }
        SubmitOutcome::Rejected(status) => {
            anyhow::bail!("Claim cannot be submitted while {}", status);
        }
        SubmitOutcome::Failed(e) => {
            for notification in controller.notifications() {
                println!("{}", format_notification(&notification));
            }
            return Err(e).context("Claim submission failed");
        }
        SubmitOutcome::Processing(handle) => {
            tracing::info!(
                claim_id = %handle.claim_id,
                files = handle.uploaded.len(),
                "Processing started"
            );
        }
    }

    for notification in controller.notifications() {
        println!("{}", format_notification(&notification));
    }
    if no_wait {
        return Ok(());
    }

    let status = controller.wait_for_terminal().await;
    for notification in controller.notifications() {
        println!("{}", format_notification(&notification));
    }
    if status == ProcessingStatus::Failed {
        anyhow::bail!("Claim processing failed");
    }
    Ok(())
}

async fn show_report(api: &dyn ClaimsApi, claim_id: &str, format: ReportFormat) -> anyhow::Result<()> {
    let view = ClaimDetailView::load(api, claim_id).await;
    match format {
        ReportFormat::Json => match view.report() {
            Some(report) => print_json(report)?,
            None => anyhow::bail!("Report for claim {} is not available", claim_id),
        },
        ReportFormat::Text => print!("{}", format_report(&view)),
    }
    Ok(())
}

async fn show_list(api: &dyn ClaimsApi, format: ListFormat) -> anyhow::Result<()> {
    let view = ClaimsListView::load(api).await;
    match format {
        ListFormat::Json => print_json(&view.claims())?,
        ListFormat::Table => print!("{}", format_claims_table(&view.header(), view.claims())),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = ClientConfig::from_env()
        .context("Failed to load configuration. Set CLAIMS_ID_TOKEN and CLAIMS_API_ENDPOINT")?;
    let client = ApiClient::from_config(&config).context("Failed to create API client")?;
    let api: Arc<dyn ClaimsApi> = Arc::new(client);

    match cli.command {
        Commands::Submit {
            claim_id,
            files,
            no_wait,
        } => {
            submit(
                api,
                PollerConfig::from_config(&config),
                claim_id,
                files,
                no_wait,
            )
            .await?;
        }
        Commands::Status { claim_id } => {
            let response = api.claim_status(&claim_id).await?;
            print_json(&response)?;
        }
        Commands::List { format } => show_list(api.as_ref(), format).await?,
        Commands::Report { claim_id, format } => {
            show_report(api.as_ref(), &claim_id, format).await?
        }
        Commands::ViewFile {
            claim_id,
            file_name,
        } => {
            let link = api.document_link(&claim_id, &file_name).await?;
            print_json(&link)?;
        }
        Commands::Open { path } => match Route::parse(&path) {
            Route::Home => println!("claimdesk: use `submit`, `list` or `report <claim-id>`"),
            Route::CreateClaim => println!("Use `claimdesk submit <claim-id> <files>...`"),
            Route::ReviewClaims => show_list(api.as_ref(), ListFormat::Table).await?,
            Route::ReviewDetail { claim_id } => {
                show_report(api.as_ref(), &claim_id, ReportFormat::Text).await?
            }
            Route::NotFound { path } => anyhow::bail!("Page not found: {}", path),
        },
    }

    Ok(())
}
