use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use lead_capture::config::Config;
use lead_capture::infra::{FileLeadStore, ReqwestLeadEndpoint, SystemClipboard, TracingNotifier};
use lead_capture::logging;
use lead_capture::metrics::LeadMetrics;
use lead_capture::pipeline::{build_url_with_utm, SpamFilter, TimingMeta};
use lead_capture::{LeadSubmissionResult, RawLeadForm, SubmitLeadUseCase, UtmParams};

#[derive(Parser)]
#[command(name = "lead_capture")]
#[command(about = "Capture, filter and deliver marketing-site leads")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize, validate and deliver one lead
    Submit(SubmitArgs),
    /// List leads held in the pending store
    Pending,
    /// Retry delivery of a pending lead
    Retry {
        /// Submission id shown by `pending`
        id: Uuid,
    },
    /// Copy a pending lead to the clipboard
    Copy {
        /// Submission id shown by `pending`
        id: Uuid,
    },
    /// Tag a URL with UTM parameters
    UtmUrl(UtmArgs),
}

#[derive(Args)]
struct SubmitArgs {
    /// Read the raw form as JSON instead of from flags
    #[arg(long)]
    form: Option<PathBuf>,
    #[arg(long, default_value = "")]
    name: String,
    #[arg(long, default_value = "")]
    email: String,
    /// pausalni-obrt, vat-obrt, doo or accountant
    #[arg(long, default_value = "")]
    business_type: String,
    #[arg(long)]
    invoice_volume: Option<String>,
    #[arg(long)]
    message: Option<String>,
    /// guidance-card, contact-form or pricing-cta
    #[arg(long, default_value = "contact-form")]
    source: String,
    #[arg(long, default_value = "", hide = true)]
    honeypot: String,
    /// Landing page URL or query string carrying utm_* parameters
    #[arg(long, default_value = "")]
    page_url: String,
    /// Milliseconds the visitor spent on the form
    #[arg(long)]
    fill_ms: Option<i64>,
}

#[derive(Args)]
struct UtmArgs {
    base_url: String,
    #[arg(long)]
    source: Option<String>,
    #[arg(long)]
    medium: Option<String>,
    #[arg(long)]
    campaign: Option<String>,
    #[arg(long)]
    term: Option<String>,
    #[arg(long)]
    content: Option<String>,
}

impl SubmitArgs {
    fn raw_form(&self) -> Result<RawLeadForm> {
        if let Some(path) = &self.form {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("reading form file {}", path.display()))?;
            return serde_json::from_str(&content)
                .with_context(|| format!("parsing form file {}", path.display()));
        }
        Ok(RawLeadForm {
            name: self.name.clone(),
            email: self.email.clone(),
            business_type: self.business_type.clone(),
            invoice_volume: self.invoice_volume.clone(),
            message: self.message.clone(),
            source: self.source.clone(),
            honeypot: self.honeypot.clone(),
        })
    }

    fn timing(&self) -> TimingMeta {
        match self.fill_ms {
            Some(ms) => TimingMeta::rendered_at(Utc::now() - Duration::milliseconds(ms)),
            None => TimingMeta::unknown(),
        }
    }
}

fn build_use_case(config: &Config) -> SubmitLeadUseCase {
    SubmitLeadUseCase::new(
        Arc::new(ReqwestLeadEndpoint::new()),
        Arc::new(FileLeadStore::new(config.storage.pending_dir.clone())),
        Arc::new(TracingNotifier),
    )
    .with_spam_filter(SpamFilter::with_config(config.spam_filter_config()))
    .with_normalizer(config.normalizer())
}

fn print_result(result: &LeadSubmissionResult) {
    let payload = result.payload();
    match result {
        LeadSubmissionResult::Sent { .. } => {
            println!("✅ Lead {} sent", payload.submission_id());
        }
        LeadSubmissionResult::StoredLocally { .. } => {
            println!("💾 Lead {} saved locally", payload.submission_id());
            println!("   Retry with: lead_capture retry {}", payload.submission_id());
            println!("   Or copy it: lead_capture copy {}", payload.submission_id());
        }
        LeadSubmissionResult::CopiedToClipboard { .. } => {
            println!("📋 Lead {} copied to clipboard", payload.submission_id());
        }
        LeadSubmissionResult::Rejected { .. } => {
            println!("❌ Lead {} rejected", payload.submission_id());
        }
    }
    if let Some(diagnostic) = result.diagnostic() {
        println!("   {}", diagnostic);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let _log_guard = logging::init_logging();
    LeadMetrics::describe();

    let cli = Cli::parse();
    // Re-read on every invocation so endpoint changes apply to the next attempt
    let config = Config::load()?;

    match cli.command {
        Commands::Submit(args) => {
            let raw = args.raw_form()?;
            let use_case = build_use_case(&config);
            let result = use_case
                .capture_lead(&raw, &args.page_url, &args.timing(), &config.submission_config())
                .await;
            print_result(&result);
        }
        Commands::Pending => {
            let use_case = build_use_case(&config);
            let pending = use_case.pending_leads().await?;
            if pending.is_empty() {
                println!("No pending leads");
            }
            for lead in &pending {
                println!(
                    "{}  {}  {} <{}>  {}",
                    lead.submission_id(),
                    lead.submitted_at().to_rfc3339(),
                    lead.name(),
                    lead.email(),
                    lead.source().as_str()
                );
            }
            info!(count = pending.len(), "Listed pending leads");
        }
        Commands::Retry { id } => {
            let use_case = build_use_case(&config);
            let result = use_case.retry_pending(id, &config.submission_config()).await?;
            print_result(&result);
        }
        Commands::Copy { id } => {
            let use_case = build_use_case(&config);
            let result = use_case.copy_pending(id, Arc::new(SystemClipboard)).await?;
            print_result(&result);
        }
        Commands::UtmUrl(args) => {
            let utm = UtmParams {
                source: args.source,
                medium: args.medium,
                campaign: args.campaign,
                term: args.term,
                content: args.content,
            };
            println!("{}", build_url_with_utm(&args.base_url, &utm));
        }
    }

    Ok(())
}
