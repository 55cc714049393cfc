//! GCS Demo - interactive console for the Cloud Storage XML API

use std::path::Path;

use clap::Parser;
use gcs_cli::{menu, project, Prompter};
use gcs_client::{Config, XmlClient, DEFAULT_SERVICE_ROOT};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "gcs-demo")]
#[command(about = "Interactive console demo for the Google Cloud Storage XML API")]
#[command(version)]
struct Args {
    /// Cloud Storage project id (prompted for and remembered when omitted)
    #[arg(short, long, env = "GCS_PROJECT_ID")]
    project_id: Option<String>,

    /// OAuth2 access token sent as a Bearer credential
    #[arg(short = 't', long, env = "GCS_ACCESS_TOKEN")]
    access_token: Option<String>,

    /// Service hostname buckets are addressed under
    #[arg(long, default_value = DEFAULT_SERVICE_ROOT, env = "GCS_SERVICE_ROOT")]
    service_root: String,

    /// Enable debug logging
    #[arg(short, long, env = "GCS_VERBOSE")]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Parse arguments
    let args = Args::parse();

    // Setup logging
    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| format!("gcs_cli={},gcs_client={}", log_level, log_level).into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    if args.access_token.is_none() {
        tracing::warn!("No access token configured; requests are sent unauthenticated.");
    }

    let mut prompter = Prompter::stdio();
    let project_id = project::resolve_project_id(Path::new("."), args.project_id, &mut prompter)?;
    tracing::debug!("Using project {}", project_id);

    // Build configuration
    let mut config = Config::new(project_id).with_service_root(args.service_root);
    if let Some(token) = args.access_token {
        config = config.with_token(token);
    }
    let client = XmlClient::new(config)?;

    menu::run(&client, &client.config().cors_defaults, &mut prompter).await
}
