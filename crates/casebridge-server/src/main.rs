use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "casebridge",
    about = "Sync product-management records with FogBugz cases",
    version
)]
struct Cli {
    /// Path to the integration config file
    #[arg(long, env = "CASEBRIDGE_CONFIG", default_value = "casebridge.yml")]
    config: PathBuf,

    /// Port to listen on
    #[arg(long, env = "CASEBRIDGE_PORT", default_value_t = 3141)]
    port: u16,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("casebridge=info,tower_http=info")
            }),
        )
        .init();

    let cli = Cli::parse();
    let config = casebridge_core::config::IntegrationConfig::load(&cli.config)?;
    casebridge_server::serve(config, cli.port).await
}
