//! Issuebrief entry point.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use issuebrief::infrastructure::{config::ConfigLoader, logging};
use issuebrief::web::WebServer;

/// Executive summary generator for Linear issues.
#[derive(Debug, Parser)]
#[command(name = "issuebrief", version, about)]
struct Cli {
    /// Path to a YAML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Host to bind to (overrides configuration).
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides configuration).
    #[arg(long, short)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ConfigLoader::load_from_file(path)?,
        None => ConfigLoader::load()?,
    };
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    logging::init(&config.logging);

    let server = WebServer::new(config);
    server
        .serve_with_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("shutdown signal received");
        })
        .await
        .map_err(|e| anyhow::anyhow!("server error: {e}"))?;

    Ok(())
}
