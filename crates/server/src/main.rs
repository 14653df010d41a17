//! kaggle-server: MCP and HTTP front-ends over the Kaggle tool catalogue.
//!
//! One binary, two transports: `stdio` speaks MCP (JSON-RPC over
//! stdin/stdout) for agent hosts, `http` exposes the same tools as a REST
//! surface. Both run the identical registry and dispatch path.

mod api;
mod router;
mod state;

use std::sync::Arc;

use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand};
use tokio::sync::RwLock;
use tracing::info;

use kaggle_core::{Config, KaggleCredentials};
use kaggle_mcp::{McpServer, StdioTransport};
use kaggle_tools::{
    default_registry, validate_credentials, KaggleBackend, KaggleCli, ProbeStatus, ToolRegistry,
};

// ── CLI ─────────────────────────────────────────────────────────────

/// MCP server exposing Kaggle search, download, and submission tools.
#[derive(Parser, Debug)]
#[command(name = "kaggle-server", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve MCP over stdin/stdout (default).
    Stdio,
    /// Serve the HTTP adapter.
    Http {
        /// Bind host. Falls back to HOST from the environment.
        #[arg(long)]
        host: Option<String>,

        /// Bind port. Falls back to PORT from the environment.
        #[arg(long)]
        port: Option<u16>,
    },
}

// ── Startup ─────────────────────────────────────────────────────────

/// Kick off the advisory credential probe without blocking startup.
/// The outcome lands in the shared slot and is reported by `/health`.
fn spawn_probe(slot: Arc<RwLock<ProbeStatus>>, credentials: KaggleCredentials, api_base: String) {
    tokio::spawn(async move {
        let status = validate_credentials(&credentials, &api_base).await;
        info!(status = status.as_str(), "Credential probe finished");
        *slot.write().await = status;
    });
}

async fn run_stdio(registry: ToolRegistry) -> anyhow::Result<()> {
    let mut server = McpServer::new(registry);
    let mut transport = StdioTransport::new();
    server.run(&mut transport).await?;
    Ok(())
}

async fn run_http(
    registry: ToolRegistry,
    config: &Config,
    host: Option<String>,
    port: Option<u16>,
    probe: Arc<RwLock<ProbeStatus>>,
) -> anyhow::Result<()> {
    let host = host.unwrap_or_else(|| config.server.host.clone());
    let port = port.unwrap_or(config.server.port);

    let state = Arc::new(state::AppState {
        registry: Arc::new(registry),
        environment: config.environment.clone(),
        started_at: Utc::now(),
        probe,
    });

    let app = router::build_router(state);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!(addr = %addr, "HTTP server listening");
    axum::serve(listener, app).await?;

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout carries the MCP stream in stdio mode; all diagnostics go to
    // stderr on both transports.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    kaggle_core::config::load_dotenv();
    let config = Config::from_env();
    config.validate().context("Invalid configuration")?;
    config.log_summary();

    let backend: Arc<dyn KaggleBackend> = Arc::new(KaggleCli::from_config(&config.kaggle));
    let registry = default_registry(backend).context("Failed to build tool registry")?;

    let probe = Arc::new(RwLock::new(ProbeStatus::Unknown));
    spawn_probe(
        probe.clone(),
        config.kaggle.credentials.clone(),
        config.kaggle.api_base.clone(),
    );

    match cli.command.unwrap_or(Command::Stdio) {
        Command::Stdio => run_stdio(registry).await,
        Command::Http { host, port } => run_http(registry, &config, host, port, probe).await,
    }
}
