use anyhow::{Context, Result};
use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use todo_server::config::{DEFAULT_HOST, DEFAULT_PORT};
use todo_server::{CorsConfig, ServerConfig};

/// In-memory todo API server
#[derive(Parser)]
#[command(name = "todo-server", version)]
struct Cli {
    /// Address to bind
    #[arg(long, default_value = DEFAULT_HOST)]
    host: String,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Allowed CORS origin; repeat for several (defaults to http://localhost:3000)
    #[arg(long = "cors-origin")]
    cors_origins: Vec<String>,

    /// Log verbosity level (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl From<Cli> for ServerConfig {
    fn from(cli: Cli) -> Self {
        let mut cors = CorsConfig::default();
        if !cli.cors_origins.is_empty() {
            cors.allowed_origins = cli.cors_origins;
        }
        Self {
            host: cli.host,
            port: cli.port,
            cors,
        }
    }
}

fn init_tracing(verbose: u8) -> Result<()> {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .context("invalid log filter")?;

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(env_filter)
        .init();
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(%err, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    let config = ServerConfig::from(cli);
    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, origins = ?config.cors.allowed_origins, "listening");

    todo_server::run(listener, &config, shutdown_signal())
        .await
        .context("server error")
}
