use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use winlose_mock::connector::api::ROUTES;
use winlose_mock::{build_router, ConnectionSettings, Container, ContainerConfig, OperationTimeouts};

#[derive(Parser)]
#[command(name = "winlose-mock")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long)]
    verbose: bool,

    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    #[arg(short, long, env = "PORT", default_value_t = 8080)]
    port: u16,

    /// Env-file consulted for MONGO_URI when the variable is unset
    #[arg(long, default_value = ".env")]
    env_file: PathBuf,

    /// JSON config file consulted last for the connection string
    #[arg(long, default_value = "config.json")]
    config_file: PathBuf,

    #[arg(long, env = "MONGO_DB")]
    database: Option<String>,

    #[arg(long, env = "MONGO_COLLECTION")]
    collection: Option<String>,

    /// Serve from an empty in-memory store instead of MongoDB
    #[arg(long)]
    memory_storage: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let config = ContainerConfig {
        connection: ConnectionSettings {
            env_file: cli.env_file,
            config_file: cli.config_file,
            database: cli.database,
            collection: cli.collection,
            ..ConnectionSettings::default()
        },
        timeouts: OperationTimeouts::default(),
        memory_storage: cli.memory_storage,
    };

    let container = Arc::new(Container::new(config));
    let app = build_router(Arc::clone(&container));

    let addr = format!("{}:{}", cli.host, cli.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    info!("Mock server started at {}", addr);
    for (method, path) in ROUTES {
        info!("Endpoint: {} http://localhost:{}{}", method, cli.port, path);
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    container.shutdown().await;
    info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
