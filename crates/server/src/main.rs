use std::path::Path;
use std::sync::Arc;

use clap::Parser;
use tracing::info;

use medway_server::api::{AppState, router};
use medway_server::auth::TokenCodec;
use medway_server::config::MedwayConfig;
use medway_server::seed;
use medway_store::DocumentStore;
use medway_store_memory::MemoryDocumentStore;

/// Medway marketplace HTTP server.
#[derive(Parser, Debug)]
#[command(name = "medway-server", about = "Standalone HTTP server for Medway")]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "medway.toml")]
    config: String,

    /// Override the bind host.
    #[arg(long)]
    host: Option<String>,

    /// Override the bind port.
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load configuration from TOML file, or use defaults if the file does
    // not exist.
    let config: MedwayConfig = if Path::new(&cli.config).exists() {
        let contents = std::fs::read_to_string(&cli.config)?;
        toml::from_str(&contents)?
    } else {
        toml::from_str("")?
    };

    medway_server::telemetry::init();

    if !Path::new(&cli.config).exists() {
        info!(path = %cli.config, "config file not found, using defaults");
    }

    let store: Arc<dyn DocumentStore> = Arc::new(MemoryDocumentStore::new());
    seed::run(&store, &config.seed).await?;

    let codec = Arc::new(TokenCodec::new(
        &config.auth.resolve_secret(),
        config.auth.token_ttl_seconds,
    ));

    let state = AppState {
        store,
        codec,
        base_path: config.server.base_path.clone(),
    };
    let app = router(state);

    // Resolve the bind address (CLI overrides take precedence).
    let host = cli.host.unwrap_or(config.server.host);
    let port = cli.port.unwrap_or(config.server.port);
    let addr = format!("{host}:{port}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(address = %addr, "medway-server listening");

    axum::serve(listener, app).await?;

    info!("medway-server shut down");
    Ok(())
}
