//! # Conversion Gateway Application
//!
//! Binary that wires together all the components:
//! - Load configuration from environment
//! - Initialize the upstream client and response cache adapters
//! - Create the conversion service
//! - Start the HTTP server

mod config;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use converter_cache::MemoryCache;
use converter_hex::{ConversionService, inbound::HttpServer};
use converter_upstream::FrankfurterClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,converter_app=debug,converter_hex=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = config::Config::from_env()?;

    tracing::info!("Starting conversion gateway on port {}", config.port);
    tracing::info!("Forwarding to upstream at {}", config.upstream_base_url);

    // Build the adapters
    let provider = FrankfurterClient::new(&config.upstream_base_url)?;
    let cache = MemoryCache::new();

    // Create the conversion service
    let service = ConversionService::new(provider, cache);

    // Create and run the HTTP server
    let server = HttpServer::new(service);
    let addr = format!("0.0.0.0:{}", config.port);

    server.run(&addr).await?;

    Ok(())
}
