mod cli;

use axum::Router;
use backend::{AppState, CatalogStore, ChatRelay, GeminiRelay, StaticCatalog};
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dotenv = dotenvy::dotenv();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();
    if let Err(e) = dotenv {
        tracing::warn!(".env file not loaded ({}), relying on environment variables", e);
    }

    let cli = cli::Cli::parse();

    let catalog: Arc<dyn CatalogStore> = match &cli.catalog_path {
        Some(path) => {
            tracing::info!("Loading catalog from {}", path.display());
            Arc::new(StaticCatalog::load(path)?) as Arc<dyn CatalogStore>
        }
        None => Arc::new(StaticCatalog::seed()) as Arc<dyn CatalogStore>,
    };

    let relay: Option<Arc<dyn ChatRelay>> = match cli.relay_settings() {
        Some(settings) => {
            tracing::info!("GEMINI_API_KEY loaded, chat relay enabled ({})", settings.model);
            Some(Arc::new(GeminiRelay::new(settings)?) as Arc<dyn ChatRelay>)
        }
        None => {
            tracing::warn!("GEMINI_API_KEY is not set, /chat will answer 503");
            None
        }
    };

    let addr = SocketAddr::new(cli.host, cli.port);
    tracing::info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    let router = backend::init(Router::new(), AppState::new(catalog, relay));
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {:?}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
