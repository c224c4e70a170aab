// src/bin/api_server.rs

use bookstore_api::infra::{logging, Config};
use bookstore_api::storage;
use bookstore_api::transport;
use bookstore_api::BookService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();

    let config = Config::from_env()?;
    tracing::info!(
        backend = ?config.backend,
        database_url = config.redacted_database_url().as_deref().unwrap_or("-"),
        "starting bookstore API"
    );

    // --- Store Initialization ---
    let store = storage::open(&config).await?;
    let books = BookService::new(store);
    match books.count().await {
        Ok(n) => tracing::info!(books = n, "store ready"),
        Err(e) => tracing::warn!(error = %e, "store opened but count failed"),
    }

    // --- API Server Initialization ---
    let app = transport::http::create_app(transport::http::AppState::new(books));
    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("API server listening on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "failed to listen for shutdown signal");
                return;
            }
            tracing::info!("shutdown signal received");
        })
        .await?;

    tracing::info!("graceful shutdown complete");
    Ok(())
}
