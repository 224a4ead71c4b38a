//! Ecom Gateway - Main Entry Point
//!
//! Wires configuration, the three backend client adapters, the aggregation
//! facade, and the HTTP router together, then serves until SIGTERM/SIGINT.

use std::sync::Arc;

use tracing::info;

use ecom_gateway::config::Config;
use ecom_gateway::grpc::{OrderClient, ProductClient, UserClient};
use ecom_gateway::processor::ProcessorService;
use ecom_gateway::{http, observability, shutdown};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Refuse to start on any missing or invalid configuration
    let config = Config::from_env()?;
    observability::init_logging(config.env);

    info!("starting ecom gateway");

    let user = UserClient::new(&config.user)?;
    let order = OrderClient::new(&config.order)?;
    let product = ProductClient::new(&config.product)?;

    let processor = Arc::new(ProcessorService::new(
        Arc::new(user),
        Arc::new(order),
        Arc::new(product),
    ));

    let app = http::router(processor, config.http_timeout);

    let listener = tokio::net::TcpListener::bind(config.http_address).await?;
    info!(address = %config.http_address, "HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown::wait_for_signal())
        .await?;

    info!("server stopped");
    Ok(())
}
