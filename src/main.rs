//! Catalog Server - HTTP REST API for product catalog management
//!
//! This binary provides an HTTP server exposing product CRUD, listing and
//! category stats endpoints with API key authentication on mutations.

use server::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = ServerConfig::load()?;

    // Start server
    server::start_server(config).await?;

    Ok(())
}
