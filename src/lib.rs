//! Catalog Server - HTTP REST API for product catalog management
//!
//! This crate provides a small HTTP server exposing CRUD operations over a
//! single product collection. It supports:
//!
//! - **Listing**: Category filter, case-insensitive name search, pagination
//! - **CRUD**: Create, fetch, partial update and delete of products
//! - **Stats**: Per-category record counts
//! - **Authentication**: Shared-secret API key on mutating endpoints
//! - **Configuration**: Environment variable and file-based configuration
//! - **Error Handling**: Uniform JSON error responses
//! - **Graceful Shutdown**: Proper signal handling for production deployments
//!
//! The collection is volatile, process-lifetime storage: nothing survives a
//! restart.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use server::ServerConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::load()?;
//!     server::start_server(config).await?;
//!     Ok(())
//! }
//! ```
//!
//! # API Endpoints
//!
//! ## Public Endpoints (No Authentication)
//!
//! - `GET /` - API information
//! - `GET /health` - Liveness probe
//! - `GET /ready` - Readiness probe
//! - `GET /api/products` - List products (`category`, `search`, `page`, `limit`)
//! - `GET /api/products/{id}` - Get product by ID
//! - `GET /api/products/stats/count` - Category counts
//!
//! ## Protected Endpoints (API Key Required)
//!
//! - `POST /api/products` - Create product
//! - `PUT /api/products/{id}` - Update product (shallow merge)
//! - `DELETE /api/products/{id}` - Delete product

pub mod config;
pub mod error;
pub mod middleware;
pub mod query;
pub mod routes;
pub mod server;
pub mod state;
pub mod store;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use server::{build_router, start_server};
pub use state::ServerState;
pub use store::{Product, ProductStore};
