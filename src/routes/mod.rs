//! API route handlers
//!
//! This module contains all HTTP endpoint implementations for the catalog
//! server. Routes are organized by functionality:
//!
//! - `health`: Health and readiness checks
//! - `products`: Product CRUD, listing/search and category stats

pub mod health;
pub mod products;

use crate::error::{ServerError, ServerResult};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

/// API version and base info
///
/// Root endpoint (GET /), requires no authentication.
pub async fn api_info() -> ServerResult<impl IntoResponse> {
    Ok(Json(json!({
        "name": "Catalog Server",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": [
            "/api/products",
            "/api/products/{id}",
            "/api/products/stats/count",
            "/health",
            "/ready"
        ]
    })))
}

/// 404 Not Found handler for undefined routes.
pub async fn not_found() -> ServerError {
    ServerError::NotFound("Rota não encontrada".to_string())
}
