use crate::error::{ServerError, ServerResult};
use crate::query::{self, ProductQuery};
use crate::state::ServerState;
use crate::store::{NewProduct, ProductPatch};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

/// Request to create a product.
///
/// The required fields are optional here so presence is checked by the
/// handler instead of failing deserialization with a generic body error.
#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub price: Option<f64>,

    #[serde(default)]
    pub category: Option<String>,

    #[serde(default, rename = "inStock")]
    pub in_stock: Option<bool>,
}

impl CreateProductRequest {
    /// `name`, `price` and `category` must be present and non-empty; a zero
    /// price counts as missing.
    fn into_new_product(self) -> ServerResult<NewProduct> {
        let name = self.name.filter(|n| !n.is_empty());
        let category = self.category.filter(|c| !c.is_empty());
        let price = self.price.filter(|&p| p != 0.0);

        match (name, price, category) {
            (Some(name), Some(price), Some(category)) => Ok(NewProduct {
                name,
                description: self.description,
                price,
                category,
                in_stock: self.in_stock,
            }),
            _ => Err(ServerError::Validation(
                "Campos obrigatórios: name, price, category".to_string(),
            )),
        }
    }
}

/// List products with optional category filter, name search and pagination.
pub async fn list_products(
    State(state): State<Arc<ServerState>>,
    Query(params): Query<ProductQuery>,
) -> ServerResult<impl IntoResponse> {
    let snapshot = state.store.list()?;
    Ok(Json(query::apply(snapshot, &params)))
}

/// Fetch a single product by id.
pub async fn get_product(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
) -> ServerResult<impl IntoResponse> {
    Ok(Json(state.store.get(&id)?))
}

/// Create a product (authenticated).
pub async fn create_product(
    State(state): State<Arc<ServerState>>,
    Json(request): Json<CreateProductRequest>,
) -> ServerResult<impl IntoResponse> {
    let product = state.store.insert(request.into_new_product()?)?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Merge the supplied fields into an existing product (authenticated).
/// No field-level validation is re-applied on update.
pub async fn update_product(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
    Json(patch): Json<ProductPatch>,
) -> ServerResult<impl IntoResponse> {
    Ok(Json(state.store.update(&id, patch)?))
}

/// Delete a product (authenticated).
pub async fn delete_product(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
) -> ServerResult<impl IntoResponse> {
    state.store.remove(&id)?;
    Ok(Json(json!({ "message": "Produto excluído com sucesso" })))
}

/// Per-category record counts over the full collection, unfiltered and
/// unpaginated.
pub async fn category_stats(
    State(state): State<Arc<ServerState>>,
) -> ServerResult<impl IntoResponse> {
    Ok(Json(state.store.category_counts()?))
}
