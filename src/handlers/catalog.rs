use axum::extract::{Path, State};
use axum::response::Json;

use crate::database::models::{CategoryNode, Product};
use crate::error::ApiError;
use crate::services::catalog;
use crate::state::AppState;

/// GET /products - every product, full result set.
pub async fn products_list(State(state): State<AppState>) -> Result<Json<Vec<Product>>, ApiError> {
    Ok(Json(catalog::all_products(&state.pool).await?))
}

/// GET /products/:id - products belonging to a category.
pub async fn products_by_category(
    State(state): State<AppState>,
    Path(category_id): Path<i64>,
) -> Result<Json<Vec<Product>>, ApiError> {
    Ok(Json(catalog::products_in_category(&state.pool, category_id).await?))
}

/// GET /product/:id - one product with its derived category list. 404
/// when the id does not exist.
pub async fn product_get(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Product>, ApiError> {
    Ok(Json(catalog::product(&state.pool, id).await?))
}

/// GET /categories - top-level categories with their direct children.
pub async fn categories_list(
    State(state): State<AppState>,
) -> Result<Json<Vec<CategoryNode>>, ApiError> {
    Ok(Json(catalog::category_tree(&state.pool).await?))
}

/// GET /categories/:id - resolve a category id to its name.
pub async fn category_name(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<String>, ApiError> {
    Ok(Json(catalog::category_name(&state.pool, id).await?))
}
