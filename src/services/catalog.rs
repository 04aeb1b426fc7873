//! Catalog reads. Pure queries, full result sets, explicit not-found
//! outcomes.

use sqlx::PgPool;

use crate::database::catalog;
use crate::database::models::{CategoryNode, Product};

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("product {0} not found")]
    ProductNotFound(i64),

    #[error("category {0} not found")]
    CategoryNotFound(i64),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

pub async fn all_products(pool: &PgPool) -> Result<Vec<Product>, CatalogError> {
    Ok(catalog::list_products(pool).await?)
}

pub async fn product(pool: &PgPool, id: i64) -> Result<Product, CatalogError> {
    catalog::product_by_id(pool, id)
        .await?
        .ok_or(CatalogError::ProductNotFound(id))
}

pub async fn products_in_category(
    pool: &PgPool,
    category_id: i64,
) -> Result<Vec<Product>, CatalogError> {
    Ok(catalog::products_in_category(pool, category_id).await?)
}

/// Two-level category tree: every parentless category with its immediate
/// children attached. Grandchildren are never walked.
pub async fn category_tree(pool: &PgPool) -> Result<Vec<CategoryNode>, CatalogError> {
    let roots = catalog::top_level_categories(pool).await?;

    let mut tree = Vec::with_capacity(roots.len());
    for root in roots {
        let subcategories = catalog::subcategories(pool, root.id).await?;
        tree.push(CategoryNode {
            id: root.id,
            name: root.name,
            parent_id: root.parent_id,
            subcategories,
        });
    }
    Ok(tree)
}

pub async fn category_name(pool: &PgPool, id: i64) -> Result<String, CatalogError> {
    let category = catalog::category_by_id(pool, id)
        .await?
        .ok_or(CatalogError::CategoryNotFound(id))?;
    Ok(category.name)
}
