use sqlx::PgPool;

use super::models::{Category, Product};

pub async fn list_products(pool: &PgPool) -> Result<Vec<Product>, sqlx::Error> {
    sqlx::query_as::<_, Product>(
        "SELECT id, name, price, description, image FROM products ORDER BY id",
    )
    .fetch_all(pool)
    .await
}

/// Single product, enriched with the comma-joined names of its categories.
pub async fn product_by_id(pool: &PgPool, id: i64) -> Result<Option<Product>, sqlx::Error> {
    sqlx::query_as::<_, Product>(
        "SELECT p.id, p.name, p.price, p.description, p.image, \
                string_agg(c.name, ',' ORDER BY c.name) AS categories \
         FROM products p \
         LEFT JOIN product_categories pc ON pc.product_id = p.id \
         LEFT JOIN categories c ON c.id = pc.category_id \
         WHERE p.id = $1 \
         GROUP BY p.id",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn products_in_category(
    pool: &PgPool,
    category_id: i64,
) -> Result<Vec<Product>, sqlx::Error> {
    sqlx::query_as::<_, Product>(
        "SELECT p.id, p.name, p.price, p.description, p.image \
         FROM products p \
         JOIN product_categories pc ON pc.product_id = p.id \
         WHERE pc.category_id = $1 \
         ORDER BY p.id",
    )
    .bind(category_id)
    .fetch_all(pool)
    .await
}

pub async fn top_level_categories(pool: &PgPool) -> Result<Vec<Category>, sqlx::Error> {
    sqlx::query_as::<_, Category>(
        "SELECT id, name, parent_id FROM categories WHERE parent_id IS NULL ORDER BY id",
    )
    .fetch_all(pool)
    .await
}

/// Immediate children of one category. Deeper nesting is never walked.
pub async fn subcategories(pool: &PgPool, parent_id: i64) -> Result<Vec<Category>, sqlx::Error> {
    sqlx::query_as::<_, Category>(
        "SELECT id, name, parent_id FROM categories WHERE parent_id = $1 ORDER BY id",
    )
    .bind(parent_id)
    .fetch_all(pool)
    .await
}

pub async fn category_by_id(pool: &PgPool, id: i64) -> Result<Option<Category>, sqlx::Error> {
    sqlx::query_as::<_, Category>("SELECT id, name, parent_id FROM categories WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}
