use sqlx::PgPool;

use super::models::Customer;

pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Customer>, sqlx::Error> {
    sqlx::query_as::<_, Customer>(
        "SELECT id, name, email, phone, password, created_at FROM customers WHERE email = $1",
    )
    .bind(email)
    .fetch_optional(pool)
    .await
}

pub async fn email_exists(pool: &PgPool, email: &str) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM customers WHERE email = $1)")
        .bind(email)
        .fetch_one(pool)
        .await
}

/// Insert a new customer and return its id. Violating the unique index on
/// email surfaces as `sqlx::Error::Database`; the caller maps that to a
/// conflict.
pub async fn insert(
    pool: &PgPool,
    name: &str,
    email: &str,
    phone: &str,
    password_hash: &str,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar(
        "INSERT INTO customers (name, email, phone, password) VALUES ($1, $2, $3, $4) RETURNING id",
    )
    .bind(name)
    .bind(email)
    .bind(phone)
    .bind(password_hash)
    .fetch_one(pool)
    .await
}
