use std::sync::Arc;

use sqlx::PgPool;

use crate::config::AppConfig;
use crate::services::mailer::Mailer;

/// Shared process-wide resources: configuration, the bounded connection
/// pool and the outbound mail client. Built once in `main`, cloned into
/// handlers through axum's `State`.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub pool: PgPool,
    pub mailer: Mailer,
}
