pub mod handlers;

pub use handlers::*;

use crate::service::ComparisonService;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

/// 构建路由
pub fn router(service: Arc<ComparisonService>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/fields", get(list_fields))
        .route("/api/extract", post(extract))
        .route("/api/compare", post(compare))
        .route("/api/compare/csv", post(compare_csv))
        .with_state(service)
}
