use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::handlers;

/// Конфигурация всех роутов приложения
pub fn configure_routes() -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // A001 Brand handlers
        .route(
            "/api/brand",
            get(handlers::a001_brand::list_all).post(handlers::a001_brand::create),
        )
        .route("/api/brand/:id", get(handlers::a001_brand::get_by_id))
        // A002 Product handlers
        .route("/api/product", get(handlers::a002_product::list_all))
        .route(
            "/api/product/sku/:sku",
            get(handlers::a002_product::get_by_sku),
        )
        // ========================================
        // USECASES
        // ========================================
        // UseCase u501: Bulk product import
        .route(
            "/api/u501/import/template",
            get(handlers::usecases::u501_template),
        )
        .route(
            "/api/u501/import/validate",
            post(handlers::usecases::u501_validate),
        )
        .route(
            "/api/u501/import/prepare",
            post(handlers::usecases::u501_prepare),
        )
        .route(
            "/api/u501/import/upload",
            post(handlers::usecases::u501_upload),
        )
        .route(
            "/api/u501/import/:session_id/confirm",
            post(handlers::usecases::u501_confirm),
        )
        .route(
            "/api/u501/import/:session_id/progress",
            get(handlers::usecases::u501_get_progress),
        )
        .route(
            "/api/u501/import/:session_id",
            delete(handlers::usecases::u501_close),
        )
}
