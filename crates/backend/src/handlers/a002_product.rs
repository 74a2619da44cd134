use axum::{extract::Path, Json};

use crate::domain::a002_product;

/// GET /api/product
pub async fn list_all(
) -> Result<Json<Vec<contracts::domain::a002_product::Product>>, axum::http::StatusCode> {
    match a002_product::service::list_all().await {
        Ok(v) => Ok(Json(v)),
        Err(e) => {
            tracing::error!("Failed to list products: {}", e);
            Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/product/sku/:sku
pub async fn get_by_sku(
    Path(sku): Path<String>,
) -> Result<Json<contracts::domain::a002_product::Product>, axum::http::StatusCode> {
    match a002_product::service::get_by_sku(&sku).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(axum::http::StatusCode::NOT_FOUND),
        Err(_) => Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR),
    }
}
