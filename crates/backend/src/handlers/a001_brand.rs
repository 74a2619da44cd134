use axum::{extract::Path, Json};
use serde_json::json;

use crate::domain::a001_brand;

/// GET /api/brand
pub async fn list_all(
) -> Result<Json<Vec<contracts::domain::a001_brand::Brand>>, axum::http::StatusCode> {
    match a001_brand::service::list_all().await {
        Ok(v) => Ok(Json(v)),
        Err(e) => {
            tracing::error!("Failed to list brands: {}", e);
            Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/brand/:id
pub async fn get_by_id(
    Path(id): Path<String>,
) -> Result<Json<contracts::domain::a001_brand::Brand>, axum::http::StatusCode> {
    let uuid = match uuid::Uuid::parse_str(&id) {
        Ok(uuid) => uuid,
        Err(_) => return Err(axum::http::StatusCode::BAD_REQUEST),
    };
    match a001_brand::service::get_by_id(uuid).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(axum::http::StatusCode::NOT_FOUND),
        Err(_) => Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR),
    }
}

/// POST /api/brand
pub async fn create(
    Json(dto): Json<contracts::domain::a001_brand::BrandDto>,
) -> Result<Json<serde_json::Value>, (axum::http::StatusCode, String)> {
    match a001_brand::service::create(dto).await {
        Ok(id) => Ok(Json(json!({"id": id.to_string()}))),
        Err(e) => {
            tracing::warn!("Failed to create brand: {}", e);
            Err((axum::http::StatusCode::BAD_REQUEST, e.to_string()))
        }
    }
}
