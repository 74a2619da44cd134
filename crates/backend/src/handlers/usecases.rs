use axum::{
    extract::{Multipart, Path},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use contracts::usecases::common::{UseCaseError, UseCaseMetadata};
use contracts::usecases::u501_bulk_product_import::{
    BulkProductImport, ConfirmResponse, ImportProgress, ImportRequest, PrepareResponse,
    ValidateResponse,
};
use once_cell::sync::OnceCell;
use std::sync::Arc;

use crate::shared::config::ImportConfig;
use crate::usecases::u501_bulk_product_import::{
    self as u501, DbBrandSource, DbProductStore, ExecutorSettings, ImportError, ImportExecutor,
    ProgressTracker,
};

// ============================================================================
// UseCase u501: Bulk product import
// ============================================================================

static IMPORT_EXECUTOR: OnceCell<Arc<ImportExecutor>> = OnceCell::new();

/// Создать executor импорта (вызывается один раз при старте)
pub fn init_import_executor(config: &ImportConfig) -> Arc<ImportExecutor> {
    IMPORT_EXECUTOR
        .get_or_init(|| {
            tracing::info!("Registering use case {}", BulkProductImport::label());
            let tracker = Arc::new(ProgressTracker::new());
            Arc::new(ImportExecutor::new(
                tracker,
                Arc::new(DbProductStore),
                Arc::new(DbBrandSource),
                ExecutorSettings::from(config),
            ))
        })
        .clone()
}

fn executor() -> Result<&'static Arc<ImportExecutor>, (StatusCode, Json<UseCaseError>)> {
    IMPORT_EXECUTOR.get().ok_or_else(|| {
        tracing::error!("Import executor is not initialized");
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(UseCaseError::internal("Import executor is not initialized")),
        )
    })
}

fn error_response(err: ImportError) -> (StatusCode, Json<UseCaseError>) {
    let status = match &err {
        ImportError::SessionNotFound(_) => StatusCode::NOT_FOUND,
        ImportError::NotReady { .. } => StatusCode::CONFLICT,
        ImportError::ExcelNotSupported
        | ImportError::UnsupportedFile(_)
        | ImportError::InvalidEncoding => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        ImportError::BrandDirectory(_) | ImportError::Store(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    if status.is_server_error() {
        tracing::error!("Import error: {}", err);
    } else {
        tracing::warn!("Import error: {}", err);
    }
    (status, Json(UseCaseError::from(err)))
}

/// GET /api/u501/import/template
pub async fn u501_template() -> Result<impl IntoResponse, StatusCode> {
    let csv = u501::template::csv_template().map_err(|e| {
        tracing::error!("Failed to build CSV template: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!(
                    "attachment; filename=\"{}\"",
                    u501::template::TEMPLATE_FILE_NAME
                ),
            ),
        ],
        csv,
    ))
}

/// POST /api/u501/import/validate
pub async fn u501_validate(
    Json(request): Json<ImportRequest>,
) -> Result<Json<ValidateResponse>, (StatusCode, Json<UseCaseError>)> {
    Ok(Json(executor()?.validate(&request)))
}

/// POST /api/u501/import/prepare
pub async fn u501_prepare(
    Json(request): Json<ImportRequest>,
) -> Result<Json<PrepareResponse>, (StatusCode, Json<UseCaseError>)> {
    Ok(Json(executor()?.prepare(request)))
}

/// POST /api/u501/import/upload (multipart, поле `file`)
pub async fn u501_upload(
    mut multipart: Multipart,
) -> Result<Json<PrepareResponse>, (StatusCode, Json<UseCaseError>)> {
    let executor = executor()?;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                tracing::warn!("Invalid multipart payload: {}", e);
                return Err((
                    StatusCode::BAD_REQUEST,
                    Json(UseCaseError::validation(format!(
                        "Invalid multipart payload: {}",
                        e
                    ))),
                ));
            }
        };

        if field.name() != Some("file") {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        let bytes = field.bytes().await.map_err(|e| {
            (
                StatusCode::BAD_REQUEST,
                Json(UseCaseError::validation(format!(
                    "Failed to read uploaded file: {}",
                    e
                ))),
            )
        })?;

        tracing::info!("Received import file {} ({} bytes)", file_name, bytes.len());

        return executor
            .prepare_upload(&file_name, bytes.to_vec())
            .map(Json)
            .map_err(error_response);
    }

    Err((
        StatusCode::BAD_REQUEST,
        Json(UseCaseError::validation("Multipart field `file` is required")),
    ))
}

/// POST /api/u501/import/:session_id/confirm
pub async fn u501_confirm(
    Path(session_id): Path<String>,
) -> Result<Json<ConfirmResponse>, (StatusCode, Json<UseCaseError>)> {
    let executor = executor()?;
    executor.confirm(&session_id).map(Json).map_err(|e| {
        // Для отклоненной сессии возвращаем ошибки валидации
        let details = match &e {
            ImportError::NotReady { .. } => executor
                .get_progress(&session_id)
                .map(|p| p.validation_errors)
                .unwrap_or_default(),
            _ => Vec::new(),
        };
        let (status, Json(err)) = error_response(e);
        (status, Json(err.with_details(details)))
    })
}

/// GET /api/u501/import/:session_id/progress
pub async fn u501_get_progress(
    Path(session_id): Path<String>,
) -> Result<Json<ImportProgress>, StatusCode> {
    let executor = IMPORT_EXECUTOR
        .get()
        .ok_or(StatusCode::SERVICE_UNAVAILABLE)?;
    match executor.get_progress(&session_id) {
        Some(progress) => Ok(Json(progress)),
        None => Err(StatusCode::NOT_FOUND),
    }
}

/// DELETE /api/u501/import/:session_id
pub async fn u501_close(Path(session_id): Path<String>) -> StatusCode {
    match IMPORT_EXECUTOR.get() {
        Some(executor) if executor.close(&session_id) => StatusCode::NO_CONTENT,
        Some(_) => StatusCode::NOT_FOUND,
        None => StatusCode::SERVICE_UNAVAILABLE,
    }
}
