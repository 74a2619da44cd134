use contracts::domain::a001_brand::BrandId;
use contracts::domain::a002_product::{NewProduct, ProductUpdate};
use contracts::usecases::common::UseCaseMetadata;
use contracts::usecases::u501_bulk_product_import::{
    BatchResult, BulkProductImport, ConfirmResponse, ImportAction, ImportProgress, ImportRecord, ImportRequest,
    ImportStartStatus, ImportStatus, ImportSummary, PrepareResponse, SummaryKind,
    ValidateResponse,
};
use futures::future::join_all;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use super::brand_directory::{BrandDirectory, BrandSource};
use super::csv_parser::parse_csv;
use super::error::{ImportError, StoreError};
use super::product_store::ProductStore;
use super::progress_tracker::ProgressTracker;
use super::summary;
use crate::shared::config::ImportConfig;

/// Параметры прогона
#[derive(Debug, Clone)]
pub struct ExecutorSettings {
    pub chunk_size: usize,
    pub chunk_pause: Duration,
}

impl Default for ExecutorSettings {
    fn default() -> Self {
        Self {
            chunk_size: 500,
            chunk_pause: Duration::from_millis(100),
        }
    }
}

impl From<&ImportConfig> for ExecutorSettings {
    fn from(config: &ImportConfig) -> Self {
        Self {
            chunk_size: config.chunk_size.max(1),
            chunk_pause: config.chunk_pause(),
        }
    }
}

impl ExecutorSettings {
    pub fn total_batches(&self, total: usize) -> usize {
        total.div_ceil(self.chunk_size.max(1))
    }
}

/// Итог прогона
#[derive(Debug, Clone)]
pub struct ImportOutcome {
    pub results: Vec<BatchResult>,
    pub summary: ImportSummary,
    /// Сколько пачек обработано
    pub batches: usize,
}

/// Executor для UseCase массового импорта товаров из CSV
pub struct ImportExecutor {
    store: Arc<dyn ProductStore>,
    brands: Arc<dyn BrandSource>,
    pub progress_tracker: Arc<ProgressTracker>,
    settings: ExecutorSettings,
}

impl ImportExecutor {
    pub fn new(
        progress_tracker: Arc<ProgressTracker>,
        store: Arc<dyn ProductStore>,
        brands: Arc<dyn BrandSource>,
        settings: ExecutorSettings,
    ) -> Self {
        Self {
            store,
            brands,
            progress_tracker,
            settings,
        }
    }

    /// Только разобрать и проверить CSV (сессия не создается)
    pub fn validate(&self, request: &ImportRequest) -> ValidateResponse {
        let outcome = parse_csv(&request.csv_text);
        let can_submit = outcome.can_submit();
        ValidateResponse {
            records: outcome.records,
            errors: outcome.errors,
            can_submit,
        }
    }

    /// Разобрать CSV и создать сессию импорта (ready или rejected)
    pub fn prepare(&self, request: ImportRequest) -> PrepareResponse {
        let session_id = Uuid::new_v4().to_string();
        self.progress_tracker
            .create_session(session_id.clone(), request.file_name.clone());

        let outcome = parse_csv(&request.csv_text);
        let mut errors = outcome.errors;
        if errors.is_empty() && outcome.records.is_empty() {
            errors.push("CSV contains no product rows".to_string());
        }
        let record_count = outcome.records.len();

        let status = self
            .progress_tracker
            .set_validation(&session_id, outcome.records, errors.clone())
            .unwrap_or(ImportStatus::Rejected);

        tracing::info!(
            "Import session {} prepared: records={}, errors={}, status={:?}",
            session_id,
            record_count,
            errors.len(),
            status
        );

        PrepareResponse {
            session_id,
            status,
            record_count,
            errors,
        }
    }

    /// Загрузка файла: поддерживается только .csv
    pub fn prepare_upload(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<PrepareResponse, ImportError> {
        check_file_type(file_name)?;
        let csv_text = String::from_utf8(bytes).map_err(|_| ImportError::InvalidEncoding)?;
        Ok(self.prepare(ImportRequest {
            csv_text,
            file_name: Some(file_name.to_string()),
        }))
    }

    /// Подтвердить импорт: запускает фоновую обработку сессии
    pub fn confirm(self: &Arc<Self>, session_id: &str) -> Result<ConfirmResponse, ImportError> {
        let settings = self.settings.clone();
        let records = self
            .progress_tracker
            .begin_processing(session_id, |total| settings.total_batches(total))?;

        let executor = Arc::clone(self);
        let sid = session_id.to_string();
        let record_count = records.len();

        tokio::spawn(async move {
            if let Err(e) = executor.process_records(&sid, records).await {
                tracing::error!("Import {} failed: {}", sid, e);
                executor
                    .progress_tracker
                    .fail_session(&sid, format!("Upload failed: {}", e));
            }
        });

        Ok(ConfirmResponse {
            session_id: session_id.to_string(),
            status: ImportStartStatus::Started,
            message: format!("Processing {} products", record_count),
        })
    }

    pub fn get_progress(&self, session_id: &str) -> Option<ImportProgress> {
        self.progress_tracker.get_progress(session_id)
    }

    pub fn close(&self, session_id: &str) -> bool {
        self.progress_tracker.close_session(session_id)
    }

    /// Обработать строки пачками
    ///
    /// Пачки идут последовательно, строки внутри пачки параллельно.
    /// Ошибка хранилища прерывает прогон, оставшиеся пачки не выполняются.
    pub async fn process_records(
        &self,
        session_id: &str,
        records: Vec<ImportRecord>,
    ) -> Result<ImportOutcome, ImportError> {
        let started_at = std::time::Instant::now();

        let directory = BrandDirectory::load(self.brands.as_ref())
            .await
            .map_err(|e| ImportError::BrandDirectory(e.to_string()))?;

        let total = records.len();
        let chunk_size = self.settings.chunk_size.max(1);
        let total_batches = self.settings.total_batches(total);

        tracing::info!(
            "Starting {} {}: records={}, batches={}, brands={}",
            BulkProductImport::full_name(),
            session_id,
            total,
            total_batches,
            directory.len()
        );

        let mut results: Vec<BatchResult> = Vec::with_capacity(total);
        let mut batches = 0;

        for (idx, chunk) in records.chunks(chunk_size).enumerate() {
            let chunk_results = join_all(
                chunk
                    .iter()
                    .cloned()
                    .map(|record| self.process_record(record, &directory)),
            )
            .await;

            let mut completed = Vec::with_capacity(chunk_results.len());
            let mut store_error: Option<StoreError> = None;
            for result in chunk_results {
                match result {
                    Ok(r) => completed.push(r),
                    Err(e) => {
                        if store_error.is_none() {
                            store_error = Some(e);
                        }
                    }
                }
            }

            batches = idx + 1;
            self.progress_tracker
                .record_batch(session_id, batches, total_batches, total, &completed);
            results.extend(completed);

            if let Some(e) = store_error {
                return Err(e.into());
            }

            tracing::info!(
                "Import {}: batch {}/{} done ({}/{})",
                session_id,
                batches,
                total_batches,
                results.len(),
                total
            );

            if batches < total_batches && !self.settings.chunk_pause.is_zero() {
                tokio::time::sleep(self.settings.chunk_pause).await;
            }
        }

        let summary = summary::summarize(&results);
        summary::notify(session_id, &summary);

        let status = match summary.kind {
            SummaryKind::AllSucceeded => ImportStatus::Completed,
            SummaryKind::PartialFailure | SummaryKind::AllFailed => {
                ImportStatus::CompletedWithErrors
            }
        };
        self.progress_tracker
            .complete_session(session_id, status, summary.clone());

        tracing::info!(
            "Import {} finished: succeeded={}, failed={}, elapsed_ms={}",
            session_id,
            summary.succeeded,
            summary.failed,
            started_at.elapsed().as_millis()
        );

        Ok(ImportOutcome {
            results,
            summary,
            batches,
        })
    }

    /// Обработать одну строку: найти бренд и выполнить действие
    async fn process_record(
        &self,
        record: ImportRecord,
        directory: &BrandDirectory,
    ) -> Result<BatchResult, StoreError> {
        let action = record.parsed_action();

        // remove без бренда: бренд не нужен, удаление идет только по SKU
        let brand_id = if action == Some(ImportAction::Remove) && record.brand.trim().is_empty() {
            None
        } else {
            match directory.resolve(&record.brand) {
                Some(id) => Some(id),
                None => {
                    let message = format!(
                        "Brand \"{}\" not found. Please create the brand first.",
                        record.brand
                    );
                    tracing::warn!("Line {} (SKU {}): {}", record.line, record.sku, message);
                    return Ok(BatchResult::failed(record, message, false));
                }
            }
        };

        let Some(action) = action else {
            let message = format!("Unknown action: {}", record.action);
            return Ok(BatchResult::failed(record, message, true));
        };

        let ok = match (action, brand_id) {
            (ImportAction::Add, Some(brand_id)) => {
                self.store
                    .create_many(&[new_product(&record, brand_id)])
                    .await?
            }
            (ImportAction::Update, Some(brand_id)) => {
                self.store
                    .update_many(&[product_update(&record, brand_id)])
                    .await?
            }
            (ImportAction::Remove, _) => {
                self.store
                    .delete_many_by_sku(std::slice::from_ref(&record.sku))
                    .await?
            }
            // add/update всегда имеют brand_id после resolve
            (_, None) => false,
        };

        if ok {
            Ok(BatchResult::succeeded(record))
        } else {
            let message = format!("Failed to {} product with SKU: {}", action, record.sku);
            tracing::error!("Line {}: {}", record.line, message);
            Ok(BatchResult::failed(record, message, true))
        }
    }
}

fn new_product(record: &ImportRecord, brand_id: BrandId) -> NewProduct {
    NewProduct {
        sku: record.sku.clone(),
        brand_id,
        product_name: record.product_name.clone(),
        description: record.description.clone(),
        cost_price: record.cost_price,
        selling_price: record.selling_price,
        color: record.color.clone(),
        size: record.size.clone(),
        category: record.category.clone(),
        image_url: record.image_url.clone(),
    }
}

fn product_update(record: &ImportRecord, brand_id: BrandId) -> ProductUpdate {
    ProductUpdate {
        sku: record.sku.clone(),
        brand_id,
        product_name: record.product_name.clone(),
        description: record.description.clone(),
        cost_price: record.cost_price,
        selling_price: record.selling_price,
        color: record.color.clone(),
        size: record.size.clone(),
        category: record.category.clone(),
        image_url: record.image_url.clone(),
    }
}

/// Проверить расширение загружаемого файла
pub fn check_file_type(file_name: &str) -> Result<(), ImportError> {
    let extension = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "csv" => Ok(()),
        "xls" | "xlsx" => Err(ImportError::ExcelNotSupported),
        _ => Err(ImportError::UnsupportedFile(file_name.to_string())),
    }
}
